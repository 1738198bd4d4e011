//! PDF loading, text extraction and image extraction.

mod decode;
mod images;
mod options;
mod pdf_parser;

pub use options::{ErrorMode, ExtractOptions};
pub use pdf_parser::PdfParser;
