//! # artpdf
//!
//! Extract text, embedded images and artwork information from PDF documents
//! such as exhibition and auction catalogs.
//!
//! ## Quick Start
//!
//! ```no_run
//! use artpdf::{ArtworkClassifier, ArtworkPdfExtractor, KeywordRules};
//! use std::path::Path;
//!
//! fn main() -> artpdf::Result<()> {
//!     let data = std::fs::read("catalog.pdf")?;
//!     let extractor = ArtworkPdfExtractor::from_bytes(&data)?;
//!
//!     let classifier = ArtworkClassifier::from_model_path(
//!         Some(Path::new("model.json")),
//!         KeywordRules::english(),
//!     );
//!
//!     let report = extractor.process(&classifier)?;
//!     println!("{}", report.text);
//!     println!("{}", artpdf::render::to_json(&report.artwork, Default::default())?);
//!     println!("{} images", report.images.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Text**: page texts concatenated in page order
//! - **Artwork information**: a pretrained annotator tags persons and works of
//!   art; sentences mentioning dates or techniques are collected by keyword
//! - **Images**: every embedded raster image decoded to a bitmap; failures are
//!   reported per image instead of aborting the document
//!
//! Without a model the classifier degrades to `{"error": "NLP model unavailable"}`
//! while text and images are still extracted.

pub mod classify;
pub mod detect;
pub mod error;
pub mod model;
pub mod nlp;
pub mod parser;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use classify::{ArtworkClassifier, KeywordRules, ModelState};
pub use detect::{is_pdf_bytes, sniff_header, PdfHeader};
pub use error::{Error, Result};
pub use model::{
    ArtworkInfo, Category, Classification, ExtractedImage, ExtractionReport, ImageExtraction,
    ImageFailure, Metadata,
};
pub use nlp::{Annotation, Annotator, EntityLabel, EntitySpan, LexiconModel, SentenceSpan};
pub use parser::{ErrorMode, ExtractOptions, PdfParser};
pub use pipeline::{process_bytes, process_file, ArtworkPdfExtractor};
pub use render::JsonFormat;

use std::path::Path;

/// Extract plain text from a PDF file.
///
/// # Example
///
/// ```no_run
/// let text = artpdf::extract_text("catalog.pdf").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    PdfParser::open(path)?.extract_text()
}

/// Extract all embedded images from a PDF file.
///
/// Undecodable images are listed in [`ImageExtraction::failures`].
pub fn extract_images<P: AsRef<Path>>(path: P) -> Result<ImageExtraction> {
    PdfParser::open(path)?.extract_images()
}
