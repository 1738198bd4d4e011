//! Result types shared by the extractors, the classifier and the renderers.

mod artwork;
mod document;
mod resource;

pub use artwork::{ArtworkInfo, Category, Classification, MODEL_UNAVAILABLE};
pub use document::{ExtractionReport, Metadata};
pub use resource::{ExtractedImage, ImageExtraction, ImageFailure};
