//! One-document extraction pipeline.

use std::path::Path;

use crate::classify::ArtworkClassifier;
use crate::error::Result;
use crate::model::{Classification, ExtractionReport, ImageExtraction, Metadata};
use crate::parser::{ExtractOptions, PdfParser};

/// Extracts text, artwork information and images from one PDF.
///
/// Each extractor owns its parsed document; dropping the extractor releases
/// it. Build a new one per input.
pub struct ArtworkPdfExtractor {
    parser: PdfParser,
}

impl ArtworkPdfExtractor {
    /// Load a document from memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ExtractOptions::default())
    }

    /// Load a document from memory with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Self> {
        Ok(Self {
            parser: PdfParser::from_bytes_with_options(data, options)?,
        })
    }

    /// Load a document from a file.
    pub fn open<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self> {
        Ok(Self {
            parser: PdfParser::open_with_options(path, options)?,
        })
    }

    pub fn metadata(&self) -> Metadata {
        self.parser.metadata()
    }

    pub fn page_count(&self) -> u32 {
        self.parser.page_count()
    }

    /// Text of all pages in page order.
    pub fn extract_text(&self) -> Result<String> {
        self.parser.extract_text()
    }

    /// All embedded images in page order.
    pub fn extract_images(&self) -> Result<ImageExtraction> {
        self.parser.extract_images()
    }

    /// Classify previously extracted text.
    pub fn identify_artwork_info(
        &self,
        text: &str,
        classifier: &ArtworkClassifier,
    ) -> Classification {
        classifier.classify(text)
    }

    /// Run text extraction, classification and image extraction, in that order.
    pub fn process(&self, classifier: &ArtworkClassifier) -> Result<ExtractionReport> {
        let text = self.extract_text()?;
        log::debug!("Extracted {} bytes of text", text.len());

        let artwork = self.identify_artwork_info(&text, classifier);
        if artwork.is_unavailable() {
            log::warn!("Artwork classification skipped: no model loaded");
        }

        let images = self.extract_images()?;
        log::debug!(
            "Extracted {} images ({} failed)",
            images.len(),
            images.failures.len()
        );

        Ok(ExtractionReport {
            metadata: self.metadata(),
            text,
            artwork,
            images,
        })
    }
}

/// Process a PDF held in memory.
pub fn process_bytes(
    data: &[u8],
    options: ExtractOptions,
    classifier: &ArtworkClassifier,
) -> Result<ExtractionReport> {
    ArtworkPdfExtractor::from_bytes_with_options(data, options)?.process(classifier)
}

/// Process a PDF file.
pub fn process_file<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
    classifier: &ArtworkClassifier,
) -> Result<ExtractionReport> {
    ArtworkPdfExtractor::open(path, options)?.process(classifier)
}
