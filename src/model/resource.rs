//! Embedded raster images and their extraction outcome.

use image::DynamicImage;
use serde::Serialize;

/// A decoded embedded image.
///
/// Only the 1-based ordinal survives decoding; the source page and object
/// are not retained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedImage {
    /// Position in extraction order, starting at 1.
    pub index: usize,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// Decoded pixels
    #[serde(skip_serializing)]
    pub image: DynamicImage,
}

impl ExtractedImage {
    /// Wrap a decoded bitmap.
    pub fn new(index: usize, image: DynamicImage) -> Self {
        Self {
            index,
            width: image.width(),
            height: image.height(),
            image,
        }
    }

    /// Caption used when displaying the image.
    pub fn caption(&self) -> String {
        format!("Image {}", self.index)
    }

    /// File name used when writing the image to disk.
    pub fn file_name(&self) -> String {
        format!("image_{}.png", self.index)
    }
}

/// An embedded image that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageFailure {
    /// Position among all discovered image resources, starting at 1.
    pub index: usize,

    /// Page the resource was found on (1-indexed).
    pub page: u32,

    /// Resource name in the page's XObject dictionary (e.g. "Im0").
    pub name: String,

    /// Why decoding failed.
    pub reason: String,
}

/// Result of extracting all images from a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageExtraction {
    /// Successfully decoded images, in page order.
    pub images: Vec<ExtractedImage>,

    /// Resources that were skipped.
    pub failures: Vec<ImageFailure>,
}

impl ImageExtraction {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of decoded images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Check if no image was decoded.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Check if every discovered resource decoded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Indices of failed resources.
    pub fn failed_indices(&self) -> Vec<usize> {
        self.failures.iter().map(|f| f.index).collect()
    }
}
