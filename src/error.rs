//! Error types for artpdf library.

use std::io;
use thiserror::Error;

/// Result type alias for artpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting a PDF.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input does not start with a PDF header.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF structure could not be parsed.
    #[error("Malformed PDF document: {0}")]
    Malformed(String),

    /// The PDF document is encrypted and could not be opened.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text content from a page.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Error extracting an embedded image.
    #[error("Image extraction error: {0}")]
    ImageExtract(String),

    /// The image bytes could not be decoded into a bitmap.
    #[error("Image decoding error: {0}")]
    ImageDecode(String),

    /// The image uses an encoding this crate cannot decode.
    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    /// The annotation model could not be loaded.
    #[error("Model error: {0}")]
    Model(String),

    /// Error during rendering (JSON, HTML, image files).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::Malformed(err.to_string()),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Error::Io(e),
            image::ImageError::Unsupported(e) => Error::UnsupportedImage(e.to_string()),
            _ => Error::ImageDecode(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
