//! Document-level types.

use super::{Classification, ImageExtraction};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything extracted from one document.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    /// Document metadata (title, author, etc.)
    pub metadata: Metadata,

    /// Plain text of all pages, in page order
    pub text: String,

    /// Artwork information found in the text
    pub artwork: Classification,

    /// Embedded images and decoding failures
    pub images: ImageExtraction,
}

impl ExtractionReport {
    /// Word count of the extracted text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Creator application
    pub creator: Option<String>,

    /// PDF producer
    pub producer: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,

    /// PDF version (e.g., "1.7")
    pub pdf_version: String,

    /// Total number of pages
    pub page_count: u32,

    /// Whether the document is encrypted
    pub encrypted: bool,
}

impl Metadata {
    /// Create new metadata with PDF version.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            pdf_version: version.into(),
            ..Default::default()
        }
    }

    /// Labelled Info-dictionary fields that are present, in display order.
    pub fn info_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        let strings = [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("Keywords", &self.keywords),
            ("Creator", &self.creator),
            ("Producer", &self.producer),
        ];
        for (label, value) in strings {
            if let Some(value) = value {
                fields.push((label, value.clone()));
            }
        }
        if let Some(created) = self.created {
            fields.push(("Created", created.to_rfc3339()));
        }
        if let Some(modified) = self.modified {
            fields.push(("Modified", modified.to_rfc3339()));
        }
        fields
    }
}
