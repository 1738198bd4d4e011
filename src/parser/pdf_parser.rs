//! PDF document loader and text extractor using lopdf.

use std::io::Read;
use std::path::Path;

use lopdf::Document as LopdfDocument;

use crate::error::{Error, Result};
use crate::model::{ImageExtraction, Metadata};

use super::images::ImageExtractor;
use super::options::ExtractOptions;

/// A parsed PDF document.
///
/// The parsed lopdf document is owned by this value and released when it
/// is dropped, so one parser serves exactly one request.
pub struct PdfParser {
    doc: LopdfDocument,
    options: ExtractOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ExtractOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ExtractOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            lopdf::Error::IO(io) => Error::Malformed(io.to_string()),
            _ => Error::from(e),
        })?;

        log::debug!(
            "Loaded PDF {} with {} pages ({} bytes)",
            doc.version,
            doc.get_pages().len(),
            data.len()
        );

        Ok(Self { doc, options })
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ExtractOptions::default())
    }

    /// Parse a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(
        mut reader: R,
        options: ExtractOptions,
    ) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Options this parser was created with.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Get PDF version.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Extract the text of every page, concatenated in page order.
    ///
    /// Page texts are joined as produced, without any separator.
    pub fn extract_text(&self) -> Result<String> {
        let mut text = String::new();
        for page_num in self.doc.get_pages().keys() {
            text.push_str(&self.extract_page_text(*page_num)?);
        }
        Ok(text)
    }

    /// Extract text from a single page (1-indexed).
    pub fn extract_page_text(&self, page_num: u32) -> Result<String> {
        self.doc
            .extract_text(&[page_num])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_num, e)))
    }

    /// Decode every embedded raster image, in page order.
    pub fn extract_images(&self) -> Result<ImageExtraction> {
        ImageExtractor::new(&self.doc, &self.options).extract()
    }

    /// Extract document metadata.
    pub fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::with_version(self.doc.version.to_string());
        metadata.page_count = self.page_count();
        metadata.encrypted = self.doc.is_encrypted();

        let info_dict = self
            .doc
            .trailer
            .get(b"Info")
            .and_then(|info| match info {
                lopdf::Object::Reference(r) => self.doc.get_dictionary(*r),
                other => other.as_dict(),
            })
            .ok();

        if let Some(info) = info_dict {
            metadata.title = get_string_from_dict(info, b"Title");
            metadata.author = get_string_from_dict(info, b"Author");
            metadata.subject = get_string_from_dict(info, b"Subject");
            metadata.keywords = get_string_from_dict(info, b"Keywords");
            metadata.creator = get_string_from_dict(info, b"Creator");
            metadata.producer = get_string_from_dict(info, b"Producer");
            metadata.created =
                get_string_from_dict(info, b"CreationDate").and_then(|d| parse_pdf_date(&d));
            metadata.modified =
                get_string_from_dict(info, b"ModDate").and_then(|d| parse_pdf_date(&d));
        }

        metadata
    }
}

/// Decode a PDF text string (UTF-16BE with BOM, else UTF-8, else Latin-1).
pub(crate) fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(body) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let utf16: Vec<u16> = body
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn get_string_from_dict(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        lopdf::Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        lopdf::Object::Name(bytes) => Some(String::from_utf8_lossy(bytes).to_string()),
        _ => None,
    }
}

/// Parse a PDF date string (D:YYYYMMDDHHmmSSOHH'mm').
///
/// The timezone suffix is ignored; the timestamp is taken as UTC.
fn parse_pdf_date(s: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let s = s.strip_prefix("D:").unwrap_or(s);

    let field = |range: std::ops::Range<usize>, default: u32| -> Option<u32> {
        match s.get(range) {
            Some(digits) if digits.bytes().all(|b| b.is_ascii_digit()) => digits.parse().ok(),
            Some(_) => None,
            None => Some(default),
        }
    };

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month = field(4..6, 1)?;
    let day = field(6..8, 1)?;
    let hour = field(8..10, 0)?;
    let minute = field(10..12, 0)?;
    let second = field(12..14, 0)?;

    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .map(|dt| chrono::DateTime::from_naive_utc_and_offset(dt, chrono::Utc))
}
