//! PDF header sniffing for the upload boundary.
//!
//! The loader itself accepts whatever lopdf accepts. Callers that receive
//! untrusted files (the CLI) use these helpers to reject obvious non-PDF
//! input before paying for a full parse.

use crate::error::{Error, Result};

/// Header found at the start of a PDF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfHeader {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
    /// Byte offset of the `%PDF-` marker.
    pub offset: usize,
}

impl std::fmt::Display for PdfHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3;

/// Readers tolerate junk before the marker as long as it appears early.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Locate and validate the `%PDF-x.y` marker.
///
/// # Example
/// ```
/// use artpdf::detect::sniff_header;
///
/// let header = sniff_header(b"%PDF-1.7\n").unwrap();
/// assert_eq!(header.version, "1.7");
/// ```
pub fn sniff_header(data: &[u8]) -> Result<PdfHeader> {
    let window = &data[..data.len().min(HEADER_SEARCH_WINDOW)];
    let offset = window
        .windows(PDF_MAGIC.len())
        .position(|w| w == PDF_MAGIC)
        .ok_or(Error::UnknownFormat)?;

    let start = offset + PDF_MAGIC.len();
    let version_bytes = data
        .get(start..start + VERSION_LEN)
        .ok_or(Error::UnknownFormat)?;

    match version_bytes {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => Ok(PdfHeader {
            version: format!("{}.{}", *major as char, *minor as char),
            offset,
        }),
        _ => Err(Error::UnknownFormat),
    }
}

/// Check if bytes look like a PDF document.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    sniff_header(data).is_ok()
}
