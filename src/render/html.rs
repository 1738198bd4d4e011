//! Single-page HTML report.
//!
//! Mirrors the upload page layout: extracted text, artwork information as
//! JSON, then the images in a three-column grid with their ordinal caption.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::error::Result;
use crate::model::ExtractionReport;

use super::images::to_png;
use super::json::{to_json, JsonFormat};

const STYLE: &str = "body{font-family:sans-serif;max-width:1100px;margin:2em auto;padding:0 1em}\
textarea{width:100%;height:200px;font-family:monospace}\
pre{background:#f5f5f5;padding:1em;overflow:auto}\
.grid{display:grid;grid-template-columns:repeat(3,1fr);gap:1em}\
figure{margin:0}figure img{width:100%;height:auto}\
figcaption{text-align:center;color:#555}\
.failures{color:#a00}";

/// Render a report as a self-contained HTML page.
pub fn to_html(report: &ExtractionReport) -> Result<String> {
    let title = report
        .metadata
        .title
        .as_deref()
        .unwrap_or("Artwork extraction");

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));
    html.push_str(&format!("<h1>{}</h1>\n", escape_html(title)));

    html.push_str("<h2>Extracted text</h2>\n");
    html.push_str(&format!(
        "<textarea readonly>{}</textarea>\n",
        escape_html(&report.text)
    ));

    html.push_str("<h2>Artwork information</h2>\n");
    let json = to_json(&report.artwork, JsonFormat::Pretty)?;
    html.push_str(&format!("<pre>{}</pre>\n", escape_html(&json)));

    html.push_str("<h2>Extracted images</h2>\n");
    if report.images.is_empty() {
        html.push_str("<p>No images found.</p>\n");
    } else {
        html.push_str("<div class=\"grid\">\n");
        for image in &report.images.images {
            let png = to_png(image)?;
            html.push_str(&format!(
                "<figure><img src=\"data:image/png;base64,{}\" alt=\"{caption}\"><figcaption>{caption}</figcaption></figure>\n",
                BASE64.encode(png),
                caption = image.caption()
            ));
        }
        html.push_str("</div>\n");
    }

    if !report.images.failures.is_empty() {
        html.push_str("<ul class=\"failures\">\n");
        for failure in &report.images.failures {
            html.push_str(&format!(
                "<li>Image resource {} (page {}, {}): {}</li>\n",
                failure.index,
                failure.page,
                escape_html(&failure.name),
                escape_html(&failure.reason)
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</body>\n</html>\n");
    Ok(html)
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
