//! Rendering extraction results for display.

mod html;
mod images;
mod json;

pub use html::to_html;
pub use images::{to_png, write_images};
pub use json::{to_json, JsonFormat};
