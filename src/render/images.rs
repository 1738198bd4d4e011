//! Image output: PNG files and PNG bytes.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::ImageFormat;

use crate::error::{Error, Result};
use crate::model::{ExtractedImage, ImageExtraction};

/// Encode one image as PNG.
pub fn to_png(image: &ExtractedImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    image
        .image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| Error::Render(format!("PNG encoding of {}: {}", image.caption(), e)))?;
    Ok(buf)
}

/// Write every image to `dir` as `image_<n>.png`, creating `dir` if needed.
///
/// Returns the written paths in extraction order.
pub fn write_images<P: AsRef<Path>>(extraction: &ImageExtraction, dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(extraction.images.len());
    for image in &extraction.images {
        let path = dir.join(image.file_name());
        std::fs::write(&path, to_png(image)?)?;
        written.push(path);
    }
    Ok(written)
}
