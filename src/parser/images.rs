//! Embedded image discovery.
//!
//! Pages are visited in page order. Within a page, image XObjects are taken
//! in the order the resource dictionary lists them, descending into Form
//! XObjects where they appear.

use std::collections::HashSet;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::{ExtractedImage, ImageExtraction, ImageFailure};

use super::decode::decode_image_stream;
use super::options::{ErrorMode, ExtractOptions};

/// Limit on `/Parent` hops when looking for inherited page resources.
const MAX_PARENT_DEPTH: usize = 32;

/// An image XObject found on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ImageRef {
    name: String,
    id: ObjectId,
}

/// Walks a document and decodes its images.
pub(crate) struct ImageExtractor<'a> {
    doc: &'a LopdfDocument,
    options: &'a ExtractOptions,
}

impl<'a> ImageExtractor<'a> {
    pub(crate) fn new(doc: &'a LopdfDocument, options: &'a ExtractOptions) -> Self {
        Self { doc, options }
    }

    /// Decode every image, isolating failures according to the error mode.
    pub(crate) fn extract(&self) -> Result<ImageExtraction> {
        let mut extraction = ImageExtraction::new();
        let mut discovered = 0;

        for (page_num, page_id) in self.doc.get_pages() {
            let refs = self.page_images(page_id);
            log::debug!("Page {}: {} image resources", page_num, refs.len());

            for image_ref in refs {
                discovered += 1;
                match self.decode(image_ref.id) {
                    Ok(image) => {
                        let index = extraction.images.len() + 1;
                        extraction.images.push(ExtractedImage::new(index, image));
                    }
                    Err(e) => {
                        if self.options.error_mode == ErrorMode::Strict {
                            return Err(Error::ImageExtract(format!(
                                "Page {} resource {}: {}",
                                page_num, image_ref.name, e
                            )));
                        }
                        log::warn!(
                            "Skipping image {} on page {}: {}",
                            image_ref.name,
                            page_num,
                            e
                        );
                        extraction.failures.push(ImageFailure {
                            index: discovered,
                            page: page_num,
                            name: image_ref.name,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        Ok(extraction)
    }

    fn decode(&self, id: ObjectId) -> Result<image::DynamicImage> {
        let stream = self.doc.get_object(id)?.as_stream()?;
        decode_image_stream(self.doc, stream, self.options.max_image_pixels)
    }

    /// Image XObjects of a page, each object listed once.
    fn page_images(&self, page_id: ObjectId) -> Vec<ImageRef> {
        let mut seen = HashSet::new();
        let mut refs = Vec::new();
        if let Some(resources) = self.page_resources(page_id) {
            self.collect_images(resources, 0, &mut seen, &mut refs);
        }
        refs
    }

    /// Resource dictionary of a page, inherited from `/Pages` ancestors if absent.
    fn page_resources(&self, page_id: ObjectId) -> Option<&'a Dictionary> {
        let mut node = self.doc.get_dictionary(page_id).ok()?;
        for _ in 0..MAX_PARENT_DEPTH {
            if let Ok(res) = node.get(b"Resources") {
                return self.resolve_dict(res);
            }
            let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
            node = self.doc.get_dictionary(parent).ok()?;
        }
        None
    }

    fn collect_images(
        &self,
        resources: &'a Dictionary,
        depth: usize,
        seen: &mut HashSet<ObjectId>,
        out: &mut Vec<ImageRef>,
    ) {
        let Some(xobjects) = resources
            .get(b"XObject")
            .ok()
            .and_then(|x| self.resolve_dict(x))
        else {
            return;
        };

        for (name, obj) in xobjects.iter() {
            let Ok(id) = obj.as_reference() else {
                continue;
            };
            if !seen.insert(id) {
                continue;
            }
            let Ok(Object::Stream(stream)) = self.doc.get_object(id) else {
                continue;
            };

            let subtype = stream.dict.get(b"Subtype").and_then(Object::as_name).ok();
            match subtype {
                Some(b"Image") => out.push(ImageRef {
                    name: String::from_utf8_lossy(name).to_string(),
                    id,
                }),
                Some(b"Form") if depth < self.options.max_form_depth => {
                    if let Some(form_res) = stream
                        .dict
                        .get(b"Resources")
                        .ok()
                        .and_then(|r| self.resolve_dict(r))
                    {
                        self.collect_images(form_res, depth + 1, seen, out);
                    }
                }
                _ => {}
            }
        }
    }

    fn resolve_dict(&self, obj: &'a Object) -> Option<&'a Dictionary> {
        match obj {
            Object::Reference(r) => self.doc.get_dictionary(*r).ok(),
            Object::Dictionary(d) => Some(d),
            _ => None,
        }
    }
}
