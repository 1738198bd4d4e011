//! In-memory PDF fixtures built with lopdf.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use flate2::write::ZlibEncoder;
use image::{DynamicImage, ImageFormat, RgbImage};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

/// An image to embed on a page.
#[derive(Clone)]
pub enum ImageSpec {
    /// RGB JPEG of the given size and color.
    Jpeg { width: u32, height: u32, rgb: [u8; 3] },
    /// Unfiltered 8-bit RGB samples.
    RawRgb { width: u32, height: u32, rgb: [u8; 3] },
    /// Flate-compressed 8-bit gray samples.
    FlateGray { width: u32, height: u32, level: u8 },
    /// DCTDecode stream that is not a JPEG.
    CorruptJpeg,
    /// JPEG 2000 stream, which is not decoded.
    Jpx,
    /// An image drawn through a Form XObject.
    InForm(Box<ImageSpec>),
}

impl ImageSpec {
    pub fn jpeg(width: u32, height: u32) -> Self {
        ImageSpec::Jpeg {
            width,
            height,
            rgb: [200, 40, 40],
        }
    }

    pub fn raw(width: u32, height: u32) -> Self {
        ImageSpec::RawRgb {
            width,
            height,
            rgb: [10, 120, 250],
        }
    }

    pub fn gray(width: u32, height: u32) -> Self {
        ImageSpec::FlateGray {
            width,
            height,
            level: 128,
        }
    }
}

#[derive(Clone, Default)]
pub struct PageSpec {
    pub lines: Vec<String>,
    pub images: Vec<ImageSpec>,
}

impl PageSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(mut self, text: &str) -> Self {
        self.lines.push(text.to_string());
        self
    }

    pub fn image(mut self, image: ImageSpec) -> Self {
        self.images.push(image);
        self
    }
}

/// Builds a small PDF with text lines and images per page.
#[derive(Default)]
pub struct PdfBuilder {
    pages: Vec<PageSpec>,
    title: Option<String>,
    author: Option<String>,
    created: Option<String>,
}

impl PdfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: PageSpec) -> Self {
        self.pages.push(page);
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn author(mut self, author: &str) -> Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn created(mut self, date: &str) -> Self {
        self.created = Some(date.to_string());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });

        let mut kids = Vec::new();
        for page in &self.pages {
            let mut operations = Vec::new();
            for (i, line) in page.lines.iter().enumerate() {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
                operations.push(Operation::new(
                    "Td",
                    vec![72.into(), (700 - 20 * i as i64).into()],
                ));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(line.as_str())],
                ));
                operations.push(Operation::new("ET", vec![]));
            }

            let mut xobjects = Dictionary::new();
            for (i, image) in page.images.iter().enumerate() {
                let name = format!("Im{}", i);
                let id = add_image(&mut doc, image);
                xobjects.set(name.clone(), id);
                operations.push(Operation::new("q", vec![]));
                operations.push(Operation::new(
                    "cm",
                    vec![
                        100.into(),
                        0.into(),
                        0.into(),
                        100.into(),
                        (72 + 110 * i as i64).into(),
                        100.into(),
                    ],
                ));
                operations.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
                operations.push(Operation::new("Q", vec![]));
            }

            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("encode content"),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                    "XObject" => xobjects,
                },
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut info = Dictionary::new();
        if let Some(title) = &self.title {
            info.set("Title", Object::string_literal(title.as_str()));
        }
        if let Some(author) = &self.author {
            info.set("Author", Object::string_literal(author.as_str()));
        }
        if let Some(created) = &self.created {
            info.set("CreationDate", Object::string_literal(created.as_str()));
        }
        if !info.is_empty() {
            let info_id = doc.add_object(info);
            doc.trailer.set("Info", info_id);
        }

        save(&mut doc)
    }
}

/// A one-page document whose only image sits in resources inherited from
/// the `/Pages` node.
pub fn inherited_resources_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let image_id = add_image(&mut doc, &ImageSpec::raw(3, 3));

    let content = b"q 10 0 0 10 0 0 cm /Im0 Do Q".to_vec();
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    save(&mut doc)
}

fn save(doc: &mut Document) -> Vec<u8> {
    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("save pdf");
    buf
}

fn image_dict(width: u32, height: u32, color_space: &str) -> Dictionary {
    dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => width as i64,
        "Height" => height as i64,
        "ColorSpace" => color_space,
        "BitsPerComponent" => 8,
    }
}

fn add_image(doc: &mut Document, spec: &ImageSpec) -> ObjectId {
    match spec {
        ImageSpec::Jpeg { width, height, rgb } => {
            let mut dict = image_dict(*width, *height, "DeviceRGB");
            dict.set("Filter", "DCTDecode");
            doc.add_object(Stream::new(dict, jpeg_bytes(*width, *height, *rgb)))
        }
        ImageSpec::RawRgb { width, height, rgb } => {
            let data = rgb.repeat((*width * *height) as usize);
            doc.add_object(Stream::new(image_dict(*width, *height, "DeviceRGB"), data))
        }
        ImageSpec::FlateGray {
            width,
            height,
            level,
        } => {
            let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
            encoder
                .write_all(&vec![*level; (*width * *height) as usize])
                .expect("deflate");
            let mut dict = image_dict(*width, *height, "DeviceGray");
            dict.set("Filter", "FlateDecode");
            doc.add_object(Stream::new(dict, encoder.finish().expect("deflate")))
        }
        ImageSpec::CorruptJpeg => {
            let mut dict = image_dict(4, 4, "DeviceRGB");
            dict.set("Filter", "DCTDecode");
            doc.add_object(Stream::new(dict, b"this is not a jpeg at all".to_vec()))
        }
        ImageSpec::Jpx => {
            let mut dict = image_dict(4, 4, "DeviceRGB");
            dict.set("Filter", "JPXDecode");
            doc.add_object(Stream::new(dict, vec![0; 16]))
        }
        ImageSpec::InForm(inner) => {
            let inner_id = add_image(doc, inner);
            let form = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Form",
                "BBox" => vec![0.into(), 0.into(), 1.into(), 1.into()],
                "Resources" => dictionary! {
                    "XObject" => dictionary! { "Im0" => inner_id },
                },
            };
            doc.add_object(Stream::new(form, b"q /Im0 Do Q".to_vec()))
        }
    }
}

/// JPEG bytes of a solid-color image.
pub fn jpeg_bytes(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb(rgb)))
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)
        .expect("encode jpeg");
    buf
}
