//! Image XObject decoding.
//!
//! JPEG data is handed to the `image` crate. Everything else is decompressed
//! by lopdf and unpacked from raw samples according to the stream's width,
//! height, bit depth and color space.

use std::io::Read;

use flate2::read::ZlibDecoder;
use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use lopdf::{Dictionary, Document as LopdfDocument, Object, Stream};

use crate::error::{Error, Result};

/// Filters whose output this module cannot decode.
const UNSUPPORTED_FILTERS: &[&str] = &["JPXDecode", "JBIG2Decode", "CCITTFaxDecode"];

/// Limit on nested color space definitions (Indexed base, ICCBased alternate).
const MAX_COLOR_SPACE_DEPTH: usize = 4;

/// Most color components a predictor row may carry per column.
const MAX_PREDICTOR_COLORS: i64 = 32;

/// Decode an image XObject stream into a bitmap.
pub(crate) fn decode_image_stream(
    doc: &LopdfDocument,
    stream: &Stream,
    max_pixels: Option<u64>,
) -> Result<DynamicImage> {
    let dict = &stream.dict;
    let width = dimension(dict, b"Width")?;
    let height = dimension(dict, b"Height")?;

    if let Some(limit) = max_pixels {
        let pixels = width as u64 * height as u64;
        if pixels > limit {
            return Err(Error::ImageExtract(format!(
                "{}x{} image exceeds the {} pixel limit",
                width, height, limit
            )));
        }
    }

    let filters = filter_names(dict);
    for params in decode_params(doc, dict).into_iter().flatten() {
        check_predictor(params, width)?;
    }

    if let Some(last) = filters.last() {
        if last == "DCTDecode" || last == "DCT" {
            let data = inflate_prefix(&stream.content, &filters[..filters.len() - 1])?;
            return Ok(image::load_from_memory_with_format(&data, ImageFormat::Jpeg)?);
        }
        if let Some(name) = filters
            .iter()
            .find(|f| UNSUPPORTED_FILTERS.contains(&f.as_str()))
        {
            return Err(Error::UnsupportedImage(format!("{} filter", name)));
        }
    }

    let samples = if filters.is_empty() {
        stream.content.clone()
    } else {
        stream
            .decompressed_content()
            .map_err(|e| Error::ImageDecode(format!("{}: {}", filters.join(" "), e)))?
    };

    let is_mask = dict
        .get(b"ImageMask")
        .and_then(Object::as_bool)
        .unwrap_or(false);

    let (color_space, bits) = if is_mask {
        (ColorSpace::Gray, 1)
    } else {
        let cs = match dict.get(b"ColorSpace") {
            Ok(obj) => resolve_color_space(doc, obj)?,
            Err(_) => ColorSpace::Gray,
        };
        let bits = dict
            .get(b"BitsPerComponent")
            .and_then(Object::as_i64)
            .unwrap_or(8);
        (cs, bits)
    };

    if !matches!(bits, 1 | 2 | 4 | 8 | 16) {
        return Err(Error::UnsupportedImage(format!("{} bits per component", bits)));
    }
    let bits = bits as u8;

    let raster = RawRaster {
        width,
        height,
        bits,
        color_space: &color_space,
        invert: decode_inverted(dict),
    };
    raster.to_image(&samples)
}

fn dimension(dict: &Dictionary, key: &[u8]) -> Result<u32> {
    let name = String::from_utf8_lossy(key);
    let value = dict
        .get(key)
        .and_then(Object::as_i64)
        .map_err(|_| Error::ImageDecode(format!("missing /{}", name)))?;
    match u32::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(Error::ImageDecode(format!("invalid /{} {}", name, value))),
    }
}

/// `/Filter` as a list of names, in application order.
fn filter_names(dict: &Dictionary) -> Vec<String> {
    let name = |o: &Object| {
        o.as_name()
            .ok()
            .map(|n| String::from_utf8_lossy(n).to_string())
    };
    match dict.get(b"Filter") {
        Ok(Object::Array(arr)) => arr.iter().filter_map(name).collect(),
        Ok(obj) => name(obj).into_iter().collect(),
        Err(_) => Vec::new(),
    }
}

/// `/DecodeParms` dictionaries, one slot per listed entry.
fn decode_params<'a>(doc: &'a LopdfDocument, dict: &'a Dictionary) -> Vec<Option<&'a Dictionary>> {
    let as_dict = |o: &'a Object| -> Option<&'a Dictionary> {
        match o {
            Object::Dictionary(d) => Some(d),
            Object::Reference(r) => doc.get_dictionary(*r).ok(),
            _ => None,
        }
    };
    match dict.get(b"DecodeParms").or_else(|_| dict.get(b"DP")) {
        Ok(Object::Array(arr)) => arr.iter().map(as_dict).collect(),
        Ok(obj) => vec![as_dict(obj)],
        Err(_) => Vec::new(),
    }
}

fn param_i64(params: &Dictionary, key: &[u8], default: i64) -> i64 {
    params.get(key).and_then(Object::as_i64).unwrap_or(default)
}

/// Predictor rows may not describe more samples than an image row holds.
fn check_predictor(params: &Dictionary, width: u32) -> Result<()> {
    if param_i64(params, b"Predictor", 1) <= 1 {
        return Ok(());
    }

    let colors = param_i64(params, b"Colors", 1);
    let bits = param_i64(params, b"BitsPerComponent", 8);
    let columns = param_i64(params, b"Columns", 1);

    let row_bits = columns
        .checked_mul(colors)
        .and_then(|n| n.checked_mul(bits));
    let max_row_bits = i64::from(width) * MAX_PREDICTOR_COLORS * 16;

    match row_bits {
        Some(n) if columns > 0 && colors > 0 && bits > 0 && n <= max_row_bits => Ok(()),
        _ => Err(Error::ImageDecode(format!(
            "invalid predictor parameters: {} columns, {} colors, {} bits for width {}",
            columns, colors, bits, width
        ))),
    }
}

/// Undo the filters applied on top of JPEG data.
fn inflate_prefix(content: &[u8], filters: &[String]) -> Result<Vec<u8>> {
    let mut data = content.to_vec();
    for filter in filters {
        data = match filter.as_str() {
            "FlateDecode" | "Fl" => inflate(&data)?,
            other => return Err(Error::UnsupportedImage(format!("{} before DCTDecode", other))),
        };
    }
    Ok(data)
}

fn inflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    match ZlibDecoder::new(data).read_to_end(&mut out) {
        Ok(_) => Ok(out),
        // Truncated streams are common; keep whatever inflated cleanly.
        Err(e) if !out.is_empty() => {
            log::debug!("Partial Flate stream ({} bytes kept): {}", out.len(), e);
            Ok(out)
        }
        Err(e) => Err(Error::ImageDecode(format!("FlateDecode: {}", e))),
    }
}

/// `/Decode [1 0]` flips sample values.
fn decode_inverted(dict: &Dictionary) -> bool {
    let Ok(Object::Array(arr)) = dict.get(b"Decode") else {
        return false;
    };
    let value = |o: &Object| {
        o.as_float()
            .ok()
            .or_else(|| o.as_i64().ok().map(|i| i as f32))
    };
    matches!(
        (arr.first().and_then(value), arr.get(1).and_then(value)),
        (Some(lo), Some(hi)) if lo > hi
    )
}

/// Color spaces that can be turned into gray or RGB pixels.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ColorSpace {
    Gray,
    Rgb,
    Cmyk,
    Indexed {
        base: Box<ColorSpace>,
        hival: u8,
        lookup: Vec<u8>,
    },
}

impl ColorSpace {
    fn components(&self) -> usize {
        match self {
            ColorSpace::Gray | ColorSpace::Indexed { .. } => 1,
            ColorSpace::Rgb => 3,
            ColorSpace::Cmyk => 4,
        }
    }

    fn from_component_count(n: i64) -> Option<Self> {
        match n {
            1 => Some(ColorSpace::Gray),
            3 => Some(ColorSpace::Rgb),
            4 => Some(ColorSpace::Cmyk),
            _ => None,
        }
    }
}

fn deref<'a>(doc: &'a LopdfDocument, obj: &'a Object) -> Result<&'a Object> {
    match obj {
        Object::Reference(r) => Ok(doc.get_object(*r)?),
        other => Ok(other),
    }
}

pub(crate) fn resolve_color_space(doc: &LopdfDocument, obj: &Object) -> Result<ColorSpace> {
    resolve_nested(doc, obj, 0)
}

fn resolve_nested(doc: &LopdfDocument, obj: &Object, depth: usize) -> Result<ColorSpace> {
    if depth > MAX_COLOR_SPACE_DEPTH {
        return Err(Error::ImageDecode("cyclic color space".to_string()));
    }

    let unsupported = |name: &[u8]| {
        Error::UnsupportedImage(format!("{} color space", String::from_utf8_lossy(name)))
    };

    match deref(doc, obj)? {
        Object::Name(name) => match name.as_slice() {
            b"DeviceGray" | b"G" | b"CalGray" => Ok(ColorSpace::Gray),
            b"DeviceRGB" | b"RGB" | b"CalRGB" => Ok(ColorSpace::Rgb),
            b"DeviceCMYK" | b"CMYK" => Ok(ColorSpace::Cmyk),
            other => Err(unsupported(other)),
        },
        Object::Array(arr) => {
            let family = arr
                .first()
                .and_then(|o| o.as_name().ok())
                .ok_or_else(|| Error::ImageDecode("empty color space array".to_string()))?;
            match family {
                b"CalGray" => Ok(ColorSpace::Gray),
                b"CalRGB" => Ok(ColorSpace::Rgb),
                b"ICCBased" => {
                    let profile = arr
                        .get(1)
                        .ok_or_else(|| Error::ImageDecode("ICCBased without profile".to_string()))?;
                    let dict = &deref(doc, profile)?.as_stream()?.dict;
                    let n = dict.get(b"N").and_then(Object::as_i64).unwrap_or(0);
                    match ColorSpace::from_component_count(n) {
                        Some(cs) => Ok(cs),
                        None => match dict.get(b"Alternate") {
                            Ok(alt) => resolve_nested(doc, alt, depth + 1),
                            Err(_) => Err(Error::UnsupportedImage(format!(
                                "ICCBased color space with {} components",
                                n
                            ))),
                        },
                    }
                }
                b"Indexed" | b"I" => {
                    if arr.len() < 4 {
                        return Err(Error::ImageDecode("short Indexed color space".to_string()));
                    }
                    let base = resolve_nested(doc, &arr[1], depth + 1)?;
                    if matches!(base, ColorSpace::Indexed { .. }) {
                        return Err(unsupported(b"nested Indexed"));
                    }
                    let hival = deref(doc, &arr[2])?.as_i64()?.clamp(0, 255) as u8;
                    let lookup = match deref(doc, &arr[3])? {
                        Object::String(bytes, _) => bytes.clone(),
                        Object::Stream(s) => s
                            .decompressed_content()
                            .unwrap_or_else(|_| s.content.clone()),
                        _ => {
                            return Err(Error::ImageDecode(
                                "Indexed lookup is not a string".to_string(),
                            ))
                        }
                    };
                    Ok(ColorSpace::Indexed {
                        base: Box::new(base),
                        hival,
                        lookup,
                    })
                }
                other => Err(unsupported(other)),
            }
        }
        _ => Err(Error::ImageDecode("invalid color space".to_string())),
    }
}

/// Packed samples plus the information needed to expand them.
struct RawRaster<'a> {
    width: u32,
    height: u32,
    bits: u8,
    color_space: &'a ColorSpace,
    invert: bool,
}

impl RawRaster<'_> {
    fn to_image(&self, data: &[u8]) -> Result<DynamicImage> {
        let comps = self.color_space.components();
        let width = self.width as usize;
        let height = self.height as usize;
        let bits = self.bits as usize;
        let row_len = (width * comps * bits).div_ceil(8);
        let needed = row_len.checked_mul(height);
        if needed.map_or(true, |n| data.len() < n) {
            return Err(Error::ImageDecode(format!(
                "truncated image data: {}x{} needs more than the {} bytes present",
                width,
                height,
                data.len()
            )));
        }

        let indexed = matches!(self.color_space, ColorSpace::Indexed { .. });
        let max = (1u32 << bits) - 1;
        let mut samples = Vec::with_capacity(width * height * comps);
        for row in data.chunks(row_len).take(height) {
            for s in 0..width * comps {
                let raw = read_sample(row, s, bits);
                let raw = if self.invert { max - raw } else { raw };
                let value = if indexed {
                    raw
                } else if bits == 16 {
                    raw >> 8
                } else {
                    raw * 255 / max
                };
                samples.push(value as u8);
            }
        }

        match self.color_space {
            ColorSpace::Gray => gray(self.width, self.height, samples),
            ColorSpace::Rgb => rgb(self.width, self.height, samples),
            ColorSpace::Cmyk => rgb(self.width, self.height, cmyk_to_rgb(&samples)),
            ColorSpace::Indexed {
                base,
                hival,
                lookup,
            } => {
                let base_comps = base.components();
                let mut expanded = Vec::with_capacity(samples.len() * base_comps);
                for idx in samples {
                    let idx = idx.min(*hival) as usize;
                    let start = idx * base_comps;
                    match lookup.get(start..start + base_comps) {
                        Some(entry) => expanded.extend_from_slice(entry),
                        None => expanded.extend(std::iter::repeat(0).take(base_comps)),
                    }
                }
                match base.as_ref() {
                    ColorSpace::Gray => gray(self.width, self.height, expanded),
                    ColorSpace::Rgb => rgb(self.width, self.height, expanded),
                    ColorSpace::Cmyk => rgb(self.width, self.height, cmyk_to_rgb(&expanded)),
                    ColorSpace::Indexed { .. } => Err(Error::UnsupportedImage(
                        "nested Indexed color space".to_string(),
                    )),
                }
            }
        }
    }
}

/// Read the `index`-th sample of `bits` width from a packed row.
fn read_sample(row: &[u8], index: usize, bits: usize) -> u32 {
    match bits {
        8 => row[index] as u32,
        16 => u16::from_be_bytes([row[index * 2], row[index * 2 + 1]]) as u32,
        _ => {
            let bit = index * bits;
            let byte = row[bit / 8];
            let shift = 8 - bits - (bit % 8);
            ((byte >> shift) as u32) & ((1 << bits) - 1)
        }
    }
}

fn cmyk_to_rgb(samples: &[u8]) -> Vec<u8> {
    samples
        .chunks_exact(4)
        .flat_map(|px| {
            let k = 255 - px[3] as u32;
            let channel = |c: u8| ((255 - c as u32) * k / 255) as u8;
            [channel(px[0]), channel(px[1]), channel(px[2])]
        })
        .collect()
}

fn gray(width: u32, height: u32, buf: Vec<u8>) -> Result<DynamicImage> {
    GrayImage::from_raw(width, height, buf)
        .map(DynamicImage::ImageLuma8)
        .ok_or_else(|| Error::ImageDecode("gray buffer size mismatch".to_string()))
}

fn rgb(width: u32, height: u32, buf: Vec<u8>) -> Result<DynamicImage> {
    RgbImage::from_raw(width, height, buf)
        .map(DynamicImage::ImageRgb8)
        .ok_or_else(|| Error::ImageDecode("RGB buffer size mismatch".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::ZlibEncoder;
    use lopdf::{dictionary, StringFormat};
    use std::io::{Cursor, Write};

    fn deflate(data: &[u8]) -> Vec<u8> {
        let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn decode(dict: Dictionary, content: Vec<u8>) -> Result<DynamicImage> {
        let doc = LopdfDocument::with_version("1.5");
        decode_image_stream(&doc, &Stream::new(dict, content), None)
    }

    fn name(n: &str) -> Object {
        Object::Name(n.as_bytes().to_vec())
    }

    fn luma_row(img: &DynamicImage) -> Vec<u8> {
        img.to_luma8().pixels().map(|p| p.0[0]).collect()
    }

    #[test]
    fn test_decode_raw_rgb() {
        let img = decode(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => 2,
                "Height" => 1,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            vec![255, 0, 0, 0, 0, 255],
        )
        .unwrap()
        .to_rgb8();
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(1, 0).0, [0, 0, 255]);
    }

    #[test]
    fn test_decode_one_bit_gray() {
        let img = decode(
            dictionary! {
                "Subtype" => "Image",
                "Width" => 4,
                "Height" => 1,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 1,
            },
            vec![0b1010_0000],
        )
        .unwrap();
        assert_eq!(luma_row(&img), vec![255, 0, 255, 0]);
    }

    #[test]
    fn test_decode_image_mask() {
        let img = decode(
            dictionary! {
                "Subtype" => "Image",
                "Width" => 8,
                "Height" => 1,
                "ImageMask" => true,
                "BitsPerComponent" => 8,
            },
            vec![0b1111_0000],
        )
        .unwrap();
        assert_eq!(luma_row(&img), vec![255, 255, 255, 255, 0, 0, 0, 0]);
    }

    #[test]
    fn test_decode_array_inverts() {
        let img = decode(
            dictionary! {
                "Subtype" => "Image",
                "Width" => 3,
                "Height" => 1,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
                "Decode" => vec![Object::Integer(1), Object::Integer(0)],
            },
            vec![0, 55, 255],
        )
        .unwrap();
        assert_eq!(luma_row(&img), vec![255, 200, 0]);
    }

    #[test]
    fn test_decode_sixteen_bit() {
        let img = decode(
            dictionary! {
                "Subtype" => "Image",
                "Width" => 2,
                "Height" => 1,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 16,
            },
            vec![0x12, 0x34, 0xFF, 0x00],
        )
        .unwrap();
        assert_eq!(luma_row(&img), vec![0x12, 0xFF]);
    }

    #[test]
    fn test_decode_indexed() {
        let palette = Object::String(vec![0, 0, 0, 10, 20, 30], StringFormat::Literal);
        let img = decode(
            dictionary! {
                "Subtype" => "Image",
                "Width" => 2,
                "Height" => 1,
                "ColorSpace" => vec![name("Indexed"), name("DeviceRGB"), 1.into(), palette],
                "BitsPerComponent" => 8,
            },
            vec![1, 0],
        )
        .unwrap()
        .to_rgb8();
        assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30]);
        assert_eq!(img.get_pixel(1, 0).0, [0, 0, 0]);
    }

    #[test]
    fn test_decode_indexed_two_bit_gray() {
        let palette = Object::String(vec![0, 85, 170, 255], StringFormat::Hexadecimal);
        let img = decode(
            dictionary! {
                "Subtype" => "Image",
                "Width" => 4,
                "Height" => 1,
                "ColorSpace" => vec![name("Indexed"), name("DeviceGray"), 3.into(), palette],
                "BitsPerComponent" => 2,
            },
            vec![0b00_01_10_11],
        )
        .unwrap();
        assert_eq!(luma_row(&img), vec![0, 85, 170, 255]);
    }

    #[test]
    fn test_decode_indexed_four_bit_cmyk() {
        let palette = Object::String(vec![0, 0, 0, 255, 0, 0, 0, 0], StringFormat::Hexadecimal);
        let img = decode(
            dictionary! {
                "Subtype" => "Image",
                "Width" => 2,
                "Height" => 1,
                "ColorSpace" => vec![name("Indexed"), name("DeviceCMYK"), 1.into(), palette],
                "BitsPerComponent" => 4,
            },
            vec![0b0001_0000],
        )
        .unwrap()
        .to_rgb8();
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [0, 0, 0]);
    }

    #[test]
    fn test_decode_cmyk() {
        assert_eq!(cmyk_to_rgb(&[0, 0, 0, 0]), vec![255, 255, 255]);
        assert_eq!(cmyk_to_rgb(&[0, 0, 0, 255]), vec![0, 0, 0]);
        assert_eq!(cmyk_to_rgb(&[255, 0, 0, 0]), vec![0, 255, 255]);
    }

    #[test]
    fn test_iccbased_uses_component_count() {
        let mut doc = LopdfDocument::with_version("1.5");
        let profile = doc.add_object(Stream::new(dictionary! { "N" => 3 }, vec![]));
        let cs = Object::Array(vec![name("ICCBased"), Object::Reference(profile)]);
        assert_eq!(resolve_color_space(&doc, &cs).unwrap(), ColorSpace::Rgb);
    }

    #[test]
    fn test_iccbased_falls_back_to_alternate() {
        let mut doc = LopdfDocument::with_version("1.5");
        let profile = doc.add_object(Stream::new(
            dictionary! { "N" => 2, "Alternate" => "DeviceCMYK" },
            vec![],
        ));
        let cs = Object::Array(vec![name("ICCBased"), Object::Reference(profile)]);
        assert_eq!(resolve_color_space(&doc, &cs).unwrap(), ColorSpace::Cmyk);
    }

    #[test]
    fn test_cyclic_iccbased_alternate() {
        let mut doc = LopdfDocument::with_version("1.5");
        let cs_id = doc.new_object_id();
        let profile = doc.add_object(Stream::new(
            dictionary! { "N" => 2, "Alternate" => cs_id },
            vec![],
        ));
        doc.objects.insert(
            cs_id,
            Object::Array(vec![name("ICCBased"), Object::Reference(profile)]),
        );

        let stream = Stream::new(
            dictionary! {
                "Subtype" => "Image",
                "Width" => 1,
                "Height" => 1,
                "ColorSpace" => cs_id,
                "BitsPerComponent" => 8,
            },
            vec![0],
        );
        match decode_image_stream(&doc, &stream, None) {
            Err(Error::ImageDecode(msg)) => assert!(msg.contains("cyclic")),
            other => panic!("expected cyclic color space error, got {:?}", other.is_ok()),
        }
    }

    #[test]
    fn test_decode_lzw() {
        // clear, 1, 2, 3, end-of-data as 9-bit codes
        let lzw = vec![0x80, 0x00, 0x40, 0x40, 0x38, 0x08];
        let img = decode(
            dictionary! {
                "Subtype" => "Image",
                "Width" => 3,
                "Height" => 1,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
                "Filter" => "LZWDecode",
            },
            lzw,
        )
        .unwrap();
        assert_eq!(img.to_luma8().into_raw(), vec![1, 2, 3]);
    }

    #[test]
    fn test_decode_flate() {
        let img = decode(
            dictionary! {
                "Subtype" => "Image",
                "Width" => 2,
                "Height" => 2,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
            },
            deflate(&[10, 20, 30, 40]),
        )
        .unwrap();
        assert_eq!(luma_row(&img), vec![10, 20, 30, 40]);
    }

    #[test]
    fn test_oversized_predictor_columns() {
        let result = decode(
            dictionary! {
                "Subtype" => "Image",
                "Width" => 1,
                "Height" => 1,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
                "DecodeParms" => dictionary! {
                    "Predictor" => 12,
                    "Columns" => i64::MAX,
                    "Colors" => 4,
                },
            },
            deflate(&[0, 0]),
        );
        assert!(matches!(result, Err(Error::ImageDecode(_))));
    }

    #[test]
    fn test_negative_predictor_parameters() {
        let params = dictionary! { "Predictor" => 2, "Columns" => -1, "Colors" => -1 };
        assert!(check_predictor(&params, 10).is_err());

        let params = dictionary! { "Predictor" => 15, "Columns" => 10, "Colors" => 3 };
        assert!(check_predictor(&params, 10).is_ok());
    }

    #[test]
    fn test_truncated_data_is_error() {
        let result = decode(
            dictionary! {
                "Subtype" => "Image",
                "Width" => 10,
                "Height" => 10,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            vec![0; 12],
        );
        assert!(matches!(result, Err(Error::ImageDecode(_))));
    }

    #[test]
    fn test_huge_dimensions_are_error() {
        let result = decode(
            dictionary! {
                "Subtype" => "Image",
                "Width" => u32::MAX as i64,
                "Height" => u32::MAX as i64,
                "ColorSpace" => "DeviceCMYK",
                "BitsPerComponent" => 16,
            },
            vec![0; 16],
        );
        assert!(matches!(result, Err(Error::ImageDecode(_))));
    }

    #[test]
    fn test_unsupported_filter() {
        let result = decode(
            dictionary! {
                "Subtype" => "Image",
                "Width" => 1,
                "Height" => 1,
                "Filter" => "JPXDecode",
            },
            vec![0; 4],
        );
        assert!(matches!(result, Err(Error::UnsupportedImage(_))));
    }

    #[test]
    fn test_pixel_limit() {
        let doc = LopdfDocument::with_version("1.5");
        let stream = Stream::new(
            dictionary! {
                "Subtype" => "Image",
                "Width" => 100,
                "Height" => 100,
            },
            vec![0; 10_000],
        );
        assert!(matches!(
            decode_image_stream(&doc, &stream, Some(5_000)),
            Err(Error::ImageExtract(_))
        ));
        assert!(decode_image_stream(&doc, &stream, Some(10_000)).is_ok());
    }

    #[test]
    fn test_decode_jpeg_behind_flate() {
        let mut jpeg = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, image::Rgb([200, 100, 50])))
            .write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
            .unwrap();

        let img = decode(
            dictionary! {
                "Subtype" => "Image",
                "Width" => 8,
                "Height" => 8,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => vec![name("FlateDecode"), name("DCTDecode")],
            },
            deflate(&jpeg),
        )
        .unwrap();
        assert_eq!((img.width(), img.height()), (8, 8));
    }
}
