//! Scanned-page image extraction using lopdf.
//!
//! Pulls the embedded image (JPEG/TIFF/raw pixels) out of a PDF page so
//! the OCR fallback can read it. Works for scanned documents where each
//! page is a single image XObject, which covers the typical scanned
//! insurance plan PDF.

use image::ImageOutputFormat;
use lopdf::{Document, Object, ObjectId};

use super::IngestError;

/// Extract the dominant page image as PNG bytes, ready for OCR.
pub fn extract_page_image(pdf_bytes: &[u8], page_number: usize) -> Result<Vec<u8>, IngestError> {
    let doc = Document::load_mem(pdf_bytes)
        .map_err(|e| IngestError::PdfParsing(format!("Failed to parse PDF: {e}")))?;

    let page_ids: Vec<ObjectId> = doc.page_iter().collect();
    let &page_id = page_ids.get(page_number).ok_or_else(|| {
        IngestError::PdfParsing(format!(
            "Page {} not found (PDF has {} pages)",
            page_number,
            page_ids.len()
        ))
    })?;

    let image_bytes = extract_largest_page_image(&doc, page_id)?;

    // Validate and re-encode to PNG for the OCR engine
    let img = image::load_from_memory(&image_bytes).map_err(|e| {
        IngestError::ImageProcessing(format!("Failed to decode extracted image: {e}"))
    })?;

    let mut png_buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut png_buf, ImageOutputFormat::Png)
        .map_err(|e| IngestError::ImageProcessing(format!("Failed to encode PNG: {e}")))?;

    tracing::debug!(
        page = page_number,
        raw_size = image_bytes.len(),
        png_size = png_buf.get_ref().len(),
        "extracted image from PDF page"
    );

    Ok(png_buf.into_inner())
}

/// Extract the largest image XObject from a PDF page.
///
/// Walks: page dict → /Resources → /XObject → /Subtype /Image entries.
/// The largest image is assumed to be the page scan itself.
fn extract_largest_page_image(doc: &Document, page_id: ObjectId) -> Result<Vec<u8>, IngestError> {
    let page_obj = doc
        .get_object(page_id)
        .map_err(|e| IngestError::PdfParsing(format!("Page object error: {e}")))?;

    let page_dict = page_obj
        .as_dict()
        .map_err(|_| IngestError::PdfParsing("Page is not a dictionary".into()))?;

    let resources = resolve_dict_entry(doc, page_dict, b"Resources")?;
    let xobjects = resolve_dict_entry(doc, resources, b"XObject")?;

    let mut largest: Option<Vec<u8>> = None;

    for (_name, obj_ref) in xobjects.iter() {
        let xobj = match obj_ref {
            Object::Reference(id) => match doc.get_object(*id) {
                Ok(obj) => obj,
                Err(_) => continue,
            },
            other => other,
        };

        let stream = match xobj {
            Object::Stream(ref s) => s,
            _ => continue,
        };

        if !is_image_subtype(&stream.dict) {
            continue;
        }

        let image_bytes = extract_image_bytes(doc, stream)?;

        if largest.as_ref().map_or(true, |prev| image_bytes.len() > prev.len()) {
            largest = Some(image_bytes);
        }
    }

    largest.ok_or_else(|| IngestError::PdfParsing("No image XObjects found on this page".into()))
}

/// Check if a stream dictionary has /Subtype /Image.
fn is_image_subtype(dict: &lopdf::Dictionary) -> bool {
    dict.get(b"Subtype")
        .map(|obj| matches!(obj, Object::Name(ref n) if n == b"Image"))
        .unwrap_or(false)
}

/// Extract image bytes from a PDF stream, handling different filters.
fn extract_image_bytes(doc: &Document, stream: &lopdf::Stream) -> Result<Vec<u8>, IngestError> {
    let filter = stream.dict.get(b"Filter").ok();

    let is_dct = filter
        .map(|f| match f {
            Object::Name(n) => n == b"DCTDecode",
            Object::Array(arr) => arr
                .iter()
                .any(|o| matches!(o, Object::Name(ref n) if n == b"DCTDecode")),
            _ => false,
        })
        .unwrap_or(false);

    if is_dct {
        // DCTDecode = JPEG. The raw stream content IS the JPEG file.
        let content = stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone());
        return Ok(content);
    }

    // For FlateDecode or other filters, decompress and reconstruct the image
    let content = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());

    // Some streams contain full image files (TIFF, PNG) — use them directly
    if image::load_from_memory(&content).is_ok() {
        return Ok(content);
    }

    reconstruct_raw_image(doc, &stream.dict, &content)
}

/// Reconstruct an image from raw pixel data using PDF metadata.
fn reconstruct_raw_image(
    doc: &Document,
    dict: &lopdf::Dictionary,
    raw_pixels: &[u8],
) -> Result<Vec<u8>, IngestError> {
    let width = get_int(dict, b"Width")? as u32;
    let height = get_int(dict, b"Height")? as u32;
    let bpc = get_int(dict, b"BitsPerComponent").unwrap_or(8) as u32;

    let channels = determine_channels(doc, dict);
    let expected_size = (width * height * channels * bpc / 8) as usize;

    if raw_pixels.len() < expected_size {
        return Err(IngestError::ImageProcessing(format!(
            "Raw pixel buffer too small: {} bytes, expected {} ({}x{}x{}x{}/8)",
            raw_pixels.len(),
            expected_size,
            width,
            height,
            channels,
            bpc
        )));
    }

    let img = match channels {
        1 => {
            let gray = image::GrayImage::from_raw(width, height, raw_pixels.to_vec())
                .ok_or_else(|| {
                    IngestError::ImageProcessing("Failed to create grayscale image".into())
                })?;
            image::DynamicImage::ImageLuma8(gray)
        }
        3 => {
            let rgb = image::RgbImage::from_raw(width, height, raw_pixels.to_vec())
                .ok_or_else(|| IngestError::ImageProcessing("Failed to create RGB image".into()))?;
            image::DynamicImage::ImageRgb8(rgb)
        }
        4 => {
            // CMYK treated as RGBA — OCR doesn't care about color accuracy
            let rgba = image::RgbaImage::from_raw(width, height, raw_pixels.to_vec())
                .ok_or_else(|| {
                    IngestError::ImageProcessing("Failed to create RGBA image".into())
                })?;
            image::DynamicImage::ImageRgba8(rgba)
        }
        _ => {
            return Err(IngestError::ImageProcessing(format!(
                "Unsupported channel count: {channels}"
            )));
        }
    };

    let mut png_buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut png_buf, ImageOutputFormat::Png)
        .map_err(|e| IngestError::ImageProcessing(format!("PNG encode failed: {e}")))?;

    Ok(png_buf.into_inner())
}

/// Determine the number of color channels from the /ColorSpace entry.
fn determine_channels(doc: &Document, dict: &lopdf::Dictionary) -> u32 {
    let cs = match dict.get(b"ColorSpace") {
        Ok(obj) => resolve_object(doc, obj),
        Err(_) => return 3,
    };

    match cs {
        Object::Name(ref n) => match n.as_slice() {
            b"DeviceGray" => 1,
            b"DeviceRGB" => 3,
            b"DeviceCMYK" => 4,
            _ => 3,
        },
        Object::Array(ref arr) if !arr.is_empty() => match &arr[0] {
            Object::Name(ref n) if n == b"ICCBased" => {
                // ICCBased: the /N entry in the ICC stream gives channel count
                if arr.len() > 1 {
                    if let Object::Reference(id) = &arr[1] {
                        if let Ok(Object::Stream(ref s)) = doc.get_object(*id) {
                            return get_int(&s.dict, b"N").unwrap_or(3) as u32;
                        }
                    }
                }
                3
            }
            Object::Name(ref n) if n == b"Indexed" => 1,
            _ => 3,
        },
        _ => 3,
    }
}

/// Resolve a PDF object reference to its target, or return the object as-is.
fn resolve_object<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Get a dictionary entry, following references, and return as a Dictionary.
fn resolve_dict_entry<'a>(
    doc: &'a Document,
    dict: &'a lopdf::Dictionary,
    key: &[u8],
) -> Result<&'a lopdf::Dictionary, IngestError> {
    let obj = dict.get(key).map_err(|_| {
        IngestError::PdfParsing(format!(
            "Missing /{} in dictionary",
            String::from_utf8_lossy(key)
        ))
    })?;

    let resolved = resolve_object(doc, obj);
    resolved.as_dict().map_err(|_| {
        IngestError::PdfParsing(format!(
            "/{} is not a dictionary",
            String::from_utf8_lossy(key)
        ))
    })
}

/// Get an integer value from a dictionary.
fn get_int(dict: &lopdf::Dictionary, key: &[u8]) -> Result<i64, IngestError> {
    dict.get(key)
        .map_err(|_| {
            IngestError::PdfParsing(format!(
                "Missing /{} in image dictionary",
                String::from_utf8_lossy(key)
            ))
        })?
        .as_i64()
        .map_err(|_| {
            IngestError::PdfParsing(format!(
                "/{} is not an integer",
                String::from_utf8_lossy(key)
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Stream};

    /// Create a minimal JPEG image for testing.
    fn make_test_jpeg(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([128u8, 128, 128]));
        let mut jpeg_bytes = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut jpeg_bytes, ImageOutputFormat::Jpeg(85))
            .unwrap();
        jpeg_bytes.into_inner()
    }

    /// Build a one-page PDF whose page content is a single JPEG XObject.
    fn make_scanned_pdf(jpeg: &[u8], width: u32, height: u32) -> Vec<u8> {
        let mut doc = lopdf::Document::with_version("1.4");

        let mut image_dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        };
        image_dict.set("Length", jpeg.len() as i64);
        // DCTDecode content is already compressed; stored as-is.
        let stream = Stream::new(image_dict, jpeg.to_vec());
        let image_id = doc.add_object(stream);

        let content = b"q 100 0 0 100 0 0 cm /Im0 Do Q".to_vec();
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));

        let resources = dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        };

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => resources,
        });

        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        });

        if let Ok(lopdf::Object::Dictionary(ref mut dict)) = doc.get_object_mut(page_id) {
            dict.set("Parent", pages_id);
        }

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn extracts_embedded_jpeg_as_png() {
        let jpeg = make_test_jpeg(32, 32);
        let pdf = make_scanned_pdf(&jpeg, 32, 32);

        let png = extract_page_image(&pdf, 0).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), 32);
        assert_eq!(decoded.height(), 32);
    }

    #[test]
    fn out_of_range_page_is_an_error() {
        let jpeg = make_test_jpeg(8, 8);
        let pdf = make_scanned_pdf(&jpeg, 8, 8);
        assert!(matches!(
            extract_page_image(&pdf, 5),
            Err(IngestError::PdfParsing(_))
        ));
    }

    #[test]
    fn page_without_images_is_an_error() {
        let pdf = crate::ingest::pdf::test_support::make_test_pdf("text only page");
        assert!(extract_page_image(&pdf, 0).is_err());
    }

    #[test]
    fn invalid_pdf_is_an_error() {
        assert!(matches!(
            extract_page_image(b"garbage", 0),
            Err(IngestError::PdfParsing(_))
        ));
    }
}
