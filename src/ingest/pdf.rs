//! Direct PDF text extraction for digital documents with a text layer.

use super::IngestError;

/// Extract the text layer of each page.
///
/// Returns one string per page; pages without a text layer come back
/// empty, which is what triggers the OCR fallback upstream.
pub fn extract_text_by_page(pdf_bytes: &[u8]) -> Result<Vec<String>, IngestError> {
    pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        .map_err(|e| IngestError::PdfParsing(e.to_string()))
}

/// Join per-page text into a single document string.
pub fn extract_text(pdf_bytes: &[u8]) -> Result<String, IngestError> {
    Ok(extract_text_by_page(pdf_bytes)?.join("\n"))
}

#[cfg(test)]
pub(crate) mod test_support {
    /// Generate a valid single-page PDF with embedded text using lopdf.
    pub fn make_test_pdf(text: &str) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let content = format!("BT /F1 12 Tf 100 700 Td ({text}) Tj ET");
        let content_stream = Stream::new(dictionary! {}, content.into_bytes());
        let content_id = doc.add_object(content_stream);

        let resources = dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
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

        if let Ok(page) = doc.get_object_mut(page_id) {
            if let Object::Dictionary(ref mut dict) = page {
                dict.set("Parent", pages_id);
            }
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
}
