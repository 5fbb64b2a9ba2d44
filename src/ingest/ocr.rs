//! OCR engine abstraction with a bundled Tesseract implementation.
//!
//! The Tesseract engine is only compiled with the `ocr` feature flag;
//! without it, scanned PDFs are logged and skipped during ingestion.

use super::IngestError;

/// Result of running OCR over a single page image.
#[derive(Debug)]
pub struct OcrOutput {
    pub text: String,
    /// Mean recognition confidence in `[0, 1]`.
    pub confidence: f32,
}

/// OCR engine abstraction (allows mocking for tests).
pub trait OcrEngine: Send + Sync {
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<OcrOutput, IngestError>;
}

/// Bundled Tesseract OCR engine.
/// Only available when compiled with the `ocr` feature flag.
#[cfg(feature = "ocr")]
pub struct BundledTesseract {
    tessdata_dir: std::path::PathBuf,
    lang: String,
}

#[cfg(feature = "ocr")]
impl BundledTesseract {
    /// Initialize with a tessdata directory. English traineddata must exist.
    pub fn new(tessdata_dir: &std::path::Path) -> Result<Self, IngestError> {
        if !tessdata_dir.join("eng.traineddata").exists() {
            return Err(IngestError::TessdataNotFound(tessdata_dir.to_path_buf()));
        }

        Ok(Self {
            tessdata_dir: tessdata_dir.to_path_buf(),
            lang: "eng".to_string(),
        })
    }

    /// Set language(s) for OCR (e.g., "eng", "eng+fra")
    pub fn with_languages(mut self, langs: &str) -> Self {
        self.lang = langs.to_string();
        self
    }
}

#[cfg(feature = "ocr")]
impl OcrEngine for BundledTesseract {
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<OcrOutput, IngestError> {
        let tessdata_str = self
            .tessdata_dir
            .to_str()
            .ok_or_else(|| IngestError::OcrInit("Invalid tessdata path".into()))?;

        let tess = tesseract::Tesseract::new(Some(tessdata_str), Some(&self.lang))
            .map_err(|e| IngestError::OcrInit(format!("{e:?}")))?;

        let mut tess = tess
            .set_image_from_mem(image_bytes)
            .map_err(|e| IngestError::OcrProcessing(format!("{e:?}")))?;

        let text = tess
            .get_text()
            .map_err(|e| IngestError::OcrProcessing(format!("{e:?}")))?;

        let confidence = tess.mean_text_conf().max(0) as f32 / 100.0;

        Ok(OcrOutput { text, confidence })
    }
}

/// Mock OCR engine for unit testing without Tesseract.
pub struct MockOcrEngine {
    pub text: String,
    pub confidence: f32,
}

impl MockOcrEngine {
    pub fn new(text: &str, confidence: f32) -> Self {
        Self {
            text: text.to_string(),
            confidence,
        }
    }
}

impl OcrEngine for MockOcrEngine {
    fn ocr_image(&self, _image_bytes: &[u8]) -> Result<OcrOutput, IngestError> {
        Ok(OcrOutput {
            text: self.text.clone(),
            confidence: self.confidence,
        })
    }
}
