//! Plan-document ingestion: directory scan, text extraction with OCR
//! fallback, and keyword categorization into per-plan buckets.

pub mod bucket;
pub mod loader;
pub mod ocr;
pub mod pdf;
pub mod renderer;

pub use bucket::{Category, DocumentBuckets};
pub use loader::load_documents;
pub use ocr::{MockOcrEngine, OcrEngine};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("OCR initialization failed: {0}")]
    OcrInit(String),

    #[error("OCR processing failed: {0}")]
    OcrProcessing(String),

    #[error("Tessdata not found at: {0}")]
    TessdataNotFound(PathBuf),
}
