//! Startup document scan: find `insurance_*.pdf` files, extract their
//! text (OCR fallback for scans), and sort the text into plan buckets.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::bucket::{categorize_filename, DocumentBuckets};
use super::ocr::OcrEngine;
use super::{pdf, renderer, IngestError};

const FILENAME_PREFIX: &str = "insurance_";

/// Scan `root` recursively and load every matching document into buckets.
///
/// A missing directory or zero matching files is a degraded-but-valid
/// state: the service still answers chat requests, just without plan
/// context. Per-file failures are logged and skipped so one corrupt
/// document cannot abort the scan.
pub fn load_documents(root: &Path, ocr: Option<&dyn OcrEngine>) -> DocumentBuckets {
    let mut buckets = DocumentBuckets::new();

    if !root.exists() {
        tracing::warn!(path = %root.display(), "document folder not found, serving without plan context");
        return buckets;
    }

    let files = find_document_files(root);
    if files.is_empty() {
        tracing::warn!(path = %root.display(), "no insurance_*.pdf files found in folder or subfolders");
        return buckets;
    }

    let mut loaded = 0usize;
    for path in &files {
        match extract_document(path, ocr) {
            Ok(text) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let category = categorize_filename(&name);
                tracing::info!(
                    file = %name,
                    %category,
                    chars = text.len(),
                    "document categorized"
                );
                buckets.append(category, &text);
                loaded += 1;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable document");
            }
        }
    }

    tracing::info!(
        matched = files.len(),
        loaded,
        total_chars = buckets.total_chars(),
        "document ingestion complete"
    );

    buckets
}

/// Collect files matching the `insurance_*.pdf` naming convention at any depth.
fn find_document_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| matches_convention(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.into_path())
        .collect()
}

fn matches_convention(file_name: &str) -> bool {
    file_name.starts_with(FILENAME_PREFIX) && file_name.to_lowercase().ends_with(".pdf")
}

/// Extract a single document's text: direct text layer first, OCR of the
/// page images when the text layer is empty.
fn extract_document(path: &Path, ocr: Option<&dyn OcrEngine>) -> Result<String, IngestError> {
    let bytes = std::fs::read(path)?;

    let pages = pdf::extract_text_by_page(&bytes)?;
    let direct = pages.join("\n");
    if !direct.trim().is_empty() {
        return Ok(direct);
    }

    let Some(engine) = ocr else {
        tracing::warn!(path = %path.display(), "no text layer and OCR is unavailable, skipping content");
        return Ok(String::new());
    };

    tracing::info!(path = %path.display(), pages = pages.len(), "no text layer, falling back to OCR");
    Ok(ocr_document(&bytes, pages.len(), engine, path))
}

/// OCR every page image and concatenate the results. Per-page failures
/// are logged and skipped.
fn ocr_document(bytes: &[u8], page_count: usize, engine: &dyn OcrEngine, path: &Path) -> String {
    let mut text = String::new();
    for page in 0..page_count {
        let page_text = renderer::extract_page_image(bytes, page)
            .and_then(|img| engine.ocr_image(&img));
        match page_text {
            Ok(out) => {
                tracing::debug!(
                    path = %path.display(),
                    page,
                    confidence = out.confidence,
                    "OCR page complete"
                );
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&out.text);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), page, error = %e, "OCR failed for page");
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::bucket::Category;
    use crate::ingest::ocr::MockOcrEngine;
    use crate::ingest::pdf::test_support::make_test_pdf;

    #[test]
    fn nonexistent_root_yields_empty_buckets() {
        let buckets = load_documents(Path::new("/definitely/not/here"), None);
        assert!(buckets.is_empty());
    }

    #[test]
    fn directory_without_matches_yields_empty_buckets() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        std::fs::write(dir.path().join("plan.pdf"), "no prefix").unwrap();

        let buckets = load_documents(dir.path(), None);
        assert!(buckets.is_empty());
    }

    #[test]
    fn medicare_filename_lands_in_medicare_bucket_only() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = make_test_pdf("Part A hospital coverage terms");
        std::fs::write(dir.path().join("insurance_Medicare_plan.pdf"), &pdf).unwrap();

        let buckets = load_documents(dir.path(), None);
        assert!(buckets.get(Category::Medicare).contains("coverage"));
        assert_eq!(buckets.get(Category::AppleCare), "");
        assert_eq!(buckets.get(Category::Health101), "");
        assert_eq!(buckets.get(Category::Other), "");
    }

    #[test]
    fn files_in_subdirectories_are_found() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("plans").join("2024");
        std::fs::create_dir_all(&nested).unwrap();
        let pdf = make_test_pdf("Health 101 student plan");
        std::fs::write(nested.join("insurance_health101.pdf"), &pdf).unwrap();

        let buckets = load_documents(dir.path(), None);
        assert!(!buckets.get(Category::Health101).is_empty());
    }

    #[test]
    fn corrupt_file_is_skipped_without_aborting_scan() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("insurance_apple_broken.pdf"), b"not a pdf").unwrap();
        let pdf = make_test_pdf("Apple Care terms");
        std::fs::write(dir.path().join("insurance_applecare.pdf"), &pdf).unwrap();

        let buckets = load_documents(dir.path(), None);
        assert!(!buckets.get(Category::AppleCare).is_empty());
    }

    #[test]
    fn unmatched_keyword_accumulates_in_other() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("insurance_dental.pdf"),
            make_test_pdf("Dental rider"),
        )
        .unwrap();
        std::fs::write(
            dir.path().join("insurance_vision.pdf"),
            make_test_pdf("Vision rider"),
        )
        .unwrap();

        let buckets = load_documents(dir.path(), None);
        let other = buckets.get(Category::Other);
        assert!(other.contains("\n\n"), "multiple files should be blank-line separated");
    }

    #[test]
    fn direct_extraction_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("insurance_medicare.pdf"),
            make_test_pdf("Stable digital text"),
        )
        .unwrap();

        let first = load_documents(dir.path(), None);
        let second = load_documents(dir.path(), None);
        assert_eq!(first, second);
    }

    #[test]
    fn convention_requires_prefix_and_pdf_extension() {
        assert!(matches_convention("insurance_medicare.pdf"));
        assert!(matches_convention("insurance_x.PDF"));
        assert!(!matches_convention("medicare_insurance.pdf"));
        assert!(!matches_convention("insurance_medicare.txt"));
    }

    #[test]
    fn mock_ocr_engine_is_accepted() {
        // A digital PDF has a text layer, so OCR must not be consulted;
        // this just exercises the Option<&dyn OcrEngine> plumbing.
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("insurance_health.pdf"),
            make_test_pdf("Digital text present"),
        )
        .unwrap();

        let engine = MockOcrEngine::new("OCR SHOULD NOT APPEAR", 1.0);
        let buckets = load_documents(dir.path(), Some(&engine));
        assert!(!buckets.get(Category::Health101).contains("OCR SHOULD NOT APPEAR"));
        assert!(buckets.get(Category::Health101).contains("Digital text"));
    }
}
