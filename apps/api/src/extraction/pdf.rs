use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use super::normalize::normalize;

/// Any failure to open or read a document. Corrupt files, encrypted files and
/// I/O errors all land here; callers cannot tell them apart.
#[derive(Debug, Error)]
#[error("Failed to extract text from '{}': {reason}", .path.display())]
pub struct ExtractionError {
    pub path: PathBuf,
    pub reason: String,
}

impl ExtractionError {
    fn new(path: &Path, reason: impl ToString) -> Self {
        Self {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Turns a stored document into normalised plain text.
///
/// Carried in `AppState` as `Arc<dyn TextExtractor>` so handlers can be
/// exercised with a fake.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Extractor backed by `pdf-extract`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

#[async_trait]
impl TextExtractor for PdfExtractor {
    async fn extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ExtractionError::new(path, e))?;

        // pdf-extract is synchronous and can panic on malformed input; a panic
        // surfaces here as a JoinError instead of taking the worker down.
        let raw = tokio::task::spawn_blocking(move || concatenate_pages(&bytes))
            .await
            .map_err(|e| ExtractionError::new(path, format!("PDF parser aborted: {e}")))?
            .map_err(|e| ExtractionError::new(path, e))?;

        Ok(normalize(&raw))
    }
}

/// Reads every page in document order and joins their text with no separator.
pub(crate) fn concatenate_pages(bytes: &[u8]) -> Result<String, pdf_extract::OutputError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)?;
    debug!("Extracted text from {} PDF page(s)", pages.len());
    Ok(pages.concat())
}


#[cfg(test)]
mod tests {
    use super::fixtures::pdf_with_pages;
    use super::*;

    #[test]
    fn test_pages_concatenate_in_order() {
        let bytes = pdf_with_pages(&["Hello", "World"]);
        let raw = concatenate_pages(&bytes).unwrap();
        let hello = raw.find("Hello").expect("first page text missing");
        let world = raw.find("World").expect("second page text missing");
        assert!(hello < world, "pages out of order: {raw:?}");
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        assert!(concatenate_pages(b"definitely not a pdf").is_err());
    }

    #[tokio::test]
    async fn test_extract_text_normalizes_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        std::fs::write(&path, pdf_with_pages(&["Hello", "World"])).unwrap();

        let text = PdfExtractor.extract_text(&path).await.unwrap();
        assert!(text.contains("Hello"));
        assert!(text.contains("World"));
        assert_eq!(text, normalize(&text));
    }

    #[tokio::test]
    async fn test_missing_file_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.pdf");
        let err = PdfExtractor.extract_text(&path).await.unwrap_err();
        assert_eq!(err.path, path);
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"%PDF-1.5\nthis is not really a pdf").unwrap();
        let err = PdfExtractor.extract_text(&path).await.unwrap_err();
        assert!(err.to_string().contains("broken.pdf"));
    }
}
