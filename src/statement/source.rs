// src/statement/source.rs
use crate::statement::models::StatementText;
use crate::utils::error::{SourceError, UnreadablePdfError};
use std::fs;
use std::path::{Path, PathBuf};

/// Where statement text comes from. The run loop only talks to this trait, so tests can
/// feed it canned text instead of real PDFs.
pub trait PdfTextSource: Send + Sync {
    /// Lists the statement files of a folder in processing order.
    fn discover(&self, folder: &Path) -> Result<Vec<PathBuf>, SourceError> {
        discover_pdfs(folder)
    }

    /// Extracts the text of one statement, page order preserved.
    fn read(&self, path: &Path) -> Result<StatementText, UnreadablePdfError>;
}

/// Finds `*.pdf` files (any case) directly inside `folder`, sorted by file name.
pub fn discover_pdfs(folder: &Path) -> Result<Vec<PathBuf>, SourceError> {
    if !folder.is_dir() {
        return Err(SourceError::MissingFolder(folder.to_path_buf()));
    }

    let entries = fs::read_dir(folder).map_err(|source| SourceError::InputFolder {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut pdfs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| SourceError::InputFolder {
            path: folder.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            pdfs.push(path);
        } else {
            tracing::trace!("Ignoring non-PDF entry {}", path.display());
        }
    }

    pdfs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    tracing::debug!("Discovered {} PDF files in {}", pdfs.len(), folder.display());
    Ok(pdfs)
}

/// Text extraction backed by the `pdf-extract` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractSource;

impl PdfTextSource for PdfExtractSource {
    fn read(&self, path: &Path) -> Result<StatementText, UnreadablePdfError> {
        tracing::debug!("Extracting text from {}", path.display());
        let raw = pdf_extract::extract_text(path).map_err(|e| UnreadablePdfError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let text = StatementText::from_extracted(&raw);
        if text.is_blank() {
            return Err(UnreadablePdfError {
                path: path.to_path_buf(),
                reason: "no extractable text (scanned or image-only PDF?)".to_string(),
            });
        }

        tracing::debug!(
            "Extracted {} bytes over {} pages from {}",
            raw.len(),
            text.page_count(),
            path.display()
        );
        Ok(text)
    }
}
