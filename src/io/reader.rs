//! PDF opening and input checks.

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{MergeError, Result};

/// A document opened from disk.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The parsed document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Size of the source file in bytes.
    pub file_size: u64,

    /// Time taken to parse the file.
    pub load_time: Duration,
}

/// Opens input files through `lopdf`.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new reader.
    pub fn new() -> Self {
        Self
    }

    /// Check that `path` names an existing regular file.
    ///
    /// # Errors
    ///
    /// - [`MergeError::FileNotFound`] if nothing exists at `path`
    /// - [`MergeError::InvalidPdf`] if `path` is a directory or other non-file
    pub fn check_path(&self, path: &Path) -> Result<()> {
        let exists = path
            .try_exists()
            .map_err(|err| MergeError::invalid_pdf(path, err.to_string()))?;
        if !exists {
            return Err(MergeError::file_not_found(path));
        }

        if !path.is_file() {
            return Err(MergeError::invalid_pdf(path, "not a regular file"));
        }

        Ok(())
    }

    /// Open and parse the PDF at `path`.
    ///
    /// # Errors
    ///
    /// Fails like [`check_path`](Self::check_path), and with
    /// [`MergeError::InvalidPdf`] when the file cannot be parsed or is
    /// encrypted.
    pub fn open(&self, path: &Path) -> Result<LoadedPdf> {
        self.check_path(path)?;

        let start = Instant::now();
        let document =
            Document::load(path).map_err(|err| MergeError::invalid_pdf(path, err.to_string()))?;
        let load_time = start.elapsed();

        if document.is_encrypted() {
            return Err(MergeError::invalid_pdf(
                path,
                "encrypted documents are not supported",
            ));
        }

        let page_count = document.get_pages().len();
        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        tracing::debug!(
            path = %path.display(),
            pages = page_count,
            bytes = file_size,
            "opened document"
        );

        Ok(LoadedPdf {
            document,
            path: path.to_path_buf(),
            page_count,
            file_size,
            load_time,
        })
    }
}
