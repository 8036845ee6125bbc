//! Atomic PDF serialization.
//!
//! Documents are written to a hidden sibling file first and renamed into
//! place once fully flushed, so the destination never holds a half-written
//! PDF. If anything fails before the rename, the sibling file is removed.

use lopdf::Document;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{MergeError, Result};

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Compress streams before writing.
    pub compress: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            compress: true,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,
}

/// Writes documents to disk.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Serialize `doc` to `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::WriteFailure`] if the directory, the temporary
    /// file, the serialization, or the final rename fails.
    pub fn write(&self, doc: &mut Document, path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|err| MergeError::write_failure(parent, err))?;
        }

        if self.options.compress {
            doc.compress();
        }

        let partial = partial_path(path);
        if let Err(err) = self.write_partial(doc, &partial) {
            remove_partial(&partial);
            return Err(err);
        }

        if let Err(err) = std::fs::rename(&partial, path) {
            remove_partial(&partial);
            return Err(MergeError::write_failure(path, err));
        }

        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let write_time = start.elapsed();

        tracing::debug!(
            path = %path.display(),
            bytes = file_size,
            elapsed_ms = write_time.as_millis() as u64,
            "wrote output"
        );

        Ok(WriteStatistics {
            write_time,
            file_size,
        })
    }

    fn write_partial(&self, doc: &mut Document, partial: &Path) -> Result<()> {
        let file = File::create(partial).map_err(|err| MergeError::write_failure(partial, err))?;
        let mut writer = BufWriter::with_capacity(self.options.buffer_size, file);

        doc.save_to(&mut writer)
            .map_err(|err| MergeError::write_failure(partial, std::io::Error::other(err)))?;

        writer
            .flush()
            .map_err(|err| MergeError::write_failure(partial, err))?;

        writer
            .get_ref()
            .sync_all()
            .map_err(|err| MergeError::write_failure(partial, err))?;

        Ok(())
    }
}

/// Path of the temporary sibling used while writing `path`.
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".partial");
    path.with_file_name(name)
}

fn remove_partial(partial: &Path) {
    if let Err(err) = std::fs::remove_file(partial)
        && err.kind() != std::io::ErrorKind::NotFound
    {
        tracing::warn!(path = %partial.display(), error = %err, "failed to remove partial output");
    }
}
