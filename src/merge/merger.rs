//! The merge orchestrator.
//!
//! A run goes through four steps: expand patterns, open and append each
//! file in order, check that something was merged, and write the result.
//! Per-file failures are routed through the [`Policy`]; everything else
//! aborts the run.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{MergeError, Result};
use crate::io::{PdfReader, PdfWriter, WriteOptions, partial_path};
use crate::merge::builder::CombinedDocument;
use crate::merge::policy::{Disposition, Policy};
use crate::output::{ProgressObserver, Silent};
use crate::walker::{self, ResolvedFile};

/// Outcome of a successful merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeResult {
    /// Where the combined document was (or would be) written.
    pub output: PathBuf,

    /// Number of files the merge tried to open.
    pub attempted: usize,

    /// Number of files appended to the combined document.
    pub merged: usize,

    /// Number of files skipped under the permissive policy.
    pub skipped: usize,

    /// Pages in the combined document.
    pub total_pages: usize,

    /// Every resolved file, in merge order.
    pub files: Vec<ResolvedFile>,

    /// Whether the run stopped short of writing.
    pub dry_run: bool,

    /// Combined size of the merged input files.
    pub bytes_read: u64,

    /// Size of the written file, if one was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes_written: Option<u64>,

    /// Wall time of the whole run.
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Settings for a [`Merger`].
#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    /// Reaction to missing or invalid inputs.
    pub policy: Policy,

    /// Validate and report without writing anything.
    pub dry_run: bool,

    /// How the combined document is serialized.
    pub write: WriteOptions,
}

/// Merges the files matched by a list of patterns into one PDF.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    options: MergeOptions,
    reader: PdfReader,
    writer: PdfWriter,
}

impl Merger {
    /// Create a merger with the given policy and default options.
    pub fn new(policy: Policy) -> Self {
        Self::with_options(MergeOptions {
            policy,
            ..Default::default()
        })
    }

    /// Create a merger with custom options.
    pub fn with_options(options: MergeOptions) -> Self {
        Self {
            reader: PdfReader::new(),
            writer: PdfWriter::with_options(options.write.clone()),
            options,
        }
    }

    /// Merge every file matched by `patterns` into `output`.
    ///
    /// Files are taken in pattern order and, within a pattern, in sorted path
    /// order. Progress is reported to `observer`.
    ///
    /// # Errors
    ///
    /// - [`MergeError::InvalidPattern`] if a pattern cannot be expanded, or
    ///   under [`Policy::Strict`] if a wildcard runs into an unreadable
    ///   directory
    /// - [`MergeError::NoInputFiles`] if no pattern produced any path
    /// - [`MergeError::FileNotFound`] / [`MergeError::InvalidPdf`] for the
    ///   first bad input under [`Policy::Strict`]
    /// - [`MergeError::NoValidFiles`] if nothing could be appended
    /// - [`MergeError::WriteFailure`] if the output cannot be written
    ///
    /// Under [`Policy::Strict`], a failed run leaves no file at `output`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use merge_pdf::merge::{Merger, Policy};
    /// use merge_pdf::output::Silent;
    /// use std::path::Path;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let merger = Merger::new(Policy::Permissive);
    /// let result = merger.merge(["chapters/*.pdf"], Path::new("book.pdf"), &mut Silent)?;
    /// println!("{} pages from {} files", result.total_pages, result.merged);
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge<T>(
        &self,
        patterns: T,
        output: &Path,
        observer: &mut dyn ProgressObserver,
    ) -> Result<MergeResult>
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        let start = Instant::now();

        let expansion = walker::resolve_patterns(patterns)?;
        for pattern in &expansion.unmatched {
            observer.on_unmatched_pattern(pattern);
        }

        for entry in &expansion.unreadable {
            match self.options.policy {
                Policy::Strict => {
                    return Err(MergeError::invalid_pattern(
                        &entry.pattern,
                        format!("cannot read {}: {}", entry.path.display(), entry.reason),
                    ));
                }
                Policy::Permissive => observer.on_unreadable_path(&entry.path, &entry.reason),
            }
        }

        if expansion.is_empty() {
            return Err(MergeError::NoInputFiles);
        }

        let armed = self.options.policy.cleans_up_on_failure() && !self.options.dry_run;
        let guard = OutputGuard::new(output, armed);

        let mut result = self.merge_files(expansion.files, output, observer)?;
        guard.commit();

        result.elapsed = start.elapsed();
        tracing::info!(
            output = %output.display(),
            merged = result.merged,
            skipped = result.skipped,
            pages = result.total_pages,
            dry_run = result.dry_run,
            "merge finished"
        );
        observer.on_finish(&result);

        Ok(result)
    }

    fn merge_files(
        &self,
        mut files: Vec<ResolvedFile>,
        output: &Path,
        observer: &mut dyn ProgressObserver,
    ) -> Result<MergeResult> {
        let total = files.len();
        observer.on_start(total);

        let mut combined = CombinedDocument::new();
        let mut attempted = 0;
        let mut skipped = 0;
        let mut bytes_read = 0;

        for (idx, file) in files.iter_mut().enumerate() {
            attempted += 1;

            let appended = self
                .reader
                .open(&file.path)
                .and_then(|loaded| {
                    let size = loaded.file_size;
                    combined.append(loaded).map(|pages| (pages, size))
                });

            match appended {
                Ok((pages, size)) => {
                    bytes_read += size;
                    file.valid = Some(true);
                    file.pages = Some(pages);
                    observer.on_file_merged(idx + 1, total, &file.path, pages);
                }
                Err(err) => {
                    if file.exists {
                        file.valid = Some(false);
                    }

                    match self.options.policy.on_file_error(&err) {
                        Disposition::Skip => {
                            tracing::debug!(path = %file.path.display(), error = %err, "skipping file");
                            file.skip_reason = Some(err.to_string());
                            skipped += 1;
                            observer.on_file_skipped(idx + 1, total, &err);
                        }
                        Disposition::Abort => return Err(err),
                    }
                }
            }
        }

        if combined.is_empty() {
            return Err(MergeError::NoValidFiles);
        }

        let merged = combined.source_count();
        let total_pages = combined.page_count();

        let bytes_written = if self.options.dry_run {
            None
        } else {
            let mut document = combined.finish();
            let stats = self.writer.write(&mut document, output)?;
            tracing::debug!(
                bytes = stats.file_size,
                write_ms = stats.write_time.as_millis() as u64,
                "output written"
            );
            Some(stats.file_size)
        };

        Ok(MergeResult {
            output: output.to_path_buf(),
            attempted,
            merged,
            skipped,
            total_pages,
            files,
            dry_run: self.options.dry_run,
            bytes_read,
            bytes_written,
            elapsed: Duration::ZERO,
        })
    }
}

/// Merge silently with default write options.
///
/// # Errors
///
/// See [`Merger::merge`].
pub fn merge<T>(patterns: T, output: &Path, policy: Policy) -> Result<MergeResult>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    Merger::new(policy).merge(patterns, output, &mut Silent)
}

/// Removes what a failed run left at the output path.
///
/// Once armed, a failed run leaves nothing at `output`, including a file
/// from an earlier run.
struct OutputGuard<'a> {
    output: &'a Path,
    armed: bool,
}

impl<'a> OutputGuard<'a> {
    fn new(output: &'a Path, armed: bool) -> Self {
        Self { output, armed }
    }

    fn commit(mut self) {
        self.armed = false;
    }
}

impl Drop for OutputGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        for path in [partial_path(self.output), self.output.to_path_buf()] {
            if !path.is_file() {
                continue;
            }
            match std::fs::remove_file(&path) {
                Ok(()) => tracing::debug!(path = %path.display(), "removed output of failed merge"),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "failed to clean up output")
                }
            }
        }
    }
}
