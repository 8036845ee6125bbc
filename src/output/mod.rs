//! Progress reporting for merge-pdf.
//!
//! The merge reports what it does through a [`ProgressObserver`]. Observers
//! are passive: they receive events and never influence control flow.
//! [`Silent`] drops everything (library use, tests); [`ConsoleReporter`]
//! renders a progress bar, per-file lines, warnings and a final summary.

pub mod formatter;
pub mod progress;

pub use formatter::{MessageLevel, OutputFormatter};
pub use progress::ProgressBar;

use std::path::Path;

use crate::config::Config;
use crate::error::MergeError;
use crate::merge::MergeResult;

/// Receives events from a running merge.
///
/// Every method has an empty default so implementors only override what
/// they care about.
pub trait ProgressObserver {
    /// Expansion finished with `total` files to process.
    fn on_start(&mut self, _total: usize) {}

    /// A wildcard pattern matched no files.
    fn on_unmatched_pattern(&mut self, _pattern: &str) {}

    /// A wildcard ran into a directory it could not read and went on.
    fn on_unreadable_path(&mut self, _path: &Path, _reason: &str) {}

    /// File number `index` (1-based) of `total` was appended.
    fn on_file_merged(&mut self, _index: usize, _total: usize, _path: &Path, _pages: usize) {}

    /// File number `index` (1-based) of `total` was skipped because of `error`.
    fn on_file_skipped(&mut self, _index: usize, _total: usize, _error: &MergeError) {}

    /// The merge completed successfully.
    fn on_finish(&mut self, _result: &MergeResult) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl ProgressObserver for Silent {}

/// Observer that reports to the terminal.
#[derive(Debug)]
pub struct ConsoleReporter {
    formatter: OutputFormatter,
    show_progress: bool,
    bar: Option<ProgressBar>,
}

impl ConsoleReporter {
    /// Create a reporter.
    ///
    /// With `show_progress` off, per-file lines and the progress bar are
    /// suppressed; warnings and the summary are still printed.
    pub fn new(formatter: OutputFormatter, show_progress: bool) -> Self {
        Self {
            formatter,
            show_progress,
            bar: None,
        }
    }

    /// Create a reporter from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(OutputFormatter::from_config(config), config.progress)
    }

    /// The formatter used for messages.
    pub fn formatter(&self) -> &OutputFormatter {
        &self.formatter
    }

    fn draws_bar(&self) -> bool {
        self.bar.as_ref().is_some_and(ProgressBar::is_enabled)
    }

    /// Print `message` without tearing the progress bar.
    fn interrupt_bar(&mut self, print: impl FnOnce(&OutputFormatter)) {
        if let Some(bar) = self.bar.as_ref() {
            bar.clear();
        }
        print(&self.formatter);
        if let Some(bar) = self.bar.as_mut() {
            bar.redraw();
        }
    }
}

impl ProgressObserver for ConsoleReporter {
    fn on_start(&mut self, total: usize) {
        if self.show_progress && !self.formatter.is_quiet() {
            let mut bar = ProgressBar::new(total);
            bar.set_message("Merging PDF files");
            self.bar = Some(bar);
        }
    }

    fn on_unmatched_pattern(&mut self, pattern: &str) {
        self.formatter
            .warning(&format!("No files matched pattern: {pattern}"));
    }

    fn on_unreadable_path(&mut self, path: &Path, reason: &str) {
        self.formatter
            .warning(&format!("Cannot read {}: {reason}", path.display()));
    }

    fn on_file_merged(&mut self, index: usize, total: usize, path: &Path, pages: usize) {
        if !self.show_progress {
            return;
        }

        if self.draws_bar() {
            if self.formatter.is_verbose() {
                let line = format!("[{index}/{total}] {} ({pages} pages)", path.display());
                self.interrupt_bar(|f| f.debug(&line));
            }
            if let Some(bar) = self.bar.as_mut() {
                bar.increment();
            }
        } else {
            self.formatter.info(&format!(
                "  [{index}/{total}] {} ({pages} pages)",
                path.display()
            ));
        }
    }

    fn on_file_skipped(&mut self, index: usize, total: usize, error: &MergeError) {
        let line = format!("[{index}/{total}] Skipping: {error}");
        self.interrupt_bar(|f| f.warning(&line));
        if let Some(bar) = self.bar.as_mut() {
            bar.increment();
        }
    }

    fn on_finish(&mut self, result: &MergeResult) {
        if let Some(mut bar) = self.bar.take() {
            bar.finish();
        }

        if result.skipped > 0 {
            self.formatter.warning(&format!(
                "Skipped {} of {} file(s)",
                result.skipped, result.attempted
            ));
        }

        if result.dry_run {
            self.formatter.info("Merge plan:");
            let merged = result.files.iter().filter(|f| f.valid == Some(true));
            for (idx, file) in merged.enumerate() {
                self.formatter.list_item(
                    idx + 1,
                    &format!(
                        "{} ({} pages)",
                        file.path.display(),
                        file.pages.unwrap_or_default()
                    ),
                );
            }
            self.formatter.success(&format!(
                "Dry run completed: {} page(s) would be written to {}",
                result.total_pages,
                result.output.display()
            ));
            return;
        }

        self.formatter.success(&format!(
            "Merged {} file(s) ({} pages) into {}",
            result.merged,
            result.total_pages,
            result.output.display()
        ));

        self.formatter.detail(
            "Input size",
            &crate::utils::format_file_size(result.bytes_read),
        );
        if let Some(bytes) = result.bytes_written {
            self.formatter
                .detail("Output size", &crate::utils::format_file_size(bytes));
        }
        self.formatter
            .detail("Elapsed", &format!("{:.2}s", result.elapsed.as_secs_f64()));
    }
}
