//! merge-pdf - Merge PDF files into a single document.
//!
//! Inputs are given as glob patterns and appended in order. A [`Policy`]
//! decides whether a missing or broken input aborts the run (`Strict`) or is
//! skipped with a warning (`Permissive`). Under `Strict`, a failed run never
//! leaves a partial output behind.
//!
//! # Examples
//!
//! ```no_run
//! use merge_pdf::merge::{merge, Policy};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let result = merge(["a.pdf", "chapters/*.pdf"], Path::new("merged.pdf"), Policy::Strict)?;
//! println!("Created {} page document", result.total_pages);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

use anyhow::Context;
use std::io::Write;

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod utils;
pub mod walker;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use error::{ErrorKind, MergeError, Result};
pub use merge::{MergeResult, Merger, Policy};

use crate::output::ConsoleReporter;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Run a merge as described by `config`, reporting to the terminal.
///
/// With `config.json` set, the result is printed on stdout as JSON and the
/// human-readable summary is suppressed.
///
/// # Errors
///
/// Returns the [`MergeError`] that stopped the merge, or an error if the JSON
/// report cannot be written.
pub fn run(config: &Config) -> anyhow::Result<MergeResult> {
    let mut reporter = ConsoleReporter::from_config(config);
    reporter.formatter().debug(&format!("{NAME} v{VERSION}"));

    if config.dry_run && config.should_print() {
        reporter
            .formatter()
            .info("Dry run mode - no files will be created");
    }

    tracing::debug!(
        patterns = config.patterns.len(),
        output = %config.output.display(),
        policy = %config.policy,
        "starting merge"
    );

    let merger = Merger::with_options(config.merge_options());
    let result = merger.merge(&config.patterns, &config.output, &mut reporter)?;

    if config.json {
        let json =
            serde_json::to_string_pretty(&result).context("Failed to serialize merge result")?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}").context("Failed to write merge result")?;
    }

    Ok(result)
}
