//! Configuration for merge-pdf.
//!
//! [`Config`] is the validated form of the command line. It is built by
//! [`Cli::to_config`](crate::cli::Cli::to_config) and consumed by
//! [`run`](crate::run).

use std::path::{Component, Path, PathBuf};

use crate::error::{MergeError, Result};
use crate::merge::{MergeOptions, Policy};
use crate::walker::is_glob_pattern;

/// Output path used when none is given.
pub const DEFAULT_OUTPUT: &str = "merged.pdf";

/// Complete configuration for a merge run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input patterns, in merge order.
    pub patterns: Vec<String>,

    /// Output file path.
    pub output: PathBuf,

    /// Reaction to missing or invalid inputs.
    pub policy: Policy,

    /// Show per-file progress.
    pub progress: bool,

    /// Suppress non-error output.
    pub quiet: bool,

    /// Show verbose output.
    pub verbose: bool,

    /// Validate without writing.
    pub dry_run: bool,

    /// Print the result as JSON on stdout.
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            policy: Policy::default(),
            progress: true,
            quiet: false,
            verbose: false,
            dry_run: false,
            json: false,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::InvalidConfig`] if:
    /// - Both quiet and verbose are set
    /// - The output path is empty or an existing directory
    /// - The output path is also given as a literal input
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            return Err(MergeError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if self.output.as_os_str().is_empty() {
            return Err(MergeError::invalid_config("Output path cannot be empty"));
        }

        if self.output.is_dir() {
            return Err(MergeError::invalid_config(format!(
                "Output path is a directory: {}",
                self.output.display()
            )));
        }

        // Wildcard overlap is only known after expansion; literal paths can be
        // checked up front.
        for pattern in &self.patterns {
            if !is_glob_pattern(pattern) && same_file(Path::new(pattern), &self.output) {
                return Err(MergeError::invalid_config(format!(
                    "Output file cannot be the same as an input file: {}",
                    self.output.display()
                )));
            }
        }

        Ok(())
    }

    /// Options for the merger.
    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            policy: self.policy,
            dry_run: self.dry_run,
            ..Default::default()
        }
    }

    /// Whether human-readable output should be printed.
    pub fn should_print(&self) -> bool {
        !self.quiet && !self.json
    }
}

/// Whether `a` and `b` name the same file once normalized.
fn same_file(a: &Path, b: &Path) -> bool {
    normalize(a) == normalize(b)
}

/// Drop `.` components and resolve the parent directory when it exists.
fn normalize(path: &Path) -> PathBuf {
    let lexical: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let Some(name) = lexical.file_name() else {
        return lexical;
    };
    let parent = match lexical.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    parent
        .canonicalize()
        .map(|parent| parent.join(name))
        .unwrap_or(lexical)
}
