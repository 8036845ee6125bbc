//! CLI argument parsing for merge-pdf.
//!
//! # Examples
//!
//! ```no_run
//! use merge_pdf::cli::Cli;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! println!("Merging {} pattern(s)", cli.patterns.len());
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::{Config, DEFAULT_OUTPUT};
use crate::error::{MergeError, Result};
use crate::merge::Policy;

/// Merge PDF files into a single document.
///
/// Files are appended in the order their patterns are given. Matches of a
/// single wildcard pattern are taken in sorted order.
#[derive(Parser, Debug)]
#[command(name = "merge-pdf")]
#[command(version)]
#[command(about = "Merge PDF files into a single document", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input files or glob patterns (in order)
    ///
    /// Examples:
    ///   merge-pdf a.pdf b.pdf -o out.pdf
    ///   merge-pdf 'chapters/*.pdf' appendix.pdf -o book.pdf
    #[arg(required = true, value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    #[arg(env = "MERGE_PDF_OUTPUT")]
    pub output: PathBuf,

    /// How to handle missing or invalid inputs
    ///
    /// - strict: stop at the first bad file and leave no output (default)
    /// - permissive: skip bad files with a warning and merge the rest
    #[arg(long, value_name = "POLICY", default_value = "strict")]
    #[arg(env = "MERGE_PDF_POLICY", ignore_case = true)]
    #[arg(value_parser = ["strict", "permissive"])]
    pub policy: String,

    /// Disable per-file progress output
    #[arg(long)]
    pub no_progress: bool,

    /// Dry run - validate inputs and show the merge plan without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output - show details about each file
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print the merge result as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Convert CLI arguments into a validated [`Config`].
    ///
    /// `--json` implies `--quiet` and `--no-progress` so that stdout carries
    /// only the JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::InvalidConfig`] if the policy is unknown or the
    /// resulting configuration fails validation.
    pub fn to_config(&self) -> Result<Config> {
        let policy = Policy::from_str(&self.policy)?;

        let config = Config {
            patterns: self.patterns.clone(),
            output: self.output.clone(),
            policy,
            progress: !self.no_progress && !self.json,
            quiet: self.quiet || self.json,
            verbose: self.verbose && !self.json,
            dry_run: self.dry_run,
            json: self.json,
        };

        config.validate()?;

        Ok(config)
    }

    /// Early checks that need no file system access.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is empty.
    pub fn validate(&self) -> Result<()> {
        if self.patterns.iter().any(|p| p.trim().is_empty()) {
            return Err(MergeError::invalid_config("Input patterns cannot be empty"));
        }

        Ok(())
    }
}

impl TryFrom<&Cli> for Config {
    type Error = MergeError;

    fn try_from(cli: &Cli) -> Result<Self> {
        cli.validate()?;
        cli.to_config()
    }
}
