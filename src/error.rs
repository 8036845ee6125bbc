//! Error types for merge-pdf.
//!
//! Every failure the orchestrator can surface is a [`MergeError`]. Each
//! variant maps to a fieldless [`ErrorKind`], which is what the merge policy
//! inspects when deciding whether a per-file failure aborts the run.

use std::io;
use std::path::{Path, PathBuf};

/// Result type alias for merge-pdf operations.
pub type Result<T> = std::result::Result<T, MergeError>;

/// Main error type for merge operations.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// No pattern matched any file.
    #[error("No input files matched the given patterns")]
    NoInputFiles,

    /// A referenced input file does not exist.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// An input exists but is not a readable PDF.
    #[error("Invalid PDF: {}\n  Reason: {reason}", .path.display())]
    InvalidPdf {
        /// Path to the rejected file.
        path: PathBuf,
        /// Why the file was rejected.
        reason: String,
    },

    /// Every referenced file was missing or invalid.
    #[error("No valid PDF files to merge")]
    NoValidFiles,

    /// The combined document could not be written.
    #[error("Failed to write output file: {}\n  Reason: {source}", .path.display())]
    WriteFailure {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A pattern could not be expanded.
    #[error("Invalid input pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Details from the glob engine.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        message: String,
    },
}

/// Discriminant of a [`MergeError`], used for policy decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`MergeError::NoInputFiles`].
    NoInputFiles,
    /// See [`MergeError::FileNotFound`].
    FileNotFound,
    /// See [`MergeError::InvalidPdf`].
    InvalidPdf,
    /// See [`MergeError::NoValidFiles`].
    NoValidFiles,
    /// See [`MergeError::WriteFailure`].
    WriteFailure,
    /// See [`MergeError::InvalidPattern`].
    InvalidPattern,
    /// See [`MergeError::InvalidConfig`].
    InvalidConfig,
}

impl MergeError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create an InvalidPdf error.
    pub fn invalid_pdf(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidPdf {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a WriteFailure error.
    pub fn write_failure(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::WriteFailure {
            path: path.into(),
            source,
        }
    }

    /// Create an InvalidPattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoInputFiles => ErrorKind::NoInputFiles,
            Self::FileNotFound { .. } => ErrorKind::FileNotFound,
            Self::InvalidPdf { .. } => ErrorKind::InvalidPdf,
            Self::NoValidFiles => ErrorKind::NoValidFiles,
            Self::WriteFailure { .. } => ErrorKind::WriteFailure,
            Self::InvalidPattern { .. } => ErrorKind::InvalidPattern,
            Self::InvalidConfig { .. } => ErrorKind::InvalidConfig,
        }
    }

    /// The file this error originated from, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::FileNotFound { path }
            | Self::InvalidPdf { path, .. }
            | Self::WriteFailure { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Whether this error concerns a single input file.
    ///
    /// Only per-file errors are candidates for being skipped.
    pub fn is_per_file(&self) -> bool {
        matches!(self.kind(), ErrorKind::FileNotFound | ErrorKind::InvalidPdf)
    }
}
