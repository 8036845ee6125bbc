//! Failure policy for per-file errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ErrorKind, MergeError};

/// How the merge reacts to a missing or unreadable input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// The first invalid or missing input aborts the whole merge.
    #[default]
    Strict,
    /// Invalid or missing inputs are skipped with a warning.
    Permissive,
}

/// What to do with a file that failed to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Record the file as skipped and keep going.
    Skip,
    /// Stop and propagate the error.
    Abort,
}

impl Policy {
    /// Decide what happens to a file that failed with `error`.
    ///
    /// Only [`ErrorKind::FileNotFound`] and [`ErrorKind::InvalidPdf`] can
    /// ever be skipped; everything else aborts regardless of policy.
    pub fn on_file_error(self, error: &MergeError) -> Disposition {
        match (self, error.kind()) {
            (Self::Permissive, ErrorKind::FileNotFound | ErrorKind::InvalidPdf) => {
                Disposition::Skip
            }
            _ => Disposition::Abort,
        }
    }

    /// Whether a failed run must remove what it wrote.
    pub fn cleans_up_on_failure(self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl FromStr for Policy {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            _ => Err(MergeError::invalid_config(format!(
                "Invalid policy: {s}. Must be one of: strict, permissive"
            ))),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Permissive => write!(f, "permissive"),
        }
    }
}
