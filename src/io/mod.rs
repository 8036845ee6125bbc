//! File I/O for merge-pdf.
//!
//! This module wraps the two points where the crate touches PDF files on
//! disk:
//! - Opening and parsing inputs ([`PdfReader`])
//! - Atomically writing the combined document ([`PdfWriter`])
//!
//! # Examples
//!
//! ```no_run
//! use merge_pdf::io::{PdfReader, PdfWriter};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut loaded = PdfReader::new().open(Path::new("input.pdf"))?;
//! PdfWriter::new().write(&mut loaded.document, Path::new("copy.pdf"))?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics, partial_path};
