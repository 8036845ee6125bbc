//! PDF merging.
//!
//! [`Merger`] drives a run; [`CombinedDocument`] holds the document being
//! assembled and [`Policy`] decides what happens when an input is bad.

pub mod builder;
pub mod merger;
pub mod policy;

pub use builder::CombinedDocument;
pub use merger::{MergeOptions, MergeResult, Merger, merge};
pub use policy::{Disposition, Policy};
