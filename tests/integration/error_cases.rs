//! Integration tests for error handling and edge cases.

use merge_pdf::error::{ErrorKind, MergeError};
use merge_pdf::merge::{Policy, merge};
use merge_pdf::output::ProgressObserver;
use merge_pdf::{Merger, MergeResult};
use rstest::rstest;
use std::path::Path;

use crate::common::{Workspace, page_labels};

#[rstest]
#[case(Policy::Strict)]
#[case(Policy::Permissive)]
fn test_no_input_files(#[case] policy: Policy) {
    let ws = Workspace::new();
    let output = ws.join("merged.pdf");

    let err = merge([ws.pattern("*.pdf")], &output, policy).unwrap_err();

    assert!(matches!(err, MergeError::NoInputFiles));
    assert!(!output.exists());
}

#[test]
fn test_strict_missing_file_names_path() {
    let ws = Workspace::new();
    let good = ws.pdf("a.pdf", 1, 1);
    let missing = ws.pattern("missing.pdf");
    let output = ws.join("merged.pdf");

    let err = merge([good, missing], &output, Policy::Strict).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FileNotFound);
    assert_eq!(err.path(), Some(ws.join("missing.pdf").as_path()));
    assert!(err.to_string().contains("missing.pdf"));
    assert_eq!(ws.entries(), vec!["a.pdf"]);
}

#[test]
fn test_strict_invalid_pdf_leaves_no_output() {
    let ws = Workspace::new();
    let inputs = vec![ws.pdf("a.pdf", 1, 1), ws.pdf("b.pdf", 1, 2), ws.garbage("c.pdf")];
    let output = ws.join("merged.pdf");

    let err = merge(&inputs, &output, Policy::Strict).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidPdf);
    assert_eq!(ws.entries(), vec!["a.pdf", "b.pdf", "c.pdf"]);
}

#[test]
fn test_strict_failure_removes_stale_output() {
    let ws = Workspace::new();
    let output = ws.join("merged.pdf");
    std::fs::write(&output, b"stale output from an earlier run").unwrap();
    let inputs = vec![ws.pdf("a.pdf", 1, 1), ws.pdf("b.pdf", 1, 2), ws.garbage("c.pdf")];

    let err = merge(&inputs, &output, Policy::Strict).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidPdf);
    assert!(!output.exists());
    assert_eq!(ws.entries(), vec!["a.pdf", "b.pdf", "c.pdf"]);
}

#[test]
fn test_strict_directory_input_is_invalid() {
    let ws = Workspace::new();
    std::fs::create_dir(ws.join("folder.pdf")).unwrap();
    let output = ws.join("merged.pdf");

    let err = merge([ws.pattern("folder.pdf")], &output, Policy::Strict).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidPdf);
}

#[test]
fn test_permissive_partial_success() {
    let ws = Workspace::new();
    let inputs = vec![
        ws.pdf("a.pdf", 1, 1),
        ws.pattern("missing.pdf"),
        ws.garbage("bad.pdf"),
        ws.pdf("b.pdf", 2, 2),
    ];
    let output = ws.join("merged.pdf");

    let result = merge(&inputs, &output, Policy::Permissive).unwrap();

    assert_eq!(result.attempted, 4);
    assert_eq!(result.merged, 2);
    assert_eq!(result.skipped, 2);
    assert_eq!(page_labels(&output), vec![100, 200, 201]);

    let reasons: Vec<_> = result
        .files
        .iter()
        .filter_map(|f| f.skip_reason.as_deref())
        .collect();
    assert_eq!(reasons.len(), 2);
    assert!(reasons[0].contains("File not found"));
    assert!(reasons[1].contains("Invalid PDF"));
}

#[test]
fn test_permissive_all_invalid() {
    let ws = Workspace::new();
    let inputs = vec![ws.garbage("x.pdf"), ws.pattern("missing.pdf")];
    let output = ws.join("merged.pdf");

    let err = merge(&inputs, &output, Policy::Permissive).unwrap_err();

    assert!(matches!(err, MergeError::NoValidFiles));
    assert!(!output.exists());
}

#[rstest]
#[case(Policy::Strict)]
#[case(Policy::Permissive)]
fn test_invalid_pattern_is_fatal(#[case] policy: Policy) {
    let ws = Workspace::new();
    let good = ws.pdf("a.pdf", 1, 1);
    let output = ws.join("merged.pdf");

    let err = merge([good, ws.pattern("[unclosed*.pdf")], &output, policy).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidPattern);
    assert!(!output.exists());
}

#[cfg(unix)]
#[test]
fn test_unwritable_output_directory() {
    use std::os::unix::fs::PermissionsExt;

    let ws = Workspace::new();
    let input = ws.pdf("a.pdf", 1, 1);
    let locked = ws.join("locked");
    std::fs::create_dir(&locked).unwrap();
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o500)).unwrap();

    // Root ignores directory permissions
    if std::fs::write(locked.join("write-check"), b"").is_ok() {
        return;
    }

    let output = locked.join("merged.pdf");
    let err = merge([input], &output, Policy::Strict).unwrap_err();

    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o700)).unwrap();
    assert_eq!(err.kind(), ErrorKind::WriteFailure);
    assert!(std::fs::read_dir(&locked).unwrap().next().is_none());
}

/// Counts observer events.
#[derive(Default)]
struct Counter {
    merged: usize,
    skipped: usize,
    unmatched: Vec<String>,
    finished: bool,
}

impl ProgressObserver for Counter {
    fn on_unmatched_pattern(&mut self, pattern: &str) {
        self.unmatched.push(pattern.to_string());
    }

    fn on_file_merged(&mut self, _index: usize, _total: usize, _path: &Path, _pages: usize) {
        self.merged += 1;
    }

    fn on_file_skipped(&mut self, _index: usize, _total: usize, _error: &MergeError) {
        self.skipped += 1;
    }

    fn on_finish(&mut self, _result: &MergeResult) {
        self.finished = true;
    }
}

#[test]
fn test_observer_sees_every_file() {
    let ws = Workspace::new();
    let inputs = vec![
        ws.pdf("a.pdf", 1, 1),
        ws.garbage("bad.pdf"),
        ws.pattern("nothing_*.pdf"),
        ws.pdf("b.pdf", 1, 2),
    ];
    let output = ws.join("merged.pdf");

    let mut counter = Counter::default();
    Merger::new(Policy::Permissive)
        .merge(&inputs, &output, &mut counter)
        .unwrap();

    assert_eq!(counter.merged, 2);
    assert_eq!(counter.skipped, 1);
    assert_eq!(counter.unmatched, vec![ws.pattern("nothing_*.pdf")]);
    assert!(counter.finished);
}

#[test]
fn test_observer_not_finished_on_failure() {
    let ws = Workspace::new();
    let output = ws.join("merged.pdf");

    let mut counter = Counter::default();
    let result = Merger::new(Policy::Strict).merge([ws.garbage("bad.pdf")], &output, &mut counter);

    assert!(result.is_err());
    assert!(!counter.finished);
}
