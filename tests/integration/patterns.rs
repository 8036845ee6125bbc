//! Integration tests for pattern expansion and ordering.

use merge_pdf::merge::{Policy, merge};
use serial_test::serial;

use crate::common::{Workspace, page_labels};

#[test]
fn test_glob_matches_in_sorted_order() {
    let ws = Workspace::new();
    ws.pdf("chapter_03.pdf", 1, 3);
    ws.pdf("chapter_01.pdf", 1, 1);
    ws.pdf("chapter_02.pdf", 1, 2);
    let output = ws.join("book.pdf");

    merge([ws.pattern("chapter_*.pdf")], &output, Policy::Strict).unwrap();

    assert_eq!(page_labels(&output), vec![100, 200, 300]);
}

#[test]
fn test_patterns_are_concatenated_in_order() {
    let ws = Workspace::new();
    ws.pdf("body_1.pdf", 1, 1);
    ws.pdf("body_2.pdf", 1, 2);
    ws.pdf("cover.pdf", 1, 9);
    let output = ws.join("out").join("book.pdf");

    merge(
        [ws.pattern("cover.pdf"), ws.pattern("body_*.pdf")],
        &output,
        Policy::Strict,
    )
    .unwrap();

    assert_eq!(page_labels(&output), vec![900, 100, 200]);
}

#[test]
fn test_unmatched_wildcard_is_not_an_error() {
    let ws = Workspace::new();
    let input = ws.pdf("a.pdf", 1, 1);
    let output = ws.join("merged.pdf");

    let result = merge([input, ws.pattern("none_*.pdf")], &output, Policy::Strict).unwrap();

    assert_eq!(result.merged, 1);
}

#[test]
fn test_question_mark_and_class_wildcards() {
    let ws = Workspace::new();
    ws.pdf("p1.pdf", 1, 1);
    ws.pdf("p2.pdf", 1, 2);
    ws.pdf("p3.pdf", 1, 3);
    let output = ws.join("merged.pdf");

    merge(
        [ws.pattern("p[13].pdf"), ws.pattern("p?.pdf")],
        &output,
        Policy::Strict,
    )
    .unwrap();

    assert_eq!(page_labels(&output), vec![100, 300, 100, 200, 300]);
}

#[test]
#[serial]
fn test_relative_patterns_resolve_against_cwd() {
    let ws = Workspace::new();
    ws.pdf("b.pdf", 1, 2);
    ws.pdf("a.pdf", 1, 1);

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(ws.path()).unwrap();
    let result = merge(["*.pdf"], std::path::Path::new("out/merged.pdf"), Policy::Strict);
    std::env::set_current_dir(previous).unwrap();

    result.unwrap();
    assert_eq!(page_labels(&ws.join("out/merged.pdf")), vec![100, 200]);
}
