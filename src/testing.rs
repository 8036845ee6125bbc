//! Fixture builders shared by unit tests.

use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use std::path::Path;

/// Dictionary key carrying a per-page number so tests can check page order.
pub const MARKER_KEY: &[u8] = b"Marker";

/// Build a document with `pages` pages whose markers start at `first_marker`.
///
/// The page size lives on the page-tree root and is inherited by every page.
pub fn build_test_document(pages: u32, first_marker: i64) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let resources_id = doc.add_object(dictionary! {
        "ProcSet" => vec![Object::Name(b"PDF".to_vec())],
    });

    let mut kids = Vec::new();
    for index in 0..pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Resources" => resources_id,
            "Contents" => content_id,
            "Marker" => first_marker + i64::from(index),
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => i64::from(pages),
            "MediaBox" => Object::Array(vec![0.into(), 0.into(), 612.into(), 792.into()]),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Write a test document to `path`.
pub fn write_test_pdf(path: &Path, pages: u32, first_marker: i64) {
    let mut doc = build_test_document(pages, first_marker);
    doc.save(path).unwrap();
}

/// Markers of every page of `doc`, in page order.
pub fn page_markers(doc: &Document) -> Vec<i64> {
    doc.get_pages()
        .values()
        .map(|&id| marker_of(doc, id))
        .collect()
}

fn marker_of(doc: &Document, page_id: ObjectId) -> i64 {
    doc.get_dictionary(page_id)
        .and_then(|page| page.get(MARKER_KEY))
        .and_then(Object::as_i64)
        .unwrap()
}
