//! Helpers shared by the integration tests.
//!
//! Fixtures are generated with lopdf into a temporary directory, so the
//! tests carry no binary files.

use lopdf::{Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch directory holding generated PDFs.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Pattern string for `name` inside the workspace.
    pub fn pattern(&self, name: &str) -> String {
        self.join(name).to_string_lossy().into_owned()
    }

    /// Write a PDF with `pages` pages, labelled `label.0`, `label.1`, ...
    pub fn pdf(&self, name: &str, pages: u32, label: i64) -> String {
        let path = self.join(name);
        let mut doc = build_pdf(pages, label);
        doc.save(&path).expect("Failed to save fixture");
        path.to_string_lossy().into_owned()
    }

    /// Write a file that is not a PDF.
    pub fn garbage(&self, name: &str) -> String {
        let path = self.join(name);
        std::fs::write(&path, b"this is not a pdf").unwrap();
        path.to_string_lossy().into_owned()
    }

    /// Names of all entries in the workspace, sorted.
    pub fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// Build a document whose pages carry a `Label` of `label * 100 + index`.
pub fn build_pdf(pages: u32, label: i64) -> Document {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (0..pages)
        .map(|index| {
            let content_id = doc.add_object(Stream::new(dictionary! {}, b"q Q".to_vec()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Label" => label * 100 + i64::from(index),
            });
            Object::Reference(page_id)
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => i64::from(pages),
            "MediaBox" => Object::Array(vec![0.into(), 0.into(), 595.into(), 842.into()]),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Page labels of the PDF at `path`, in page order.
pub fn page_labels(path: &Path) -> Vec<i64> {
    let doc = Document::load(path).expect("Output is not a readable PDF");
    doc.get_pages()
        .values()
        .map(|&id| {
            doc.get_dictionary(id)
                .and_then(|page| page.get(b"Label"))
                .and_then(Object::as_i64)
                .unwrap()
        })
        .collect()
}
