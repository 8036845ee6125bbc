//! The in-progress combined document.
//!
//! Each appended document keeps its own page tree: its root `Pages` node is
//! grafted under the combined root, so attributes inherited from that node
//! (media box, resources, rotation) stay in effect for its pages.

use lopdf::{Document, Object, ObjectId, dictionary};

use crate::error::{MergeError, Result};
use crate::io::LoadedPdf;

/// Builds one document out of many, in append order.
#[derive(Debug)]
pub struct CombinedDocument {
    document: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    page_count: usize,
}

impl CombinedDocument {
    /// Create an empty combined document.
    pub fn new() -> Self {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0,
            }),
        );

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        Self {
            document,
            pages_id,
            kids: Vec::new(),
            page_count: 0,
        }
    }

    /// Number of documents appended so far.
    pub fn source_count(&self) -> usize {
        self.kids.len()
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// True when nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.kids.is_empty()
    }

    /// Append every page of `loaded`, returning how many pages were added.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::InvalidPdf`] if the document has no catalog or
    /// page tree. The combined document is left untouched in that case.
    pub fn append(&mut self, loaded: LoadedPdf) -> Result<usize> {
        let LoadedPdf {
            mut document,
            path,
            page_count,
            load_time,
            ..
        } = loaded;

        document.renumber_objects_with(self.document.max_id + 1);

        let source_pages_id = root_pages_id(&document)
            .map_err(|err| MergeError::invalid_pdf(&path, format!("unusable page tree: {err}")))?;

        document
            .get_dictionary_mut(source_pages_id)
            .map_err(|err| MergeError::invalid_pdf(&path, format!("unusable page tree: {err}")))?
            .set("Parent", self.pages_id);

        if document.version > self.document.version {
            self.document.version = document.version.clone();
        }

        self.document.max_id = self.document.max_id.max(document.max_id);
        self.document.objects.extend(document.objects);
        self.kids.push(Object::Reference(source_pages_id));
        self.page_count += page_count;

        tracing::debug!(
            path = %path.display(),
            pages = page_count,
            load_ms = load_time.as_millis() as u64,
            total_pages = self.page_count,
            "appended document"
        );

        Ok(page_count)
    }

    /// Finalize the page tree and return the combined document.
    ///
    /// Catalogs and other objects of the appended documents that are no
    /// longer reachable are dropped.
    pub fn finish(mut self) -> Document {
        let root = dictionary! {
            "Type" => "Pages",
            "Kids" => self.kids,
            "Count" => self.page_count as i64,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(root));

        let pruned = self.document.prune_objects();
        tracing::trace!(pruned = pruned.len(), "pruned unreachable objects");
        self.document.renumber_objects();

        self.document
    }
}

impl Default for CombinedDocument {
    fn default() -> Self {
        Self::new()
    }
}

fn root_pages_id(document: &Document) -> lopdf::Result<ObjectId> {
    document.catalog()?.get(b"Pages")?.as_reference()
}
