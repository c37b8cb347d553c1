//! Ordered article collection.

use std::ops::Index;

use crate::document::document::Document;

/// The articles of one run, in input order.
///
/// Each document's `doc_id` is its position here. The order is the
/// tie-break order of rankings and the row order of the overview table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    /// Create a corpus, assigning document ids by position.
    pub fn new(mut documents: Vec<Document>) -> Self {
        for (doc_id, document) in documents.iter_mut().enumerate() {
            document.set_doc_id(doc_id);
        }
        Corpus { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Get a document by id.
    pub fn get(&self, doc_id: usize) -> Option<&Document> {
        self.documents.get(doc_id)
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Document> {
        self.documents.iter_mut()
    }

    /// The first `n` documents.
    pub fn head(&self, n: usize) -> &[Document] {
        &self.documents[..n.min(self.documents.len())]
    }
}

impl Index<usize> for Corpus {
    type Output = Document;

    fn index(&self, doc_id: usize) -> &Document {
        &self.documents[doc_id]
    }
}

impl FromIterator<Document> for Corpus {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Corpus::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}
