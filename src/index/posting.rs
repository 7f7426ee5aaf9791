use crate::core::types::DocId;

/// Posting list for a term.
/// Invariant: doc ids are strictly increasing, no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingList {
    doc_ids: Vec<DocId>,
}

impl PostingList {
    pub fn new() -> Self {
        PostingList { doc_ids: Vec::new() }
    }

    pub fn from_doc_ids(doc_ids: Vec<DocId>) -> Self {
        debug_assert!(doc_ids.windows(2).all(|w| w[0] < w[1]));
        PostingList { doc_ids }
    }

    /// Append a doc id. Ids arrive in build order, so appending keeps the
    /// list sorted; anything else is a caller bug.
    pub fn push(&mut self, doc_id: DocId) {
        debug_assert!(self.doc_ids.last().is_none_or(|&last| last < doc_id));
        self.doc_ids.push(doc_id);
    }

    pub fn doc_ids(&self) -> &[DocId] {
        &self.doc_ids
    }

    pub fn len(&self) -> usize {
        self.doc_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_ids.is_empty()
    }

    /// Sorted union of two posting lists, linear merge, duplicates added once.
    pub fn union(&self, other: &PostingList) -> PostingList {
        let a = &self.doc_ids;
        let b = &other.doc_ids;
        let mut result = Vec::with_capacity(a.len() + b.len());
        let mut i = 0;
        let mut j = 0;

        while i < a.len() && j < b.len() {
            if a[i] < b[j] {
                result.push(a[i]);
                i += 1;
            } else if a[i] > b[j] {
                result.push(b[j]);
                j += 1;
            } else {
                result.push(a[i]);
                i += 1;
                j += 1;
            }
        }

        result.extend_from_slice(&a[i..]);
        result.extend_from_slice(&b[j..]);

        PostingList { doc_ids: result }
    }

    /// Sorted intersection of two posting lists, linear merge.
    pub fn intersect(&self, other: &PostingList) -> PostingList {
        let a = &self.doc_ids;
        let b = &other.doc_ids;
        let mut result = Vec::new();
        let mut i = 0;
        let mut j = 0;

        while i < a.len() && j < b.len() {
            if a[i] < b[j] {
                i += 1;
            } else if a[i] > b[j] {
                j += 1;
            } else {
                result.push(a[i]);
                i += 1;
                j += 1;
            }
        }

        PostingList { doc_ids: result }
    }
}

impl IntoIterator for PostingList {
    type Item = DocId;
    type IntoIter = std::vec::IntoIter<DocId>;

    fn into_iter(self) -> Self::IntoIter {
        self.doc_ids.into_iter()
    }
}
