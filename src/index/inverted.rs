use std::collections::BTreeMap;

use tracing::debug;

use crate::compression::codec::{compress_postings, PostingCodec};
use crate::core::error::Result;
use crate::core::types::DocId;
use crate::index::posting::PostingList;

/// Build-phase inverted index: term → posting list.
///
/// A `BTreeMap` keeps term iteration deterministic, so the same corpus
/// always produces byte-identical index files.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    pub postings: BTreeMap<String, PostingList>,
    pub doc_count: u32,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex {
            postings: BTreeMap::new(),
            doc_count: 0,
        }
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Delta-encode and pack every posting list with the chosen codec.
    pub fn compress(self, codec: PostingCodec) -> Result<CompressedIndex> {
        let mut blobs = BTreeMap::new();
        for (term, posting_list) in self.postings {
            let blob = compress_postings(codec, posting_list.doc_ids())?;
            blobs.insert(term, blob);
        }

        debug!(terms = blobs.len(), codec = codec.tag(), "compressed posting lists");
        Ok(CompressedIndex { blobs, codec })
    }
}

/// Persisted-phase index: term → codec-specific byte blob.
#[derive(Debug)]
pub struct CompressedIndex {
    pub blobs: BTreeMap<String, Vec<u8>>,
    pub codec: PostingCodec,
}

/// doc id → url, one entry per document seen during the build.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DocUrlMap {
    pub urls: BTreeMap<DocId, String>,
}

impl DocUrlMap {
    pub fn new() -> Self {
        DocUrlMap { urls: BTreeMap::new() }
    }

    pub fn insert(&mut self, doc_id: DocId, url: String) {
        self.urls.insert(doc_id, url);
    }

    pub fn url(&self, doc_id: DocId) -> Option<&str> {
        self.urls.get(&doc_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
