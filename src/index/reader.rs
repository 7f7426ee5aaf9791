use std::collections::HashMap;
use std::sync::Arc;

use crate::analysis::normalizer::CachedNormalizer;
use crate::compression::codec::{decompress_postings, PostingCodec};
use crate::core::error::Result;
use crate::index::inverted::CompressedIndex;
use crate::index::posting::PostingList;

/// Read-only view over a loaded index.
///
/// Posting lists stay compressed in memory and are decoded per lookup, the
/// same shape the blobs have on disk.
pub struct SearchIndex {
    blobs: HashMap<String, Vec<u8>>,
    codec: PostingCodec,
    normalizer: Arc<CachedNormalizer>,
}

impl SearchIndex {
    pub fn new(
        blobs: HashMap<String, Vec<u8>>,
        codec: PostingCodec,
        normalizer: Arc<CachedNormalizer>,
    ) -> Self {
        SearchIndex {
            blobs,
            codec,
            normalizer,
        }
    }

    pub fn from_compressed(index: CompressedIndex, normalizer: Arc<CachedNormalizer>) -> Self {
        let codec = index.codec;
        SearchIndex::new(index.blobs.into_iter().collect(), codec, normalizer)
    }

    pub fn codec(&self) -> PostingCodec {
        self.codec
    }

    pub fn term_count(&self) -> usize {
        self.blobs.len()
    }

    /// Look up the posting list for a raw query token.
    ///
    /// The token is lowercased and normalized with the same normalizer the
    /// build used, so matching is case-insensitive.
    /// `Ok(None)` means the term is absent from the index — the caller
    /// decides how to report that; a blob that fails to decode is a
    /// persisted-data integrity error and comes back as `Err`.
    pub fn postings(&self, raw_token: &str) -> Result<Option<PostingList>> {
        let term = self.normalizer.normalize(&raw_token.to_lowercase());
        match self.blobs.get(&term) {
            None => Ok(None),
            Some(blob) => {
                let doc_ids = decompress_postings(self.codec, blob)?;
                Ok(Some(PostingList::from_doc_ids(doc_ids)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalizer::IdentityNormalizer;
    use crate::core::types::Document;
    use crate::index::builder::IndexBuilder;

    fn search_index(codec: PostingCodec) -> SearchIndex {
        let normalizer = Arc::new(CachedNormalizer::new(Box::new(IdentityNormalizer)));
        let (index, _) = IndexBuilder::new(normalizer.clone())
            .build(
                vec![
                    Document::new("u0", "cat dog"),
                    Document::new("u1", "dog bird"),
                ]
                .into_iter()
                .map(Ok),
            )
            .unwrap();
        SearchIndex::from_compressed(index.compress(codec).unwrap(), normalizer)
    }

    #[test]
    fn lookups_reconstruct_absolute_doc_ids() {
        for codec in [PostingCodec::Varbyte, PostingCodec::Simple9] {
            let index = search_index(codec);
            let dogs = index.postings("dog").unwrap().unwrap();
            assert_eq!(dogs.doc_ids(), &[0, 1]);
        }
    }

    #[test]
    fn absent_terms_are_none_not_errors() {
        let index = search_index(PostingCodec::Varbyte);
        assert!(index.postings("fish").unwrap().is_none());
    }

    #[test]
    fn corrupt_blobs_surface_as_errors() {
        let normalizer = Arc::new(CachedNormalizer::new(Box::new(IdentityNormalizer)));
        let blobs = HashMap::from([("dog".to_string(), vec![0x01u8])]); // no terminator
        let index = SearchIndex::new(blobs, PostingCodec::Varbyte, normalizer);
        assert!(index.postings("dog").is_err());
    }
}
