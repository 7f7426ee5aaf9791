use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::info;

use crate::analysis::normalizer::CachedNormalizer;
use crate::analysis::tokenizer::WordTokenizer;
use crate::core::error::Result;
use crate::core::types::{DocId, Document};
use crate::index::inverted::{DocUrlMap, InvertedIndex};
use crate::index::posting::PostingList;

/// Builds the in-memory inverted index from a document stream.
///
/// Documents are consumed strictly in arrival order and ids are assigned
/// sequentially from 0; that ordering is what keeps every posting list
/// sorted without a sort step.
pub struct IndexBuilder {
    tokenizer: WordTokenizer,
    normalizer: Arc<CachedNormalizer>,
}

impl IndexBuilder {
    pub fn new(normalizer: Arc<CachedNormalizer>) -> Self {
        IndexBuilder {
            tokenizer: WordTokenizer::new(),
            normalizer,
        }
    }

    pub fn build(
        &self,
        documents: impl IntoIterator<Item = Result<Document>>,
    ) -> Result<(InvertedIndex, DocUrlMap)> {
        let mut index = InvertedIndex::new();
        let mut urls = DocUrlMap::new();

        for (doc_id, document) in documents.into_iter().enumerate() {
            let document = document?;
            let doc_id = doc_id as DocId;

            // A term is recorded at most once per document; the set also
            // keeps per-document term order deterministic.
            let terms: BTreeSet<String> = self
                .tokenizer
                .tokenize(&document.text)
                .iter()
                .map(|token| self.normalizer.normalize(token))
                .collect();

            // The url map gets an entry even when the text produced no terms.
            urls.insert(doc_id, document.url);

            for term in terms {
                index
                    .postings
                    .entry(term)
                    .or_insert_with(PostingList::new)
                    .push(doc_id);
            }

            index.doc_count += 1;
        }

        info!(
            docs = index.doc_count,
            terms = index.term_count(),
            distinct_tokens = self.normalizer.cached_terms(),
            "index build finished"
        );

        Ok((index, urls))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalizer::IdentityNormalizer;

    fn build(docs: Vec<Document>) -> (InvertedIndex, DocUrlMap) {
        let normalizer = Arc::new(CachedNormalizer::new(Box::new(IdentityNormalizer)));
        IndexBuilder::new(normalizer)
            .build(docs.into_iter().map(Ok))
            .unwrap()
    }

    #[test]
    fn posting_lists_are_strictly_increasing_and_complete() {
        let (index, urls) = build(vec![
            Document::new("u0", "cat dog"),
            Document::new("u1", "dog bird"),
            Document::new("u2", "cat cat cat"),
        ]);

        assert_eq!(index.doc_count, 3);
        assert_eq!(index.postings["cat"].doc_ids(), &[0, 2]);
        assert_eq!(index.postings["dog"].doc_ids(), &[0, 1]);
        assert_eq!(index.postings["bird"].doc_ids(), &[1]);
        assert_eq!(urls.url(2), Some("u2"));
    }

    #[test]
    fn repeated_terms_count_once_per_document() {
        let (index, _) = build(vec![Document::new("u0", "dog dog DOG dog")]);
        assert_eq!(index.postings["dog"].doc_ids(), &[0]);
    }

    #[test]
    fn empty_documents_still_get_url_entries() {
        let (index, urls) = build(vec![
            Document::new("u0", ""),
            Document::new("u1", "word"),
        ]);

        assert_eq!(urls.len(), 2);
        assert_eq!(urls.url(0), Some("u0"));
        assert_eq!(index.postings["word"].doc_ids(), &[1]);
        assert_eq!(index.doc_count, 2);
    }

    #[test]
    fn reader_errors_abort_the_build() {
        use crate::core::error::{Error, ErrorKind};

        let normalizer = Arc::new(CachedNormalizer::new(Box::new(IdentityNormalizer)));
        let docs: Vec<Result<Document>> = vec![
            Ok(Document::new("u0", "cat")),
            Err(Error::new(ErrorKind::Corrupt, "torn record".to_string())),
        ];
        assert!(IndexBuilder::new(normalizer).build(docs).is_err());
    }
}
