use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use sievex::analysis::normalizer::{CachedNormalizer, IdentityNormalizer};
use sievex::compression::codec::PostingCodec;
use sievex::core::types::Document;
use sievex::index::builder::IndexBuilder;
use sievex::index::reader::SearchIndex;
use sievex::query::parser::Parser;
use sievex::query::session::QuerySession;
use sievex::storage::doc_stream::{write_doc_stream, DocStreamReader};
use sievex::storage::index_file::{read_doc_map, read_index, write_doc_map, write_index};
use sievex::storage::layout::IndexLayout;

fn identity() -> Arc<CachedNormalizer> {
    Arc::new(CachedNormalizer::new(Box::new(IdentityNormalizer)))
}

fn corpus() -> Vec<Document> {
    vec![
        Document::new("u0", "cat dog"),
        Document::new("u1", "dog bird"),
    ]
}

/// Stream -> build -> compress -> persist -> detect -> load, one codec.
fn build_and_reload(dir: &Path, codec: PostingCodec) -> (SearchIndex, sievex::index::inverted::DocUrlMap) {
    let stream_path = dir.join("corpus.lz4");
    write_doc_stream(&stream_path, &corpus()).unwrap();

    let normalizer = identity();
    let (index, urls) = IndexBuilder::new(normalizer.clone())
        .build(DocStreamReader::new(vec![stream_path]))
        .unwrap();

    let layout = IndexLayout::create(dir.join(codec.tag())).unwrap();
    write_index(&layout, &index.compress(codec).unwrap()).unwrap();
    write_doc_map(&layout, &urls).unwrap();

    let detected = layout.detect_codec().unwrap();
    assert_eq!(detected, codec);

    let blobs = read_index(&layout, detected).unwrap();
    let loaded_urls = read_doc_map(&layout).unwrap();
    (SearchIndex::new(blobs, detected, normalizer), loaded_urls)
}

fn urls_for(query: &str, index: &SearchIndex, urls: &sievex::index::inverted::DocUrlMap) -> Vec<String> {
    Parser::new(query, index)
        .evaluate()
        .unwrap()
        .into_iter()
        .map(|doc_id| urls.url(doc_id).unwrap().to_string())
        .collect()
}

#[test]
fn both_codecs_answer_the_same_queries() {
    let dir = tempfile::tempdir().unwrap();
    for codec in [PostingCodec::Varbyte, PostingCodec::Simple9] {
        let (index, urls) = build_and_reload(dir.path(), codec);

        assert_eq!(urls_for("dog", &index, &urls), vec!["u0", "u1"]);
        assert_eq!(urls_for("cat & bird", &index, &urls), Vec::<String>::new());
        assert_eq!(urls_for("cat | bird", &index, &urls), vec!["u0", "u1"]);
        assert_eq!(urls_for("(cat & dog) | bird", &index, &urls), vec!["u0", "u1"]);
    }
}

#[test]
fn persisted_index_matches_the_in_memory_one() {
    let dir = tempfile::tempdir().unwrap();

    let normalizer = identity();
    let (index, urls) = IndexBuilder::new(normalizer.clone())
        .build(corpus().into_iter().map(Ok))
        .unwrap();
    let in_memory = SearchIndex::from_compressed(
        index.compress(PostingCodec::Simple9).unwrap(),
        normalizer.clone(),
    );

    let (reloaded, reloaded_urls) = build_and_reload(dir.path(), PostingCodec::Simple9);
    assert_eq!(urls, reloaded_urls);

    for query in ["dog", "cat", "bird", "cat & dog", "cat | bird"] {
        let before = Parser::new(query, &in_memory).evaluate().unwrap();
        let after = Parser::new(query, &reloaded).evaluate().unwrap();
        assert_eq!(before, after, "query '{}' diverged after persistence", query);
    }
}

#[test]
fn query_session_runs_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let (index, urls) = build_and_reload(dir.path(), PostingCodec::Varbyte);

    let input = "dog\ncat & bird\n\nignored\n";
    let mut output = Vec::new();
    QuerySession::new(&index, &urls)
        .run(Cursor::new(input), &mut output)
        .unwrap();

    let output = String::from_utf8(output).unwrap();
    assert_eq!(output, "dog\n2\nu0\nu1\ncat & bird\n0\n");
}

#[test]
fn stemming_normalizer_survives_persistence() {
    let dir = tempfile::tempdir().unwrap();
    let normalizer = Arc::new(CachedNormalizer::from_name("english").unwrap());

    let docs = vec![
        Document::new("u0", "running dogs"),
        Document::new("u1", "the dog runs"),
    ];
    let (index, urls) = IndexBuilder::new(normalizer.clone())
        .build(docs.into_iter().map(Ok))
        .unwrap();

    let layout = IndexLayout::create(dir.path().join("stemmed")).unwrap();
    write_index(&layout, &index.compress(PostingCodec::Varbyte).unwrap()).unwrap();
    write_doc_map(&layout, &urls).unwrap();

    let blobs = read_index(&layout, layout.detect_codec().unwrap()).unwrap();
    let search = SearchIndex::new(blobs, PostingCodec::Varbyte, normalizer);

    // "dogs"/"dog" and "running"/"runs" collapse to shared stems
    assert_eq!(urls_for("dogs", &search, &urls), vec!["u0", "u1"]);
    assert_eq!(urls_for("run & dog", &search, &urls), vec!["u0", "u1"]);
}
