use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};

use lz4_flex::frame::{FrameDecoder, FrameEncoder};
use tracing::info;

use crate::compression::codec::PostingCodec;
use crate::core::error::{Error, ErrorKind, Result};
use crate::index::inverted::{CompressedIndex, DocUrlMap};
use crate::storage::doc_stream::read_length_prefix;
use crate::storage::layout::IndexLayout;

// Both files are LZ4-framed end to end. Record layouts apply to the
// decompressed stream; every length/id field is a 32-bit little-endian
// integer (fixed for compatibility, not a free choice).
//
// index file:    repeated { term_len u32 | term utf8 | blob_len u32 | blob }
// doc-url file:  repeated { doc_id u32 | url_len u32 | url utf8 }

pub fn write_index(layout: &IndexLayout, index: &CompressedIndex) -> Result<()> {
    let path = layout.index_path(index.codec);
    let file = File::create(&path)?;
    let mut sink = FrameEncoder::new(BufWriter::new(file));

    for (term, blob) in &index.blobs {
        let term_bytes = term.as_bytes();
        sink.write_all(&(term_bytes.len() as u32).to_le_bytes())?;
        sink.write_all(term_bytes)?;
        sink.write_all(&(blob.len() as u32).to_le_bytes())?;
        sink.write_all(blob)?;
    }

    let mut writer = sink.finish()?;
    writer.flush()?;
    writer.get_ref().sync_all()?;

    info!(
        path = %path.display(),
        terms = index.blobs.len(),
        codec = index.codec.tag(),
        "index written"
    );
    Ok(())
}

pub fn read_index(layout: &IndexLayout, codec: PostingCodec) -> Result<HashMap<String, Vec<u8>>> {
    let path = layout.index_path(codec);
    let file = File::open(&path).map_err(|e| {
        Error::new(
            ErrorKind::Io,
            format!("cannot open {}: {}", path.display(), e),
        )
    })?;
    let mut stream = FrameDecoder::new(BufReader::new(file));

    let mut blobs = HashMap::new();
    while let Some(term_len) = read_length_prefix(&mut stream)? {
        let term = read_string(&mut stream, term_len, "term")?;
        let blob_len = require_length_prefix(&mut stream, "posting blob")?;
        let blob = read_exact_bytes(&mut stream, blob_len, "posting blob")?;
        blobs.insert(term, blob);
    }

    info!(path = %path.display(), terms = blobs.len(), "index loaded");
    Ok(blobs)
}

pub fn write_doc_map(layout: &IndexLayout, urls: &DocUrlMap) -> Result<()> {
    let path = layout.doc_url_path();
    let file = File::create(&path)?;
    let mut sink = FrameEncoder::new(BufWriter::new(file));

    for (&doc_id, url) in &urls.urls {
        let url_bytes = url.as_bytes();
        sink.write_all(&doc_id.to_le_bytes())?;
        sink.write_all(&(url_bytes.len() as u32).to_le_bytes())?;
        sink.write_all(url_bytes)?;
    }

    let mut writer = sink.finish()?;
    writer.flush()?;
    writer.get_ref().sync_all()?;

    info!(path = %path.display(), docs = urls.len(), "doc-url map written");
    Ok(())
}

pub fn read_doc_map(layout: &IndexLayout) -> Result<DocUrlMap> {
    let path = layout.doc_url_path();
    let file = File::open(&path).map_err(|e| {
        Error::new(
            ErrorKind::Io,
            format!("cannot open {}: {}", path.display(), e),
        )
    })?;
    let mut stream = FrameDecoder::new(BufReader::new(file));

    let mut urls = DocUrlMap::new();
    while let Some(doc_id) = read_length_prefix(&mut stream)? {
        let url_len = require_length_prefix(&mut stream, "url")?;
        let url = read_string(&mut stream, url_len, "url")?;
        urls.insert(doc_id, url);
    }

    Ok(urls)
}

/// A u32 field that must be present: EOF here means the record was cut off.
fn require_length_prefix(stream: &mut dyn Read, what: &str) -> Result<u32> {
    read_length_prefix(stream)?.ok_or_else(|| {
        Error::new(
            ErrorKind::Corrupt,
            format!("record torn before {} length", what),
        )
    })
}

fn read_exact_bytes(stream: &mut dyn Read, len: u32, what: &str) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len as usize];
    stream.read_exact(&mut buf).map_err(|_| {
        Error::new(
            ErrorKind::Corrupt,
            format!("record torn mid-{} ({} bytes expected)", what, len),
        )
    })?;
    Ok(buf)
}

fn read_string(stream: &mut dyn Read, len: u32, what: &str) -> Result<String> {
    let bytes = read_exact_bytes(stream, len, what)?;
    String::from_utf8(bytes)
        .map_err(|_| Error::new(ErrorKind::Corrupt, format!("{} is not valid UTF-8", what)))
}
