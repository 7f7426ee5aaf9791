use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use lz4_flex::frame::{FrameDecoder, FrameEncoder};
use tracing::debug;

use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::Document;

/// Lazy reader over framed document records spread across several input
/// files, decompressed on the fly when a file carries the `.lz4` extension.
///
/// Record layout: `u32-LE payload length || bincode(Document)`. EOF is only
/// clean between records; a record torn mid-length or mid-payload is a
/// corrupt stream.
pub struct DocStreamReader {
    paths: Vec<PathBuf>,
    next_path: usize,
    current: Option<Box<dyn Read>>,
}

impl DocStreamReader {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        DocStreamReader {
            paths,
            next_path: 0,
            current: None,
        }
    }

    fn open(path: &Path) -> Result<Box<dyn Read>> {
        let file = File::open(path).map_err(|e| {
            Error::new(
                ErrorKind::Io,
                format!("cannot open {}: {}", path.display(), e),
            )
        })?;

        debug!(path = %path.display(), "reading document stream");
        if is_lz4(path) {
            Ok(Box::new(FrameDecoder::new(BufReader::new(file))))
        } else {
            Ok(Box::new(BufReader::new(file)))
        }
    }

    fn read_record(stream: &mut dyn Read) -> Result<Option<Document>> {
        let length = match read_length_prefix(stream)? {
            None => return Ok(None),
            Some(length) => length,
        };

        let mut payload = vec![0u8; length as usize];
        stream.read_exact(&mut payload).map_err(|_| {
            Error::new(
                ErrorKind::Corrupt,
                format!("document record torn mid-payload ({} bytes expected)", length),
            )
        })?;

        Ok(Some(bincode::deserialize(&payload)?))
    }
}

impl Iterator for DocStreamReader {
    type Item = Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current.is_none() {
                let path = self.paths.get(self.next_path)?.clone();
                self.next_path += 1;
                match Self::open(&path) {
                    Ok(stream) => self.current = Some(stream),
                    Err(err) => return Some(Err(err)),
                }
            }

            if let Some(stream) = self.current.as_mut() {
                match Self::read_record(stream.as_mut()) {
                    Ok(Some(document)) => return Some(Ok(document)),
                    Ok(None) => self.current = None, // move on to the next file
                    Err(err) => {
                        self.current = None;
                        return Some(Err(err));
                    }
                }
            }
        }
    }
}

/// Write documents as a framed record stream, compressed when the target
/// path carries the `.lz4` extension. Mainly corpus-preparation glue, but
/// also the writer half the tests build fixtures with.
pub fn write_doc_stream<'a>(
    path: &Path,
    documents: impl IntoIterator<Item = &'a Document>,
) -> Result<usize> {
    let file = File::create(path)?;

    if is_lz4(path) {
        let mut sink = FrameEncoder::new(BufWriter::new(file));
        let written = write_records(&mut sink, documents)?;
        sink.finish()?.flush()?; // writes the frame end mark
        Ok(written)
    } else {
        let mut sink = BufWriter::new(file);
        let written = write_records(&mut sink, documents)?;
        sink.flush()?;
        Ok(written)
    }
}

fn write_records<'a, W: Write>(
    sink: &mut W,
    documents: impl IntoIterator<Item = &'a Document>,
) -> Result<usize> {
    let mut written = 0usize;
    for document in documents {
        let payload = bincode::serialize(document)?;
        sink.write_all(&(payload.len() as u32).to_le_bytes())?;
        sink.write_all(&payload)?;
        written += 1;
    }
    Ok(written)
}

fn is_lz4(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "lz4")
}

/// Read a u32-LE length prefix. `None` means clean EOF between records;
/// fewer than four bytes means the stream was cut off.
pub(crate) fn read_length_prefix(stream: &mut dyn Read) -> Result<Option<u32>> {
    let mut buf = [0u8; 4];
    let mut filled = 0;

    while filled < buf.len() {
        let n = stream.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }

    match filled {
        0 => Ok(None),
        4 => Ok(Some(u32::from_le_bytes(buf))),
        _ => Err(Error::new(
            ErrorKind::Corrupt,
            "document record torn mid-length".to_string(),
        )),
    }
}
