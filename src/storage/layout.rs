use std::fs;
use std::path::PathBuf;

use crate::compression::codec::PostingCodec;
use crate::core::error::{Error, ErrorKind, Result};

pub const VARBYTE_INDEX_FILE: &str = "varbyte_index.lz4";
pub const SIMPLE9_INDEX_FILE: &str = "simple9_index.lz4";
pub const DOC_URL_FILE: &str = "docs_url.lz4";

/// File placement for one persisted index.
///
/// The index file name records which posting codec produced it; the doc-url
/// map is codec-independent.
#[derive(Debug, Clone)]
pub struct IndexLayout {
    pub base_dir: PathBuf,
}

impl IndexLayout {
    pub fn new(base_dir: PathBuf) -> Self {
        IndexLayout { base_dir }
    }

    /// Create the directory as well; used by the build path.
    pub fn create(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(IndexLayout { base_dir })
    }

    pub fn index_path(&self, codec: PostingCodec) -> PathBuf {
        let name = match codec {
            PostingCodec::Varbyte => VARBYTE_INDEX_FILE,
            PostingCodec::Simple9 => SIMPLE9_INDEX_FILE,
        };
        self.base_dir.join(name)
    }

    pub fn doc_url_path(&self) -> PathBuf {
        self.base_dir.join(DOC_URL_FILE)
    }

    /// Figure out which codec wrote the index in this directory, probing
    /// simple9 before varbyte.
    pub fn detect_codec(&self) -> Result<PostingCodec> {
        for codec in [PostingCodec::Simple9, PostingCodec::Varbyte] {
            if self.index_path(codec).exists() {
                return Ok(codec);
            }
        }

        Err(Error::new(
            ErrorKind::NotFound,
            format!("no index file found in {}", self.base_dir.display()),
        ))
    }
}
