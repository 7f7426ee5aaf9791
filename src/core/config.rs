use std::path::PathBuf;

use crate::compression::codec::PostingCodec;

#[derive(Debug, Clone)]
pub struct IndexConfig {
    pub index_dir: PathBuf,
    pub codec: PostingCodec,
    pub language: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            index_dir: PathBuf::from("./index"),
            codec: PostingCodec::Varbyte,
            language: "russian".to_string(),
        }
    }
}
