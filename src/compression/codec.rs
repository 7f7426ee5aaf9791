use std::fmt;
use std::str::FromStr;

use crate::compression::delta::{decode_deltas, encode_deltas};
use crate::compression::simple9::Simple9;
use crate::compression::vbyte::Varbyte;
use crate::core::error::{Error, ErrorKind, Result};

/// The integer codec applied to delta-encoded posting lists.
///
/// Chosen once per index build and threaded through both the build and the
/// load path; the persisted file name records which one was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostingCodec {
    Varbyte,
    Simple9,
}

impl PostingCodec {
    pub fn pack(&self, values: &[u32]) -> Result<Vec<u8>> {
        match self {
            PostingCodec::Varbyte => Ok(Varbyte::pack(values)),
            PostingCodec::Simple9 => Simple9::pack(values),
        }
    }

    pub fn unpack(&self, packed: &[u8]) -> Result<Vec<u32>> {
        match self {
            PostingCodec::Varbyte => Varbyte::unpack(packed),
            PostingCodec::Simple9 => Simple9::unpack(packed),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            PostingCodec::Varbyte => "varbyte",
            PostingCodec::Simple9 => "simple9",
        }
    }
}

impl fmt::Display for PostingCodec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PostingCodec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "varbyte" => Ok(PostingCodec::Varbyte),
            "simple9" => Ok(PostingCodec::Simple9),
            other => Err(Error::new(
                ErrorKind::InvalidInput,
                format!("unknown codec '{}', expected varbyte or simple9", other),
            )),
        }
    }
}

/// Delta-encode a strictly increasing doc-id list, then pack the gaps.
pub fn compress_postings(codec: PostingCodec, doc_ids: &[u32]) -> Result<Vec<u8>> {
    codec.pack(&encode_deltas(doc_ids))
}

/// Unpack a compressed blob and reconstruct the absolute doc ids.
pub fn decompress_postings(codec: PostingCodec, packed: &[u8]) -> Result<Vec<u32>> {
    Ok(decode_deltas(&codec.unpack(packed)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_codecs_round_trip_doc_ids() {
        let doc_ids: Vec<u32> = vec![0, 1, 4, 5, 900, 901, 1_000_000];
        for codec in [PostingCodec::Varbyte, PostingCodec::Simple9] {
            let blob = compress_postings(codec, &doc_ids).unwrap();
            assert_eq!(decompress_postings(codec, &blob).unwrap(), doc_ids);
        }
    }

    #[test]
    fn codec_tags_parse_back() {
        for codec in [PostingCodec::Varbyte, PostingCodec::Simple9] {
            assert_eq!(codec.tag().parse::<PostingCodec>().unwrap(), codec);
        }
        assert!("gzip".parse::<PostingCodec>().is_err());
    }
}
