pub mod core;
pub mod analysis;
pub mod compression;
pub mod index;
pub mod storage;
pub mod query;

/*
┌──────────────────────────────────────────────────────────────────────────┐
│                           SIEVEX DATA FLOW                               │
└──────────────────────────────────────────────────────────────────────────┘

  BUILD                                       QUERY
  ─────                                       ─────
  DocStreamReader                             IndexLayout::detect_codec
     │  length-prefixed records                  │
     ▼                                           ▼
  IndexBuilder ──uses──> CachedNormalizer     read_index / read_doc_map
     │                        ▲                  │
     ▼                        │                  ▼
  InvertedIndex + DocUrlMap   │               SearchIndex + DocUrlMap
     │  encode_deltas         │                  │  decompress per lookup
     ▼                        │                  ▼
  CompressedIndex             │               QuerySession ──> Parser
     │  PostingCodec::{Varbyte,Simple9}          │  union / intersect
     ▼                        │                  ▼
  write_index / write_doc_map └───────uses────lookup of raw query terms
  (LZ4 frame, u32-LE records)                 urls per matching doc id
*/
