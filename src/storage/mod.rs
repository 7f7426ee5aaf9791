pub mod doc_stream;
pub mod index_file;
pub mod layout;
