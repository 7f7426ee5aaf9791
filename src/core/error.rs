use std::fmt;

use crate::query::parser::QueryError;

#[derive(Debug)]
pub enum ErrorKind {
    Io,
    Parse,
    Corrupt,
    OutOfRange,
    NotFound,
    InvalidInput,
    Query,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: String) -> Self {
        Error { kind, context }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.context)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error {
            kind: ErrorKind::Io,
            context: err.to_string(),
        }
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error {
            kind: ErrorKind::Parse,
            context: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Parse,
            context: err.to_string(),
        }
    }
}

impl From<lz4_flex::frame::Error> for Error {
    fn from(err: lz4_flex::frame::Error) -> Self {
        Error {
            kind: ErrorKind::Io,
            context: format!("LZ4 frame error: {}", err),
        }
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Index(inner) => inner,
            other => Error {
                kind: ErrorKind::Query,
                context: other.to_string(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
