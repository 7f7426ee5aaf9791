use serde::{Serialize, Deserialize};

/// Sequence index assigned by arrival order during the build, starting at 0.
/// The persisted layout fixes ids to 32 bits.
pub type DocId = u32;

/// Wire payload of one framed document record.
/// Ids are not part of the payload; the builder assigns them by arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub url: String,
    pub text: String,
}

impl Document {
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Document {
            url: url.into(),
            text: text.into(),
        }
    }
}
