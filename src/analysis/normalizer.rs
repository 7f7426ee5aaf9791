use std::collections::HashMap;
use std::sync::RwLock;

use rust_stemmers::{Algorithm, Stemmer};

use crate::core::error::{Error, ErrorKind, Result};

/// Maps a raw surface token to its canonical term form.
pub trait Normalize: Send + Sync {
    fn normal_form(&self, token: &str) -> String;

    fn name(&self) -> &str;
}

/// Snowball-stemming normalizer.
pub struct SnowballNormalizer {
    stemmer: Stemmer,
    language: &'static str,
}

impl SnowballNormalizer {
    pub fn new(algorithm: Algorithm) -> Self {
        let language = match algorithm {
            Algorithm::Russian => "russian",
            Algorithm::English => "english",
            _ => "snowball",
        };
        SnowballNormalizer {
            stemmer: Stemmer::create(algorithm),
            language,
        }
    }

    pub fn russian() -> Self {
        Self::new(Algorithm::Russian)
    }

    pub fn english() -> Self {
        Self::new(Algorithm::English)
    }
}

impl Normalize for SnowballNormalizer {
    fn normal_form(&self, token: &str) -> String {
        self.stemmer.stem(token).to_string()
    }

    fn name(&self) -> &str {
        self.language
    }
}

/// Passes tokens through untouched.
pub struct IdentityNormalizer;

impl Normalize for IdentityNormalizer {
    fn normal_form(&self, token: &str) -> String {
        token.to_string()
    }

    fn name(&self) -> &str {
        "identity"
    }
}

/// Memoizing wrapper around a normalizer.
///
/// Normalization is the most expensive step of the build, and the same
/// surface forms recur across documents, so each distinct raw token is
/// normalized exactly once. One instance lives for the whole process and is
/// shared by the index builder and the query engine.
pub struct CachedNormalizer {
    inner: Box<dyn Normalize>,
    cache: RwLock<HashMap<String, String>>,
}

impl CachedNormalizer {
    pub fn new(inner: Box<dyn Normalize>) -> Self {
        CachedNormalizer {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve a configured normalizer name. Build and query must agree on
    /// the name, or query terms will miss the index vocabulary.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "russian" => Ok(Self::new(Box::new(SnowballNormalizer::russian()))),
            "english" => Ok(Self::new(Box::new(SnowballNormalizer::english()))),
            "identity" => Ok(Self::new(Box::new(IdentityNormalizer))),
            other => Err(Error::new(
                ErrorKind::InvalidInput,
                format!(
                    "unknown normalizer '{}', expected russian, english or identity",
                    other
                ),
            )),
        }
    }

    pub fn normalize(&self, token: &str) -> String {
        if let Some(hit) = self.cache.read().unwrap().get(token) {
            return hit.clone();
        }

        let normal = self.inner.normal_form(token);
        self.cache
            .write()
            .unwrap()
            .insert(token.to_string(), normal.clone());
        normal
    }

    pub fn cached_terms(&self) -> usize {
        self.cache.read().unwrap().len()
    }

    pub fn name(&self) -> String {
        self.inner.name().to_string()
    }
}
