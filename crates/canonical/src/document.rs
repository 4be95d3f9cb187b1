//! Document types produced by the line normalizer.
//!
//! A [`Document`] is an opaque identifier plus its ordered, cleaned content
//! lines. It is immutable once produced; downstream stages only borrow it.

use std::borrow::Borrow;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::hash::{fingerprint, Fingerprint};

/// Opaque document identifier, usually a path relative to the corpus root.
///
/// Backed by an `Arc<str>` so every block and location can carry its origin
/// without copying the string.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Arc<str>);

impl DocumentId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DocumentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl From<&Path> for DocumentId {
    fn from(value: &Path) -> Self {
        Self::new(value.to_string_lossy())
    }
}

/// A normalized document: identifier plus ordered non-empty content lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub lines: Vec<String>,
}

impl Document {
    pub fn new(id: impl Into<DocumentId>, lines: Vec<String>) -> Self {
        Self {
            id: id.into(),
            lines,
        }
    }

    /// Convenience constructor for tests and in-memory corpora.
    pub fn from_lines<S: AsRef<str>>(id: impl Into<DocumentId>, lines: &[S]) -> Self {
        Self::new(id, lines.iter().map(|l| l.as_ref().to_string()).collect())
    }

    pub fn fingerprint(&self) -> Fingerprint {
        fingerprint(&self.lines)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}
