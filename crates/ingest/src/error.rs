//! Error types produced by the ingest crate.
//!
//! Two kinds of failure exist and callers treat them differently:
//!
//! | Error | Scope | Typical handling |
//! |-------|-------|------------------|
//! | [`Io`](IngestError::Io) | one document | log, skip, continue |
//! | [`InvalidUtf8`](IngestError::InvalidUtf8) | one document | log, skip, continue |
//! | [`FileTooLarge`](IngestError::FileTooLarge) | one document | log, skip, continue |
//! | [`Enumeration`](IngestError::Enumeration) | whole run | abort |
//! | [`InvalidConfig`](IngestError::InvalidConfig) | whole run | abort |
//!
//! ```rust
//! use ingest::IngestError;
//!
//! let err = IngestError::InvalidUtf8 { path: "notes/a.md".into() };
//! assert!(err.is_document_error());
//! assert_eq!(err.to_string(), "notes/a.md: not valid UTF-8");
//! ```
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while enumerating a corpus or reading one of its documents.
///
/// Payloads are plain data so the enum stays `Clone + PartialEq` and can be
/// stored in a report next to the document it refers to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    /// The file could not be opened, inspected or read.
    #[error("{}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    /// The file's bytes are not valid UTF-8.
    #[error("{}: not valid UTF-8", path.display())]
    InvalidUtf8 { path: PathBuf },

    /// The file exceeds `CorpusConfig::max_file_bytes`.
    #[error("{}: {size} bytes exceeds limit of {limit} bytes", path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    /// The document list itself could not be produced.
    #[error("corpus enumeration failed: {0}")]
    Enumeration(String),

    /// Rejected configuration.
    #[error("invalid ingest config: {0}")]
    InvalidConfig(String),
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        IngestError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// The message without the path prefix, for listings that already show
    /// the path.
    pub fn detail(&self) -> String {
        match self {
            IngestError::Io { message, .. } => message.clone(),
            IngestError::InvalidUtf8 { .. } => "not valid UTF-8".to_string(),
            IngestError::FileTooLarge { size, limit, .. } => {
                format!("{size} bytes exceeds limit of {limit} bytes")
            }
            other => other.to_string(),
        }
    }

    /// `true` when the error concerns a single document and the run can
    /// continue without it.
    pub fn is_document_error(&self) -> bool {
        matches!(
            self,
            IngestError::Io { .. } | IngestError::InvalidUtf8 { .. } | IngestError::FileTooLarge { .. }
        )
    }
}
