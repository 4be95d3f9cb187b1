use thiserror::Error;

/// Errors that can occur while normalizing a document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("document requires a non-empty id")]
    MissingDocId,
    #[error("invalid fingerprint: {0}")]
    InvalidFingerprint(String),
}
