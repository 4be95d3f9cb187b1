//! blockdup canonical layer.
//!
//! Turns raw note text into the ordered sequence of cleaned content lines the
//! duplicate detector works on, and fingerprints that sequence so exact
//! duplicate documents can be short-circuited.
//!
//! ## What we do
//!
//! - Strip structural noise: YAML front matter, heading markers, wiki embeds
//!   and link brackets
//! - Trim and collapse whitespace, drop empty (and optionally short) lines
//! - Fingerprint the cleaned lines with SHA-256
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. Same text + same config
//! gives the same lines and the same fingerprint on any machine.
//!
//! Line numbers reported downstream index this *cleaned* sequence (1-based),
//! not the original file.

mod config;
mod document;
mod error;
mod hash;
mod lines;
mod whitespace;

pub use crate::config::NormalizeConfig;
pub use crate::document::{Document, DocumentId};
pub use crate::error::CanonicalError;
pub use crate::hash::{fingerprint, Fingerprint, FINGERPRINT_LEN};
pub use crate::lines::normalize_lines;
pub use crate::whitespace::collapse_whitespace;

/// Main entry point. Validates the config and id, then normalizes `input`
/// into a [`Document`].
///
/// A document whose content is entirely noise is returned with no lines;
/// that is a degenerate document, not an error.
pub fn canonicalize(
    doc_id: impl Into<String>,
    input: &str,
    cfg: &NormalizeConfig,
) -> Result<Document, CanonicalError> {
    cfg.validate()?;

    let doc_id: String = doc_id.into();
    let trimmed = doc_id.trim();
    if trimmed.is_empty() {
        return Err(CanonicalError::MissingDocId);
    }
    let id = if doc_id.len() == trimmed.len() {
        DocumentId::from(doc_id)
    } else {
        DocumentId::from(trimmed)
    };

    Ok(Document {
        id,
        lines: normalize_lines(input, cfg),
    })
}
