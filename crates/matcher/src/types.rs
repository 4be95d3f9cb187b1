use std::collections::BTreeSet;

use canonical::DocumentId;
use index::RecordId;
use serde::{Deserialize, Serialize};
use shingle::TokenSet;
use thiserror::Error;

/// Tuning knobs for the similarity gate.
///
/// Cheap to clone and serde-friendly so it can be embedded in a YAML config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatchConfig {
    /// Minimum Jaccard similarity for a block to join a record, in `(0, 1]`.
    /// Equality counts as a match.
    pub similarity_threshold: f64,
    /// Maximum relative length difference `(max - min) / max` tolerated
    /// before the token comparison is even attempted, in `[0, 1]`.
    pub length_ratio_tolerance: f64,
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_length_tolerance(mut self, tolerance: f64) -> Self {
        self.length_ratio_tolerance = tolerance;
        self
    }

    /// Validate the configuration. NaN is rejected by both range checks.
    pub fn validate(&self) -> Result<(), MatchError> {
        if !(self.similarity_threshold > 0.0 && self.similarity_threshold <= 1.0) {
            return Err(MatchError::InvalidThreshold(self.similarity_threshold));
        }
        if !(self.length_ratio_tolerance >= 0.0 && self.length_ratio_tolerance <= 1.0) {
            return Err(MatchError::InvalidLengthTolerance(
                self.length_ratio_tolerance,
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.9,
            length_ratio_tolerance: 0.3,
        }
    }
}

/// One occurrence of a block: document plus 1-based cleaned line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub doc_id: DocumentId,
    pub line: usize,
}

/// Stored representative of a group of matching blocks.
///
/// The token set and length are fixed at creation: later blocks are judged
/// against the first block, never against a running centroid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub id: RecordId,
    /// Text of the first block that created the record.
    pub text: String,
    pub tokens: TokenSet,
    pub char_len: usize,
    /// Every matching block, in arrival order; the creator comes first.
    pub locations: Vec<Location>,
}

impl CanonicalRecord {
    /// Number of distinct documents among the locations.
    pub fn document_count(&self) -> usize {
        self.locations
            .iter()
            .map(|loc| &loc.doc_id)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Whether the record spans more than one document.
    pub fn is_cross_document(&self) -> bool {
        let Some(first) = self.locations.first() else {
            return false;
        };
        self.locations.iter().any(|loc| loc.doc_id != first.doc_id)
    }
}

/// A record whose locations span more than one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub record: RecordId,
    /// First-seen block text.
    pub text: String,
    pub locations: Vec<Location>,
    /// Distinct documents among `locations`.
    pub documents: usize,
}

impl From<CanonicalRecord> for Cluster {
    fn from(record: CanonicalRecord) -> Self {
        let documents = record.document_count();
        Self {
            record: record.id,
            text: record.text,
            locations: record.locations,
            documents,
        }
    }
}

/// Outcome of feeding one block to the clusterer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    /// Joined an existing record.
    Matched(RecordId),
    /// Started a new record.
    Created(RecordId),
}

impl Assignment {
    pub fn record(self) -> RecordId {
        match self {
            Assignment::Matched(id) | Assignment::Created(id) => id,
        }
    }
}

/// Counters collected during a clustering pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterStats {
    pub blocks: usize,
    pub records: usize,
    pub matched: usize,
    /// Blocks with no tokens; they always create their own record.
    pub unindexed: usize,
    pub candidates: usize,
    pub length_rejections: usize,
    pub jaccard_comparisons: usize,
}

/// Errors surfaced by the matcher.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("invalid config: similarity_threshold must be in (0, 1] (got {0})")]
    InvalidThreshold(f64),
    #[error("invalid config: length_ratio_tolerance must be in [0, 1] (got {0})")]
    InvalidLengthTolerance(f64),
}
