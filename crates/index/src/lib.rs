//! # blockdup Index
//!
//! The candidate index bounds the cost of near-duplicate matching. Instead of
//! comparing every incoming block against every record seen so far, a block is
//! only compared against records that share at least one of its signature
//! tokens.
//!
//! ## Guarantees
//!
//! - Any two blocks whose signatures share a token are mutually discoverable.
//! - Blocks with disjoint signatures are never compared, even if they are
//!   near-duplicates. That is the recall trade-off of signature indexing.
//! - Only canonical block records are registered, never raw blocks.
//! - Lookups are deterministic: candidates come back in ascending
//!   [`RecordId`] order, which is record creation order.
//!
//! ## Example Usage
//!
//! ```
//! use index::{CandidateIndex, RecordId};
//!
//! let mut index = CandidateIndex::new();
//! index.register(RecordId::new(0), &["alpha", "beta"]);
//! index.register(RecordId::new(1), &["beta", "delta"]);
//!
//! let hits: Vec<RecordId> = index.lookup(&["beta"]).into_iter().collect();
//! assert_eq!(hits, vec![RecordId::new(0), RecordId::new(1)]);
//! ```

mod postings;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use crate::postings::{CandidateIndex, IndexStats};

/// Identifier of a canonical block record; assigned in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(usize);

impl RecordId {
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Position of the record in a creation-ordered `Vec`.
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
