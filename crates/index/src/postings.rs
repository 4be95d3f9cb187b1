use std::collections::BTreeSet;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::RecordId;

/// Inverted index from signature token to the records registered under it.
///
/// Postings are ordered sets, so registration is idempotent and lookups
/// return candidates in ascending [`RecordId`] (creation) order.
#[derive(Debug, Clone, Default)]
pub struct CandidateIndex {
    postings: HashMap<String, BTreeSet<RecordId>>,
    entries: usize,
}

/// Size counters for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Distinct tokens with at least one posting.
    pub tokens: usize,
    /// Total `(token, record)` pairs.
    pub entries: usize,
}

impl CandidateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `record` under every token of `signature`.
    ///
    /// Registering the same `(token, record)` pair again is a no-op.
    pub fn register<S: AsRef<str>>(&mut self, record: RecordId, signature: &[S]) {
        for token in signature {
            let token = token.as_ref();
            let inserted = match self.postings.get_mut(token) {
                Some(ids) => ids.insert(record),
                None => {
                    self.postings
                        .insert(token.to_string(), BTreeSet::from([record]));
                    true
                }
            };
            if inserted {
                self.entries += 1;
            }
        }
    }

    /// Union of the postings of every token in `signature`, ascending.
    ///
    /// An empty signature has no candidates.
    pub fn lookup<S: AsRef<str>>(&self, signature: &[S]) -> BTreeSet<RecordId> {
        let mut out = BTreeSet::new();
        for token in signature {
            if let Some(ids) = self.postings.get(token.as_ref()) {
                out.extend(ids.iter().copied());
            }
        }
        out
    }

    /// Records registered under a single token.
    pub fn postings(&self, token: &str) -> Option<&BTreeSet<RecordId>> {
        self.postings.get(token)
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            tokens: self.postings.len(),
            entries: self.entries,
        }
    }
}
