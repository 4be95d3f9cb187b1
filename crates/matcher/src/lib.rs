//! # blockdup Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` is the similarity gate and clusterer. It consumes prepared
//! blocks (see the `shingle` crate) in a deterministic order and groups them
//! into canonical records using the `index` crate to find candidates.
//!
//! For every incoming block:
//!
//! 1. Look up candidate records sharing at least one signature token.
//! 2. Walk candidates in creation order. Skip any whose character length
//!    differs by more than `length_ratio_tolerance`.
//! 3. The first candidate with Jaccard similarity `>= similarity_threshold`
//!    receives the block's location.
//! 4. Otherwise the block becomes a new record and is registered under its
//!    signature. Blocks without tokens are never registered.
//!
//! A record's token set is the creator's and never changes, so similarity
//! cannot drift along a chain of small edits.
//!
//! Only records whose locations span more than one document are reported as
//! [`Cluster`]s. Repeats inside a single document are not duplicates.
//!
//! ## Example Usage
//!
//! ```
//! use canonical::Document;
//! use matcher::{cluster_blocks, MatchConfig};
//! use shingle::{prepare_blocks, BlockConfig};
//!
//! let lines = ["shared line one", "shared line two", "shared line three"];
//! let a = Document::from_lines("a.md", &lines);
//! let b = Document::from_lines("b.md", &lines);
//!
//! let cfg = BlockConfig::default();
//! let blocks = prepare_blocks(&a, &cfg)
//!     .into_iter()
//!     .chain(prepare_blocks(&b, &cfg));
//!
//! let clusters = cluster_blocks(blocks, &MatchConfig::default()).unwrap();
//! assert_eq!(clusters.len(), 1);
//! assert_eq!(clusters[0].locations.len(), 2);
//! ```

pub mod engine;
pub mod similarity;
pub mod types;

pub use crate::engine::{cluster_blocks, Clusterer};
pub use crate::similarity::{jaccard, length_ratio_diff, within_length_tolerance};
pub use crate::types::{
    Assignment, CanonicalRecord, Cluster, ClusterStats, Location, MatchConfig, MatchError,
};
