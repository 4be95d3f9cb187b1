//! # blockdup shingling
//!
//! Turns a normalized [`canonical::Document`] into overlapping line blocks and
//! derives, for each block, the features the near-duplicate matcher needs.
//!
//! ## Contract
//!
//! - Consumes only cleaned line sequences produced by the `canonical` crate.
//! - Never reads files, normalizes markup or touches global state.
//! - Pure function of `(lines, config)`: same input, same blocks, same
//!   signatures.
//!
//! ## Pipeline
//!
//! 1.  **Block extraction**: a window of `block_size` lines slides over the
//!     document one line at a time. Each window is joined with `\n` and tagged
//!     with its 1-based starting line.
//! 2.  **Tokenization**: block text becomes a set of lowercase word tokens.
//! 3.  **Signature selection**: the `signature_size` lexicographically smallest
//!     tokens form the key under which the block is looked up in the
//!     candidate index.
//!
//! ## Example Usage
//!
//! ```
//! use canonical::Document;
//! use shingle::{prepare_blocks, BlockConfig};
//!
//! let doc = Document::from_lines("a.md", &["alpha beta gamma", "delta epsilon zeta", "eta"]);
//! let cfg = BlockConfig::new().with_block_size(2);
//!
//! let blocks = prepare_blocks(&doc, &cfg);
//! assert_eq!(blocks.len(), 2);
//! assert_eq!(blocks[0].block.text, "alpha beta gamma\ndelta epsilon zeta");
//! assert_eq!(blocks[0].signature.tokens()[0], "alpha");
//! ```

mod block;
pub mod config;
mod prepared;
mod token;

pub use crate::block::{extract_blocks, Block, Blocks, LINE_SEPARATOR};
pub use crate::config::{BlockConfig, ShingleError};
pub use crate::prepared::{prepare_blocks, PreparedBlock};
pub use crate::token::{select_signature, tokenize, Signature, TokenSet};
