//! Blocks with their similarity features precomputed.
//!
//! Tokenizing and selecting a signature depends only on the block itself, so
//! this work can run per document in parallel ahead of the sequential
//! clustering pass.

use canonical::Document;
use serde::{Deserialize, Serialize};

use crate::block::{extract_blocks, Block};
use crate::config::BlockConfig;
use crate::token::{select_signature, tokenize, Signature, TokenSet};

/// A [`Block`] plus its token set, character length and index signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedBlock {
    pub block: Block,
    pub tokens: TokenSet,
    /// Character (not byte) count of `block.text`.
    pub char_len: usize,
    pub signature: Signature,
}

impl PreparedBlock {
    pub fn new(block: Block, signature_size: usize) -> Self {
        let tokens = tokenize(&block.text);
        let signature = select_signature(&tokens, signature_size);
        let char_len = block.text.chars().count();
        Self {
            block,
            tokens,
            char_len,
            signature,
        }
    }
}

/// Extract and prepare every block of `doc`, in position order.
pub fn prepare_blocks(doc: &Document, cfg: &BlockConfig) -> Vec<PreparedBlock> {
    extract_blocks(doc, cfg.block_size)
        .map(|block| PreparedBlock::new(block, cfg.signature_size))
        .collect()
}
