//! Configuration and error types for block shingling.
//!
//! Free of any I/O or environment-dependent behavior so that block
//! extraction is a pure function of `(document lines, config)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for block extraction and signature selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BlockConfig {
    /// Number of consecutive cleaned lines per block (N).
    ///
    /// Larger blocks report fewer, longer matches; smaller blocks catch
    /// shorter copied passages but produce more noise.
    pub block_size: usize,
    /// Number of lexicographically smallest tokens used as the index key (K).
    ///
    /// More signature tokens raise recall of the candidate index at the cost
    /// of more candidate comparisons.
    pub signature_size: usize,
}

impl BlockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_signature_size(mut self, signature_size: usize) -> Self {
        self.signature_size = signature_size;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ShingleError> {
        if self.block_size < 1 {
            return Err(ShingleError::InvalidBlockSize {
                block_size: self.block_size,
            });
        }
        if self.signature_size < 1 {
            return Err(ShingleError::InvalidSignatureSize {
                signature_size: self.signature_size,
            });
        }
        Ok(())
    }
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            block_size: 3,
            signature_size: 5,
        }
    }
}

/// Errors returned by the shingling layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShingleError {
    #[error("invalid config: block_size must be >= 1 (got {block_size})")]
    InvalidBlockSize { block_size: usize },

    #[error("invalid config: signature_size must be >= 1 (got {signature_size})")]
    InvalidSignatureSize { signature_size: usize },
}
