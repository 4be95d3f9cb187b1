//! Block extraction: a fixed-size window slid over a document's cleaned
//! lines.
//!
//! For a document of `n` lines and block size `N`, exactly `n - N + 1`
//! overlapping blocks are produced (none when `n < N`). Line numbers are
//! 1-based positions in the *cleaned* sequence.

use std::iter::FusedIterator;

use canonical::{Document, DocumentId};
use serde::{Deserialize, Serialize};

/// Separator used to join the lines of a block.
pub const LINE_SEPARATOR: &str = "\n";

/// `N` consecutive cleaned lines from one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Origin document.
    pub doc_id: DocumentId,
    /// 1-based starting line in the cleaned line sequence.
    pub line: usize,
    /// The lines joined with [`LINE_SEPARATOR`].
    pub text: String,
}

/// Lazy, restartable iterator over the blocks of one document.
///
/// Borrows the document; clone it before consuming, or call
/// [`extract_blocks`] again, to walk the blocks a second time.
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    doc_id: &'a DocumentId,
    lines: &'a [String],
    block_size: usize,
    next: usize,
}

impl<'a> Blocks<'a> {
    fn remaining(&self) -> usize {
        if self.block_size == 0 || self.lines.len() < self.block_size {
            return 0;
        }
        (self.lines.len() - self.block_size + 1).saturating_sub(self.next)
    }
}

impl Iterator for Blocks<'_> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        if self.remaining() == 0 {
            return None;
        }
        let start = self.next;
        self.next += 1;
        Some(Block {
            doc_id: self.doc_id.clone(),
            line: start + 1,
            text: self.lines[start..start + self.block_size].join(LINE_SEPARATOR),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Blocks<'_> {}

impl FusedIterator for Blocks<'_> {}

/// Slide a `block_size` window over `doc`'s lines.
///
/// A `block_size` of zero, or a document shorter than `block_size`, yields an
/// empty sequence rather than an error; callers validate sizes through
/// [`crate::BlockConfig::validate`].
pub fn extract_blocks(doc: &Document, block_size: usize) -> Blocks<'_> {
    Blocks {
        doc_id: &doc.id,
        lines: &doc.lines,
        block_size,
        next: 0,
    }
}
