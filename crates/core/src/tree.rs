//! Huffman tree construction.
//!
//! The tree is a strict binary tree: every internal node owns exactly two
//! children outright, so the whole structure is freed as a unit when the
//! root is dropped. No reference counting, no back edges.
//!
//! # Determinism
//!
//! The container transmits only the frequency table; the decoder rebuilds
//! the tree by rerunning [`build_tree`] on the parsed table. Both sides
//! must therefore produce byte-identical trees from the same frequencies.
//! That is guaranteed by a composite ordering key `(weight, seq)`:
//! - leaves take `seq = symbol value`, so equal-weight leaves order by
//!   symbol ascending;
//! - internal nodes draw from a counter starting at 256, so they sort
//!   after any leaf of equal weight and among themselves by creation
//!   order.
//!
//! Sequence numbers exist only for this tie-break and are never
//! serialized.

use crate::error::{Result, TreeError};
use crate::freq::FrequencyTable;
use crate::heap::MinHeap;

/// First sequence number available to internal nodes; leaves use their
/// symbol value (0-255).
const INTERNAL_SEQ_BASE: u32 = 256;

/// A node of the Huffman tree.
///
/// `Internal` owns both children; a missing child is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
        seq: u32,
    },
    Internal {
        weight: u64,
        seq: u32,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    /// Create a leaf for `symbol`. The sequence number is the symbol value,
    /// which makes leaves intrinsically ordered by symbol.
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        Node::Leaf {
            symbol,
            weight,
            seq: symbol as u32,
        }
    }

    /// Combined weight of this subtree.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    /// Tie-break sequence number.
    pub fn seq(&self) -> u32 {
        match self {
            Node::Leaf { seq, .. } => *seq,
            Node::Internal { seq, .. } => *seq,
        }
    }

    /// Composite ordering key: weight first, sequence number on ties.
    pub fn key(&self) -> (u64, u32) {
        (self.weight(), self.seq())
    }

    /// True for leaf nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Build the Huffman tree for a frequency table.
///
/// Returns `Ok(None)` for an empty table: no tree, no codes, zero payload
/// bits. Otherwise returns the single root.
///
/// # Algorithm
///
/// One leaf per distinct symbol goes into a min-heap ordered by
/// `(weight, seq)`. Repeatedly pop the two minima `a` then `b` (`a` <= `b`
/// under the composite order), merge them into
/// `Internal { weight: a.weight + b.weight, left: a, right: b }` with the
/// next sequence number, and push the merge back. The last remaining node
/// is the root.
///
/// # Single-symbol inputs
///
/// With one distinct symbol the merge loop never runs, so the real leaf is
/// paired with a zero-weight placeholder on the right. The real symbol
/// takes the left branch and the one-bit code `0`. The placeholder mirrors
/// the real symbol and code assignment is first-wins (see
/// [`crate::code::CodeTable`]), so it can never be decoded incorrectly:
/// every payload bit is `0` and always lands on the left leaf.
pub fn build_tree(table: &FrequencyTable) -> Result<Option<Node>> {
    let mut heap = MinHeap::new();
    for (symbol, count) in table.iter() {
        heap.push(Node::leaf(symbol, count));
    }

    match heap.len() {
        0 => return Ok(None),
        1 => {
            let leaf = heap.pop_min()?;
            let symbol = match &leaf {
                Node::Leaf { symbol, .. } => *symbol,
                Node::Internal { .. } => return Err(TreeError::DegenerateTree.into()),
            };
            let placeholder = Node::Leaf {
                symbol,
                weight: 0,
                seq: INTERNAL_SEQ_BASE,
            };
            return Ok(Some(Node::Internal {
                weight: leaf.weight(),
                seq: INTERNAL_SEQ_BASE + 1,
                left: Box::new(leaf),
                right: Box::new(placeholder),
            }));
        }
        _ => {}
    }

    let mut next_seq = INTERNAL_SEQ_BASE;
    while heap.len() > 1 {
        let a = heap.pop_min()?;
        let b = heap.pop_min()?;
        // Weights come from untrusted containers on the decode path, so
        // the sum must not wrap.
        let weight = a
            .weight()
            .checked_add(b.weight())
            .ok_or(TreeError::WeightOverflow)?;
        let merged = Node::Internal {
            weight,
            seq: next_seq,
            left: Box::new(a),
            right: Box::new(b),
        };
        next_seq += 1;
        heap.push(merged);
    }

    Ok(Some(heap.pop_min()?))
}
