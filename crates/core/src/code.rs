//! Code table derivation.
//!
//! Walks a Huffman tree depth-first, left branch first, appending `0` when
//! descending left and `1` when descending right, and records the
//! accumulated bit sequence at each leaf. Left-first traversal is a
//! convention shared between encoder and decoder and must not vary.
//!
//! The resulting code set is prefix-free by construction: every code ends
//! at a leaf, so no code can continue through another.

use crate::error::{Result, TreeError};
use crate::freq::FrequencyTable;
use crate::tree::Node;

/// Maximum supported code length in bits.
///
/// With u64 weights the deepest reachable tree (Fibonacci-like
/// frequencies) stays under 100 levels, so 128 bits of storage is never
/// the limiting factor in practice.
pub const MAX_CODE_BITS: usize = 128;

/// A single Huffman code: `len` bits stored in the low bits of `bits`,
/// most significant bit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    pub bits: u128,
    pub len: u8,
}

impl Code {
    /// Iterate the code's bits in emission order (MSB first).
    pub fn iter_bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).rev().map(move |i| (self.bits >> i) & 1 == 1)
    }

    /// True if `self` is a proper prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len < other.len && (other.bits >> (other.len - self.len)) == self.bits
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for bit in self.iter_bits() {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Mapping from symbol to Huffman code, for the symbols present in the
/// tree the table was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; 256],
}

impl CodeTable {
    /// Derive the code table from a tree root.
    ///
    /// Assignment is first-wins: if a symbol appears at more than one leaf
    /// (only the single-symbol placeholder does this), the first leaf in
    /// traversal order defines the code. That gives the lone real symbol
    /// the canonical one-bit code `0`.
    ///
    /// # Errors
    /// - `TreeError::DegenerateTree` if the root is a bare leaf, which the
    ///   builder never produces.
    /// - `TreeError::CodeTooLong` if a path exceeds [`MAX_CODE_BITS`].
    pub fn from_tree(root: &Node) -> Result<Self> {
        if root.is_leaf() {
            return Err(TreeError::DegenerateTree.into());
        }
        let mut table = CodeTable {
            codes: [None; 256],
        };
        table.assign(root, Code { bits: 0, len: 0 })?;
        Ok(table)
    }

    fn assign(&mut self, node: &Node, prefix: Code) -> Result<()> {
        match node {
            Node::Leaf { symbol, .. } => {
                let slot = &mut self.codes[*symbol as usize];
                if slot.is_none() {
                    *slot = Some(prefix);
                }
                Ok(())
            }
            Node::Internal { left, right, .. } => {
                if prefix.len as usize >= MAX_CODE_BITS {
                    return Err(TreeError::CodeTooLong(prefix.len as usize + 1).into());
                }
                let zero = Code {
                    bits: prefix.bits << 1,
                    len: prefix.len + 1,
                };
                let one = Code {
                    bits: (prefix.bits << 1) | 1,
                    len: prefix.len + 1,
                };
                self.assign(left, zero)?;
                self.assign(right, one)
            }
        }
    }

    /// Create an empty table (for the empty-input case).
    pub fn empty() -> Self {
        CodeTable {
            codes: [None; 256],
        }
    }

    /// Code for `symbol`, if the symbol was present in the tree.
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Number of symbols with an assigned code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    /// True if no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(|c| c.is_none())
    }

    /// Iterate `(symbol, code)` pairs ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|c| (symbol as u8, c)))
    }

    /// Total payload size in bits for an input with the given frequencies:
    /// `sum(frequency x code length)` over present symbols.
    ///
    /// Only the encoder can know this before decoding, which is why the
    /// container transmits it explicitly. Returns `None` if the sum
    /// overflows u64, which an in-memory input can never reach but a
    /// hostile frequency table can.
    pub fn payload_bits(&self, table: &FrequencyTable) -> Option<u64> {
        table.iter().try_fold(0u64, |total, (symbol, count)| {
            let len = self.get(symbol).map(|c| c.len as u64).unwrap_or(0);
            total.checked_add(count.checked_mul(len)?)
        })
    }
}
