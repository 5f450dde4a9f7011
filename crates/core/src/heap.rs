//! Priority queue for tree construction.
//!
//! A classic array-backed binary min-heap over [`Node`]s, ordered by the
//! composite key `(weight, seq)`: smaller weight wins, and on equal weight
//! the smaller sequence number wins. The composite key is the entire
//! tie-break mechanism; no other comparison logic exists, which is what
//! makes encoder and decoder build identical trees from the same
//! frequency table.

use crate::error::{Result, TreeError};
use crate::tree::Node;

/// Array-backed binary min-heap keyed by `(weight, seq)`.
#[derive(Debug, Clone, Default)]
pub struct MinHeap {
    nodes: Vec<Node>,
}

impl MinHeap {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Create an empty heap with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Number of nodes currently in the heap.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the heap holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a node. O(log n).
    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
        self.sift_up(self.nodes.len() - 1);
    }

    /// Remove and return the minimum node. O(log n).
    ///
    /// # Errors
    /// `TreeError::EmptyQueue` if the heap is empty. This is an internal
    /// invariant violation: callers always know how many nodes they hold.
    pub fn pop_min(&mut self) -> Result<Node> {
        if self.nodes.is_empty() {
            return Err(TreeError::EmptyQueue.into());
        }
        let last = self.nodes.len() - 1;
        self.nodes.swap(0, last);
        let min = self.nodes.pop().ok_or(TreeError::EmptyQueue)?;
        if !self.nodes.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.nodes[index].key() < self.nodes[parent].key() {
                self.nodes.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.nodes.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.nodes[left].key() < self.nodes[smallest].key() {
                smallest = left;
            }
            if right < len && self.nodes[right].key() < self.nodes[smallest].key() {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.nodes.swap(index, smallest);
            index = smallest;
        }
    }
}
