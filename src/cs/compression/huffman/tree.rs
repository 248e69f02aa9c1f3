//! Huffman tree construction.
//!
//! Nodes are merged greedily from a min-priority queue. Ties between equal
//! weights are broken by insertion order: leaves enter in ascending symbol
//! order and every merged node is stamped with the next sequence number, so
//! the queue behaves FIFO among equal weights. The first node extracted in a
//! merge becomes the left child. The same table therefore always yields the
//! same tree, which the decoder relies on.

use super::frequency::{FrequencyTable, SYMBOLS};
use log::trace;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Represents a node in the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A leaf node contains a symbol and its frequency.
    Leaf { symbol: u8, freq: u64 },
    /// An internal node with left and right children and combined frequency.
    Internal {
        freq: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Returns the frequency of the node.
    pub fn freq(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { freq, .. } => *freq,
            HuffmanNode::Internal { freq, .. } => *freq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }
}

/// Queue entry ordering nodes by (frequency, insertion sequence).
/// The lowest pair has the highest priority.
#[derive(Debug)]
struct QueueEntry {
    seq: u64,
    node: Box<HuffmanNode>,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .node
            .freq()
            .cmp(&self.node.freq())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A Huffman tree owning its root node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Box<HuffmanNode>,
}

impl HuffmanTree {
    /// Builds the tree for `table`, or `None` when every count is zero.
    pub fn build(table: &FrequencyTable) -> Option<Self> {
        let mut heap = BinaryHeap::with_capacity(table.distinct());
        let mut seq = 0u64;

        for (symbol, freq) in table.symbols() {
            heap.push(QueueEntry {
                seq,
                node: Box::new(HuffmanNode::Leaf { symbol, freq }),
            });
            seq += 1;
        }

        // Combine nodes until only one tree remains.
        loop {
            let first = heap.pop()?;
            let second = match heap.pop() {
                Some(entry) => entry,
                None => {
                    let tree = HuffmanTree { root: first.node };
                    trace!(
                        "built huffman tree: {} leaves, depth {}, weight {}",
                        tree.leaf_count(),
                        tree.depth(),
                        tree.weight()
                    );
                    return Some(tree);
                }
            };

            // Bounded by the table total, which `FrequencyTable` keeps within u64.
            let freq = first.node.freq() + second.node.freq();
            heap.push(QueueEntry {
                seq,
                node: Box::new(HuffmanNode::Internal {
                    freq,
                    left: first.node,
                    right: second.node,
                }),
            });
            seq += 1;
        }
    }

    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Total weight of the tree, equal to the length of the counted input.
    pub fn weight(&self) -> u64 {
        self.root.freq()
    }

    /// Whether the tree is a lone leaf (one distinct symbol).
    pub fn is_single_leaf(&self) -> bool {
        self.root.is_leaf()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.leaves().map(|(_, depth)| depth).max().unwrap_or(0)
    }

    /// Code length of each symbol, zero for absent symbols.
    ///
    /// This is the leaf depth, except that a lone leaf is coded with one bit.
    pub fn code_lengths(&self) -> [u8; SYMBOLS] {
        let mut lengths = [0u8; SYMBOLS];
        for (node, depth) in self.leaves() {
            if let HuffmanNode::Leaf { symbol, .. } = node {
                lengths[*symbol as usize] = depth.max(1) as u8;
            }
        }
        lengths
    }

    /// Leaves paired with their depth, left to right.
    fn leaves(&self) -> impl Iterator<Item = (&HuffmanNode, usize)> + '_ {
        let mut stack = vec![(self.root.as_ref(), 0usize)];
        std::iter::from_fn(move || {
            while let Some((node, depth)) = stack.pop() {
                match node {
                    HuffmanNode::Leaf { .. } => return Some((node, depth)),
                    HuffmanNode::Internal { left, right, .. } => {
                        stack.push((right.as_ref(), depth + 1));
                        stack.push((left.as_ref(), depth + 1));
                    }
                }
            }
            None
        })
    }
}
