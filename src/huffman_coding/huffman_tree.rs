//! Builds the merge forest that Huffman codes are read from.
//!
//! All nodes live in one vec. The first `leaves` entries are the alphabet symbols in table order;
//! every parent created while merging is pushed after them and never removed. Each node points
//! at its parent by index, so the structure has no ownership cycles and a leaf's code is found by
//! walking up to the root.
//!
//! Merging repeatedly takes the two lightest parentless nodes. When their weights differ the
//! lighter one gets a '0'. When they are equal the node whose leftmost original symbol came
//! earlier in the alphabet gets the '0'. That makes the codes fully deterministic for a given
//! table.

use log::trace;

use super::symbol_table::{SymbolTable, SEPARATOR};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Symbol key for leaves, the joined keys of both children for parents
    pub key: String,
    pub frequency: u64,
    /// Alphabet position for leaves, 0 for parents
    pub position: usize,
    /// Alphabet position of the leftmost symbol in `key`
    pub leftmost: usize,
    /// Set when the node is merged into a parent
    pub bit: Option<Bit>,
    pub parent: Option<usize>,
}

impl Node {
    /// Create a new unmerged node
    pub fn new(key: String, frequency: u64, position: usize, leftmost: usize) -> Node {
        Node {
            key,
            frequency,
            position,
            leftmost,
            bit: None,
            parent: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    leaves: usize,
}

impl HuffmanTree {
    /// Merge the symbols of `table` into a single tree. Needs at least two symbols.
    pub fn build(table: &SymbolTable) -> Result<HuffmanTree> {
        if table.len() < 2 {
            return Err(Error::EmptyOrTrivialTable(table.len()));
        }

        // Copy the alphabet into the arena. Parents are appended as we go.
        let mut nodes: Vec<Node> = Vec::with_capacity(table.len() * 2 - 1);
        nodes.extend(
            table
                .iter()
                .map(|s| Node::new(s.key.clone(), s.frequency, s.position, s.position)),
        );
        let mut tree = HuffmanTree {
            nodes,
            leaves: table.len(),
        };

        // Pare the forest down to one parentless node.
        while let Some((first, second)) = tree.two_smallest() {
            tree.merge(first, second);
        }
        Ok(tree)
    }

    /// Find the two lightest parentless nodes, or None once only the root is left.
    fn two_smallest(&self) -> Option<(usize, usize)> {
        let first = self.min_root(None)?;
        let second = self.min_root(Some(first))?;
        Some((first, second))
    }

    /// Scan the parentless nodes for the minimum frequency, ignoring `skip`.
    /// Ties go to the node found last.
    fn min_root(&self, skip: Option<usize>) -> Option<usize> {
        let mut min: Option<usize> = None;
        for (idx, node) in self.nodes.iter().enumerate() {
            if node.parent.is_some() || skip == Some(idx) {
                continue;
            }
            match min {
                Some(m) if self.nodes[m].frequency < node.frequency => {}
                _ => min = Some(idx),
            }
        }
        min
    }

    /// Create the parent of `first` and `second` and hand out their bits.
    fn merge(&mut self, first: usize, second: usize) {
        let (zero, one) = {
            let a = &self.nodes[first];
            let b = &self.nodes[second];
            // On a tie the earlier leftmost symbol takes the '0'
            if a.frequency == b.frequency && a.leftmost >= b.leftmost {
                (second, first)
            } else {
                (first, second)
            }
        };

        let parent_idx = self.nodes.len();
        let parent = {
            let zero_node = &self.nodes[zero];
            let one_node = &self.nodes[one];
            Node::new(
                format!("{}{}{}", zero_node.key, SEPARATOR, one_node.key),
                // A node weighs a part of the table total, which SymbolTable keeps within u64
                zero_node.frequency + one_node.frequency,
                0,
                zero_node.leftmost,
            )
        };
        trace!(
            "merge {:?} ({}) + {:?} ({}) -> {:?}",
            self.nodes[zero].key,
            self.nodes[zero].frequency,
            self.nodes[one].key,
            self.nodes[one].frequency,
            parent.key
        );

        self.nodes[zero].bit = Some(Bit::Zero);
        self.nodes[zero].parent = Some(parent_idx);
        self.nodes[one].bit = Some(Bit::One);
        self.nodes[one].parent = Some(parent_idx);
        self.nodes.push(parent);
    }

    /// Every node ever created, leaves first.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The alphabet symbols, in table order.
    pub fn leaves(&self) -> &[Node] {
        &self.nodes[..self.leaves]
    }

    /// The single node without a parent.
    pub fn root(&self) -> &Node {
        // The last parent created is the root; build() guarantees at least one merge.
        &self.nodes[self.nodes.len() - 1]
    }

    /// Code of the node at `idx`: the bits on the path from the root down to it.
    pub fn code_for(&self, idx: usize) -> String {
        // Walk up collecting bits, then flip them into root-to-leaf order.
        let mut bits = Vec::new();
        let mut current = &self.nodes[idx];
        while let (Some(bit), Some(parent)) = (current.bit, current.parent) {
            bits.push(bit.as_char());
            current = &self.nodes[parent];
        }
        bits.iter().rev().collect()
    }

    /// How many edges separate the node at `idx` from the root.
    pub fn depth(&self, idx: usize) -> usize {
        let mut depth = 0;
        let mut current = &self.nodes[idx];
        while let Some(parent) = current.parent {
            depth += 1;
            current = &self.nodes[parent];
        }
        depth
    }
}
