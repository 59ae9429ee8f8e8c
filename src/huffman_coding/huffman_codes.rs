//! Turns a built tree into a table of textual codes, one per alphabet symbol.
//!
//! A `CodeTable` can also be put together by hand (the equal-length builder does this). Every
//! table is checked on construction so the decoder never has to guess: codes must be non-empty
//! strings of '0' and '1', keys unique lowercase words, and no code may be a prefix of another.

use log::debug;
use rustc_hash::FxHashMap;

use super::huffman_tree::HuffmanTree;
use super::symbol_table::{validate_key, SymbolTable};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    entries: Vec<(String, String)>,
    index: FxHashMap<String, usize>,
}

impl CodeTable {
    /// Validate and wrap (key, code) pairs. Order is kept for listings.
    pub fn new(entries: Vec<(String, String)>) -> Result<CodeTable> {
        let mut index = FxHashMap::default();
        for (i, (key, code)) in entries.iter().enumerate() {
            validate_key(key)?;
            if code.is_empty() || !code.chars().all(|c| c == '0' || c == '1') {
                return Err(Error::InvalidCode {
                    key: key.clone(),
                    code: code.clone(),
                });
            }
            if let Some(prev) = index.insert(key.clone(), i) {
                return Err(Error::AmbiguousTable {
                    first: entries[prev].0.clone(),
                    second: key.clone(),
                });
            }
        }
        check_prefix_free(&entries)?;
        Ok(CodeTable { entries, index })
    }

    pub fn code(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&i| self.entries[i].1.as_str())
    }

    /// (key, code) pairs in alphabet order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length of the longest key, in characters.
    pub fn max_key_len(&self) -> usize {
        self.entries
            .iter()
            .map(|(k, _)| k.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Sum of 2^-len over all codes. At most 1 for any prefix-free table.
    pub fn kraft_sum(&self) -> f64 {
        self.entries
            .iter()
            .map(|(_, c)| 0.5_f64.powi(c.len() as i32))
            .sum()
    }
}

/// Sorted lexically, a code that prefixes any other code also prefixes its direct successor.
fn check_prefix_free(entries: &[(String, String)]) -> Result<()> {
    let mut sorted: Vec<&(String, String)> = entries.iter().collect();
    sorted.sort_unstable_by(|a, b| a.1.cmp(&b.1));
    for pair in sorted.windows(2) {
        if pair[1].1.starts_with(pair[0].1.as_str()) {
            return Err(Error::AmbiguousTable {
                first: pair[0].0.clone(),
                second: pair[1].0.clone(),
            });
        }
    }
    Ok(())
}

/// Build the Huffman code table for `table`. Fails on fewer than two symbols.
pub fn build_codes(table: &SymbolTable) -> Result<CodeTable> {
    let tree = HuffmanTree::build(table)?;
    // Leaves sit at the front of the arena in table order, so leaf i is symbol i.
    let entries = tree
        .leaves()
        .iter()
        .enumerate()
        .map(|(i, leaf)| (leaf.key.clone(), tree.code_for(i)))
        .collect::<Vec<_>>();
    debug!(
        "Built {} codes from {} tree nodes",
        entries.len(),
        tree.nodes().len()
    );
    CodeTable::new(entries)
}
