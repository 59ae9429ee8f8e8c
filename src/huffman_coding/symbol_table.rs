//! The weighted alphabet every code table is built from.
//!
//! Hashing loses the order symbols were first seen in, and that order is both the output
//! order of code listings and the tie-breaker when two tree nodes weigh the same. So the table
//! keeps the symbols in a vec and uses the hash map only as an index into it.
//!
//! The table also tracks the sum of its frequencies and refuses any change that would take it
//! past `u64::MAX`. Every sum over a subset of the symbols (tree nodes included) therefore fits.

use rustc_hash::FxHashMap;

use crate::error::{IngestionError, Result};

/// Joins the keys of merged tree nodes. No alphabet symbol may carry it.
pub const SEPARATOR: char = '-';

/// One alphabet entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub key: String,
    /// How often the symbol is encountered (a count or a relative weight)
    pub frequency: u64,
    /// Index of the symbol in the original alphabet order
    pub position: usize,
}

impl Symbol {
    pub fn new(key: &str, frequency: u64, position: usize) -> Symbol {
        Symbol {
            key: key.to_string(),
            frequency,
            position,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    index: FxHashMap<String, usize>,
    total: u64,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from (key, frequency) pairs, in order.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        let mut table = SymbolTable::new();
        for (key, frequency) in pairs {
            table.insert(key, frequency)?;
        }
        Ok(table)
    }

    /// Append a new symbol. Its position is the current table length.
    pub fn insert(&mut self, key: &str, frequency: u64) -> Result<()> {
        validate_key(key)?;
        if self.index.contains_key(key) {
            return Err(IngestionError::DuplicateSymbol(key.to_string()).into());
        }
        let total = self.grown_total(key, frequency)?;
        let position = self.symbols.len();
        self.index.insert(key.to_string(), position);
        self.symbols.push(Symbol::new(key, frequency, position));
        self.total = total;
        Ok(())
    }

    /// Count one more occurrence of `key`, adding it at the end if it is new.
    pub fn increment(&mut self, key: &str) -> Result<()> {
        match self.index.get(key) {
            Some(&idx) => {
                self.total = self.grown_total(key, 1)?;
                self.symbols[idx].frequency += 1;
                Ok(())
            }
            None => self.insert(key, 1),
        }
    }

    /// Remove a symbol, keeping the order of the others. Returns the removed entry.
    pub fn remove(&mut self, key: &str) -> Option<Symbol> {
        let idx = self.index.remove(key)?;
        let removed = self.symbols.remove(idx);
        self.total -= removed.frequency;
        // Everything after the hole moved down one slot
        for symbol in self.symbols.iter().skip(idx) {
            if let Some(slot) = self.index.get_mut(&symbol.key) {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    pub fn get(&self, key: &str) -> Option<&Symbol> {
        self.index.get(key).map(|&idx| &self.symbols[idx])
    }

    pub fn frequency(&self, key: &str) -> Option<u64> {
        self.get(key).map(|s| s.frequency)
    }

    /// Overwrite the frequency of an existing symbol. Returns false if the key is unknown.
    pub fn set_frequency(&mut self, key: &str, frequency: u64) -> Result<bool> {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => return Ok(false),
        };
        let rest = self.total - self.symbols[idx].frequency;
        self.total = rest
            .checked_add(frequency)
            .ok_or_else(|| IngestionError::FrequencyOverflow(key.to_string()))?;
        self.symbols[idx].frequency = frequency;
        Ok(true)
    }

    /// Sum of all frequencies.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Original alphabet position of `key`.
    pub fn position_of(&self, key: &str) -> Option<usize> {
        self.get(key).map(|s| s.position)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(|s| s.key.as_str())
    }

    /// Length of the longest key, in characters.
    pub fn max_key_len(&self) -> usize {
        self.symbols
            .iter()
            .map(|s| s.key.chars().count())
            .max()
            .unwrap_or(0)
    }

    fn grown_total(&self, key: &str, by: u64) -> Result<u64> {
        self.total
            .checked_add(by)
            .ok_or_else(|| IngestionError::FrequencyOverflow(key.to_string()).into())
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A symbol is one or more lowercase ASCII letters: exactly what the codec keeps of its input.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(IngestionError::EmptySymbol.into());
    }
    if key.contains(SEPARATOR) {
        return Err(IngestionError::ReservedSeparator(key.to_string()).into());
    }
    if !key.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(IngestionError::InvalidSymbol(key.to_string()).into());
    }
    Ok(())
}
