use log::info;

use super::codec::Codec;
use crate::entropy::binomial::{find_binomials, BinomialMode};
use crate::entropy::metrics::{self, CodedSizes};
use crate::error::Result;
use crate::huffman_coding::huffman_codes::{build_codes, CodeTable};
use crate::huffman_coding::symbol_table::SymbolTable;
use crate::tools::alphabet::{load_alphabet_file, parse_alphabet};

/// An alphabet together with the Huffman codes built from it.
///
/// The two always agree: anything that changes the table rebuilds the codes. The alphabet the
/// dictionary was created with is kept as `base`, and every binomial search starts from it.
#[derive(Debug, Clone)]
pub struct Dictionary {
    base: SymbolTable,
    table: SymbolTable,
    codes: CodeTable,
}

impl Dictionary {
    /// Build the codes for `table`. Fails on fewer than two symbols.
    pub fn new(table: SymbolTable) -> Result<Self> {
        let codes = build_codes(&table)?;
        Ok(Dictionary {
            base: table.clone(),
            table,
            codes,
        })
    }

    /// Build from `key=frequency` notation, e.g. `a=41,b=32,c=27`.
    pub fn from_alphabet(alphabet: &str) -> Result<Self> {
        Dictionary::new(parse_alphabet(alphabet)?)
    }

    /// Build from a file holding either an alphabet or raw text.
    pub fn from_file(path: &str, raw_text: bool) -> Result<Self> {
        Dictionary::new(load_alphabet_file(path, raw_text)?)
    }

    /// Throw the codes away and build them again from the current table.
    pub fn setup_huffman_codes(&mut self) -> Result<&CodeTable> {
        self.codes = build_codes(&self.table)?;
        Ok(&self.codes)
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    /// The alphabet as created, before any binomials were added.
    pub fn base(&self) -> &SymbolTable {
        &self.base
    }

    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    pub fn codec(&self) -> Codec<'_> {
        Codec::new(&self.codes)
    }

    /// One `Key: a Code: 11` line per symbol, in alphabet order.
    pub fn code_listing(&self) -> Vec<String> {
        self.codes
            .iter()
            .map(|(key, code)| format!("Key: {} Code: {}", key, code))
            .collect()
    }

    pub fn encode(&self, text: &str) -> Result<String> {
        self.codec().encode(text)
    }

    pub fn decode(&self, bits: &str) -> Result<String> {
        self.codec().decode(bits)
    }

    pub fn sum_of_frequencies(&self) -> u64 {
        metrics::total_frequency(&self.table)
    }

    pub fn entropy(&self, verbose: bool) -> Result<f64> {
        metrics::entropy(&self.table, verbose)
    }

    pub fn ratio(&self, text_size: Option<u64>) -> Result<f64> {
        metrics::ratio(&self.table, &self.codes, text_size)
    }

    pub fn coded_sizes(&self) -> Result<CodedSizes> {
        metrics::coded_sizes(&self.table, &self.codes)
    }

    /// Deviation of `comparison` from this alphabet, which is taken as optimal.
    pub fn deviation(&self, comparison: &Dictionary) -> Result<f64> {
        metrics::deviation(&self.table, &comparison.table)
    }

    /// Search `candidates` for binomials that lower the entropy of the base alphabet, then make
    /// the base plus whatever was found the current table and rebuild the codes.
    ///
    /// Results of an earlier search are replaced, not added to.
    pub fn find_binomials(
        &mut self,
        candidates: &SymbolTable,
        mode: BinomialMode,
        verbose: bool,
    ) -> Result<Vec<String>> {
        let mut table = self.base.clone();
        let found = find_binomials(&mut table, candidates, mode, verbose)?;
        let codes = build_codes(&table)?;
        self.table = table;
        self.codes = codes;
        info!("Rebuilt {} codes after adding {:?}", self.codes.len(), found);
        Ok(found)
    }
}
