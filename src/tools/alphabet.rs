//! Reads alphabets from strings and files.
//!
//! Two input styles are supported. An alphabet lists `key=frequency` pairs separated by commas,
//! for example `a=41,b=32,c=27,d=19,e=4`. Raw text (a book, a play) is reduced to its letters and
//! every letter is counted.

use std::fs;

use log::{debug, info};

use super::freq_count::count_frequencies;
use crate::error::{IngestionError, Result};
use crate::huffman_coding::symbol_table::SymbolTable;

/// Characters an alphabet file needs besides letters.
const ALPHABET_CHARS: &str = "0123456789=,";

/// Drop everything except ASCII letters and the characters in `keep`, then lowercase.
pub fn remove_non_letter_symbols(input: &str, keep: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || keep.contains(*c))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Parse `key=frequency` pairs into a table, keeping their order.
///
/// Keys are lowercased. Anything left that is not a letter is an error rather than being dropped,
/// as the codec could never produce it from text.
pub fn parse_alphabet(alphabet: &str) -> Result<SymbolTable> {
    let mut table = SymbolTable::new();
    let cleaned: String = alphabet.chars().filter(|c| !c.is_whitespace()).collect();

    for entry in cleaned.split(',').filter(|e| !e.is_empty()) {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| IngestionError::MalformedEntry(entry.to_string()))?;
        if value.contains('=') {
            return Err(IngestionError::MalformedEntry(entry.to_string()).into());
        }
        let key = key.to_lowercase();
        let frequency = value
            .parse::<u64>()
            .map_err(|_| IngestionError::BadFrequency {
                key: key.clone(),
                value: value.to_string(),
            })?;
        table.insert(&key, frequency)?;
    }
    debug!("Parsed {} alphabet entries", table.len());
    Ok(table)
}

/// Read a file, lowercasing every line and dropping spaces. Lines are joined without breaks.
pub fn read_input(path: &str) -> Result<String> {
    let contents = fs::read_to_string(path).map_err(|source| IngestionError::Io {
        path: path.to_string(),
        source,
    })?;
    Ok(contents
        .lines()
        .map(|line| line.to_lowercase().replace(' ', ""))
        .collect())
}

/// Build a table from a file holding either an alphabet or raw text.
pub fn load_alphabet_file(path: &str, raw_text: bool) -> Result<SymbolTable> {
    let input = read_input(path)?;
    let table = if raw_text {
        count_frequencies(&remove_non_letter_symbols(&input, ""))?
    } else {
        parse_alphabet(&remove_non_letter_symbols(&input, ALPHABET_CHARS))?
    };
    info!(
        "Loaded {} symbols from {} ({})",
        table.len(),
        path,
        if raw_text { "raw text" } else { "alphabet" }
    );
    Ok(table)
}
