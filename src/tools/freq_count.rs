use crate::error::Result;
use crate::huffman_coding::symbol_table::SymbolTable;

/// Returns a frequency count of every character in `text`, in order of first appearance.
/// `text` must already be reduced to lowercase letters.
pub fn count_frequencies(text: &str) -> Result<SymbolTable> {
    let mut table = SymbolTable::new();
    // A char is at most 4 bytes, so this buffer fits any of them.
    let mut buf = [0_u8; 4];
    for c in text.chars() {
        table.increment(c.encode_utf8(&mut buf))?;
    }
    Ok(table)
}

#[test]
fn count_frequencies_test() {
    let table = count_frequencies("mississippi").unwrap();
    assert_eq!(table.keys().collect::<Vec<_>>(), vec!["m", "i", "s", "p"]);
    assert_eq!(table.frequency("i"), Some(4));
    assert_eq!(table.frequency("s"), Some(4));
    assert_eq!(table.frequency("p"), Some(2));
    assert_eq!(table.position_of("p"), Some(3));
}

#[test]
fn count_empty_test() {
    assert!(count_frequencies("").unwrap().is_empty());
}

#[test]
fn count_non_letters_test() {
    assert!(count_frequencies("it's").is_err());
}
