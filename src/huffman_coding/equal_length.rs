//! Fixed-width codes for comparison with Huffman codes.
//!
//! Every symbol gets its alphabet index written in binary, zero padded to `ceil(log2(n))` bits.
//! No weights and no tree are involved.

use super::huffman_codes::CodeTable;
use crate::entropy::metrics::fixed_length;
use crate::error::{Error, Result};
use crate::tools::alphabet::remove_non_letter_symbols;

/// Assign equal-length codes to `keys` in the given order.
pub fn build_equal_length_codes<S: AsRef<str>>(keys: &[S]) -> Result<CodeTable> {
    if keys.len() < 2 {
        return Err(Error::EmptyOrTrivialTable(keys.len()));
    }
    let width = fixed_length(keys.len()) as usize;
    let entries = keys
        .iter()
        .enumerate()
        .map(|(i, key)| (key.as_ref().to_string(), format!("{:0width$b}", i, width = width)))
        .collect();
    CodeTable::new(entries)
}

/// Read a key-only alphabet such as `a, b, c` into its keys.
pub fn parse_key_list(list: &str) -> Vec<String> {
    remove_non_letter_symbols(list, ",")
        .split(',')
        .filter(|k| !k.is_empty())
        .map(|k| k.to_string())
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn five_keys_test() {
        let codes = build_equal_length_codes(&["a", "b", "c", "d", "e"]).unwrap();
        assert_eq!(
            codes.iter().map(|(_, c)| c).collect::<Vec<_>>(),
            vec!["000", "001", "010", "011", "100"]
        );
    }

    #[test]
    fn power_of_two_test() {
        let keys = parse_key_list("W, x ,Y,z");
        assert_eq!(keys, vec!["w", "x", "y", "z"]);
        let codes = build_equal_length_codes(&keys).unwrap();
        assert_eq!(codes.code("y"), Some("10"));
    }

    #[test]
    fn too_small_test() {
        assert!(build_equal_length_codes(&["a"]).is_err());
        assert!(build_equal_length_codes::<&str>(&[]).is_err());
    }
}
