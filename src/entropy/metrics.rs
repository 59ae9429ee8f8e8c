//! Information measures over an alphabet and its code table.
//!
//! Let n = size of alphabet, p = probability of a symbol (frequency / total frequency).
//! - Equal-length code width = ceil(log2(n))
//! - Entropy of one symbol = -p * log2(p)
//!
//! The total entropy is the lower bound on the average number of bits per symbol any prefix code
//! can reach for these frequencies.

use log::{info, trace};

use crate::error::{Error, Result};
use crate::huffman_coding::huffman_codes::CodeTable;
use crate::huffman_coding::symbol_table::SymbolTable;

/// Total bits needed to code a table's frequencies with equal-length and with Huffman codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodedSizes {
    pub fixed_bits: u64,
    pub huffman_bits: u64,
}

/// Sum of all symbol frequencies.
pub fn total_frequency(table: &SymbolTable) -> u64 {
    table.total()
}

/// Shannon entropy of the alphabet in bits per symbol. With `verbose` set every step is logged at
/// info level.
pub fn entropy(table: &SymbolTable, verbose: bool) -> Result<f64> {
    let total = total_frequency(table);
    if total == 0 {
        return Err(Error::EmptyOrTrivialTable(table.len()));
    }
    report(verbose, format!("Total alphabet frequency: {}", total));

    let mut total_entropy = 0.0;
    for symbol in table {
        // p * log(p) goes to 0 as p goes to 0, so unused symbols add nothing
        if symbol.frequency == 0 {
            report(verbose, format!("Key: {}\t\tFrequency: 0 (skipped)", symbol.key));
            continue;
        }
        let probability = symbol.frequency as f64 / total as f64;
        let symbol_entropy = -probability * probability.log2();
        total_entropy += symbol_entropy;

        report(verbose, format!("Key: {}\t\tFrequency: {}", symbol.key, symbol.frequency));
        report(
            verbose,
            format!("  Probability = {} / {} = {}", symbol.frequency, total, probability),
        );
        report(
            verbose,
            format!(
                "  Symbol entropy = -{} * log2({}) = {}",
                probability, probability, symbol_entropy
            ),
        );
    }
    report(verbose, format!("Total entropy: {}", total_entropy));
    Ok(total_entropy)
}

/// Width of an equal-length code for `n` symbols: ceil(log2(n)).
pub fn fixed_length(n: usize) -> u32 {
    match n {
        0 | 1 => 0,
        _ => usize::BITS - (n - 1).leading_zeros(),
    }
}

/// Ratio of the bits an equal-length code needs to the bits the Huffman codes need.
///
/// Frequencies are scaled so that the symbols spell `text_size` characters; `None` leaves them as
/// they are. The scaling cancels out, so both give the same ratio up to rounding.
pub fn ratio(table: &SymbolTable, codes: &CodeTable, text_size: Option<u64>) -> Result<f64> {
    // How many characters the frequencies add up to (binomial keys count double)
    let actual_size: f64 = table
        .iter()
        .map(|s| s.frequency as f64 * s.key.chars().count() as f64)
        .sum();
    if actual_size == 0.0 {
        return Err(Error::EmptyOrTrivialTable(table.len()));
    }
    let factor = match text_size {
        Some(size) => size as f64 / actual_size,
        None => 1.0,
    };
    let fixed_width = fixed_length(table.len()) as f64;

    let mut total_fixed = 0.0;
    let mut total_huffman = 0.0;
    for symbol in table {
        let code = codes
            .code(&symbol.key)
            .ok_or_else(|| Error::UnknownSymbol(symbol.key.clone()))?;
        total_huffman += symbol.frequency as f64 * factor * code.len() as f64;
        total_fixed += symbol.frequency as f64 * factor * fixed_width;
    }
    if total_huffman == 0.0 {
        return Err(Error::EmptyOrTrivialTable(table.len()));
    }
    trace!(
        "ratio: factor {}, fixed {} bits, huffman {} bits",
        factor,
        total_fixed,
        total_huffman
    );
    Ok(total_fixed / total_huffman)
}

/// Percent more (positive) or fewer (negative) bits per symbol `comparison` needs with its own
/// optimal code than the `optimal` alphabet does.
pub fn deviation(optimal: &SymbolTable, comparison: &SymbolTable) -> Result<f64> {
    let optimal_entropy = entropy(optimal, false)?;
    let comparison_entropy = entropy(comparison, false)?;
    if optimal_entropy == 0.0 {
        return Err(Error::ZeroEntropy);
    }
    Ok((comparison_entropy / optimal_entropy) * 100.0 - 100.0)
}

/// Bits needed to write out every counted symbol once with each kind of code.
pub fn coded_sizes(table: &SymbolTable, codes: &CodeTable) -> Result<CodedSizes> {
    let fixed_width = fixed_length(table.len()) as u64;
    let mut sizes = CodedSizes {
        fixed_bits: 0,
        huffman_bits: 0,
    };
    for symbol in table {
        let code = codes
            .code(&symbol.key)
            .ok_or_else(|| Error::UnknownSymbol(symbol.key.clone()))?;
        sizes.fixed_bits = add_bits(sizes.fixed_bits, symbol.frequency, fixed_width)?;
        sizes.huffman_bits = add_bits(sizes.huffman_bits, symbol.frequency, code.len() as u64)?;
    }
    Ok(sizes)
}

/// Frequency-weighted mean code length in bits per symbol.
pub fn average_code_length(table: &SymbolTable, codes: &CodeTable) -> Result<f64> {
    let total = total_frequency(table);
    if total == 0 {
        return Err(Error::EmptyOrTrivialTable(table.len()));
    }
    // Summed as floats so that alphabets too heavy for `coded_sizes` still get an average
    let mut bits = 0.0;
    for symbol in table {
        let code = codes
            .code(&symbol.key)
            .ok_or_else(|| Error::UnknownSymbol(symbol.key.clone()))?;
        bits += symbol.frequency as f64 * code.len() as f64;
    }
    Ok(bits / total as f64)
}

fn add_bits(sum: u64, frequency: u64, width: u64) -> Result<u64> {
    frequency
        .checked_mul(width)
        .and_then(|bits| sum.checked_add(bits))
        .ok_or(Error::CodedSizeOverflow)
}

fn report(verbose: bool, line: String) {
    if verbose {
        info!("{}", line);
    } else {
        trace!("{}", line);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::huffman_coding::huffman_codes::build_codes;

    fn five_letters() -> SymbolTable {
        SymbolTable::from_pairs([("a", 41), ("b", 32), ("c", 27), ("d", 19), ("e", 4)]).unwrap()
    }

    #[test]
    fn fixed_length_test() {
        let widths: Vec<u32> = [0, 1, 2, 3, 4, 5, 8, 9, 26].iter().map(|&n| fixed_length(n)).collect();
        assert_eq!(widths, vec![0, 0, 1, 2, 2, 3, 3, 4, 5]);
    }

    #[test]
    fn uniform_entropy_test() {
        let table = SymbolTable::from_pairs([("a", 5), ("b", 5), ("c", 5), ("d", 5)]).unwrap();
        assert!((entropy(&table, false).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn zero_entropy_test() {
        let table = SymbolTable::from_pairs([("a", 0), ("b", 12), ("c", 0)]).unwrap();
        assert_eq!(entropy(&table, true).unwrap(), 0.0);
        let empty = SymbolTable::from_pairs([("a", 0), ("b", 0)]).unwrap();
        assert!(entropy(&empty, false).is_err());
    }

    #[test]
    fn ratio_test() {
        let table = five_letters();
        let codes = build_codes(&table).unwrap();
        // 123 symbols * 3 bits against 41*2 + 32*2 + 27*2 + 19*3 + 4*3 bits
        let expected = 369.0 / 269.0;
        assert!((ratio(&table, &codes, None).unwrap() - expected).abs() < 1e-12);
        assert!((ratio(&table, &codes, Some(1000)).unwrap() - expected).abs() < 1e-9);
        assert_eq!(
            coded_sizes(&table, &codes).unwrap(),
            CodedSizes {
                fixed_bits: 369,
                huffman_bits: 269
            }
        );
        assert!((average_code_length(&table, &codes).unwrap() - 269.0 / 123.0).abs() < 1e-12);
    }

    #[test]
    fn skewed_ratio_test() {
        let table = SymbolTable::from_pairs([
            ("a", 93),
            ("b", 1),
            ("c", 1),
            ("d", 1),
            ("e", 1),
            ("f", 1),
            ("g", 1),
            ("h", 1),
        ])
        .unwrap();
        let codes = build_codes(&table).unwrap();
        assert_eq!(codes.code("a").map(str::len), Some(1));
        // 100 * 3 bits against 93 * 1 + 27 bits for the seven rare letters
        assert!((ratio(&table, &codes, None).unwrap() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn deviation_test() {
        let four = SymbolTable::from_pairs([("a", 1), ("b", 1), ("c", 1), ("d", 1)]).unwrap();
        let eight = SymbolTable::from_pairs([
            ("a", 1),
            ("b", 1),
            ("c", 1),
            ("d", 1),
            ("e", 1),
            ("f", 1),
            ("g", 1),
            ("h", 1),
        ])
        .unwrap();
        assert!((deviation(&four, &eight).unwrap() - 50.0).abs() < 1e-9);
        assert!((deviation(&eight, &four).unwrap() + (100.0 / 3.0)).abs() < 1e-9);

        let flat = SymbolTable::from_pairs([("a", 4), ("b", 0)]).unwrap();
        assert!(matches!(deviation(&flat, &four), Err(Error::ZeroEntropy)));
    }

    #[test]
    fn heavy_alphabet_test() {
        // The total is exactly u64::MAX, the most a table accepts
        let table = SymbolTable::from_pairs([("a", u64::MAX - 2), ("b", 1), ("c", 1)]).unwrap();
        assert_eq!(total_frequency(&table), u64::MAX);
        let h = entropy(&table, false).unwrap();
        assert!(h >= 0.0 && h < 1e-12);

        let codes = build_codes(&table).unwrap();
        assert_eq!(codes.code("a"), Some("1"));
        // 2 bits for each of u64::MAX symbols does not fit
        assert!(matches!(coded_sizes(&table, &codes), Err(Error::CodedSizeOverflow)));
        let average = average_code_length(&table, &codes).unwrap();
        assert!((average - 1.0).abs() < 1e-9);
        assert!(ratio(&table, &codes, None).unwrap() > 1.9);
    }
}
