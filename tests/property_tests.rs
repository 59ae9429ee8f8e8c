use hufftab::compression::codec::Codec;
use hufftab::compression::dictionary::Dictionary;
use hufftab::entropy::metrics::{entropy, ratio};
use hufftab::huffman_coding::huffman_codes::build_codes;
use hufftab::huffman_coding::huffman_tree::HuffmanTree;
use hufftab::huffman_coding::symbol_table::SymbolTable;
use hufftab::{Error, IngestionError};
use proptest::prelude::*;

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

fn table_from(freqs: &[u64]) -> SymbolTable {
    let mut table = SymbolTable::new();
    for (c, &f) in LETTERS.chars().zip(freqs) {
        table.insert(&c.to_string(), f).unwrap();
    }
    table
}

proptest! {
    #[test]
    fn test_codes_prefix_free(freqs in prop::collection::vec(0..1000u64, 2..27)) {
        let table = table_from(&freqs);
        let codes = build_codes(&table).unwrap();
        let all: Vec<&str> = codes.iter().map(|(_, c)| c).collect();
        for (i, a) in all.iter().enumerate() {
            prop_assert!(!a.is_empty());
            for (j, b) in all.iter().enumerate() {
                if i != j {
                    prop_assert!(!b.starts_with(*a), "{} prefixes {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_kraft_inequality(freqs in prop::collection::vec(0..1000u64, 2..27)) {
        let codes = build_codes(&table_from(&freqs)).unwrap();
        prop_assert!(codes.kraft_sum() <= 1.0 + 1e-12);
    }

    #[test]
    fn test_roundtrip(
        freqs in prop::collection::vec(0..1000u64, 2..27),
        picks in prop::collection::vec(0..26usize, 0..80),
    ) {
        let table = table_from(&freqs);
        let codes = build_codes(&table).unwrap();
        let keys: Vec<&str> = table.keys().collect();
        let text: String = picks.iter().map(|&p| keys[p % keys.len()]).collect();

        let codec = Codec::new(&codes);
        let bits = codec.encode(&text).unwrap();
        prop_assert!(bits.chars().all(|c| c == '0' || c == '1'));
        prop_assert_eq!(codec.decode(&bits).unwrap(), text);
    }

    #[test]
    fn test_entropy_non_negative(freqs in prop::collection::vec(0..1000u64, 2..27)) {
        let table = table_from(&freqs);
        let nonzero = freqs.iter().filter(|&&f| f > 0).count();
        match entropy(&table, false) {
            Ok(h) => {
                prop_assert!(h >= 0.0);
                prop_assert_eq!(h == 0.0, nonzero == 1);
            }
            Err(_) => prop_assert_eq!(nonzero, 0),
        }
    }

    #[test]
    fn test_ratio_scale_invariant(
        freqs in prop::collection::vec(1..1000u64, 2..27),
        scale in 2..50u64,
    ) {
        let table = table_from(&freqs);
        let scaled: Vec<u64> = freqs.iter().map(|f| f * scale).collect();
        let scaled_table = table_from(&scaled);

        let r1 = ratio(&table, &build_codes(&table).unwrap(), None).unwrap();
        let r2 = ratio(&scaled_table, &build_codes(&scaled_table).unwrap(), None).unwrap();
        prop_assert!((r1 - r2).abs() < 1e-9, "{} != {}", r1, r2);
    }

    #[test]
    fn test_inline_alphabet_roundtrip(
        entries in prop::collection::vec(("[a-zA-Z!?'0-9]", 1..1000u64), 2..12),
        picks in prop::collection::vec(0..12usize, 0..40),
    ) {
        let notation = entries
            .iter()
            .map(|(key, freq)| format!("{}={}", key, freq))
            .collect::<Vec<_>>()
            .join(",");
        match Dictionary::from_alphabet(&notation) {
            Ok(dict) => {
                // Whatever the parser accepts, text spelled from its symbols survives the codec
                prop_assert!(dict
                    .table()
                    .keys()
                    .all(|k| k.chars().all(|c| c.is_ascii_lowercase())));
                let keys: Vec<&str> = dict.table().keys().collect();
                let text: String = picks.iter().map(|&p| keys[p % keys.len()]).collect();
                let decoded = dict.decode(&dict.encode(&text).unwrap()).unwrap();
                prop_assert_eq!(decoded, text);
            }
            Err(Error::Ingestion(IngestionError::InvalidSymbol(key))) => {
                prop_assert!(!key.chars().all(|c| c.is_ascii_lowercase()));
            }
            Err(Error::Ingestion(IngestionError::DuplicateSymbol(_))) => {}
            Err(e) => prop_assert!(false, "unexpected error {:?} for {}", e, notation),
        }
    }

    #[test]
    fn test_rebuild_deterministic(freqs in prop::collection::vec(0..20u64, 2..27)) {
        let table = table_from(&freqs);
        let first = HuffmanTree::build(&table).unwrap();
        let second = HuffmanTree::build(&table).unwrap();
        prop_assert_eq!(first.nodes(), second.nodes());
        prop_assert_eq!(build_codes(&table).unwrap(), build_codes(&table).unwrap());
    }
}

#[test]
fn test_equal_weights_fixed_assignment() {
    let table = table_from(&[5, 5, 5, 5]);
    let codes = build_codes(&table).unwrap();
    assert_eq!(
        codes.iter().collect::<Vec<_>>(),
        vec![("a", "00"), ("b", "01"), ("c", "10"), ("d", "11")]
    );
}

#[test]
fn test_inline_alphabet_rejects_unencodable_symbols() {
    for notation in ["a=5,!=3,b=2", "a=5,b=2,7=1", "a=1,b=1,c'=1"] {
        assert!(matches!(
            Dictionary::from_alphabet(notation),
            Err(Error::Ingestion(IngestionError::InvalidSymbol(_)))
        ));
    }
    // Uppercase keys are folded, so text in any case encodes
    let dict = Dictionary::from_alphabet("A=5,B=2,C=1").unwrap();
    assert_eq!(dict.decode(&dict.encode("CAB").unwrap()).unwrap(), "cab");
}

#[test]
fn test_overflowing_alphabet_rejected() {
    assert!(matches!(
        Dictionary::from_alphabet("a=18446744073709551615,b=1"),
        Err(Error::Ingestion(IngestionError::FrequencyOverflow(_)))
    ));
    let dict = Dictionary::from_alphabet("a=18446744073709551613,b=1,c=1").unwrap();
    assert_eq!(dict.sum_of_frequencies(), u64::MAX);
    assert!(dict.entropy(false).is_ok());
    assert!(matches!(dict.coded_sizes(), Err(Error::CodedSizeOverflow)));
}

#[test]
fn test_five_letter_end_to_end() {
    let table = table_from(&[41, 32, 27, 19, 4]);
    let codes = build_codes(&table).unwrap();
    let len = |k: &str| codes.code(k).unwrap().len();
    let shortest = ["a", "b", "c", "d", "e"].iter().map(|&k| len(k)).min().unwrap();
    let longest = ["a", "b", "c", "d", "e"].iter().map(|&k| len(k)).max().unwrap();
    assert_eq!(len("a"), shortest);
    assert_eq!(len("b"), shortest);
    assert_eq!(len("e"), longest);

    let codec = Codec::new(&codes);
    assert_eq!(codec.decode(&codec.encode("ace").unwrap()).unwrap(), "ace");
}
