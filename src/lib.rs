//! Huffman codes and entropy analysis for weighted alphabets.
//!
//! Version 0.1.0
//!
//! Builds prefix-free (Huffman) codes for an alphabet whose symbols carry frequencies, encodes
//! and decodes text with them, and measures the alphabet: Shannon entropy, the ratio of
//! equal-length code size to Huffman code size, and the deviation between two alphabets'
//! entropies. A greedy search finds binomials (two-letter units such as "th") that lower the
//! entropy when added to the alphabet.
//!
//! Codes are strings of '0' and '1'; they are not packed into bytes.
//!
//! Basic usage to print the codes of an alphabet is as follows:
//!
//! `$> hufftab -i "a=41,b=32,c=27,d=19,e=4" codes`
//!
//! From the library:
//!
//! ```
//! use hufftab::compression::dictionary::Dictionary;
//!
//! let dict = Dictionary::from_alphabet("a=41,b=32,c=27,d=19,e=4").unwrap();
//! let bits = dict.encode("ace").unwrap();
//! assert_eq!(bits, "1101000");
//! assert_eq!(dict.decode(&bits).unwrap(), "ace");
//! ```
//!
pub mod compression;
pub mod entropy;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use error::{Error, IngestionError, Result};
