//! The huffman_coding module turns a weighted alphabet into a table of prefix-free codes.
//!
//! The steps are:
//! - symbol_table: the alphabet, symbol -> frequency, in the order symbols were first seen.
//! - huffman_tree: repeatedly merge the two lightest unmerged nodes until one root is left.
//! - huffman_codes: read each symbol's code off the tree by walking from its leaf to the root.
//! - equal_length: fixed-width codes in alphabet order, for comparison.
//!
//! Codes are textual strings of '0' and '1'. They are never packed into bytes.
//!
//! Tree building is O(n^3) in the alphabet size, which is fine for alphabets of tens to a few
//! hundred symbols.
//!

pub mod equal_length;
pub mod huffman_codes;
pub mod huffman_tree;
pub mod symbol_table;
