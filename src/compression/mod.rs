//! The compression module puts a code table to work.
//!
//! - codec: encode text into strings of '0' and '1' and decode them back. Decoding tries every
//!   code against the front of the remaining input; the codes are prefix-free, so at most one
//!   can match. That costs O(table size) per symbol, which is fine at alphabet scale.
//! - dictionary: an alphabet plus its Huffman codes, kept in step, with the entropy and binomial
//!   operations available on it.
//!
//! Codes stay textual. Nothing here packs bits into bytes.
//!

pub mod codec;
pub mod dictionary;
