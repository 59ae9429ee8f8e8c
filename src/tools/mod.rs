//! The tools module provides the helper functions around the coding core.
//!
//! The tools are:
//! - alphabet: read `key=frequency` alphabets and raw text from strings and files, and strip
//!   text down to its letters.
//! - cli: Command line interface for hufftab.
//! - freq_count: Frequency count of the characters in a text.
//!
pub mod alphabet;
pub mod cli;
pub mod freq_count;
