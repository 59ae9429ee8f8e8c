//! The entropy module measures how well an alphabet can be coded.
//!
//! - metrics: Shannon entropy, equal-length vs Huffman ratio, deviation between two alphabets.
//! - binomial: greedy search for two-symbol units that lower the alphabet's entropy. It uses
//!   the metrics as its fitness function and rebuilds the codes for every trial.
//!

pub mod binomial;
pub mod metrics;
