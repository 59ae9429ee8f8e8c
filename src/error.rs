//! Error types for building, using and analysing code tables.

use thiserror::Error;

/// Error variants for hufftab operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Codes were requested for a table with fewer than two symbols.
    #[error("a code table needs at least two symbols, found {0}")]
    EmptyOrTrivialTable(usize),

    /// Encoding met a symbol with no entry in the code table.
    #[error("no code for symbol {0:?}")]
    UnknownSymbol(String),

    /// Decoding found no code matching at `position`. `decoded` holds what was decoded before that.
    #[error("no code matches the input at bit {position} (decoded so far: {decoded:?})")]
    UndecodableSequence { position: usize, decoded: String },

    /// A binomial names a constituent symbol that the base table does not have.
    #[error("binomial {0:?} does not split into two symbols of the alphabet")]
    MissingFrequency(String),

    /// A hand-built code table is not prefix-free (or repeats a key).
    #[error("code table is ambiguous: {first:?} and {second:?} conflict")]
    AmbiguousTable { first: String, second: String },

    /// A code is empty or holds something other than '0' and '1'.
    #[error("code {code:?} of symbol {key:?} is not a string of '0' and '1'")]
    InvalidCode { key: String, code: String },

    /// The bit count for the table's frequencies does not fit in a u64.
    #[error("coded size of the alphabet overflows")]
    CodedSizeOverflow,

    /// Deviation was measured against a reference alphabet with zero entropy.
    #[error("reference alphabet has zero entropy")]
    ZeroEntropy,

    /// Reading or parsing alphabet input failed.
    #[error(transparent)]
    Ingestion(#[from] IngestionError),
}

/// Failures while turning files or strings into a symbol table.
#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("unable to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An alphabet entry that is not of the form `key=frequency`.
    #[error("malformed alphabet entry {0:?}, expected key=frequency")]
    MalformedEntry(String),

    #[error("frequency {value:?} of symbol {key:?} is not a non-negative integer")]
    BadFrequency { key: String, value: String },

    #[error("symbol {0:?} appears more than once")]
    DuplicateSymbol(String),

    /// The key contains the separator used for merged tree nodes.
    #[error("symbol {0:?} contains the reserved separator '-'")]
    ReservedSeparator(String),

    #[error("empty symbol")]
    EmptySymbol,

    /// Codes only ever see lowercase ASCII letters, so no other symbol could be encoded.
    #[error("symbol {0:?} must consist of lowercase letters a-z")]
    InvalidSymbol(String),

    /// Adding the symbol would push the table's total frequency past u64::MAX.
    #[error("frequency of symbol {0:?} overflows the alphabet total")]
    FrequencyOverflow(String),
}

/// A specialized Result type for hufftab operations.
pub type Result<T> = std::result::Result<T, Error>;
