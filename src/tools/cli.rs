use clap::{Parser, Subcommand};
use log::{info, warn};
use std::{fmt::Display, fmt::Formatter};

use crate::entropy::binomial::BinomialMode;

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl From<u8> for Verbosity {
    fn from(v: u8) -> Self {
        match v {
            0 => Verbosity::Quiet,
            1 => Verbosity::Errors,
            2 => Verbosity::Warnings,
            3 => Verbosity::Info,
            4 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }
}

impl Verbosity {
    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Off,
            Verbosity::Errors => log::LevelFilter::Error,
            Verbosity::Warnings => log::LevelFilter::Warn,
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Where the alphabet comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// `key=frequency` notation given on the command line
    Inline(String),
    /// A file holding an alphabet
    Alphabet(String),
    /// A file holding raw text whose letters get counted
    RawText(String),
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Inline(s) => write!(f, "inline alphabet \"{}\"", s),
            Source::Alphabet(p) => write!(f, "alphabet file {}", p),
            Source::RawText(p) => write!(f, "raw text file {}", p),
        }
    }
}

/// What to do with the alphabet
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Operation {
    /// Print the Huffman code of every symbol
    Codes,
    /// Encode text with the Huffman codes
    Encode {
        /// Text to encode (or a file name with --file)
        text: String,
        /// Read the text from the named file
        #[clap(short = 'f', long = "file")]
        file: bool,
    },
    /// Decode a string of 0s and 1s with the Huffman codes
    Decode {
        /// Bits to decode (or a file name with --file)
        bits: String,
        /// Read the bits from the named file
        #[clap(short = 'f', long = "file")]
        file: bool,
    },
    /// Print the total alphabet entropy
    Entropy {
        /// Show every step of the computation
        #[clap(short = 's', long = "show")]
        show: bool,
    },
    /// Ratio of equal-length code size to Huffman code size
    Ratio {
        /// Scale the frequencies to this many characters first
        #[clap(short = 't', long = "text-size")]
        text_size: Option<u64>,
    },
    /// Bits needed with equal-length codes and with Huffman codes
    Sizes,
    /// How far another alphabet's entropy is from this (optimal) one
    Deviation {
        /// File holding the alphabet to compare
        comparison: String,
        /// The comparison file is raw text
        #[clap(long = "raw-comparison")]
        raw_comparison: bool,
    },
    /// Find binomials that lower the alphabet entropy
    Binomials {
        /// File holding the candidate binomials as an alphabet, e.g. th=330,he=302
        candidates: String,
        /// Keep every binomial that helps instead of the single best one
        #[clap(long = "all")]
        all: bool,
        /// Show every step of the search
        #[clap(short = 's', long = "show")]
        show: bool,
    },
    /// Build equal-length codes for a key list such as a,b,c,d
    Equal {
        /// Comma separated keys
        keys: String,
        /// Text to encode with the equal-length codes
        #[clap(long = "encode")]
        encode: Option<String>,
        /// Bits to decode with the equal-length codes
        #[clap(long = "decode")]
        decode: Option<String>,
    },
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Codes => "codes",
            Operation::Encode { .. } => "encode",
            Operation::Decode { .. } => "decode",
            Operation::Entropy { .. } => "entropy",
            Operation::Ratio { .. } => "ratio",
            Operation::Sizes => "sizes",
            Operation::Deviation { .. } => "deviation",
            Operation::Binomials { .. } => "binomials",
            Operation::Equal { .. } => "equal",
        };
        write!(f, "{}", name)
    }
}

impl Operation {
    /// Equal-length codes carry their own key list and need no alphabet.
    pub fn needs_alphabet(&self) -> bool {
        !matches!(self, Operation::Equal { .. })
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Huffman codes, entropy and binomial search for weighted alphabets",
    long_about = "
    Builds Huffman codes for an alphabet given as key=frequency pairs (a=41,b=32,c=27)
    or counted from raw text, encodes and decodes with them, and measures entropy,
    the equal-length to Huffman ratio, and the deviation between two alphabets.

    The binomials command looks for two-letter units (th, he, ...) that lower the
    alphabet's entropy when added as symbols of their own."
)]
pub struct Args {
    /// File holding the alphabet (key=frequency pairs, or raw text with --raw)
    #[clap(short = 'a', long = "alphabet")]
    alphabet: Option<String>,

    /// Alphabet given directly, e.g. "a=41,b=32,c=27,d=19,e=4"
    #[clap(short = 'i', long = "inline", conflicts_with = "alphabet")]
    inline: Option<String>,

    /// Treat the alphabet file as raw text and count its letters
    #[clap(short = 'r', long = "raw")]
    raw: bool,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 3)]
    v: u8,

    #[clap(subcommand)]
    operation: Operation,
}

/// Options the program runs with, filled in from the command line
#[derive(Debug, Clone)]
pub struct HuffOpts {
    /// Where the alphabet comes from
    pub source: Option<Source>,
    /// What to do with it
    pub operation: Operation,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HuffOpts {
    pub fn new() -> Self {
        Self {
            source: None,
            operation: Operation::Codes,
            verbose: Verbosity::Info,
        }
    }

    /// Binomial search mode for the `binomials` operation
    pub fn binomial_mode(all: bool) -> BinomialMode {
        if all {
            BinomialMode::AllBeneficial
        } else {
            BinomialMode::SingleBest
        }
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the process arguments into HuffOpts and set the log level.
pub fn huffopts_init() -> HuffOpts {
    huffopts_from(Args::parse())
}

/// Put command line information from CLAP into our internal structure.
pub fn huffopts_from(args: Args) -> HuffOpts {
    let mut opts = HuffOpts::new();

    opts.source = match (args.inline, args.alphabet) {
        (Some(inline), _) => Some(Source::Inline(inline)),
        (None, Some(path)) if args.raw => Some(Source::RawText(path)),
        (None, Some(path)) => Some(Source::Alphabet(path)),
        (None, None) => None,
    };
    opts.operation = args.operation;
    opts.verbose = Verbosity::from(args.v);

    // Set the log level
    log::set_max_level(opts.verbose.level_filter());

    // Below we report initialization status to the user
    info!("---- hufftab Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operation set to {}", opts.operation);
    match &opts.source {
        Some(s) => info!("Getting alphabet from the {}", s),
        None if opts.operation.needs_alphabet() => warn!("No alphabet given"),
        None => {}
    }
    info!("---- hufftab Initialization End ----\n");
    opts
}
