//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use hufftab::compression::codec::{wrap, Codec, DECODE_LINE_SYMBOLS, ENCODE_LINE_CODES};
use hufftab::compression::dictionary::Dictionary;
use hufftab::huffman_coding::equal_length::{build_equal_length_codes, parse_key_list};
use hufftab::tools::alphabet::{load_alphabet_file, read_input};
use hufftab::tools::cli::{huffopts_init, HuffOpts, Operation, Source};
use hufftab::{Error, Result};

use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

fn main() -> Result<()> {
    // Available log levels are Error, Warn, Info, Debug, Trace
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stdout,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("Unable to start the logger: {}", e);
    }

    let options = huffopts_init();

    //----- Figure out what we need to do and go do it
    let result = run(&options);
    if let Err(e) = &result {
        error!("{}", e);
    }
    info!("Done.\n");
    result
}

fn run(opts: &HuffOpts) -> Result<()> {
    if let Operation::Equal {
        keys,
        encode,
        decode,
    } = &opts.operation
    {
        return equal_length(keys, encode.as_deref(), decode.as_deref());
    }

    let mut dict = load_dictionary(opts.source.as_ref())?;

    match &opts.operation {
        Operation::Codes => print_codes(&dict),
        Operation::Encode { text, file } => {
            let text = if *file { read_input(text)? } else { text.clone() };
            let codes = dict.codec().encode_symbols(&text)?;
            println!("Encoded:\n{}", wrap(&codes, ENCODE_LINE_CODES));
        }
        Operation::Decode { bits, file } => {
            let bits = if *file { read_input(bits)? } else { bits.clone() };
            decode(dict.codec(), &bits)?;
        }
        Operation::Entropy { show } => {
            println!("Total alphabet entropy: {}", dict.entropy(*show)?);
        }
        Operation::Ratio { text_size } => {
            println!(
                "Ratio using fixed-length codes to Huffman codes: {}",
                dict.ratio(*text_size)?
            );
        }
        Operation::Sizes => {
            let sizes = dict.coded_sizes()?;
            println!(
                "We need {} 0's and 1's with equal-length encoding.",
                sizes.fixed_bits
            );
            println!(
                "We need {} 0's and 1's with Huffman code encoding.",
                sizes.huffman_bits
            );
        }
        Operation::Deviation {
            comparison,
            raw_comparison,
        } => {
            let other = Dictionary::from_file(comparison, *raw_comparison)?;
            println!("Total entropy of \"{}\": {}", comparison, other.entropy(false)?);
            report_deviation(dict.deviation(&other)?, comparison);
        }
        Operation::Binomials {
            candidates,
            all,
            show,
        } => {
            let before = dict.entropy(false)?;
            let candidates = load_alphabet_file(candidates, false)?;
            let found =
                dict.find_binomials(&candidates, HuffOpts::binomial_mode(*all), *show)?;
            if found.is_empty() {
                println!("No binomial lowers the alphabet entropy of {:.4}.", before);
            } else {
                println!(
                    "Binomials to add: {}\nThey reduce the total alphabet entropy from {:.4} to {:.4}.",
                    found.join(", "),
                    before,
                    dict.entropy(false)?
                );
                print_codes(&dict);
            }
        }
        Operation::Equal { .. } => {}
    }
    Ok(())
}

fn load_dictionary(source: Option<&Source>) -> Result<Dictionary> {
    match source {
        Some(Source::Inline(alphabet)) => Dictionary::from_alphabet(alphabet),
        Some(Source::Alphabet(path)) => Dictionary::from_file(path, false),
        Some(Source::RawText(path)) => Dictionary::from_file(path, true),
        // Nothing to build codes from
        None => Err(Error::EmptyOrTrivialTable(0)),
    }
}

fn print_codes(dict: &Dictionary) {
    for line in dict.code_listing() {
        println!("{}", line);
    }
}

/// Print the decoded text, or as much of it as could be decoded.
fn decode(codec: Codec<'_>, bits: &str) -> Result<()> {
    // Encoded output is wrapped over several lines
    let bits: String = bits.chars().filter(|c| !c.is_whitespace()).collect();
    match codec.decode_symbols(&bits) {
        Ok(symbols) => {
            println!("Decoded:\n{}", wrap(&symbols, DECODE_LINE_SYMBOLS));
            Ok(())
        }
        Err(Error::UndecodableSequence { position, decoded }) => {
            println!("Decoded (partial):\n{}", decoded);
            println!("Verify that the input is valid as codes do not correspond to the alphabet.");
            Err(Error::UndecodableSequence { position, decoded })
        }
        Err(e) => Err(e),
    }
}

fn report_deviation(deviation: f64, name: &str) {
    let direction = if deviation > 0.0 { "more" } else { "fewer" };
    println!(
        "If \"{}\" were encoded with its own Huffman codes it would need about {:.4}% {} binary digits \
         per character than the reference alphabet's optimal codes.",
        name,
        deviation.abs(),
        direction
    );
}

fn equal_length(keys: &str, encode: Option<&str>, decode_bits: Option<&str>) -> Result<()> {
    let keys = parse_key_list(keys);
    let codes = build_equal_length_codes(&keys)?;
    println!("Equal-length codes:");
    for (key, code) in codes.iter() {
        println!("Key: {} Code: {}", key, code);
    }
    let codec = Codec::new(&codes);
    if let Some(text) = encode {
        let symbols = codec.encode_symbols(text)?;
        println!("Encoded:\n{}", wrap(&symbols, ENCODE_LINE_CODES));
    }
    if let Some(bits) = decode_bits {
        decode(codec, bits)?;
    }
    Ok(())
}
