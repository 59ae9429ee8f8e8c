use log::{debug, error};

use crate::error::{Error, Result};
use crate::huffman_coding::huffman_codes::CodeTable;
use crate::tools::alphabet::remove_non_letter_symbols;

/// Codes per line when encoded output is wrapped for display
pub const ENCODE_LINE_CODES: usize = 15;
/// Symbols per line when decoded output is wrapped for display
pub const DECODE_LINE_SYMBOLS: usize = 50;

/// Encodes text into strings of '0' and '1' and back, using one code table.
#[derive(Debug, Clone, Copy)]
pub struct Codec<'a> {
    codes: &'a CodeTable,
}

impl<'a> Codec<'a> {
    pub fn new(codes: &'a CodeTable) -> Self {
        Codec { codes }
    }

    /// Encode `text` after stripping it to lowercase letters.
    pub fn encode(&self, text: &str) -> Result<String> {
        Ok(self.encode_symbols(text)?.concat())
    }

    /// The code of every symbol in `text`, in order.
    ///
    /// At each position the longest table key that matches is used, so an alphabet holding both
    /// "t" and "th" codes "the" as "th", "e".
    pub fn encode_symbols(&self, text: &str) -> Result<Vec<&'a str>> {
        let input = remove_non_letter_symbols(text, "");
        let chars: Vec<char> = input.chars().collect();
        let longest = self.codes.max_key_len();
        let mut out = Vec::with_capacity(chars.len());

        let mut idx = 0;
        let mut key = String::with_capacity(longest * 4);
        while idx < chars.len() {
            let mut found = None;
            for len in (1..=longest.min(chars.len() - idx)).rev() {
                key.clear();
                key.extend(&chars[idx..idx + len]);
                if let Some(code) = self.codes.code(&key) {
                    found = Some((len, code));
                    break;
                }
            }
            match found {
                Some((len, code)) => {
                    out.push(code);
                    idx += len;
                }
                None => return Err(Error::UnknownSymbol(chars[idx].to_string())),
            }
        }
        debug!("Encoded {} symbols", out.len());
        Ok(out)
    }

    /// Decode a string of '0' and '1'. On failure the error carries what was decoded so far.
    pub fn decode(&self, bits: &str) -> Result<String> {
        Ok(self.decode_symbols(bits)?.concat())
    }

    /// The symbol for every code in `bits`, in order.
    pub fn decode_symbols(&self, bits: &str) -> Result<Vec<&'a str>> {
        let mut out = Vec::new();
        let mut position = 0;
        // The table is prefix-free, so at most one code can match here and the scan order is moot.
        while position < bits.len() {
            let rest = &bits[position..];
            match self.codes.iter().find(|(_, code)| rest.starts_with(*code)) {
                Some((key, code)) => {
                    out.push(key);
                    position += code.len();
                }
                None => {
                    error!("Input does not match any code at bit {}", position);
                    return Err(Error::UndecodableSequence {
                        position,
                        decoded: out.concat(),
                    });
                }
            }
        }
        Ok(out)
    }
}

/// Join `chunks`, starting a new line after every `per_line` of them.
pub fn wrap<S: AsRef<str>>(chunks: &[S], per_line: usize) -> String {
    let per_line = per_line.max(1);
    chunks
        .chunks(per_line)
        .map(|line| line.iter().map(|s| s.as_ref()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\r\n")
}
