//! Greedy search for binomials (two-symbol units) worth adding to an alphabet.
//!
//! Adding a binomial such as "th" moves its count out of "t" and "h" and into a symbol of its
//! own. Whether that lowers the total entropy depends on the rest of the alphabet, so every
//! candidate is tried: subtract, insert, rebuild the codes, measure, and put things back unless
//! the candidate is kept.
//!
//! The search is order dependent and not globally optimal. In `AllBeneficial` mode an accepted
//! binomial is never re-checked after later ones change the table.

use log::{debug, info, trace, warn};

use crate::error::{Error, Result};
use crate::huffman_coding::huffman_codes::build_codes;
use crate::huffman_coding::symbol_table::SymbolTable;

use super::metrics::{average_code_length, entropy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinomialMode {
    /// Keep only the candidate with the lowest resulting entropy
    SingleBest,
    /// Keep every candidate that beats the original entropy
    AllBeneficial,
}

/// A candidate split into the two alphabet symbols it joins.
#[derive(Debug, Clone)]
struct Candidate {
    key: String,
    frequency: u64,
    first: String,
    second: String,
}

/// What the table looked like before a trial, so it can be put back.
struct Snapshot {
    first: u64,
    second: u64,
}

/// Try every binomial in `candidates` against `table` and keep the ones `mode` asks for.
/// Returns the keys added to `table`, in the order they were accepted.
pub fn find_binomials(
    table: &mut SymbolTable,
    candidates: &SymbolTable,
    mode: BinomialMode,
    verbose: bool,
) -> Result<Vec<String>> {
    // Check every candidate before touching the table
    let candidates = candidates
        .iter()
        .map(|c| -> Result<Candidate> {
            let (first, second) = split_binomial(table, &c.key)?;
            Ok(Candidate {
                key: c.key.clone(),
                frequency: c.frequency,
                first,
                second,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let baseline = entropy(table, false)?;
    report(verbose, format!("Original alphabet entropy: {}", baseline));

    let mut accepted = Vec::new();
    let mut best: Option<(usize, f64)> = None;

    for (i, candidate) in candidates.iter().enumerate() {
        if table.contains(&candidate.key) {
            warn!("Binomial {:?} is already in the alphabet, skipping", candidate.key);
            continue;
        }
        let snapshot = match apply(table, candidate) {
            Some(snapshot) => snapshot,
            None => {
                warn!(
                    "Binomial {:?} ({}) outweighs {:?} or {:?}, skipping",
                    candidate.key, candidate.frequency, candidate.first, candidate.second
                );
                continue;
            }
        };
        report(
            verbose,
            format!(
                "Key: [{}]\tFrequency: {}\n  [{}]: {} -> {}\n  [{}]: {} -> {}",
                candidate.key,
                candidate.frequency,
                candidate.first,
                snapshot.first,
                table.frequency(&candidate.first).unwrap_or(0),
                candidate.second,
                snapshot.second,
                table.frequency(&candidate.second).unwrap_or(0),
            ),
        );

        let trial = evaluate(table);
        let trial_entropy = match trial {
            Ok(e) => e,
            Err(e) => {
                restore(table, candidate, &snapshot)?;
                return Err(e);
            }
        };
        report(
            verbose,
            format!(
                "  Alphabet entropy with binomial: {} (original {})",
                trial_entropy, baseline
            ),
        );

        match mode {
            BinomialMode::SingleBest => {
                let improves = trial_entropy < baseline
                    && best.map_or(true, |(_, min)| trial_entropy < min);
                if improves {
                    best = Some((i, trial_entropy));
                }
                restore(table, candidate, &snapshot)?;
            }
            BinomialMode::AllBeneficial => {
                if trial_entropy < baseline {
                    report(verbose, format!("  Keeping {:?}", candidate.key));
                    accepted.push(candidate.key.clone());
                } else {
                    report(
                        verbose,
                        format!("  Original alphabet is better, removing {:?}", candidate.key),
                    );
                    restore(table, candidate, &snapshot)?;
                }
            }
        }
    }

    if let Some((i, min)) = best {
        let winner = &candidates[i];
        // The winner fit when it was tried and every trial since was rolled back
        if apply(table, winner).is_some() {
            info!("Best binomial {:?} lowers entropy to {}", winner.key, min);
            accepted.push(winner.key.clone());
        }
    }
    debug!("Accepted binomials: {:?}", accepted);
    Ok(accepted)
}

/// Split `key` into two symbols of `table`, trying split points from the left.
fn split_binomial(table: &SymbolTable, key: &str) -> Result<(String, String)> {
    key.char_indices()
        .skip(1)
        .map(|(at, _)| key.split_at(at))
        .find(|(first, second)| table.contains(first) && table.contains(second))
        .map(|(first, second)| (first.to_string(), second.to_string()))
        .ok_or_else(|| Error::MissingFrequency(key.to_string()))
}

/// Move the binomial's count out of its constituents and append it to the table. Returns None,
/// leaving the table alone, if that would drive a constituent below zero.
fn apply(table: &mut SymbolTable, candidate: &Candidate) -> Option<Snapshot> {
    let first = table.frequency(&candidate.first)?;
    let second = table.frequency(&candidate.second)?;

    // Only lowers frequencies, so the table total cannot overflow
    if candidate.first == candidate.second {
        let left = first.checked_sub(candidate.frequency.checked_mul(2)?)?;
        table.set_frequency(&candidate.first, left).ok()?;
    } else {
        let first_left = first.checked_sub(candidate.frequency)?;
        let second_left = second.checked_sub(candidate.frequency)?;
        table.set_frequency(&candidate.first, first_left).ok()?;
        table.set_frequency(&candidate.second, second_left).ok()?;
    }

    if table.insert(&candidate.key, candidate.frequency).is_err() {
        table.set_frequency(&candidate.second, second).ok()?;
        table.set_frequency(&candidate.first, first).ok()?;
        return None;
    }
    Some(Snapshot { first, second })
}

/// Undo `apply`.
fn restore(table: &mut SymbolTable, candidate: &Candidate, snapshot: &Snapshot) -> Result<()> {
    table.remove(&candidate.key);
    table.set_frequency(&candidate.second, snapshot.second)?;
    table.set_frequency(&candidate.first, snapshot.first)?;
    Ok(())
}

/// Rebuild the codes for the trial table and measure its entropy.
fn evaluate(table: &SymbolTable) -> Result<f64> {
    let codes = build_codes(table)?;
    let trial_entropy = entropy(table, false)?;
    trace!(
        "trial: {} symbols, entropy {}, average code length {}",
        table.len(),
        trial_entropy,
        average_code_length(table, &codes)?
    );
    Ok(trial_entropy)
}

fn report(verbose: bool, line: String) {
    if verbose {
        info!("{}", line);
    } else {
        trace!("{}", line);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn base() -> SymbolTable {
        SymbolTable::from_pairs([("a", 50), ("b", 50), ("c", 2)]).unwrap()
    }

    fn candidates() -> SymbolTable {
        SymbolTable::from_pairs([("ab", 45), ("bc", 1), ("ac", 2)]).unwrap()
    }

    #[test]
    fn single_best_test() {
        let mut table = base();
        let found =
            find_binomials(&mut table, &candidates(), BinomialMode::SingleBest, false).unwrap();
        assert_eq!(found, vec!["ab"]);
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["a", "b", "c", "ab"]);
        assert_eq!(table.frequency("a"), Some(5));
        assert_eq!(table.frequency("b"), Some(5));
        assert_eq!(table.frequency("c"), Some(2));
        assert_eq!(table.frequency("ab"), Some(45));

        // The winner really is the lowest of all the single trials
        let winner = entropy(&table, false).unwrap();
        for (key, freq) in [("bc", 1), ("ac", 2)] {
            let mut trial = base();
            let (first, second) = split_binomial(&trial, key).unwrap();
            let candidate = Candidate {
                key: key.to_string(),
                frequency: freq,
                first,
                second,
            };
            apply(&mut trial, &candidate).unwrap();
            assert!(entropy(&trial, false).unwrap() > winner);
        }
    }

    #[test]
    fn all_beneficial_test() {
        let mut table = base();
        let baseline = entropy(&table, false).unwrap();
        let found =
            find_binomials(&mut table, &candidates(), BinomialMode::AllBeneficial, true).unwrap();
        // "ac" would need 2 from "c", which only has 1 left after "bc"
        assert_eq!(found, vec!["ab", "bc"]);
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["a", "b", "c", "ab", "bc"]);
        assert_eq!(table.frequency("a"), Some(5));
        assert_eq!(table.frequency("b"), Some(4));
        assert_eq!(table.frequency("c"), Some(1));
        assert!(entropy(&table, false).unwrap() < baseline);
    }

    #[test]
    fn nothing_helps_test() {
        let mut table = base();
        let only_bad = SymbolTable::from_pairs([("bc", 1), ("ac", 2)]).unwrap();
        let found = find_binomials(&mut table, &only_bad, BinomialMode::SingleBest, false).unwrap();
        assert!(found.is_empty());
        assert_eq!(table, base());

        let found =
            find_binomials(&mut table, &only_bad, BinomialMode::AllBeneficial, false).unwrap();
        assert!(found.is_empty());
        assert_eq!(table, base());
    }

    #[test]
    fn missing_constituent_test() {
        let mut table = base();
        let unknown = SymbolTable::from_pairs([("ab", 45), ("az", 1)]).unwrap();
        match find_binomials(&mut table, &unknown, BinomialMode::AllBeneficial, false) {
            Err(Error::MissingFrequency(key)) => assert_eq!(key, "az"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(table, base());
    }

    #[test]
    fn oversized_binomial_rejected_test() {
        let mut table = base();
        let heavy = SymbolTable::from_pairs([("ac", 3)]).unwrap();
        let found = find_binomials(&mut table, &heavy, BinomialMode::AllBeneficial, false).unwrap();
        assert!(found.is_empty());
        assert_eq!(table, base());
    }

    #[test]
    fn doubled_letter_test() {
        let mut table = SymbolTable::from_pairs([("e", 10), ("x", 1)]).unwrap();
        let (first, second) = split_binomial(&table, "ee").unwrap();
        assert_eq!((first.as_str(), second.as_str()), ("e", "e"));
        let candidate = Candidate {
            key: "ee".to_string(),
            frequency: 4,
            first,
            second,
        };
        let snapshot = apply(&mut table, &candidate).unwrap();
        assert_eq!(table.frequency("e"), Some(2));
        restore(&mut table, &candidate, &snapshot).unwrap();
        assert_eq!(table.frequency("e"), Some(10));
        assert!(!table.contains("ee"));
    }

    #[test]
    fn multi_letter_split_test() {
        let table = SymbolTable::from_pairs([("t", 5), ("h", 5), ("th", 3), ("e", 2)]).unwrap();
        let (first, second) = split_binomial(&table, "the").unwrap();
        assert_eq!((first.as_str(), second.as_str()), ("th", "e"));
    }
}
