//! Decimal suffix extension and identifier tokenisation.
//!
//! A value `v` in `[0, base_combos * 100)` splits into `suffix = v / base_combos`
//! and `combo_index = v % base_combos`. A zero suffix is never rendered.
//!
//! When parsing, a trailing token that is a known noun always stays a noun,
//! even if it looks like a number. Only a trailing token that is *not* a noun
//! and parses as a non-negative integer is taken as the suffix.

use crate::combinations::Domain;
use crate::error::{HumanIdError, Result};
use crate::words::WordBank;

/// Token separator of the wire format.
pub const SEPARATOR: &str = "-";

/// An identifier split into word tokens and its numeric suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedId<'a> {
    /// Adjective tokens followed by the noun token.
    pub words: Vec<&'a str>,
    /// The suffix, 0 when the identifier had none.
    pub suffix: u64,
}

impl ParsedId<'_> {
    /// Number of adjective tokens.
    pub fn adjective_count(&self) -> u32 {
        u32::try_from(self.words.len() - 1).unwrap_or(u32::MAX)
    }
}

/// Splits a domain value into `(suffix, combo_index)`.
pub fn split(value: u64, base_combos: u64) -> (u64, u64) {
    (value / base_combos, value % base_combos)
}

/// Recombines a suffix and a combination index into a domain value.
///
/// # Errors
///
/// [`HumanIdError::OutOfRange`] if the result is not below `domain.max_index`.
pub fn join(suffix: u64, combo_index: u64, domain: &Domain) -> Result<u64> {
    suffix
        .checked_mul(domain.base_combos)
        .and_then(|v| v.checked_add(combo_index))
        .filter(|&v| v < domain.max_index)
        .ok_or_else(|| HumanIdError::OutOfRange {
            value: suffix
                .saturating_mul(domain.base_combos)
                .saturating_add(combo_index),
            max: domain.max_index - 1,
        })
}

/// Joins words with the separator, appending the suffix when non-zero.
pub fn render(words: &[&str], suffix: u64) -> String {
    let mut id = words.join(SEPARATOR);
    if suffix > 0 {
        id.push_str(SEPARATOR);
        id.push_str(&suffix.to_string());
    }
    id
}

/// Tokenises `id`, separating an optional trailing suffix.
///
/// # Errors
///
/// [`HumanIdError::TooFewTokens`] if fewer than two word tokens remain.
pub fn parse<'a>(id: &'a str, bank: &WordBank) -> Result<ParsedId<'a>> {
    let mut words: Vec<&str> = id.split(SEPARATOR).collect();
    if words.len() < 2 {
        return Err(HumanIdError::TooFewTokens(words.len()));
    }

    let mut suffix = 0;
    let last = words[words.len() - 1];
    if bank.noun_position(last).is_none() {
        if let Ok(value) = last.parse::<u64>() {
            suffix = value;
            words.pop();
        }
    }
    if words.len() < 2 {
        return Err(HumanIdError::TooFewTokens(words.len()));
    }
    Ok(ParsedId { words, suffix })
}
