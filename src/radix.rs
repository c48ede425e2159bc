//! Mixed-radix mapping between combination indices and word sequences.
//!
//! The least significant digit is the noun (base `noun_base`), followed by one
//! digit per adjective (base `adjective_base`). Words are emitted most
//! significant first, so adjectives read left to right and the noun comes last.

use crate::error::{HumanIdError, Result};
use crate::words::WordBank;

/// Converts `index` (in `[0, combinations(adjective_count))`) to its words.
///
/// Returns `adjective_count + 1` words: the adjectives followed by the noun.
pub fn index_to_words(bank: &WordBank, mut index: u64, adjective_count: u32) -> Vec<&str> {
    let adjective_base = bank.adjective_base();
    let noun_base = bank.noun_base();
    let adjective_count = adjective_count as usize;

    let mut words = vec![""; adjective_count + 1];
    words[adjective_count] = bank.noun((index % noun_base) as usize);
    index /= noun_base;
    for slot in words[..adjective_count].iter_mut().rev() {
        *slot = bank.adjective((index % adjective_base) as usize);
        index /= adjective_base;
    }
    words
}

/// Converts a word sequence back to its combination index.
///
/// All but the last token are adjectives; the last token is the noun. The
/// caller guarantees the sequence has at least two tokens and that the
/// combination count for its length fits in a `u64`.
pub fn words_to_index(bank: &WordBank, tokens: &[&str]) -> Result<u64> {
    let (noun, adjectives) = tokens
        .split_last()
        .ok_or(HumanIdError::TooFewTokens(tokens.len()))?;

    let mut index: u64 = 0;
    for adjective in adjectives {
        let position = bank
            .adjective_position(adjective)
            .ok_or_else(|| HumanIdError::UnknownAdjective(adjective.to_string()))?;
        index = index * bank.adjective_base() + position as u64;
    }
    let position = bank
        .noun_position(noun)
        .ok_or_else(|| HumanIdError::UnknownNoun(noun.to_string()))?;
    Ok(index * bank.noun_base() + position as u64)
}
