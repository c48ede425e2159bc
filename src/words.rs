//! Word storage and lookup.
//!
//! This module holds the two ordered word sequences (adjectives and nouns) and
//! their reverse `word -> position` maps. The order of each sequence defines the
//! digit values used by the mixed-radix codec, so a bank must never change once
//! identifiers have been issued from it.

use std::collections::HashMap;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::combinations::SUFFIX_RADIX;
use crate::error::{HumanIdError, Result};

/// An immutable pair of ordered word lists with reverse lookups.
#[derive(Debug, Clone)]
pub struct WordBank {
    adjectives: Vec<String>,
    nouns: Vec<String>,
    adjective_index: HashMap<String, usize>,
    noun_index: HashMap<String, usize>,
}

impl WordBank {
    /// Creates a word bank that keeps the given order.
    ///
    /// # Arguments
    ///
    /// * `adjectives` - Non-empty, duplicate-free adjective list
    /// * `nouns` - Non-empty, duplicate-free noun list
    ///
    /// # Errors
    ///
    /// Returns [`HumanIdError::EmptyWordList`] or [`HumanIdError::DuplicateWord`]
    /// if either list violates its contract, and [`HumanIdError::SuffixLikeNoun`]
    /// if a noun is spelled exactly like a rendered suffix.
    pub fn new(adjectives: Vec<String>, nouns: Vec<String>) -> Result<Self> {
        let adjective_index = index_words("adjective", &adjectives)?;
        let noun_index = index_words("noun", &nouns)?;
        if let Some(noun) = nouns.iter().find(|noun| is_rendered_suffix(noun)) {
            return Err(HumanIdError::SuffixLikeNoun(noun.clone()));
        }
        debug!(
            "word bank ready: {} adjectives, {} nouns",
            adjectives.len(),
            nouns.len()
        );
        Ok(Self {
            adjectives,
            nouns,
            adjective_index,
            noun_index,
        })
    }

    /// Creates a word bank after shuffling both lists with `rng`.
    ///
    /// Adjectives are shuffled first, then nouns, so the same seeded generator
    /// always yields the same bank.
    pub fn shuffled<R: Rng + ?Sized>(
        mut adjectives: Vec<String>,
        mut nouns: Vec<String>,
        rng: &mut R,
    ) -> Result<Self> {
        adjectives.shuffle(rng);
        nouns.shuffle(rng);
        Self::new(adjectives, nouns)
    }

    /// Adjectives in digit order.
    pub fn adjectives(&self) -> &[String] {
        &self.adjectives
    }

    /// Nouns in digit order.
    pub fn nouns(&self) -> &[String] {
        &self.nouns
    }

    /// Number of adjectives, the radix of every adjective digit.
    pub fn adjective_base(&self) -> u64 {
        self.adjectives.len() as u64
    }

    /// Number of nouns, the radix of the noun digit.
    pub fn noun_base(&self) -> u64 {
        self.nouns.len() as u64
    }

    /// Returns the position of `word` in the adjective list.
    pub fn adjective_position(&self, word: &str) -> Option<usize> {
        self.adjective_index.get(word).copied()
    }

    /// Returns the position of `word` in the noun list.
    pub fn noun_position(&self, word: &str) -> Option<usize> {
        self.noun_index.get(word).copied()
    }

    pub(crate) fn adjective(&self, position: usize) -> &str {
        &self.adjectives[position]
    }

    pub(crate) fn noun(&self, position: usize) -> &str {
        &self.nouns[position]
    }
}

fn index_words(list: &'static str, words: &[String]) -> Result<HashMap<String, usize>> {
    if words.is_empty() {
        return Err(HumanIdError::EmptyWordList { list });
    }
    let mut index = HashMap::with_capacity(words.len());
    for (position, word) in words.iter().enumerate() {
        if index.insert(word.clone(), position).is_some() {
            return Err(HumanIdError::DuplicateWord {
                list,
                word: word.clone(),
            });
        }
    }
    Ok(index)
}

// True for the exact text `render` emits for suffixes 1-99.
fn is_rendered_suffix(word: &str) -> bool {
    word.parse::<u64>()
        .is_ok_and(|n| (1..SUFFIX_RADIX).contains(&n) && n.to_string() == word)
}

/// Turns raw newline-separated text into a clean word list.
///
/// Each line is trimmed and lowercased; lines that are not entirely `[a-z0-9]`
/// are dropped, and only the first occurrence of a repeated word is kept.
pub fn parse_word_list(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    text.lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|word| {
            !word.is_empty()
                && word
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        })
        .filter(|word| seen.insert(word.clone()))
        .collect()
}
