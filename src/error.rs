//! Error type shared by every codec layer.

use thiserror::Error;

/// Errors returned by word-bank construction, encoding, and decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HumanIdError {
    /// One of the word lists was empty at construction.
    #[error("{list} list is empty")]
    EmptyWordList { list: &'static str },

    /// A word list contains the same word twice, which would make decoding ambiguous.
    #[error("duplicate word {word:?} in {list} list")]
    DuplicateWord { list: &'static str, word: String },

    /// A noun reads like a rendered suffix (`1` to `99`), so identifiers
    /// carrying that suffix could not be told apart from ones ending in the noun.
    #[error("noun {0:?} collides with a numeric suffix")]
    SuffixLikeNoun(String),

    /// A random seed was requested but the entropy source failed.
    #[error("failed to gather entropy for a random seed: {0}")]
    Entropy(String),

    /// The adjective count must lie in `1..=MAX_ADJECTIVE_COUNT`.
    #[error("must use between 1 and 64 adjectives, got {0}")]
    InvalidAdjectiveCount(u32),

    /// The number of combinations for this adjective count does not fit in 64 bits.
    #[error("combinations for {adjective_count} adjectives overflow u64")]
    CombinationOverflow { adjective_count: u32 },

    /// The index to encode lies outside `[0, max)`.
    #[error("index {index} out of bounds (max {max})")]
    IndexOutOfRange { index: u64, max: u64 },

    /// An identifier has fewer than one adjective and one noun.
    #[error("ID must have at least one adjective and one noun, got {0} token(s)")]
    TooFewTokens(usize),

    /// A token in adjective position is not a known adjective.
    #[error("adjective {0:?} not found")]
    UnknownAdjective(String),

    /// The token in noun position is not a known noun.
    #[error("noun {0:?} not found")]
    UnknownNoun(String),

    /// The decoded value (suffix included) lies outside the domain.
    #[error("decoded value {value} out of range (max {max})")]
    OutOfRange { value: u64, max: u64 },

    /// No value in the domain scrambles to the decoded residue.
    #[error("no preimage found for scrambled value {scrambled}")]
    SearchExhausted { scrambled: u64 },
}

/// A convenience `Result` alias using [`HumanIdError`].
pub type Result<T> = std::result::Result<T, HumanIdError>;
