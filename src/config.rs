//! Generator configuration.

use serde::{Deserialize, Serialize};

use crate::error::{HumanIdError, Result};
use crate::xxtea::CipherKey;

/// Source of the seed that orders the word lists and derives the round keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seed {
    /// A reproducible seed. Issued identifiers stay decodable across restarts.
    Fixed(u64),
    /// A fresh seed from the operating system. Identifiers only decode with
    /// the same generator instance.
    Random,
}

impl Seed {
    /// Resolves the seed to a concrete value.
    pub fn resolve(self) -> Result<u64> {
        match self {
            Seed::Fixed(seed) => Ok(seed),
            Seed::Random => getrandom::u64().map_err(|e| HumanIdError::Entropy(e.to_string())),
        }
    }
}

impl From<u64> for Seed {
    fn from(seed: u64) -> Self {
        Seed::Fixed(seed)
    }
}

/// Serializable description of a [`Generator`](crate::Generator).
///
/// ```
/// use humanid::{Generator, GeneratorConfig, Seed};
///
/// let config = GeneratorConfig {
///     adjectives: vec!["quick".into(), "slow".into()],
///     nouns: vec!["fox".into(), "dog".into(), "cat".into()],
///     seed: Seed::Fixed(42),
///     preserve_order: false,
///     cipher_key: None,
///     precompute: vec![1, 2],
/// };
/// let generator = Generator::from_config(config).unwrap();
/// assert_eq!(generator.max_combinations(1), 6);
/// ```
///
/// The seed is required. A random seed has to be asked for explicitly with
/// `"seed": "random"`; a fixed one is written as `"seed": {"fixed": 42}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    pub adjectives: Vec<String>,
    pub nouns: Vec<String>,
    pub seed: Seed,
    /// Keep the given word order instead of shuffling it with the seed.
    #[serde(default)]
    pub preserve_order: bool,
    /// Public key for the scrambled encoding. Defaults to [`CipherKey::DEFAULT`].
    #[serde(default)]
    pub cipher_key: Option<[u32; 4]>,
    /// Adjective counts whose combination counts are computed up front.
    #[serde(default)]
    pub precompute: Vec<u32>,
}

impl GeneratorConfig {

    pub fn cipher_key(&self) -> Option<CipherKey> {
        self.cipher_key.map(CipherKey)
    }
}
