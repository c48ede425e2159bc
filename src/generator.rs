//! The public encoder/decoder.

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::combinations::{CombinationCounter, Domain};
use crate::config::{GeneratorConfig, Seed};
use crate::error::{HumanIdError, Result};
use crate::feistel::{self, FeistelPermutation};
use crate::radix;
use crate::suffix;
use crate::words::WordBank;
use crate::xxtea::{CipherKey, XxteaScrambler};

/// Encodes `u64` identifiers as `adjective-...-noun[-suffix]` strings and back.
///
/// A generator is immutable after construction apart from its combination
/// memo, which is lock-protected, so it can be shared across threads.
#[derive(Debug)]
pub struct Generator {
    words: WordBank,
    counter: CombinationCounter,
    feistel: FeistelPermutation,
    xxtea: XxteaScrambler,
}

impl Generator {
    /// Creates a generator from two word lists.
    ///
    /// The lists are shuffled with `seed`, after which the Feistel round keys
    /// are drawn from the same stream. A missing `cipher_key` falls back to
    /// [`CipherKey::DEFAULT`].
    ///
    /// # Errors
    ///
    /// Fails if a list is empty or has duplicates, or if a random seed was
    /// requested and no entropy is available.
    pub fn new(
        adjectives: Vec<String>,
        nouns: Vec<String>,
        seed: Seed,
        cipher_key: Option<CipherKey>,
    ) -> Result<Self> {
        Self::builder(adjectives, nouns, seed)
            .with_cipher_key(cipher_key)
            .build()
    }

    /// Starts a [`GeneratorBuilder`].
    ///
    /// The seed has no default: pass [`Seed::Fixed`] for identifiers that must
    /// survive a restart, or [`Seed::Random`] to opt in to a per-instance
    /// ordering.
    pub fn builder(adjectives: Vec<String>, nouns: Vec<String>, seed: Seed) -> GeneratorBuilder {
        GeneratorBuilder {
            adjectives,
            nouns,
            seed,
            preserve_order: false,
            cipher_key: None,
            precompute: Vec::new(),
        }
    }

    /// Creates a generator from a [`GeneratorConfig`].
    pub fn from_config(config: GeneratorConfig) -> Result<Self> {
        let cipher_key = config.cipher_key();
        Self::builder(config.adjectives, config.nouns, config.seed)
            .with_cipher_key(cipher_key)
            .preserve_order(config.preserve_order)
            .precompute(config.precompute)
            .build()
    }

    pub fn word_bank(&self) -> &WordBank {
        &self.words
    }

    pub fn cipher_key(&self) -> CipherKey {
        self.xxtea.key()
    }

    /// Number of word sequences with `adjective_count` adjectives, or 0 if the
    /// count is zero or the number does not fit in a `u64`.
    pub fn max_combinations(&self, adjective_count: u32) -> u64 {
        self.counter.combinations(adjective_count).unwrap_or(0)
    }

    /// The encodable range for `adjective_count`.
    pub fn domain(&self, adjective_count: u32) -> Result<Domain> {
        self.counter.domain(adjective_count)
    }

    /// Encodes `index` with `adjective_count` adjectives.
    ///
    /// The mapping is a bijection on `[0, max_combinations(k) * 100)`. When the
    /// domain size is a power of two the index is first permuted by the keyed
    /// Feistel network; otherwise it is encoded as is.
    pub fn encode(&self, index: u64, adjective_count: u32) -> Result<String> {
        let domain = self.checked_domain(index, adjective_count)?;
        let value = match feistel::domain_bits(domain.max_index) {
            Some(bits) => self.feistel.permute(index, bits),
            None => index,
        };
        Ok(self.render(value, &domain))
    }

    /// Decodes an identifier produced by [`encode`](Self::encode).
    pub fn decode(&self, id: &str) -> Result<u64> {
        let (value, domain) = self.parse(id)?;
        Ok(match feistel::domain_bits(domain.max_index) {
            Some(bits) => self.feistel.unpermute(value, bits),
            None => value,
        })
    }

    /// Encodes `index` after mixing it with the keyed XXTEA transform.
    ///
    /// Distinct indices may produce the same identifier.
    pub fn encode_scrambled(&self, index: u64, adjective_count: u32) -> Result<String> {
        let domain = self.checked_domain(index, adjective_count)?;
        let value = self.xxtea.scramble(index, domain.max_index);
        Ok(self.render(value, &domain))
    }

    /// Decodes an identifier produced by [`encode_scrambled`](Self::encode_scrambled).
    ///
    /// Returns the smallest index that scrambles to the same identifier, which
    /// is not necessarily the one originally encoded. Cost grows linearly with
    /// the domain size.
    pub fn decode_from_scrambled(&self, id: &str) -> Result<u64> {
        let (value, domain) = self.parse(id)?;
        self.xxtea.find_preimage(value, domain.max_index)
    }

    fn checked_domain(&self, index: u64, adjective_count: u32) -> Result<Domain> {
        let domain = self.counter.domain(adjective_count)?;
        if index >= domain.max_index {
            return Err(HumanIdError::IndexOutOfRange {
                index,
                max: domain.max_index - 1,
            });
        }
        Ok(domain)
    }

    fn render(&self, value: u64, domain: &Domain) -> String {
        let (suffix, combo_index) = suffix::split(value, domain.base_combos);
        let words = radix::index_to_words(&self.words, combo_index, domain.adjective_count);
        suffix::render(&words, suffix)
    }

    fn parse(&self, id: &str) -> Result<(u64, Domain)> {
        let parsed = suffix::parse(id, &self.words)?;
        let domain = self.counter.domain(parsed.adjective_count())?;
        let combo_index = radix::words_to_index(&self.words, &parsed.words)?;
        let value = suffix::join(parsed.suffix, combo_index, &domain)?;
        Ok((value, domain))
    }
}

/// Step-by-step construction of a [`Generator`].
///
/// ```
/// use humanid::{Generator, Seed};
///
/// let generator = Generator::builder(
///     vec!["quick".into(), "slow".into()],
///     vec!["fox".into(), "dog".into(), "cat".into()],
///     Seed::Fixed(7),
/// )
/// .preserve_order(true)
/// .build()
/// .unwrap();
///
/// assert_eq!(generator.encode(6, 1).unwrap(), "quick-fox-1");
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorBuilder {
    adjectives: Vec<String>,
    nouns: Vec<String>,
    seed: Seed,
    preserve_order: bool,
    cipher_key: Option<CipherKey>,
    precompute: Vec<u32>,
}

impl GeneratorBuilder {
    /// Replaces the seed given to [`Generator::builder`].
    pub fn seed(mut self, seed: Seed) -> Self {
        self.seed = seed;
        self
    }

    /// Keeps the word lists in the given order instead of shuffling them.
    pub fn preserve_order(mut self, preserve_order: bool) -> Self {
        self.preserve_order = preserve_order;
        self
    }

    pub fn cipher_key(self, key: impl Into<CipherKey>) -> Self {
        self.with_cipher_key(Some(key.into()))
    }

    pub fn with_cipher_key(mut self, key: Option<CipherKey>) -> Self {
        self.cipher_key = key;
        self
    }

    /// Adjective counts whose combination counts are filled in at build time.
    pub fn precompute<I: IntoIterator<Item = u32>>(mut self, adjective_counts: I) -> Self {
        self.precompute.extend(adjective_counts);
        self
    }

    pub fn build(self) -> Result<Generator> {
        let seed = self.seed.resolve()?;
        match self.seed {
            Seed::Fixed(_) => debug!("building generator with fixed seed {}", seed),
            Seed::Random => debug!("building generator with random seed {}", seed),
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let words = if self.preserve_order {
            WordBank::new(self.adjectives, self.nouns)?
        } else {
            WordBank::shuffled(self.adjectives, self.nouns, &mut rng)?
        };
        let feistel = FeistelPermutation::from_rng(&mut rng);

        let key = match self.cipher_key {
            Some(key) => key,
            None => {
                debug!("no cipher key supplied, using the default public key");
                CipherKey::DEFAULT
            }
        };

        let counter = CombinationCounter::new(words.adjective_base(), words.noun_base());
        if !self.precompute.is_empty() {
            debug!("precomputing combinations for {:?}", self.precompute);
            counter.precompute(self.precompute);
        }

        Ok(Generator {
            words,
            counter,
            feistel,
            xxtea: XxteaScrambler::new(key),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinations::MAX_ADJECTIVE_COUNT;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn quick_fox() -> Generator {
        Generator::builder(words(&["quick", "slow"]), words(&["fox", "dog", "cat"]), Seed::Fixed(1))
            .preserve_order(true)
            .build()
            .unwrap()
    }

    fn seeded(seed: u64) -> Generator {
        let adjectives = (0..40).map(|i| format!("adj{}", i)).collect();
        let nouns = (0..25).map(|i| format!("noun{}", i)).collect();
        Generator::new(adjectives, nouns, Seed::Fixed(seed), None).unwrap()
    }

    #[test]
    fn test_concrete_example() {
        let g = quick_fox();
        assert_eq!(g.max_combinations(1), 6);
        assert_eq!(g.encode(0, 1).unwrap(), "quick-fox");
        assert_eq!(g.decode("quick-fox").unwrap(), 0);
        assert_eq!(g.encode(6, 1).unwrap(), "quick-fox-1");
        assert_eq!(g.decode("quick-fox-1").unwrap(), 6);
        assert_eq!(g.encode(599, 1).unwrap(), "slow-cat-99");
    }

    #[test]
    fn test_full_domain_round_trip() {
        let g = quick_fox();
        for adjective_count in 1..=3 {
            let max = g.max_combinations(adjective_count) * 100;
            for index in 0..max {
                let id = g.encode(index, adjective_count).unwrap();
                assert_eq!(g.decode(&id).unwrap(), index, "id {}", id);
            }
        }
    }

    #[test]
    fn test_seeded_round_trip() {
        let g = seeded(12345);
        for index in (0..g.max_combinations(2) * 100).step_by(137) {
            let id = g.encode(index, 2).unwrap();
            let tokens = id.split('-').count();
            assert_eq!(tokens, 3 + usize::from(index >= g.max_combinations(2)));
            assert_eq!(g.decode(&id).unwrap(), index);
        }
    }

    #[test]
    fn test_same_seed_same_ids() {
        let a = seeded(100);
        let b = seeded(100);
        for index in [0u64, 1, 999, 12345, 99_999] {
            assert_eq!(a.encode(index, 2).unwrap(), b.encode(index, 2).unwrap());
        }
    }

    #[test]
    fn test_suffix_omitted_below_base_combos() {
        let g = seeded(5);
        let combos = g.max_combinations(1);
        for index in [0, combos / 2, combos - 1] {
            let id = g.encode(index, 1).unwrap();
            assert!(id.split('-').all(|t| t.parse::<u64>().is_err()), "{}", id);
        }
        let id = g.encode(combos * 42 + 3, 1).unwrap();
        assert!(id.ends_with("-42"), "{}", id);
        assert_eq!(g.decode(&id).unwrap(), combos * 42 + 3);
    }

    #[test]
    fn test_encode_errors() {
        let g = quick_fox();
        assert_eq!(
            g.encode(0, 0).unwrap_err(),
            HumanIdError::InvalidAdjectiveCount(0)
        );
        assert_eq!(
            g.encode(600, 1).unwrap_err(),
            HumanIdError::IndexOutOfRange {
                index: 600,
                max: 599
            }
        );
        assert_eq!(
            g.encode(0, 64).unwrap_err(),
            HumanIdError::CombinationOverflow { adjective_count: 64 }
        );
        assert_eq!(g.max_combinations(64), 0);
    }

    #[test]
    fn test_decode_errors() {
        let g = quick_fox();
        assert_eq!(g.decode("fox").unwrap_err(), HumanIdError::TooFewTokens(1));
        assert_eq!(
            g.decode("fast-fox").unwrap_err(),
            HumanIdError::UnknownAdjective("fast".into())
        );
        assert_eq!(
            g.decode("quick-owl").unwrap_err(),
            HumanIdError::UnknownNoun("owl".into())
        );
        assert_eq!(
            g.decode("quick-owl-5").unwrap_err(),
            HumanIdError::UnknownNoun("owl".into())
        );
        assert_eq!(
            g.decode("quick-fox-100").unwrap_err(),
            HumanIdError::OutOfRange {
                value: 600,
                max: 599
            }
        );
    }

    #[test]
    fn test_single_adjective_length_cap() {
        let g = Generator::builder(words(&["only"]), words(&["fox", "dog"]), Seed::Fixed(1))
            .preserve_order(true)
            .build()
            .unwrap();
        assert_eq!(g.max_combinations(MAX_ADJECTIVE_COUNT), 2);
        let longest = g.encode(3, MAX_ADJECTIVE_COUNT).unwrap();
        assert_eq!(longest.split('-').count(), 66);
        assert_eq!(g.decode(&longest).unwrap(), 3);

        assert_eq!(
            g.encode(0, MAX_ADJECTIVE_COUNT + 1).unwrap_err(),
            HumanIdError::InvalidAdjectiveCount(MAX_ADJECTIVE_COUNT + 1)
        );
        let too_long = vec!["only"; 10_000].join("-") + "-fox";
        assert_eq!(
            g.decode(&too_long).unwrap_err(),
            HumanIdError::InvalidAdjectiveCount(10_000)
        );
        assert_eq!(g.max_combinations(10_000), 0);
    }

    #[test]
    fn test_builder_seed_can_be_replaced() {
        let a = Generator::builder(words(&["a", "b", "c"]), words(&["x", "y", "z"]), Seed::Fixed(1))
            .seed(Seed::Fixed(2))
            .build()
            .unwrap();
        let b = Generator::new(
            words(&["a", "b", "c"]),
            words(&["x", "y", "z"]),
            Seed::Fixed(2),
            None,
        )
        .unwrap();
        assert_eq!(a.word_bank().adjectives(), b.word_bank().adjectives());
        assert_eq!(a.word_bank().nouns(), b.word_bank().nouns());
    }

    #[test]
    fn test_identity_when_not_power_of_two() {
        let g = seeded(9);
        let domain = g.domain(2).unwrap();
        assert!(feistel::domain_bits(domain.max_index).is_none());
        for index in (0..domain.max_index).step_by(9973) {
            let (suffix, combo_index) = suffix::split(index, domain.base_combos);
            let plain = radix::index_to_words(g.word_bank(), combo_index, 2);
            assert_eq!(g.encode(index, 2).unwrap(), suffix::render(&plain, suffix));
        }
    }

    #[test]
    fn test_scrambled_collision_resolves_to_smallest() {
        let g = Generator::builder(words(&["a", "b"]), words(&["x", "y", "z"]), Seed::Fixed(1))
            .preserve_order(true)
            .build()
            .unwrap();
        let first = g.encode_scrambled(9, 1).unwrap();
        let second = g.encode_scrambled(16, 1).unwrap();
        assert_eq!(first, "a-z-92");
        assert_eq!(first, second);
        assert_eq!(g.decode_from_scrambled(&second).unwrap(), 9);
    }

    #[test]
    fn test_scrambled_decodes_to_colliding_preimage() {
        let g = Generator::builder(words(&["a", "b"]), words(&["x", "y", "z"]), Seed::Fixed(3))
            .build()
            .unwrap();
        let max_index = g.domain(1).unwrap().max_index;
        let xxtea = XxteaScrambler::new(g.cipher_key());
        for index in 0..max_index {
            let id = g.encode_scrambled(index, 1).unwrap();
            let decoded = g.decode_from_scrambled(&id).unwrap();
            assert!(decoded <= index);
            assert_eq!(
                xxtea.scramble(decoded, max_index),
                xxtea.scramble(index, max_index)
            );
        }
    }

    #[test]
    fn test_custom_cipher_key() {
        let g = Generator::builder(words(&["a", "b"]), words(&["x", "y", "z"]), Seed::Fixed(1))
            .cipher_key([1, 2, 3, 4])
            .build()
            .unwrap();
        assert_eq!(g.cipher_key(), CipherKey([1, 2, 3, 4]));
        assert_eq!(quick_fox().cipher_key(), CipherKey::DEFAULT);
    }

    #[test]
    fn test_concurrent_use() {
        let g = seeded(77);
        std::thread::scope(|s| {
            for adjective_count in 1..=4u32 {
                let g = &g;
                s.spawn(move || {
                    let max_index = g.domain(adjective_count).unwrap().max_index;
                    for index in (0..max_index).step_by(7919) {
                        let id = g.encode(index, adjective_count).unwrap();
                        assert_eq!(g.decode(&id).unwrap(), index);
                    }
                });
            }
        });
    }
}
