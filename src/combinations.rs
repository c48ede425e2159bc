//! Overflow-checked combination counting.
//!
//! `combinations(k) = adjective_base^k * noun_base` is the number of distinct
//! word sequences with `k` adjectives. Every multiplication is guarded by a
//! bound test before it happens, so an overflow is reported instead of a
//! wrapped count.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use log::{debug, trace};

use crate::error::{HumanIdError, Result};

/// Domain multiplier contributed by the optional decimal suffix (0-99).
pub const SUFFIX_RADIX: u64 = 100;

/// Largest accepted adjective count.
///
/// Any adjective list of two or more words overflows `u64` before this count,
/// so the cap only binds for a single-adjective list.
pub const MAX_ADJECTIVE_COUNT: u32 = 64;

/// Memoizing combination counter for a fixed pair of list sizes.
///
/// The memo is behind a `RwLock`, so one counter can be shared by many threads.
#[derive(Debug)]
pub struct CombinationCounter {
    adjective_base: u64,
    noun_base: u64,
    cache: RwLock<HashMap<u32, u64>>,
}

impl CombinationCounter {
    pub fn new(adjective_base: u64, noun_base: u64) -> Self {
        Self {
            adjective_base,
            noun_base,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the number of combinations for `adjective_count`, or `None` if the
    /// count is zero or above [`MAX_ADJECTIVE_COUNT`], a base is zero, or the
    /// result would not fit in a `u64`.
    pub fn combinations(&self, adjective_count: u32) -> Option<u64> {
        if !(1..=MAX_ADJECTIVE_COUNT).contains(&adjective_count) {
            return None;
        }
        let cached = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&adjective_count)
            .copied();
        if let Some(combos) = cached {
            return Some(combos);
        }

        trace!("computing combinations for {} adjectives", adjective_count);
        let combos = self.compute(adjective_count);
        match combos {
            Some(combos) => {
                self.cache
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(adjective_count, combos);
            }
            None => debug!(
                "combinations overflow for {} adjectives (bases {} x {})",
                adjective_count, self.adjective_base, self.noun_base
            ),
        }
        combos
    }

    /// Fills the memo for every count in `adjective_counts`.
    pub fn precompute<I: IntoIterator<Item = u32>>(&self, adjective_counts: I) {
        for adjective_count in adjective_counts {
            self.combinations(adjective_count);
        }
    }

    /// Resolves the full domain for `adjective_count`.
    ///
    /// # Errors
    ///
    /// [`HumanIdError::InvalidAdjectiveCount`] for a count outside
    /// `1..=MAX_ADJECTIVE_COUNT`, and
    /// [`HumanIdError::CombinationOverflow`] if either the combination count or
    /// the suffix-extended domain would exceed `u64::MAX`.
    pub fn domain(&self, adjective_count: u32) -> Result<Domain> {
        if !(1..=MAX_ADJECTIVE_COUNT).contains(&adjective_count) {
            return Err(HumanIdError::InvalidAdjectiveCount(adjective_count));
        }
        let overflow = HumanIdError::CombinationOverflow { adjective_count };
        let base_combos = self.combinations(adjective_count).ok_or(overflow.clone())?;
        if base_combos > u64::MAX / SUFFIX_RADIX {
            debug!(
                "suffix-extended domain overflows for {} adjectives",
                adjective_count
            );
            return Err(overflow);
        }
        Ok(Domain {
            adjective_count,
            base_combos,
            max_index: base_combos * SUFFIX_RADIX,
        })
    }

    fn compute(&self, adjective_count: u32) -> Option<u64> {
        if self.adjective_base == 0 || self.noun_base == 0 {
            return None;
        }
        if self.adjective_base == 1 {
            return Some(self.noun_base);
        }
        let mut combos: u64 = 1;
        for _ in 0..adjective_count {
            if combos > u64::MAX / self.adjective_base {
                return None;
            }
            combos *= self.adjective_base;
        }
        if combos > u64::MAX / self.noun_base {
            return None;
        }
        Some(combos * self.noun_base)
    }
}

/// The addressable range for one adjective count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Domain {
    pub adjective_count: u32,
    /// Number of word sequences, `combinations(adjective_count)`.
    pub base_combos: u64,
    /// Exclusive upper bound of encodable values, `base_combos * 100`.
    pub max_index: u64,
}
