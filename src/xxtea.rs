//! XXTEA-style 64-bit block mixing used by the scrambled encoding.
//!
//! The transform itself is a permutation of `u64`, but the generator reduces
//! its output modulo the domain size, which is almost never a divisor of
//! `2^64`. The reduced mapping is therefore not injective, and decoding falls
//! back to an exhaustive search for the smallest value with the same residue.
//!
//! The key is a public parameter. Nothing here resists an attacker who knows it.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{HumanIdError, Result};

const DELTA: u32 = 0x9e3779b9;
const CYCLES: u32 = 32;

/// A 128-bit public key, as four 32-bit words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CipherKey(pub [u32; 4]);

impl CipherKey {
    /// Key used when none is supplied.
    pub const DEFAULT: CipherKey = CipherKey([0x12345678, 0x9abcdef0, 0x0fedcba9, 0x87654321]);
}

impl Default for CipherKey {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<[u32; 4]> for CipherKey {
    fn from(words: [u32; 4]) -> Self {
        Self(words)
    }
}

/// Keyed 64-bit scrambler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XxteaScrambler {
    key: CipherKey,
}

impl XxteaScrambler {
    pub fn new(key: CipherKey) -> Self {
        Self { key }
    }

    pub fn key(&self) -> CipherKey {
        self.key
    }

    /// Mixes a 64-bit value with 32 rounds of the keyed transform.
    pub fn encrypt64(&self, value: u64) -> u64 {
        let k = &self.key.0;
        let mut v0 = value as u32;
        let mut v1 = (value >> 32) as u32;
        let mut sum: u32 = 0;
        for _ in 0..CYCLES {
            sum = sum.wrapping_add(DELTA);
            v0 = v0.wrapping_add(mix(v1) ^ sum.wrapping_add(k[(sum & 3) as usize]));
            v1 = v1.wrapping_add(mix(v0) ^ sum.wrapping_add(k[((sum >> 11) & 3) as usize]));
        }
        ((v1 as u64) << 32) | v0 as u64
    }

    /// Exact inverse of [`encrypt64`](Self::encrypt64).
    pub fn decrypt64(&self, value: u64) -> u64 {
        let k = &self.key.0;
        let mut v0 = value as u32;
        let mut v1 = (value >> 32) as u32;
        let mut sum = DELTA.wrapping_mul(CYCLES);
        for _ in 0..CYCLES {
            v1 = v1.wrapping_sub(mix(v0) ^ sum.wrapping_add(k[((sum >> 11) & 3) as usize]));
            v0 = v0.wrapping_sub(mix(v1) ^ sum.wrapping_add(k[(sum & 3) as usize]));
            sum = sum.wrapping_sub(DELTA);
        }
        ((v1 as u64) << 32) | v0 as u64
    }

    /// Scrambles `value` and reduces it into `[0, max_index)`.
    pub fn scramble(&self, value: u64, max_index: u64) -> u64 {
        self.encrypt64(value) % max_index
    }

    /// Finds the smallest `i` in `[0, max_index)` with `scramble(i) == scrambled`.
    ///
    /// Runs in `O(max_index)`; keep domains small when latency matters.
    pub fn find_preimage(&self, scrambled: u64, max_index: u64) -> Result<u64> {
        debug!(
            "searching {} candidates for scrambled value {}",
            max_index, scrambled
        );
        match (0..max_index).find(|&i| self.scramble(i, max_index) == scrambled) {
            Some(i) => {
                debug!("scrambled value {} decodes to {}", scrambled, i);
                Ok(i)
            }
            None => {
                warn!(
                    "no preimage for scrambled value {} in domain of {}",
                    scrambled, max_index
                );
                Err(HumanIdError::SearchExhausted { scrambled })
            }
        }
    }
}

impl Default for XxteaScrambler {
    fn default() -> Self {
        Self::new(CipherKey::DEFAULT)
    }
}

fn mix(v: u32) -> u32 {
    ((v << 4) ^ (v >> 5)).wrapping_add(v)
}
