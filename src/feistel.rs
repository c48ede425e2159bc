//! Keyed Feistel permutation over power-of-two domains.
//!
//! A value of `bits` bits is split into a high half `L` of `bits - bits / 2`
//! bits and a low half `R` of `bits / 2` bits. Each round maps
//! `(L, R) -> (R, L ^ F(R, k))`, truncating `F` to the width of `L`, so the
//! halves trade widths every round. With an even number of rounds the widths
//! are back in place at the end and the result is a bijection on
//! `[0, 2^bits)` for any `bits`, odd widths included.
//!
//! This is obfuscation only: the round keys are derived from a seed and the
//! round function is not cryptographically strong.

use rand::Rng;

/// Number of Feistel rounds.
pub const ROUNDS: usize = 4;

const _: () = assert!(ROUNDS % 2 == 0, "halves must end in their original widths");

const MULTIPLIER: u64 = 0x5bd1e995;

/// Returns the bit width of `max_index` if it is a power of two.
///
/// Domains of other sizes are not eligible for the permutation.
pub fn domain_bits(max_index: u64) -> Option<u32> {
    max_index
        .is_power_of_two()
        .then(|| max_index.trailing_zeros())
}

/// A 4-round Feistel network with fixed round keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeistelPermutation {
    round_keys: [u64; ROUNDS],
}

impl FeistelPermutation {
    pub fn new(round_keys: [u64; ROUNDS]) -> Self {
        Self { round_keys }
    }

    /// Draws the round keys from `rng`.
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut round_keys = [0u64; ROUNDS];
        for key in round_keys.iter_mut() {
            *key = rng.random();
        }
        Self { round_keys }
    }

    pub fn round_keys(&self) -> &[u64; ROUNDS] {
        &self.round_keys
    }

    /// Permutes `x`, which must be below `2^bits` (`bits <= 63`).
    pub fn permute(&self, x: u64, bits: u32) -> u64 {
        let (mut l, mut r, mut l_bits, mut r_bits) = split(x, bits);
        for &key in &self.round_keys {
            let next_r = l ^ (round(r, key) & mask(l_bits));
            l = r;
            r = next_r;
            std::mem::swap(&mut l_bits, &mut r_bits);
        }
        (l << r_bits) | r
    }

    /// Inverse of [`permute`](Self::permute) for the same `bits`.
    pub fn unpermute(&self, x: u64, bits: u32) -> u64 {
        let (mut l, mut r, mut l_bits, mut r_bits) = split(x, bits);
        for &key in self.round_keys.iter().rev() {
            let prev_l = r ^ (round(l, key) & mask(r_bits));
            r = l;
            l = prev_l;
            std::mem::swap(&mut l_bits, &mut r_bits);
        }
        (l << r_bits) | r
    }
}

fn split(x: u64, bits: u32) -> (u64, u64, u32, u32) {
    let r_bits = bits / 2;
    let l_bits = bits - r_bits;
    ((x >> r_bits) & mask(l_bits), x & mask(r_bits), l_bits, r_bits)
}

fn mask(bits: u32) -> u64 {
    (1u64 << bits) - 1
}

// F(r, k) = low32((r * 0x5bd1e995 + k) ^ rotl16(r))
fn round(r: u64, key: u64) -> u64 {
    let r = r as u32;
    let mixed = (r as u64).wrapping_mul(MULTIPLIER).wrapping_add(key);
    (mixed ^ r.rotate_left(16) as u64) & 0xffff_ffff
}
