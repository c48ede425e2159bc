#![doc = include_str!("../README.md")]

pub(crate) mod combinations;
pub(crate) mod config;
pub(crate) mod error;
pub mod feistel;
pub(crate) mod generator;
pub(crate) mod radix;
pub(crate) mod suffix;
pub(crate) mod words;
pub mod xxtea;

pub use combinations::{CombinationCounter, Domain, MAX_ADJECTIVE_COUNT, SUFFIX_RADIX};
pub use config::{GeneratorConfig, Seed};
pub use error::{HumanIdError, Result};
pub use feistel::FeistelPermutation;
pub use generator::{Generator, GeneratorBuilder};
pub use suffix::SEPARATOR;
pub use words::{parse_word_list, WordBank};
pub use xxtea::{CipherKey, XxteaScrambler};

pub mod reexports {
    pub use getrandom;
    pub use rand;
}
