//! Deterministic random number generation
//!
//! Uses the Alea algorithm for reproducible sequences keyed by hex seed
//! material, with a thread-local entropy fallback when no seed is supplied.

mod alea;
mod randomizer;

pub use alea::Alea;
pub use randomizer::{
    parse_seed_hex, Randomizer, SeedError, MAX_PARSABLE_SEED_HEX_LEN, MAX_SEED_HEX_LEN,
};
