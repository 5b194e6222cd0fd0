//! Pulse Randomizer Core
//!
//! Reproducible randomness seeded from public randomness beacons.
//!
//! # Architecture
//!
//! - **pulse**: Data shape of a beacon pulse and its JSON form
//! - **rng**: Deterministic Alea generator and the [`Randomizer`] facility
//! - **logging**: Subscriber setup for binaries
//!
//! The two domain modules are independent: a [`Randomizer`] takes hex seed
//! material from anywhere, [`PulseRecord::seed_hex`] being one convenient
//! source.
//!
//! # Critical Invariants
//!
//! 1. Same seed material produces the same outputs, call for call
//! 2. Malformed seed material is an error, never a silent default seed
//! 3. Inputs to shuffling and sampling are never mutated

// Module declarations
pub mod logging;
pub mod pulse;
pub mod rng;

// Re-exports for convenience
pub use pulse::{JsonObject, PulseEnvelope, PulseError, PulseRecord};
pub use rng::{Alea, Randomizer, SeedError, MAX_SEED_HEX_LEN};
