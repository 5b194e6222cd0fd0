//! Seedable randomness facility
//!
//! A [`Randomizer`] either replays a deterministic Alea sequence keyed by hex
//! seed material (typically a prefix of a beacon pulse's output value), or
//! falls back to the thread-local entropy source when no seed is given.
//!
//! Every derived operation (integer ranges, shuffles, samples) is built on
//! [`Randomizer::random_float`], so under a fixed seed the exact sequence of
//! float draws, and therefore every result, is reproducible.

use crate::rng::alea::Alea;
use rand::Rng;
use thiserror::Error;
use tracing::debug;

/// Recommended maximum seed length in hex digits (keeps seeds below 2^53)
pub const MAX_SEED_HEX_LEN: usize = 13;

/// Hard limit on seed length: 16 hex digits fill a `u64`
pub const MAX_PARSABLE_SEED_HEX_LEN: usize = 16;

/// Errors that can occur while parsing hex seed material
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedError {
    #[error("Seed material is empty")]
    Empty,

    #[error("Invalid hex digit in seed {seed:?} at position {position}")]
    InvalidDigit { seed: String, position: usize },

    #[error("Seed has {len} hex digits, at most {max} are supported")]
    TooLong { len: usize, max: usize },
}

/// Parse hex seed material into a numeric seed
///
/// Accepts 1 to 16 hex digits of either case, with no prefix, sign or
/// surrounding whitespace.
///
/// # Example
/// ```
/// use pulse_randomizer_core::rng::parse_seed_hex;
///
/// assert_eq!(parse_seed_hex("1a2b3c"), Ok(1_715_004));
/// assert!(parse_seed_hex("0x1a").is_err());
/// ```
pub fn parse_seed_hex(seed: &str) -> Result<u64, SeedError> {
    if seed.is_empty() {
        return Err(SeedError::Empty);
    }

    if let Some(position) = seed.chars().position(|c| !c.is_ascii_hexdigit()) {
        return Err(SeedError::InvalidDigit {
            seed: seed.to_string(),
            position,
        });
    }

    if seed.len() > MAX_PARSABLE_SEED_HEX_LEN {
        return Err(SeedError::TooLong {
            len: seed.len(),
            max: MAX_PARSABLE_SEED_HEX_LEN,
        });
    }

    if seed.len() > MAX_SEED_HEX_LEN {
        debug!(
            len = seed.len(),
            recommended = MAX_SEED_HEX_LEN,
            "seed exceeds recommended length"
        );
    }

    // All digits validated and length bounded, so this cannot overflow.
    u64::from_str_radix(seed, 16).map_err(|_| SeedError::InvalidDigit {
        seed: seed.to_string(),
        position: 0,
    })
}

/// Where a [`Randomizer`] draws its floats from
#[derive(Debug, Clone)]
enum Source {
    /// Deterministic sequence keyed by a numeric seed
    Seeded { seed: u64, generator: Alea },

    /// Thread-local entropy, different on every run
    Entropy,
}

/// Random number, shuffle and sampling utility
///
/// # Example
/// ```
/// use pulse_randomizer_core::Randomizer;
///
/// let mut randomizer = Randomizer::from_hex("1a2b3c").unwrap();
/// let roll = randomizer.random_int_between(1, 6);
/// assert!((1..=6).contains(&roll));
///
/// let winners = randomizer.random_members(2, &["ann", "bo", "cy", "di"]);
/// assert_eq!(winners.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Randomizer {
    source: Source,
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::unseeded()
    }
}

impl Randomizer {
    /// Create a randomizer backed by the platform entropy source
    pub fn unseeded() -> Self {
        debug!("randomizer created without seed");
        Self {
            source: Source::Entropy,
        }
    }

    /// Create a deterministic randomizer from a numeric seed
    pub fn from_seed(seed: u64) -> Self {
        debug!(seed, "randomizer seeded");
        Self {
            source: Source::Seeded {
                seed,
                generator: Alea::new(seed),
            },
        }
    }

    /// Create a deterministic randomizer from hex seed material
    ///
    /// # Errors
    /// Returns [`SeedError`] if `seed` is empty, not hex, or too long.
    pub fn from_hex(seed: &str) -> Result<Self, SeedError> {
        parse_seed_hex(seed).map(Self::from_seed)
    }

    /// Create a randomizer from optional hex seed material
    ///
    /// `None` and the empty string both select the entropy source.
    ///
    /// # Example
    /// ```
    /// use pulse_randomizer_core::Randomizer;
    ///
    /// assert!(!Randomizer::new(None).unwrap().is_seeded());
    /// assert!(!Randomizer::new(Some("")).unwrap().is_seeded());
    /// assert!(Randomizer::new(Some("ff")).unwrap().is_seeded());
    /// ```
    pub fn new(seed: Option<&str>) -> Result<Self, SeedError> {
        match seed {
            Some(hex) if !hex.is_empty() => Self::from_hex(hex),
            _ => Ok(Self::unseeded()),
        }
    }

    /// Whether outputs are reproducible
    pub fn is_seeded(&self) -> bool {
        matches!(self.source, Source::Seeded { .. })
    }

    /// Numeric seed, if any
    pub fn seed(&self) -> Option<u64> {
        match &self.source {
            Source::Seeded { seed, .. } => Some(*seed),
            Source::Entropy => None,
        }
    }

    /// Generate a float in [0.0, 1.0)
    ///
    /// Advances the deterministic generator when seeded.
    pub fn random_float(&mut self) -> f64 {
        match &mut self.source {
            Source::Seeded { generator, .. } => generator.next_f64(),
            Source::Entropy => rand::thread_rng().gen::<f64>(),
        }
    }

    /// Generate an integer in [min, max], inclusive on both ends
    ///
    /// Computed as `floor(random_float() * (max - min + 1)) + min`. Bounds
    /// with `min > max` are not rejected; the formula is applied as is.
    ///
    /// Only the offset goes through `f64`; it is added to `min` in integer
    /// arithmetic so bounds beyond 2^53 stay exact.
    pub fn random_int_between(&mut self, min: i64, max: i64) -> i64 {
        let span = (i128::from(max) - i128::from(min) + 1) as f64;
        let offset = (self.random_float() * span).floor() as i128;
        let mut value = i128::from(min) + offset;
        if min <= max {
            // A span rounded up to the next f64 can overshoot by one.
            value = value.clamp(i128::from(min), i128::from(max));
        }
        // Lies between min and max (or max + 1 and min when inverted).
        value as i64
    }

    /// Return a shuffled copy of `items`
    ///
    /// Durstenfeld's Fisher-Yates, walking from the back. Consumes exactly
    /// `items.len()` float draws; `items` is left untouched.
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut work = items.to_vec();
        let mut current = work.len();

        while current != 0 {
            let picked = (self.random_float() * current as f64).floor() as usize;
            current -= 1;
            work.swap(current, picked);
        }

        work
    }

    /// Pick `n` distinct positions of `items` at random
    ///
    /// Returns the first `n` elements of a fresh shuffle. `n` larger than the
    /// input yields the whole shuffle; `n <= 0` yields nothing. The shuffle is
    /// always performed, so draws are consumed either way.
    pub fn random_members<T: Clone>(&mut self, n: i64, items: &[T]) -> Vec<T> {
        let mut shuffled = self.shuffle(items);
        let keep = usize::try_from(n).unwrap_or(0);
        shuffled.truncate(keep);
        shuffled
    }
}
