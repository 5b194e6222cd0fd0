//! Alea pseudo-random number generator
//!
//! Johannes Baagøe's Alea: a multiply-with-carry style generator over three
//! fractional lags, seeded through the "Mash" string hash.
//!
//! # Algorithm
//!
//! All arithmetic is carried out in `f64`, exactly as the generator was
//! specified, so that outputs match other Alea implementations bit for bit.
//! Each output is a float in [0.0, 1.0) with 32 bits of precision.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers. Numeric seeds are hashed
//! through their decimal representation, so `Alea::new(1715004)` and an
//! implementation seeded with the number `1715004` agree.

use serde::{Deserialize, Serialize};

/// 2^-32
const NORM_32: f64 = 2.328_306_436_538_696_3e-10;

/// 2^32
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Initial Mash accumulator
const MASH_INIT: f64 = 4_022_871_197.0; // 0xefc8249d

/// Truncate toward zero and wrap into [0, 2^32), like ECMAScript `x >>> 0`.
fn to_uint32(x: f64) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    x.trunc().rem_euclid(TWO_POW_32)
}

/// Mash string hash
///
/// The accumulator carries over between calls; successive hashes of the same
/// input yield different values.
#[derive(Debug, Clone)]
pub(crate) struct Mash {
    n: f64,
}

impl Mash {
    pub(crate) fn new() -> Self {
        Self { n: MASH_INIT }
    }

    /// Hash `data` (as UTF-16 code units) into a float in [0.0, 1.0)
    pub(crate) fn mash(&mut self, data: &str) -> f64 {
        let mut n = self.n;
        for unit in data.encode_utf16() {
            n += f64::from(unit);
            let mut h = 0.025_196_032_824_169_38 * n;
            n = to_uint32(h);
            h -= n;
            h *= n;
            n = to_uint32(h);
            h -= n;
            n += h * TWO_POW_32;
        }
        self.n = n;
        to_uint32(n) * NORM_32
    }
}

/// Deterministic random number generator using Alea
///
/// # Example
/// ```
/// use pulse_randomizer_core::Alea;
///
/// let mut rng = Alea::new(0x1a2b3c);
/// let value = rng.next_f64();
/// assert!((0.0..1.0).contains(&value));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alea {
    s0: f64,
    s1: f64,
    s2: f64,
    /// Carry
    c: f64,
}

impl Alea {
    /// Create a new generator from a numeric seed
    ///
    /// # Example
    /// ```
    /// use pulse_randomizer_core::Alea;
    ///
    /// let rng = Alea::new(12345);
    /// ```
    pub fn new(seed: u64) -> Self {
        let mut mash = Mash::new();
        let mut s0 = mash.mash(" ");
        let mut s1 = mash.mash(" ");
        let mut s2 = mash.mash(" ");

        let seed = seed.to_string();
        for lag in [&mut s0, &mut s1, &mut s2] {
            *lag -= mash.mash(&seed);
            if *lag < 0.0 {
                *lag += 1.0;
            }
        }

        Self { s0, s1, s2, c: 1.0 }
    }

    /// Generate the next float in [0.0, 1.0)
    ///
    /// Advances the internal state.
    pub fn next_f64(&mut self) -> f64 {
        let t = 2_091_639.0 * self.s0 + self.c * NORM_32;
        self.s0 = self.s1;
        self.s1 = self.s2;
        self.c = t.trunc();
        self.s2 = t - self.c;
        self.s2
    }
}
