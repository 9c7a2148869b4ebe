//! Random sources for food placement.
//!
//! ## Key Features
//!
//! - **Deterministic**: `XorShift32` with the same seed yields the same
//!   sequence on every platform, so a seed fixes a whole game trajectory
//! - **Serializable**: the generator is a single 32-bit word
//! - **Pluggable**: the rules only need `RandomSource`, a stream of `[0, 1)` floats
//!
//! ## Usage
//!
//! ```
//! use snake_rules::core::{RandomSource, XorShift32};
//!
//! let mut a = XorShift32::new(42);
//! let mut b = XorShift32::new(42);
//!
//! for _ in 0..8 {
//!     let value = a.next_unit();
//!     assert!((0.0..1.0).contains(&value));
//!     assert_eq!(value, b.next_unit());
//! }
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seed substituted for zero, which would otherwise lock xorshift at zero.
pub const DEFAULT_SEED: u32 = 123_456_789;

const UNIT_SCALE: f64 = 4_294_967_296.0;

/// A stream of pseudo-random floats in `[0, 1)`.
pub trait RandomSource {
    /// Draw the next value.
    fn next_unit(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// 32-bit xorshift generator (shift triple 13/17/5).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Create a generator. A zero seed uses `DEFAULT_SEED`.
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { DEFAULT_SEED } else { seed },
        }
    }

    /// Advance and return the raw 32-bit word.
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Current internal word, for checkpointing.
    #[must_use]
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Resume from a word captured with `state()`.
    #[must_use]
    pub const fn from_state(state: u32) -> Self {
        Self::new(state)
    }
}

impl Default for XorShift32 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RandomSource for XorShift32 {
    fn next_unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / UNIT_SCALE
    }
}

/// Non-deterministic source seeded from OS entropy.
///
/// Used where a caller does not care about reproducing a game.
#[derive(Clone, Debug)]
pub struct EntropyRng {
    inner: ChaCha8Rng,
}

impl EntropyRng {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }
}

impl Default for EntropyRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropyRng {
    fn next_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }
}

/// Replays a fixed list of values, wrapping around at the end.
///
/// Handy for scripting exact food positions. An empty list yields `0.0`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceRng {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRng {
    #[must_use]
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// A source that always returns `value`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of values drawn so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRng {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
