//! Randomness sources.
//!
//! Response selection and typing-delay sampling both draw from a
//! [`RandomSource`] yielding values in `[0, 1)`. Production code uses
//! [`RngSource`]; tests substitute [`FixedRandom`] or [`SequenceRandom`] to
//! make selection and timing deterministic.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A uniform source of values in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Adapter over any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R = StdRng>(R);

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        RngSource(StdRng::from_entropy())
    }

    /// A reproducible source; the CLI exposes this as `--seed`.
    pub fn seeded(seed: u64) -> Self {
        RngSource(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        RngSource(rng)
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        // `Standard` for f64 samples the half-open interval [0, 1).
        self.0.r#gen::<f64>()
    }
}

/// Always returns the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRandom(f64);

impl FixedRandom {
    /// The largest `f64` strictly below 1.
    pub const LARGEST_BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

    /// Values outside `[0, 1)` are clamped into it.
    pub fn new(value: f64) -> Self {
        FixedRandom(clamp_unit(value))
    }

    pub fn first() -> Self {
        FixedRandom(0.0)
    }

    pub fn last() -> Self {
        FixedRandom(Self::LARGEST_BELOW_ONE)
    }
}

impl RandomSource for FixedRandom {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// Replays a script of values, cycling when exhausted.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceRandom {
    values: Vec<f64>,
    pos: usize,
}

impl SequenceRandom {
    /// An empty script behaves like `FixedRandom::first()`.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        SequenceRandom { values: values.into_iter().map(clamp_unit).collect(), pos: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.pos % self.values.len()];
        self.pos += 1;
        value
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else if value >= 1.0 {
        FixedRandom::LARGEST_BELOW_ONE
    } else {
        value
    }
}
