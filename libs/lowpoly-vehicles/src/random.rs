//! # Random Sources
//!
//! Builders never read a process-global generator. Randomness is injected
//! through options as a [`SharedRandom`] handle so that a build is
//! reproducible from a seed or from a literal sequence of draws.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

impl<F: FnMut() -> f64> RandomSource for F {
    fn next_f64(&mut self) -> f64 {
        self()
    }
}

/// Adapts any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: RngCore> RandomSource for RngSource<R> {
    fn next_f64(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Cycles through a fixed list of draws.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    /// Sequence source; an empty list always yields 0.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

/// Cloneable handle to one random source.
///
/// Clones share the underlying generator, so draws made through any clone
/// advance the same stream. Two handles compare equal when they share the
/// generator.
#[derive(Clone)]
pub struct SharedRandom(Rc<RefCell<dyn RandomSource>>);

impl SharedRandom {
    /// Wraps an arbitrary source.
    pub fn new(source: impl RandomSource + 'static) -> Self {
        Self(Rc::new(RefCell::new(source)))
    }

    /// Deterministic ChaCha stream for `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(RngSource(ChaCha8Rng::seed_from_u64(seed)))
    }

    /// Generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(RngSource(StdRng::from_entropy()))
    }

    /// Always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(move || value)
    }

    /// Returns `values` in order, cycling at the end.
    pub fn sequence(values: impl Into<Vec<f64>>) -> Self {
        Self::new(SequenceSource::new(values.into()))
    }

    /// Next draw.
    pub fn next(&self) -> f64 {
        self.0.borrow_mut().next_f64()
    }
}

impl RandomSource for SharedRandom {
    fn next_f64(&mut self) -> f64 {
        SharedRandom::next(self)
    }
}

impl Default for SharedRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl PartialEq for SharedRandom {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SharedRandom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedRandom(..)")
    }
}
