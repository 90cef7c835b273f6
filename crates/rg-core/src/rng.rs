//! Random draws for the acceptance gate
//!
//! Uses a seeded ChaCha RNG for reproducibility. Any other source of
//! uniform `[0, 1)` draws can be plugged in through [`RandomSource`].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of uniform draws in `[0, 1)`
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`
    fn next_unit(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Seeded generator random number source
///
/// Wraps ChaCha8Rng so a seed fully determines the generated layouts.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Replays a fixed cycle of draws
///
/// Used to reproduce a layout exactly from a recorded draw sequence.
/// Values are clamped into `[0, 1)` when the sequence is built; NaN and
/// infinities become 0.0.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedRng {
    draws: Vec<f64>,
    pos: usize,
}

impl ScriptedRng {
    /// Cycle through `draws`; an empty script always yields 0.0
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        let draws = draws
            .into()
            .into_iter()
            .map(|d| {
                if d.is_finite() {
                    d.clamp(0.0, 1.0 - f64::EPSILON)
                } else {
                    0.0
                }
            })
            .collect();
        Self { draws, pos: 0 }
    }

    /// Same draw forever
    pub fn constant(draw: f64) -> Self {
        Self::new(vec![draw])
    }

    /// Number of draws consumed so far
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl RandomSource for ScriptedRng {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            self.pos += 1;
            return 0.0;
        }
        let draw = self.draws[self.pos % self.draws.len()];
        self.pos += 1;
        draw
    }
}
