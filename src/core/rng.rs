//! Deterministic random number generation for simulated players.
//!
//! Each simulated player draws from its own stream so that a run with the
//! same seed issues the same sequence of requests per player, whatever
//! order the scheduler ends up executing them in.
//!
//! ```
//! use memory_scramble::core::GameRng;
//!
//! let root = GameRng::new(42);
//! let mut a = root.for_context("player-0");
//! let mut b = root.for_context("player-0");
//! assert_eq!(a.gen_position(5, 5), b.gen_position(5, 5));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use super::Position;

/// Seeded ChaCha8 stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Independent stream keyed by a context label (e.g. a player id).
    ///
    /// The same context always yields the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Uniform position on a `rows x columns` grid.
    pub fn gen_position(&mut self, rows: usize, columns: usize) -> Position {
        Position::new(self.inner.gen_range(0..rows), self.inner.gen_range(0..columns))
    }

    /// Uniform pause in `0..=max`.
    pub fn gen_delay(&mut self, max: Duration) -> Duration {
        if max.is_zero() {
            return Duration::ZERO;
        }
        let max = u64::try_from(max.as_micros()).unwrap_or(u64::MAX);
        let micros = self.inner.gen_range(0..=max);
        Duration::from_micros(micros)
    }
}
