//! Deterministic random number generation for duels.
//!
//! ## Key Features
//!
//! - **Deterministic**: same seed produces the identical opponent hand
//!   and auto-selections
//! - **Forkable**: independent branches for replaying a duel from a
//!   captured state
//! - **Serializable**: O(1) state capture and restore
//!
//! ## Usage
//!
//! ```
//! use cardmart::duel::DuelRng;
//!
//! let mut rng = DuelRng::new(42);
//! let mut replay = DuelRng::new(42);
//!
//! assert_eq!(rng.gen_range_usize(0..100), replay.gen_range_usize(0..100));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG driving opponent draws and auto-selection.
///
/// Uses ChaCha8 for speed while keeping a reproducible stream. A duel
/// seeded identically replays identically.
#[derive(Clone, Debug)]
pub struct DuelRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl DuelRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from the OS entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Draw `count` distinct indices from `0..len` without replacement.
    ///
    /// Returns `None` if `len < count`.
    pub fn draw_distinct(&mut self, len: usize, count: usize) -> Option<Vec<usize>> {
        if len < count {
            return None;
        }
        let mut pool: Vec<usize> = (0..len).collect();
        self.shuffle(&mut pool);
        pool.truncate(count);
        Some(pool)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> DuelRngState {
        DuelRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &DuelRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable RNG state for duel replay.
///
/// Uses the ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Fork counter for deterministic branching
    pub fork_counter: u64,
}
