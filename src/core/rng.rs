//! Deterministic die for the reference turn-based engine.
//!
//! Same seed, same rolls: tests and replays can predict every move the
//! host makes on a player's behalf.
//!
//! ```
//! use board_plugin_example::core::DiceRng;
//!
//! let mut a = DiceRng::new(7);
//! let mut b = DiceRng::new(7);
//! assert_eq!(a.roll(6), b.roll(6));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded die roller.
///
/// Uses ChaCha8 for speed with a stable, platform-independent sequence.
#[derive(Clone, Debug)]
pub struct DiceRng {
    inner: ChaCha8Rng,
}

impl DiceRng {
    /// Create a roller with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Roll a die with `sides` faces, returning `1..=sides`.
    ///
    /// A zero-sided die always rolls 1.
    pub fn roll(&mut self, sides: u32) -> u32 {
        if sides <= 1 {
            return 1;
        }
        self.inner.gen_range(1..=sides)
    }
}
