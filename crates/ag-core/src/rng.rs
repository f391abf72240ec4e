//! Session-level RNG.
//!
//! Ghost embodiments (which bicycle, which rider) are picked at random.  A
//! configured seed makes a session reproducible; without one the RNG is
//! seeded from OS entropy.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Session RNG for embodiment selection.
///
/// Used only from the session's single thread of control.
pub struct SessionRng(SmallRng);

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        SessionRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from `seed` if present, otherwise from OS entropy.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::new(s),
            None => SessionRng(SmallRng::from_entropy()),
        }
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
