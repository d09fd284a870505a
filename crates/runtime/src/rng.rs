//! Default random source for live battles.

use combat_core::RngOracle;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// [`RngOracle`] backed by `rand`'s standard generator.
pub struct SystemRng {
    inner: StdRng,
}

impl SystemRng {
    /// Seeded generator when `seed` is set, entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        let inner = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { inner }
    }
}

impl RngOracle for SystemRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.r#gen()
    }

    fn next_f64(&mut self) -> f64 {
        self.inner.r#gen::<f64>()
    }
}
