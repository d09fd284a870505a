//! RNG oracle for combat rolls.
//!
//! Every probabilistic decision in the rules (hit, crit, trigger chance, loot,
//! opponent skill choice) goes through [`RngOracle`], so tests can replace the
//! random source with a seeded or scripted one and get exact outcomes.

use std::collections::VecDeque;

/// Source of random draws used by the combat rules.
pub trait RngOracle: Send {
    /// Generate a uniformly distributed u32.
    fn next_u32(&mut self) -> u32;

    /// Uniform draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }

    /// Returns true with the given probability.
    ///
    /// Probabilities at or below zero never succeed; at or above one always
    /// succeed without consuming a draw.
    fn chance(&mut self, probability: f64) -> bool {
        if probability.is_nan() || probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        self.next_f64() < probability
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = u64::from(max - min) + 1;
        let offset = (self.next_f64() * span as f64) as u64;
        min + offset.min(span - 1) as u32
    }
}

impl<R: RngOracle + ?Sized> RngOracle for Box<R> {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// Seeded and fully deterministic: the same seed replays the same battle.
/// Uses the PCG-XSH-RR variant (32-bit output from 64-bit state).
#[derive(Clone, Copy, Debug)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn seeded(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.state = Self::pcg_step(rng.state.wrapping_add(seed));
        rng
    }

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}

/// Replays a fixed list of `[0, 1)` draws, then repeats `fallback` forever.
///
/// Intended for tests that need to force a particular hit/crit/trigger path.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    draws: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRng {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback: 0.5,
        }
    }

    /// Every draw returns `value`.
    pub fn constant(value: f64) -> Self {
        Self {
            draws: VecDeque::new(),
            fallback: value,
        }
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    /// Number of scripted draws not yet consumed.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RngOracle for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_f64() * (f64::from(u32::MAX) + 1.0)) as u32
    }

    fn next_f64(&mut self) -> f64 {
        self.draws
            .pop_front()
            .unwrap_or(self.fallback)
            .clamp(0.0, 0.999_999_999)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic_per_seed() {
        let mut a = PcgRng::seeded(42);
        let mut b = PcgRng::seeded(42);
        let mut c = PcgRng::seeded(43);
        let seq_a: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let seq_b: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        let seq_c: Vec<u32> = (0..8).map(|_| c.next_u32()).collect();
        assert_eq!(seq_a, seq_b);
        assert_ne!(seq_a, seq_c);
    }

    #[test]
    fn range_stays_inclusive() {
        let mut rng = PcgRng::seeded(7);
        for _ in 0..500 {
            let v = rng.range(3, 6);
            assert!((3..=6).contains(&v));
        }
        assert_eq!(rng.range(9, 9), 9);
        assert_eq!(rng.range(9, 2), 9);
    }

    #[test]
    fn scripted_draws_drive_chance_and_range() {
        let mut rng = ScriptedRng::new([0.1, 0.9, 0.0, 0.999]);
        assert!(rng.chance(0.5));
        assert!(!rng.chance(0.5));
        assert_eq!(rng.range(10, 20), 10);
        assert_eq!(rng.range(10, 20), 20);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn certain_and_impossible_chances_skip_the_draw() {
        let mut rng = ScriptedRng::new([0.0]);
        assert!(rng.chance(1.0));
        assert!(!rng.chance(0.0));
        assert_eq!(rng.remaining(), 1);
    }
}
