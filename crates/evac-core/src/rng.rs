//! Random sources
//!
//! Every random draw in the engine goes through [`RandomSource`] so runs can
//! be seeded or scripted.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A source of uniformly distributed values.
pub trait RandomSource {
    /// Uniform integer in `[low, high]`, both ends inclusive.
    /// Returns `low` when the range is empty.
    fn int_in_range(&mut self, low: i64, high: i64) -> i64;

    /// Uniform real in `[low, high)`. Returns `low` when the range is empty.
    fn real_in_range(&mut self, low: f64, high: f64) -> f64;

    /// Uniform index into a sequence of `len` elements. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        let last = len.saturating_sub(1) as i64;
        self.int_in_range(0, last).clamp(0, last) as usize
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn int_in_range(&mut self, low: i64, high: i64) -> i64 {
        (**self).int_in_range(low, high)
    }

    fn real_in_range(&mut self, low: f64, high: f64) -> f64 {
        (**self).real_in_range(low, high)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }
}

/// Seeded random number generator
#[derive(Debug, Clone)]
pub struct SimRng(pub SmallRng);

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl RandomSource for SimRng {
    fn int_in_range(&mut self, low: i64, high: i64) -> i64 {
        if low >= high {
            return low;
        }
        self.0.gen_range(low..=high)
    }

    fn real_in_range(&mut self, low: f64, high: f64) -> f64 {
        if !(low < high) {
            return low;
        }
        self.0.gen_range(low..high)
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Each draw takes the next value and clamps it into the requested range,
/// rounding for integer draws. Useful for pinning down exact outcomes.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRng {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of draws made so far
    pub fn draws(&self) -> usize {
        self.cursor
    }

    fn next_value(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

impl RandomSource for SequenceRng {
    fn int_in_range(&mut self, low: i64, high: i64) -> i64 {
        let value = self.next_value().round() as i64;
        if low >= high {
            return low;
        }
        value.clamp(low, high)
    }

    fn real_in_range(&mut self, low: f64, high: f64) -> f64 {
        let value = self.next_value();
        if !(low < high) {
            return low;
        }
        value.clamp(low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sim_rng_determinism() {
        let mut a = SimRng::seeded(42);
        let mut b = SimRng::seeded(42);
        let draws_a: Vec<i64> = (0..50).map(|_| a.int_in_range(-50, 50)).collect();
        let draws_b: Vec<i64> = (0..50).map(|_| b.int_in_range(-50, 50)).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn test_sim_rng_respects_bounds() {
        let mut rng = SimRng::seeded(7);
        for _ in 0..1000 {
            let i = rng.int_in_range(-3, 3);
            assert!((-3..=3).contains(&i));
            let r = rng.real_in_range(0.8, 1.2);
            assert!((0.8..1.2).contains(&r));
            assert!(rng.pick_index(5) < 5);
        }
    }

    #[test]
    fn test_empty_ranges_return_low() {
        let mut rng = SimRng::seeded(1);
        assert_eq!(rng.int_in_range(4, 4), 4);
        assert_eq!(rng.int_in_range(9, 2), 9);
        assert_eq!(rng.real_in_range(1.0, 1.0), 1.0);
        assert_eq!(rng.pick_index(1), 0);
    }

    #[test]
    fn test_sequence_rng_replays_and_clamps() {
        let mut rng = SequenceRng::new(vec![10.0, -80.0, 0.6]);
        assert_eq!(rng.int_in_range(0, 100), 10);
        assert_eq!(rng.int_in_range(-50, 50), -50);
        assert_eq!(rng.real_in_range(0.8, 1.2), 0.8);
        // cycles
        assert_eq!(rng.int_in_range(0, 100), 10);
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn test_forwarding_through_mut_ref() {
        fn draw<R: RandomSource>(mut rng: R) -> i64 {
            rng.int_in_range(0, 10)
        }
        let mut rng = SequenceRng::new(vec![3.0]);
        assert_eq!(draw(&mut rng), 3);
        assert_eq!(rng.draws(), 1);
    }
}
