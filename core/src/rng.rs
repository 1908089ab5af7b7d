//! Seeded random source shared by generation and tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::Direction;

/// Number of uniform draws summed by the Irwin-Hall approximation.
const IRWIN_HALL_DRAWS: u32 = 12;

/// Errors raised when a choice is requested over an unusable collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ChoiceError {
    /// No items were provided.
    #[error("cannot choose from an empty list")]
    EmptyList,
    /// Every provided weight was zero.
    #[error("total weight of the choices must be positive")]
    ZeroTotalWeight,
}

/// Deterministic random source backed by ChaCha8.
///
/// Every randomized step in the dungeon receives this explicitly, so a seed
/// fully determines a generated level.
#[derive(Clone, Debug)]
pub struct DungeonRng {
    rng: ChaCha8Rng,
}

impl DungeonRng {
    /// Creates a random source from the provided seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Returns an integer in `[0, n)`, or 0 when `n` is 0.
    pub fn uniform(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Returns an integer in `[low, high]`, or `low` when the range is empty.
    pub fn range_inclusive(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    /// Returns `true` with probability `percent / 100`.
    pub fn percent_chance(&mut self, percent: u32) -> bool {
        self.uniform(100) < percent
    }

    /// Approximates a normal variate with the Irwin-Hall sum of twelve uniforms.
    ///
    /// The sum of twelve `[0, 1)` draws minus six has mean 0 and variance 1. It
    /// is scaled by `std_dev`, offset by `mean`, rounded half-to-even and then
    /// clamped to `[low, high]`.
    pub fn gaussian(&mut self, mean: f64, std_dev: f64, low: i32, high: i32) -> i32 {
        let sum: f64 = (0..IRWIN_HALL_DRAWS).map(|_| self.rng.gen::<f64>()).sum();
        let value = mean + (sum - f64::from(IRWIN_HALL_DRAWS) / 2.0) * std_dev;
        let rounded = value.round_ties_even();
        let clamped = rounded.clamp(f64::from(low), f64::from(high.max(low)));
        clamped as i32
    }

    /// Picks an item with probability proportional to its weight.
    ///
    /// Draws `r` in `[0, total)` and returns the first item whose cumulative
    /// weight exceeds `r`.
    pub fn choose_weighted<'a, T>(&mut self, items: &'a [(T, u32)]) -> Result<&'a T, ChoiceError> {
        if items.is_empty() {
            return Err(ChoiceError::EmptyList);
        }
        let total = items
            .iter()
            .fold(0u32, |sum, (_, weight)| sum.saturating_add(*weight));
        if total == 0 {
            return Err(ChoiceError::ZeroTotalWeight);
        }

        let roll = self.uniform(total);
        let mut cumulative = 0u32;
        for (item, weight) in items {
            cumulative = cumulative.saturating_add(*weight);
            if roll < cumulative {
                return Ok(item);
            }
        }
        Err(ChoiceError::ZeroTotalWeight)
    }

    /// Picks an item uniformly.
    pub fn choose_random<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, ChoiceError> {
        let len = u32::try_from(items.len()).unwrap_or(u32::MAX);
        if len == 0 {
            return Err(ChoiceError::EmptyList);
        }
        let index = self.uniform(len) as usize;
        items.get(index).ok_or(ChoiceError::EmptyList)
    }

    /// Picks one of the four cardinal directions uniformly.
    pub fn random_direction(&mut self) -> Direction {
        Direction::ALL[self.uniform(4) as usize]
    }
}
