//! Random number sources
//!
//! All gameplay randomness (damage rolls, heal amounts, CPU coin flips) goes
//! through [`RandomSource`]. The live game uses [`GameRng`]; tests and replays
//! can feed a [`ScriptedRng`] with exact values.

use std::collections::VecDeque;

use bevy::prelude::*;
use rand::prelude::*;
use rand::rngs::StdRng;

pub trait RandomSource {
    /// Uniform float in `[0.0, 1.0)`.
    fn next_f32(&mut self) -> f32;

    /// Uniform integer in `[min, max]` (both inclusive).
    fn roll(&mut self, min: i32, max: i32) -> i32;

    /// Weighted coin: true with probability `p`.
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Uniform index into a collection of `len` items. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        ((self.next_f32() * len as f32) as usize).min(len.saturating_sub(1))
    }
}

/// Seeded random number generator for match simulation.
///
/// When a seed is provided (CLI `--seed` or headless config), the same seed
/// and inputs always produce the same bout. Without a seed, uses system entropy.
#[derive(Resource)]
pub struct GameRng {
    rng: StdRng,
    /// The seed used to initialize this RNG (if deterministic)
    pub seed: Option<u64>,
}

impl GameRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for GameRng {
    fn next_f32(&mut self) -> f32 {
        self.rng.gen()
    }

    fn roll(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

/// Replays pre-recorded values.
///
/// Integer rolls and float draws come from separate queues. Rolls are clamped
/// into the requested range; an exhausted queue yields the range minimum for
/// rolls and `0.0` for floats (so every `chance(p > 0)` succeeds).
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    rolls: VecDeque<i32>,
    floats: VecDeque<f32>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rolls(rolls: impl IntoIterator<Item = i32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            floats: VecDeque::new(),
        }
    }

    pub fn push_float(&mut self, value: f32) -> &mut Self {
        self.floats.push_back(value);
        self
    }

    /// Values not yet consumed, as (rolls, floats).
    pub fn remaining(&self) -> (usize, usize) {
        (self.rolls.len(), self.floats.len())
    }
}

impl RandomSource for ScriptedRng {
    fn next_f32(&mut self) -> f32 {
        self.floats.pop_front().unwrap_or(0.0)
    }

    fn roll(&mut self, min: i32, max: i32) -> i32 {
        self.rolls
            .pop_front()
            .map_or(min, |value| value.clamp(min, max.max(min)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let mut rng1 = GameRng::from_seed(42);
        let mut rng2 = GameRng::from_seed(42);

        for _ in 0..100 {
            assert_eq!(rng1.roll(10, 20), rng2.roll(10, 20));
            assert_eq!(rng1.next_f32(), rng2.next_f32());
        }
    }

    #[test]
    fn test_roll_is_inclusive_and_in_range() {
        let mut rng = GameRng::from_seed(7);
        let mut saw_min = false;
        let mut saw_max = false;
        for _ in 0..2000 {
            let value = rng.roll(10, 20);
            assert!((10..=20).contains(&value), "roll {} out of range", value);
            saw_min |= value == 10;
            saw_max |= value == 20;
        }
        assert!(saw_min && saw_max, "both ends of the range should come up");
    }

    #[test]
    fn test_pick_index_stays_in_bounds() {
        let mut rng = GameRng::from_seed(3);
        for _ in 0..500 {
            assert!(rng.pick_index(3) < 3);
        }
    }

    #[test]
    fn test_entropy_rng_has_no_seed() {
        assert!(GameRng::from_entropy().seed.is_none());
        assert_eq!(GameRng::from_optional_seed(Some(9)).seed, Some(9));
    }

    #[test]
    fn test_scripted_rng_replays_and_clamps() {
        let mut rng = ScriptedRng::with_rolls([15, 99]);
        rng.push_float(0.9).push_float(0.1);

        assert_eq!(rng.roll(10, 20), 15);
        assert_eq!(rng.roll(10, 20), 20);
        assert_eq!(rng.roll(10, 20), 10, "exhausted rolls fall back to min");

        assert!(!rng.chance(0.5));
        assert!(rng.chance(0.5));
        assert!(rng.chance(0.01), "exhausted floats read as 0.0");
    }

    #[test]
    fn test_scripted_pick_index_maps_float_to_slot() {
        let mut rng = ScriptedRng::new();
        rng.push_float(0.0).push_float(0.5).push_float(0.99);
        assert_eq!(rng.pick_index(3), 0);
        assert_eq!(rng.pick_index(3), 1);
        assert_eq!(rng.pick_index(3), 2);
    }
}
