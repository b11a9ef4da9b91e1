use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::{StdRng, ThreadRng};
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng, SeedableRng};

use crate::engine::RandomSource;

/// `RandomSource` поверх любого генератора из `rand`.
/// Им тасуется колода у ведущего и им же выбирает ход `RandomPlayer`.
#[derive(Clone, Debug)]
pub struct RngSource<G> {
    rng: G,
}

impl<G: Rng> RngSource<G> {
    pub fn new(rng: G) -> Self {
        Self { rng }
    }
}

impl<G: Rng> RandomSource for RngSource<G> {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.rng);
    }

    fn pick_weighted(&mut self, weights: &[u32]) -> Option<usize> {
        // Пустой список или одни нули – выбирать не из чего.
        let index = WeightedIndex::new(weights).ok()?;
        Some(index.sample(&mut self.rng))
    }

    fn pick_between(&mut self, low: u64, high: u64) -> u64 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }
}

/// Системный RNG: для настоящих матчей.
pub type SystemRng = RngSource<ThreadRng>;

impl Default for SystemRng {
    fn default() -> Self {
        Self::new(thread_rng())
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Одинаковый seed – одинаковые колоды и одинаковые решения ботов.
pub type DeterministicRng = RngSource<StdRng>;

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}
