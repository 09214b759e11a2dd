use rand::prelude::*;

use crate::{Coord2, GameConfig};

/// Strategy for choosing which cells hide mines. Consumed on use: one
/// placement per board instance.
pub trait MinePlacer {
    fn place(self, config: &GameConfig) -> Vec<Coord2>;
}

/// Uniform random placement without replacement, seeded for reproducibility.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomPlacer {
    seed: u64,
}

impl RandomPlacer {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn from_entropy() -> Self {
        Self {
            seed: rand::random(),
        }
    }
}

impl MinePlacer for RandomPlacer {
    fn place(self, config: &GameConfig) -> Vec<Coord2> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut taken = vec![false; config.total_cells() as usize];
        let mut coords = Vec::with_capacity(config.mines as usize);

        // Rejection sampling on duplicates; terminates because the config
        // guarantees mines < total_cells.
        while coords.len() < config.mines as usize {
            let row = rng.random_range(0..config.height);
            let col = rng.random_range(0..config.width);
            let slot = row as usize * config.width as usize + col as usize;
            if !taken[slot] {
                taken[slot] = true;
                coords.push((row, col));
            }
        }

        log::debug!("placed {} mines with seed {}", coords.len(), self.seed);
        coords
    }
}

/// Fixed placement, for tests and deterministic replays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedPlacer(pub Vec<Coord2>);

impl MinePlacer for FixedPlacer {
    fn place(self, _config: &GameConfig) -> Vec<Coord2> {
        self.0
    }
}
