use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};

use super::{Fire, ShotContext, Shooter};
use crate::core::{Coordinate, CELL_COUNT};

/// Fires at a uniformly chosen unknown cell.
pub struct RandomShooter {
    rng: SmallRng,
}

impl RandomShooter {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomShooter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Shooter for RandomShooter {
    async fn shoot(&mut self, ctx: &ShotContext, fire: Fire<'_>) -> anyhow::Result<()> {
        let target = match ctx.unknown_cells().choose(&mut self.rng) {
            Some(at) => at,
            None => Coordinate::new(self.rng.random_range(0..CELL_COUNT))?,
        };
        fire.at(target).await?;
        Ok(())
    }
}
