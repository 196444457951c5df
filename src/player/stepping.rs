use async_trait::async_trait;

use super::{Fire, ShotContext, Shooter};
use crate::core::Coordinate;

/// Fires at the cell after its previous shot in row-major order, starting at
/// A1. Carries nothing between turns; the previous shot arrives in the
/// [`ShotContext`].
pub struct SteppingShooter;

#[async_trait]
impl Shooter for SteppingShooter {
    async fn shoot(&mut self, ctx: &ShotContext, fire: Fire<'_>) -> anyhow::Result<()> {
        let target = ctx
            .last_shot
            .and_then(Coordinate::next)
            .unwrap_or(Coordinate::FIRST);
        fire.at(target).await?;
        Ok(())
    }
}
