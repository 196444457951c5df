use async_trait::async_trait;

use super::{Fire, ShotContext, Shooter};
use crate::core::Coordinate;

/// Fires at the first unknown cell, row by row.
pub struct SequentialShooter;

#[async_trait]
impl Shooter for SequentialShooter {
    async fn shoot(&mut self, ctx: &ShotContext, fire: Fire<'_>) -> anyhow::Result<()> {
        let target = ctx.unknown_cells().next().unwrap_or(Coordinate::FIRST);
        fire.at(target).await?;
        Ok(())
    }
}
