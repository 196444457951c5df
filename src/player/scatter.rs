use async_trait::async_trait;

use super::{Fire, ShotContext, Shooter};
use crate::core::{Axis, CellState, Coordinate, Grid};

/// Sweeps the board on a checkerboard pattern and, once something is hit,
/// follows the wounded ship until it sinks.
pub struct ScatterShooter;

/// Unknown cells directly beside `at` along `axis`.
fn unknown_along(grid: &Grid, at: Coordinate, axis: Axis) -> impl Iterator<Item = Coordinate> + '_ {
    [at.try_previous(axis), at.try_next(axis)]
        .into_iter()
        .flatten()
        .filter(move |&c| grid[c] == CellState::Unknown)
}

/// Extend a run of hits through `at` until it reaches an unknown cell.
fn extend_run(grid: &Grid, at: Coordinate, axis: Axis) -> Option<Coordinate> {
    for forward in [true, false] {
        let mut current = at;
        loop {
            let step = if forward {
                current.try_next(axis)
            } else {
                current.try_previous(axis)
            };
            match step {
                Some(next) if grid[next] == CellState::HitShip => current = next,
                Some(next) if grid[next] == CellState::Unknown => return Some(next),
                _ => break,
            }
        }
    }
    None
}

/// Next cell to probe around an unsunk hit at `at`.
fn follow_up(grid: &Grid, at: Coordinate) -> Option<Coordinate> {
    let along = [Axis::Horizontal, Axis::Vertical].into_iter().find(|&axis| {
        [at.try_previous(axis), at.try_next(axis)]
            .into_iter()
            .flatten()
            .any(|c| grid[c] == CellState::HitShip)
    });
    match along {
        // the orientation is known, keep going along it
        Some(axis) => extend_run(grid, at, axis),
        None => unknown_along(grid, at, Axis::Horizontal)
            .chain(unknown_along(grid, at, Axis::Vertical))
            .next(),
    }
}

fn pick(ctx: &ShotContext) -> Option<Coordinate> {
    let grid = &ctx.board;
    let last_hit = ctx
        .last_shot
        .filter(|&at| grid[at] == CellState::HitShip);
    let hunted = last_hit
        .into_iter()
        .chain(grid.iter().filter(|&(_, s)| s == CellState::HitShip).map(|(at, _)| at))
        .find_map(|at| follow_up(grid, at));
    hunted
        .or_else(|| {
            ctx.unknown_cells()
                .find(|at| (at.column() + at.row()) % 2 == 0)
        })
        .or_else(|| ctx.unknown_cells().next())
}

#[async_trait]
impl Shooter for ScatterShooter {
    async fn shoot(&mut self, ctx: &ShotContext, fire: Fire<'_>) -> anyhow::Result<()> {
        let target = pick(ctx).unwrap_or(Coordinate::FIRST);
        fire.at(target).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn context(board: Grid, last_shot: Option<Coordinate>) -> ShotContext {
        ShotContext {
            game_id: Uuid::nil(),
            opponent: "sequential".to_string(),
            board,
            last_shot,
        }
    }

    #[test]
    fn follows_a_horizontal_run() {
        let mut board = Grid::unknown();
        let c3: Coordinate = "C3".parse().unwrap();
        let d3: Coordinate = "D3".parse().unwrap();
        board[c3] = CellState::HitShip;
        board[d3] = CellState::HitShip;
        board["B3".parse::<Coordinate>().unwrap()] = CellState::Water;

        assert_eq!(pick(&context(board, Some(d3))), Some("E3".parse().unwrap()));
    }

    #[test]
    fn sweeps_checkerboard_without_hits() {
        let mut board = Grid::unknown();
        board[Coordinate::FIRST] = CellState::Water;
        assert_eq!(pick(&context(board, None)), Some("C1".parse().unwrap()));
    }
}
