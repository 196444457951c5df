//! Find the extent of a ship from one of its cells.

use super::coordinate::{Axis, Coordinate};
use super::grid::{CellState, Grid};
use super::ship::ShipRange;

/// Outcome of [`find_ship`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipSearch {
    /// The cell holds no intact or hit ship.
    NoShip,
    /// Both ends of the run are bounded by water or the board edge.
    Complete(ShipRange),
    /// At least one end touches an unknown cell, so the ship may be longer.
    Partial(ShipRange),
}

impl ShipSearch {
    pub fn range(&self) -> Option<ShipRange> {
        match self {
            ShipSearch::NoShip => None,
            ShipSearch::Complete(range) | ShipSearch::Partial(range) => Some(*range),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, ShipSearch::Complete(_))
    }
}

/// Walk from `start` in one direction until the run ends. Returns the last
/// ship cell and whether the run ended on something other than `Unknown`.
fn run_end(grid: &Grid, start: Coordinate, axis: Axis, forward: bool) -> (Coordinate, bool) {
    let mut current = start;
    loop {
        let step = if forward {
            current.try_next(axis)
        } else {
            current.try_previous(axis)
        };
        match step.map(|next| (next, grid[next])) {
            None | Some((_, CellState::Water)) => return (current, true),
            Some((_, CellState::Unknown)) => return (current, false),
            Some((next, _)) => current = next,
        }
    }
}

fn run(grid: &Grid, at: Coordinate, axis: Axis) -> (Coordinate, Coordinate, bool) {
    let (from, from_known) = run_end(grid, at, axis, false);
    let (to, to_known) = run_end(grid, at, axis, true);
    (from, to, from_known && to_known)
}

/// Determine the ship containing `at`.
///
/// The horizontal run through `at` is used when it is longer than one cell,
/// the vertical run otherwise, including its completeness. Sunken cells count
/// as part of the run.
pub fn find_ship(grid: &Grid, at: Coordinate) -> ShipSearch {
    if !matches!(grid[at], CellState::Ship | CellState::HitShip) {
        return ShipSearch::NoShip;
    }

    let (from, to, horizontal_known) = run(grid, at, Axis::Horizontal);
    let (range, complete) = if from != to {
        (ShipRange::new(from, to), horizontal_known)
    } else {
        // a lone cell is judged by its vertical run alone
        let (from, to, vertical_known) = run(grid, at, Axis::Vertical);
        (ShipRange::new(from, to), vertical_known)
    };

    match range {
        Ok(range) if complete => ShipSearch::Complete(range),
        Ok(range) => ShipSearch::Partial(range),
        // both ends come from walking a single axis through `at`
        Err(_) => ShipSearch::Partial(ShipRange::single(at)),
    }
}
