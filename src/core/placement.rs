//! Ship placement rules.
//!
//! Ships may not overlap and may not touch, not even diagonally. Both rules
//! are checked in one pass by probing the ship's cells plus a one-cell halo.

use super::config::{BOARD_SIZE, MAX_SHIP_LENGTH};
use super::coordinate::{Axis, Coordinate};
use super::error::BoardError;
use super::grid::{CellState, Grid};

const SIDE: usize = BOARD_SIZE as usize;

/// A board the filler can place ships on.
pub trait FillableBoard {
    /// Place the ship if the placement rules allow it. Returns `false` and
    /// leaves the board untouched otherwise.
    fn try_place_ship(
        &mut self,
        origin: Coordinate,
        length: usize,
        axis: Axis,
    ) -> Result<bool, BoardError>;
}

/// Check whether a ship of `length` starting at `origin` fits on the board
/// and has only water in and around it, according to `is_water`.
pub fn can_place<F>(
    origin: Coordinate,
    length: usize,
    axis: Axis,
    is_water: F,
) -> Result<bool, BoardError>
where
    F: Fn(Coordinate) -> bool,
{
    if length == 0 || length > MAX_SHIP_LENGTH {
        return Err(BoardError::InvalidShipLength(length));
    }

    let (col, row) = (origin.column(), origin.row());
    let (cols, rows) = match axis {
        Axis::Horizontal => (length, 1),
        Axis::Vertical => (1, length),
    };
    if col + cols > SIDE || row + rows > SIDE {
        return Ok(false);
    }

    let first_col = col.saturating_sub(1);
    let first_row = row.saturating_sub(1);
    let last_col = (col + cols).min(SIDE - 1);
    let last_row = (row + rows).min(SIDE - 1);
    for r in first_row..=last_row {
        for c in first_col..=last_col {
            if !is_water(Coordinate::from_col_row(c, r)?) {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Write `Ship` into `length` consecutive cells along `axis`.
///
/// The caller is expected to have checked the placement with [`can_place`];
/// the run is cut short at the board edge.
pub fn place(grid: &mut Grid, origin: Coordinate, length: usize, axis: Axis) {
    let mut at = Some(origin);
    for _ in 0..length {
        let Some(current) = at else { break };
        grid[current] = CellState::Ship;
        at = current.try_next(axis);
    }
}

impl FillableBoard for Grid {
    fn try_place_ship(
        &mut self,
        origin: Coordinate,
        length: usize,
        axis: Axis,
    ) -> Result<bool, BoardError> {
        if !can_place(origin, length, axis, |c| self[c] == CellState::Water)? {
            return Ok(false);
        }
        place(self, origin, length, axis);
        Ok(true)
    }
}
