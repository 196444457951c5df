//! Random fleet placement.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::{BOARD_SIZE, MAX_PLACEMENT_ATTEMPTS};
use super::coordinate::{Axis, Coordinate};
use super::error::BoardError;
use super::placement::FillableBoard;

const SIDE: usize = BOARD_SIZE as usize;

/// Strategy that seeds a board with a fleet.
pub trait BoardFiller: Send {
    fn fill(&mut self, fleet: &[usize], board: &mut dyn FillableBoard) -> Result<(), BoardError>;
}

/// Places each ship at the first of up to 1000 random positions that the
/// placement rules accept.
pub struct RandomFiller<R: Rng = SmallRng> {
    rng: R,
}

impl RandomFiller<SmallRng> {
    /// Filler seeded from the thread-local generator.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    /// Filler producing the same boards for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomFiller<SmallRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomFiller<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    fn place_ship(&mut self, length: usize, board: &mut dyn FillableBoard) -> Result<(), BoardError> {
        if length == 0 || length > SIDE {
            return Err(BoardError::InvalidShipLength(length));
        }
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let axis = if self.rng.random() {
                Axis::Horizontal
            } else {
                Axis::Vertical
            };
            let (max_col, max_row) = match axis {
                Axis::Horizontal => (SIDE - length, SIDE - 1),
                Axis::Vertical => (SIDE - 1, SIDE - length),
            };
            let origin = Coordinate::from_col_row(
                self.rng.random_range(0..=max_col),
                self.rng.random_range(0..=max_row),
            )?;
            if board.try_place_ship(origin, length, axis)? {
                return Ok(());
            }
        }
        Err(BoardError::BoardTooOccupied { length })
    }
}

impl<R: Rng + Send> BoardFiller for RandomFiller<R> {
    fn fill(&mut self, fleet: &[usize], board: &mut dyn FillableBoard) -> Result<(), BoardError> {
        for &length in fleet {
            self.place_ship(length, board)?;
        }
        Ok(())
    }
}
