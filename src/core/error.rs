//! Errors returned by the board and game engine.

use thiserror::Error;

use super::coordinate::Coordinate;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Board index outside `0..100`.
    #[error("board index {0} is out of range (0..100)")]
    IndexOutOfRange(usize),
    /// Column or row outside `0..10`.
    #[error("column {col} / row {row} is out of range (0..10)")]
    OutOfRange { col: usize, row: usize },
    /// Location label that is not `A`..`J` followed by `1`..`10`.
    #[error("invalid location {0:?}, expected <column><row> with column A..J and row 1..10")]
    InvalidLabel(String),
    /// Ship length outside `1..=10`.
    #[error("ship length {0} is out of range (1..=10)")]
    InvalidShipLength(usize),
    /// Range endpoints that share neither row nor column.
    #[error("{from} and {to} share neither a row nor a column")]
    NotStraight { from: Coordinate, to: Coordinate },
    /// Seat other than 1 or 2.
    #[error("shooter must be 1 or 2, got {0}")]
    InvalidSeat(u8),
    /// Fleet description without ships.
    #[error("fleet must contain at least one ship")]
    EmptyFleet,
    /// The filler could not find room for a ship.
    #[error("board too occupied to place a ship of length {length}")]
    BoardTooOccupied { length: usize },
    /// A truth grid containing unobserved cells.
    #[error("ship layout must not contain unknown cells")]
    UnknownInLayout,
    /// Serialised grid with the wrong number of cells.
    #[error("grid must have exactly 100 cells, got {0}")]
    InvalidGridLength(usize),
    /// Serialised grid containing a character outside `W S H X ' '`.
    #[error("invalid cell code {0:?}")]
    InvalidCellCode(char),
    /// Serialised grid containing a byte outside `0..=4`.
    #[error("invalid cell byte {0}")]
    InvalidCellByte(u8),
}
