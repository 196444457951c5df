//! Canonical board index with label conversion and directional stepping.
//!
//! Cells are numbered `0..100` in row-major order: `index == row * 10 + col`.
//! Columns are labelled `A`..`J` and rows `1`..`10`, so index 0 is `A1` and
//! index 99 is `J10`.

use std::fmt;
use std::str::FromStr;

use super::config::{BOARD_SIZE, CELL_COUNT};
use super::error::BoardError;

const SIDE: usize = BOARD_SIZE as usize;

/// Direction along which ships extend and coordinates step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The other axis.
    pub fn cross(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// A single cell on the board.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate(u8);

impl Coordinate {
    /// First cell, `A1`.
    pub const FIRST: Coordinate = Coordinate(0);
    /// Last cell, `J10`.
    pub const LAST: Coordinate = Coordinate(CELL_COUNT as u8 - 1);

    pub fn new(index: usize) -> Result<Self, BoardError> {
        if index < CELL_COUNT {
            Ok(Coordinate(index as u8))
        } else {
            Err(BoardError::IndexOutOfRange(index))
        }
    }

    /// Zero-based column and row.
    pub fn from_col_row(col: usize, row: usize) -> Result<Self, BoardError> {
        if col < SIDE && row < SIDE {
            Ok(Coordinate((row * SIDE + col) as u8))
        } else {
            Err(BoardError::OutOfRange { col, row })
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn column(self) -> usize {
        self.0 as usize % SIDE
    }

    pub const fn row(self) -> usize {
        self.0 as usize / SIDE
    }

    /// Step right (horizontal) or down (vertical). `None` on the last column or row.
    pub fn try_next(self, axis: Axis) -> Option<Self> {
        match axis {
            Axis::Horizontal if self.column() < SIDE - 1 => Some(Coordinate(self.0 + 1)),
            Axis::Vertical if self.row() < SIDE - 1 => Some(Coordinate(self.0 + SIDE as u8)),
            _ => None,
        }
    }

    /// Step left (horizontal) or up (vertical). `None` on the first column or row.
    pub fn try_previous(self, axis: Axis) -> Option<Self> {
        match axis {
            Axis::Horizontal if self.column() > 0 => Some(Coordinate(self.0 - 1)),
            Axis::Vertical if self.row() > 0 => Some(Coordinate(self.0 - SIDE as u8)),
            _ => None,
        }
    }

    /// Row-major successor, wrapping to the start of the next row.
    pub fn next(self) -> Option<Self> {
        Coordinate::new(self.index() + 1).ok()
    }

    /// Cells touching this one in all eight directions.
    pub fn neighbours(self) -> impl Iterator<Item = Coordinate> {
        let (col, row) = (self.column() as isize, self.row() as isize);
        (-1isize..=1)
            .flat_map(move |dr| (-1isize..=1).map(move |dc| (col + dc, row + dr)))
            .filter(move |&(c, r)| (c, r) != (col, row))
            .filter_map(|(c, r)| {
                if c < 0 || r < 0 {
                    None
                } else {
                    Coordinate::from_col_row(c as usize, r as usize).ok()
                }
            })
    }

    /// Every cell in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..CELL_COUNT as u8).map(Coordinate)
    }

    /// Location label such as `A1` or `J10`.
    pub fn label(self) -> String {
        self.to_string()
    }
}

impl TryFrom<usize> for Coordinate {
    type Error = BoardError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Coordinate::new(index)
    }
}

impl From<Coordinate> for usize {
    fn from(c: Coordinate) -> usize {
        c.index()
    }
}

impl FromStr for Coordinate {
    type Err = BoardError;

    fn from_str(location: &str) -> Result<Self, Self::Err> {
        let invalid = || BoardError::InvalidLabel(location.to_string());
        let bytes = location.as_bytes();
        if !(2..=3).contains(&bytes.len()) || !bytes[1..].iter().all(u8::is_ascii_digit) {
            return Err(invalid());
        }
        let col = match bytes[0] {
            c @ b'A'..=b'J' => (c - b'A') as usize,
            _ => return Err(invalid()),
        };
        let row: usize = location[1..].parse().map_err(|_| invalid())?;
        if !(1..=SIDE).contains(&row) {
            return Err(invalid());
        }
        Coordinate::from_col_row(col, row - 1)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.column() as u8) as char, self.row() + 1)
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({} = {})", self.0, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_labels() {
        assert_eq!(Coordinate::FIRST.label(), "A1");
        assert_eq!(Coordinate::LAST.label(), "J10");
        assert_eq!("J10".parse::<Coordinate>().unwrap(), Coordinate::LAST);
    }

    #[test]
    fn neighbours_are_clipped_at_corners() {
        assert_eq!(Coordinate::FIRST.neighbours().count(), 3);
        assert_eq!(Coordinate::from_col_row(4, 4).unwrap().neighbours().count(), 8);
        assert_eq!(Coordinate::from_col_row(0, 4).unwrap().neighbours().count(), 5);
    }
}
