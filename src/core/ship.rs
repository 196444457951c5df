//! Ship classes and ship extents on the board.

use std::fmt;

use super::coordinate::{Axis, Coordinate};
use super::error::BoardError;

/// Class of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipClass {
    name: &'static str,
    length: usize,
}

impl ShipClass {
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// A straight run of cells from `from` to `to` (inclusive), one cell wide.
///
/// The endpoints are normalised so that `from` is the top-left end and
/// iteration always walks towards `to`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShipRange {
    from: Coordinate,
    to: Coordinate,
}

impl ShipRange {
    /// Build a range between two cells that share a row or a column.
    pub fn new(a: Coordinate, b: Coordinate) -> Result<Self, BoardError> {
        if a.column() == b.column() || a.row() == b.row() {
            let (from, to) = if a <= b { (a, b) } else { (b, a) };
            Ok(Self { from, to })
        } else {
            Err(BoardError::NotStraight { from: a, to: b })
        }
    }

    /// A run of a single cell.
    pub fn single(at: Coordinate) -> Self {
        Self { from: at, to: at }
    }

    pub fn from(&self) -> Coordinate {
        self.from
    }

    pub fn to(&self) -> Coordinate {
        self.to
    }

    /// Axis along which the range extends. Single cells report horizontal.
    pub fn axis(&self) -> Axis {
        if self.from.row() == self.to.row() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    pub fn len(&self) -> usize {
        match self.axis() {
            Axis::Horizontal => self.to.column() - self.from.column() + 1,
            Axis::Vertical => self.to.row() - self.from.row() + 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, at: Coordinate) -> bool {
        self.iter().any(|c| c == at)
    }

    pub fn iter(&self) -> ShipRangeIter {
        ShipRangeIter {
            next: Some(self.from),
            to: self.to,
            axis: self.axis(),
        }
    }
}

impl IntoIterator for ShipRange {
    type Item = Coordinate;
    type IntoIter = ShipRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the cells of a [`ShipRange`].
pub struct ShipRangeIter {
    next: Option<Coordinate>,
    to: Coordinate,
    axis: Axis,
}

impl Iterator for ShipRangeIter {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        let current = self.next?;
        self.next = if current == self.to {
            None
        } else {
            current.try_next(self.axis)
        };
        Some(current)
    }
}

impl fmt::Debug for ShipRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl fmt::Display for ShipRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}
