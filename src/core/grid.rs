//! Fixed 10×10 grid of cell states with compact and box-drawing renderings.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::config::{BOARD_SIZE, CELL_COUNT};
use super::coordinate::Coordinate;
use super::error::BoardError;

const SIDE: usize = BOARD_SIZE as usize;

/// Content of one cell, as seen by a particular viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    Water = 0,
    Ship = 1,
    HitShip = 2,
    SunkenShip = 3,
    /// Not yet observed. Only appears in a shooter's view.
    Unknown = 4,
}

impl CellState {
    /// Character used by the compact 100-character form.
    pub fn code(self) -> char {
        match self {
            CellState::Water => 'W',
            CellState::Ship => 'S',
            CellState::HitShip => 'H',
            CellState::SunkenShip => 'X',
            CellState::Unknown => ' ',
        }
    }

    pub fn from_code(code: char) -> Result<Self, BoardError> {
        match code {
            'W' => Ok(CellState::Water),
            'S' => Ok(CellState::Ship),
            'H' => Ok(CellState::HitShip),
            'X' => Ok(CellState::SunkenShip),
            ' ' => Ok(CellState::Unknown),
            other => Err(BoardError::InvalidCellCode(other)),
        }
    }

    /// Wire byte, `0..=4` in declaration order.
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(byte: u8) -> Result<Self, BoardError> {
        match byte {
            0 => Ok(CellState::Water),
            1 => Ok(CellState::Ship),
            2 => Ok(CellState::HitShip),
            3 => Ok(CellState::SunkenShip),
            4 => Ok(CellState::Unknown),
            other => Err(BoardError::InvalidCellByte(other)),
        }
    }

    /// Ship, hit or sunk: anything that is part of a ship.
    pub fn is_ship(self) -> bool {
        matches!(
            self,
            CellState::Ship | CellState::HitShip | CellState::SunkenShip
        )
    }

    /// Hit or sunk: a ship cell that has been shot.
    pub fn is_hit(self) -> bool {
        matches!(self, CellState::HitShip | CellState::SunkenShip)
    }

    fn glyph(self) -> &'static str {
        match self {
            CellState::Water => "~~",
            CellState::Ship => "██",
            CellState::HitShip => "xx",
            CellState::SunkenShip => "XX",
            CellState::Unknown => "  ",
        }
    }
}

/// 100 cells addressed by [`Coordinate`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: [CellState; CELL_COUNT],
}

impl Grid {
    pub fn new(fill: CellState) -> Self {
        Self {
            cells: [fill; CELL_COUNT],
        }
    }

    /// All water: an empty ship layout.
    pub fn water() -> Self {
        Self::new(CellState::Water)
    }

    /// All unknown: a fresh shooter view.
    pub fn unknown() -> Self {
        Self::new(CellState::Unknown)
    }

    pub fn clear(&mut self, fill: CellState) {
        self.cells = [fill; CELL_COUNT];
    }

    pub fn get(&self, at: Coordinate) -> CellState {
        self.cells[at.index()]
    }

    pub fn set(&mut self, at: Coordinate, state: CellState) {
        self.cells[at.index()] = state;
    }

    /// Cells with their coordinates, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, CellState)> + '_ {
        Coordinate::all().zip(self.cells.iter().copied())
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    /// Number of hit or sunk cells.
    pub fn hit_count(&self) -> usize {
        self.cells.iter().filter(|s| s.is_hit()).count()
    }

    pub fn contains_unknown(&self) -> bool {
        self.cells.contains(&CellState::Unknown)
    }

    /// `true` once every ship cell of `fleet` shows as hit or sunk.
    pub fn has_lost(&self, fleet: &[usize]) -> Result<bool, BoardError> {
        if fleet.is_empty() {
            return Err(BoardError::EmptyFleet);
        }
        Ok(self.hit_count() == fleet.iter().sum::<usize>())
    }

    /// Compact form: one character per cell, row-major.
    pub fn to_compact(&self) -> String {
        self.cells.iter().map(|s| s.code()).collect()
    }

    pub fn from_compact(text: &str) -> Result<Self, BoardError> {
        let count = text.chars().count();
        if count != CELL_COUNT {
            return Err(BoardError::InvalidGridLength(count));
        }
        let mut grid = Grid::water();
        for (cell, code) in grid.cells.iter_mut().zip(text.chars()) {
            *cell = CellState::from_code(code)?;
        }
        Ok(grid)
    }

    /// Wire form: one byte per cell, row-major.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.cells.iter().map(|s| s.to_byte()).collect()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BoardError> {
        if bytes.len() != CELL_COUNT {
            return Err(BoardError::InvalidGridLength(bytes.len()));
        }
        let mut grid = Grid::water();
        for (cell, &byte) in grid.cells.iter_mut().zip(bytes) {
            *cell = CellState::from_byte(byte)?;
        }
        Ok(grid)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::water()
    }
}

impl Index<Coordinate> for Grid {
    type Output = CellState;

    fn index(&self, at: Coordinate) -> &CellState {
        &self.cells[at.index()]
    }
}

impl IndexMut<Coordinate> for Grid {
    fn index_mut(&mut self, at: Coordinate) -> &mut CellState {
        &mut self.cells[at.index()]
    }
}

impl FromStr for Grid {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grid::from_compact(s)
    }
}

fn separator(f: &mut fmt::Formatter<'_>, [left, line, cross, right]: [char; 4]) -> fmt::Result {
    write!(f, "{left}")?;
    for col in 0..SIDE {
        write!(f, "{line}{line}")?;
        if col < SIDE - 1 {
            write!(f, "{cross}")?;
        }
    }
    writeln!(f, "{right}")
}

/// Box-drawing rendering for terminals, two characters per cell.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        separator(f, ['┏', '━', '┯', '┓'])?;
        for row in 0..SIDE {
            write!(f, "┃")?;
            for col in 0..SIDE {
                write!(f, "{}", self.cells[row * SIDE + col].glyph())?;
                if col < SIDE - 1 {
                    write!(f, "│")?;
                }
            }
            writeln!(f, "┃")?;
            if row < SIDE - 1 {
                separator(f, ['┠', '─', '┼', '┨'])?;
            }
        }
        separator(f, ['┗', '━', '┷', '┛'])
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid({:?})", self.to_compact())
    }
}
