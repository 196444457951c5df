//! Authoritative game state: two fleets, two shooter views and the shot log.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::config::{fleet_lengths, MAX_SHOTS};
use super::coordinate::Coordinate;
use super::error::BoardError;
use super::filler::BoardFiller;
use super::grid::{CellState, Grid};
use super::locator::{find_ship, ShipSearch};

/// Opaque identifier of one game.
pub type GameId = Uuid;

/// Result of [`Game::winner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    NoWinner,
    Draw,
    Player1,
    Player2,
}

/// Winner by `[seat 1 lost][seat 2 lost]`.
///
/// A seat "has lost" when its shooting view shows the whole opposing fleet as
/// hit; the table reports the other seat as the winner in that case.
const WINNER_TABLE: [[Winner; 2]; 2] = [
    [Winner::NoWinner, Winner::Player1],
    [Winner::Player2, Winner::Draw],
];

/// One resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEntry {
    /// Seat that fired, 1 or 2.
    pub seat: u8,
    /// Registry index of the player in that seat.
    pub player: usize,
    pub location: Coordinate,
    pub result: CellState,
}

#[derive(Debug, Clone)]
pub struct Game {
    id: GameId,
    players: [usize; 2],
    boards: [Grid; 2],
    shooting_boards: [Grid; 2],
    log: Vec<LogEntry>,
}

fn seat_index(seat: u8) -> Result<usize, BoardError> {
    match seat {
        1 | 2 => Ok(seat as usize - 1),
        other => Err(BoardError::InvalidSeat(other)),
    }
}

impl Game {
    /// Assemble a game from two fleet layouts. Shooting views start out unknown.
    pub fn new(id: GameId, players: [usize; 2], boards: [Grid; 2]) -> Result<Self, BoardError> {
        if boards.iter().any(Grid::contains_unknown) {
            return Err(BoardError::UnknownInLayout);
        }
        Ok(Self {
            id,
            players,
            boards,
            shooting_boards: [Grid::unknown(), Grid::unknown()],
            log: Vec::new(),
        })
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn players(&self) -> [usize; 2] {
        self.players
    }

    /// Registry index of the player in `seat`.
    pub fn player(&self, seat: u8) -> Result<usize, BoardError> {
        Ok(self.players[seat_index(seat)?])
    }

    /// Registry index of the player opposing `seat`.
    pub fn opponent(&self, seat: u8) -> Result<usize, BoardError> {
        Ok(self.players[1 - seat_index(seat)?])
    }

    /// Fleet layout of `seat`.
    pub fn board(&self, seat: u8) -> Result<&Grid, BoardError> {
        Ok(&self.boards[seat_index(seat)?])
    }

    /// What `seat` has observed of the opposing fleet.
    pub fn shooting_board(&self, seat: u8) -> Result<&Grid, BoardError> {
        Ok(&self.shooting_boards[seat_index(seat)?])
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Last location `seat` fired at, if any.
    pub fn last_shot(&self, seat: u8) -> Result<Option<Coordinate>, BoardError> {
        seat_index(seat)?;
        Ok(self
            .log
            .iter()
            .rev()
            .find(|entry| entry.seat == seat)
            .map(|entry| entry.location))
    }

    /// Resolve a shot by `seat` at `at` and return the resulting cell state.
    pub fn shoot(&mut self, seat: u8, at: Coordinate) -> Result<CellState, BoardError> {
        let shooter = seat_index(seat)?;
        let target = &self.boards[1 - shooter];
        let view = &mut self.shooting_boards[shooter];

        let result = match (target[at], view[at]) {
            // already resolved, report it again without touching the view
            (_, seen @ (CellState::HitShip | CellState::SunkenShip)) => seen,
            (CellState::Ship, _) => {
                view[at] = CellState::HitShip;
                match find_ship(target, at) {
                    ShipSearch::Complete(range)
                        if range.iter().all(|c| view[c] == CellState::HitShip) =>
                    {
                        for c in range {
                            view[c] = CellState::SunkenShip;
                        }
                        CellState::SunkenShip
                    }
                    _ => CellState::HitShip,
                }
            }
            (content, _) => {
                view[at] = content;
                content
            }
        };

        self.log.push(LogEntry {
            seat,
            player: self.players[shooter],
            location: at,
            result,
        });
        Ok(result)
    }

    /// `true` once `seat`'s shooting view shows the whole fleet as hit.
    pub fn has_lost(&self, seat: u8) -> Result<bool, BoardError> {
        self.shooting_boards[seat_index(seat)?].has_lost(&fleet_lengths())
    }

    pub fn winner(&self) -> Result<Winner, BoardError> {
        if self.log.len() >= MAX_SHOTS {
            return Ok(Winner::Draw);
        }
        let lost1 = self.has_lost(1)?;
        let lost2 = self.has_lost(2)?;
        Ok(WINNER_TABLE[lost1 as usize][lost2 as usize])
    }

    pub fn is_over(&self) -> Result<bool, BoardError> {
        Ok(self.winner()? != Winner::NoWinner)
    }
}

/// Creates games for a pair of players.
pub trait GameFactory: Send {
    fn create(&mut self, player1: usize, player2: usize) -> Result<Game, BoardError>;
}

/// Factory that fills both fleets with a [`BoardFiller`].
pub struct RandomGameFactory<F> {
    filler: F,
}

impl<F: BoardFiller> RandomGameFactory<F> {
    pub fn new(filler: F) -> Self {
        Self { filler }
    }
}

impl<F: BoardFiller> GameFactory for RandomGameFactory<F> {
    fn create(&mut self, player1: usize, player2: usize) -> Result<Game, BoardError> {
        let fleet = fleet_lengths();
        let mut boards = [Grid::water(), Grid::water()];
        for board in boards.iter_mut() {
            self.filler.fill(&fleet, board)?;
        }
        Game::new(Uuid::new_v4(), [player1, player2], boards)
    }
}
