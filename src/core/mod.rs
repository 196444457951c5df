//! Board and game engine.
//!
//! Pure, synchronous logic: coordinates, grids, ship placement, the random
//! filler, the ship locator and the game itself. Nothing in here touches the
//! network or the runtime.

pub mod config;
pub mod coordinate;
pub mod error;
pub mod filler;
pub mod game;
pub mod grid;
pub mod locator;
pub mod placement;
pub mod ship;

pub use config::*;
pub use coordinate::{Axis, Coordinate};
pub use error::BoardError;
pub use filler::{BoardFiller, RandomFiller};
pub use game::{Game, GameFactory, GameId, LogEntry, RandomGameFactory, Winner};
pub use grid::{CellState, Grid};
pub use locator::{find_ship, ShipSearch};
pub use placement::{can_place, place, FillableBoard};
pub use ship::{ShipClass, ShipRange};
