//! Messages exchanged between the referee and an agent host.
//!
//! Downstream (referee to agent host): [`Message::ShotRequest`] and
//! [`Message::ShotResult`]. Upstream: [`Message::ShotCoordinate`] and
//! [`Message::ShotResultAck`]. Both sides open with [`Message::Hello`].

use serde::{Deserialize, Serialize};

use crate::core::{BoardError, CellState, Coordinate, GameId, Grid};

/// Version exchanged in the handshake. Peers with a different version are
/// disconnected.
pub const PROTOCOL_VERSION: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// Handshake, sent once by each side before anything else.
    Hello { version: u16 },
    /// Ask the agent host for the next shot of one player.
    ShotRequest(ShotRequest),
    /// Outcome of the coordinate the agent host proposed.
    ShotResult { game_id: GameId, cell: CellState },
    /// Location the agent chose, as a label such as `"B7"`.
    ShotCoordinate { game_id: GameId, location: String },
    /// The agent has consumed the shot result.
    ShotResultAck,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotRequest {
    pub game_id: GameId,
    /// Registry index of the shooting player.
    pub shooter: usize,
    /// Registry index of the opponent.
    pub opponent: usize,
    /// Shooter's view of the opponent's board, one byte per cell.
    pub board: Vec<u8>,
    /// Label of the shooter's previous shot in this game.
    pub last_shot: Option<String>,
}

impl ShotRequest {
    pub fn new(
        game_id: GameId,
        shooter: usize,
        opponent: usize,
        board: &Grid,
        last_shot: Option<Coordinate>,
    ) -> Self {
        Self {
            game_id,
            shooter,
            opponent,
            board: board.to_bytes(),
            last_shot: last_shot.map(|c| c.label()),
        }
    }

    /// Decode the board view, rejecting anything but 100 valid cell bytes.
    pub fn board_view(&self) -> Result<Grid, BoardError> {
        Grid::from_bytes(&self.board)
    }

    pub fn last_shot(&self) -> Result<Option<Coordinate>, BoardError> {
        self.last_shot.as_deref().map(str::parse).transpose()
    }
}

impl Message {
    /// Short name used in log lines and protocol errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Hello { .. } => "Hello",
            Message::ShotRequest(_) => "ShotRequest",
            Message::ShotResult { .. } => "ShotResult",
            Message::ShotCoordinate { .. } => "ShotCoordinate",
            Message::ShotResultAck => "ShotResultAck",
        }
    }
}
