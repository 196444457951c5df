//! Connection state machines on both ends of the duplex channel.
//!
//! [`RefereeConnection`] holds the game and turns inbound coordinates into
//! shot results. [`AgentConnection`] holds no game state; it runs a fresh
//! shooter agent for every shot request.

use thiserror::Error;
use tokio::sync::mpsc;

use crate::core::{BoardError, GameId};
use crate::protocol::Message;

pub mod agent;
pub mod referee;

pub use agent::{AgentConnection, AgentState};
pub use referee::{PendingShot, RefereeConnection, ShotOutcome};

/// Sending half of the single ordered writer queue.
pub type Outbound = mpsc::UnboundedSender<Message>;

/// Observable phase of a [`RefereeConnection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    Disconnected,
    Connected,
    GameRunning,
    WaitingForShot,
    WaitingForShotAck,
}

impl ConnectionState {
    pub fn name(self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "Disconnected",
            ConnectionState::Connected => "Connected",
            ConnectionState::GameRunning => "GameRunning",
            ConnectionState::WaitingForShot => "WaitingForShot",
            ConnectionState::WaitingForShotAck => "WaitingForShotAck",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("an agent host is already connected")]
    AlreadyConnected,
    #[error("{op} is not allowed in state {state}")]
    WrongState { op: &'static str, state: &'static str },
    #[error("message for game {received} while game {expected} is active")]
    GameMismatch { expected: GameId, received: GameId },
    #[error("unexpected {0} message")]
    UnexpectedMessage(&'static str),
    #[error("no player with index {0} is registered")]
    UnknownPlayer(usize),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("outbound channel is closed")]
    ChannelClosed,
    #[error("shot was abandoned before the round trip completed")]
    Abandoned,
}

/// Queue `msg` on the writer channel.
pub(crate) fn send(outbound: &Outbound, msg: Message) -> Result<(), ConnectionError> {
    log::debug!("-> {}", msg.kind());
    outbound.send(msg).map_err(|_| ConnectionError::ChannelClosed)
}
