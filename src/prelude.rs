//! Commonly used types and utilities for ease of import.

pub use crate::arena::{run_local_match, run_remote_match, wait_for_agent_host, MatchReport};
pub use crate::config::{AgentConfig, TransportConfig};
pub use crate::connection::{
    AgentConnection, AgentState, ConnectionError, ConnectionState, PendingShot, RefereeConnection,
    ShotOutcome,
};
pub use crate::core::{
    BoardError, CellState, Coordinate, Game, GameFactory, Grid, RandomFiller, RandomGameFactory,
    Winner,
};
pub use crate::player::{Fire, PlayerRegistry, ShotContext, Shooter};
pub use crate::protocol::{Message, ShotRequest, PROTOCOL_VERSION};
pub use crate::session::{serve_agent, serve_referee, SharedReferee};
pub use crate::transport::{InMemoryTransport, TcpTransport, Transport};
