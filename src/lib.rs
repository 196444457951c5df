//! Referee and agent host for a two-player battleship contest.
//!
//! The [`core`] module is the synchronous game engine. [`connection`] holds the
//! two state machines that drive it over a duplex [`transport`]; [`session`]
//! wires them to a transport and [`arena`] plays whole matches.

pub mod arena;
pub mod config;
pub mod connection;
pub mod core;
pub mod logging;
pub mod player;
pub mod prelude;
pub mod protocol;
pub mod session;
pub mod transport;
pub mod ui;

pub use logging::init_logging;
