//! Runtime settings for transports and agent hosts.

use std::time::Duration;

/// Default write timeout for network operations (30 seconds).
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum frame size (1 MB). A shot request is a little over 100 bytes.
pub const MAX_FRAME_SIZE: u32 = 1_000_000;

/// Default wall-clock budget for one agent turn.
pub const DEFAULT_TURN_BUDGET: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    pub write_timeout: Duration,
    /// `None` waits for the peer indefinitely; the protocol itself never
    /// times out a turn.
    pub read_timeout: Option<Duration>,
    pub max_frame_size: u32,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            write_timeout: DEFAULT_WRITE_TIMEOUT,
            read_timeout: None,
            max_frame_size: MAX_FRAME_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentConfig {
    /// Agents that have not fired within this budget are abandoned.
    pub turn_budget: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            turn_budget: DEFAULT_TURN_BUDGET,
        }
    }
}
