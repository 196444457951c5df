//! Agent-host side of the connection.
//!
//! Holds no game state. Each [`Message::ShotRequest`] spawns a fresh agent from
//! the [`PlayerRegistry`]; the agent's single shot goes upstream as a
//! [`Message::ShotCoordinate`], the matching [`Message::ShotResult`] is routed
//! back to it, and once the agent returns a [`Message::ShotResultAck`] closes
//! the turn.

use std::mem;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, warn};
use tokio::sync::{oneshot, Mutex};
use tokio::time::sleep;

use super::{send, ConnectionError, Outbound};
use crate::config::AgentConfig;
use crate::core::{CellState, Coordinate, GameId};
use crate::player::{Fire, PlayerRegistry, ShotContext, ShotSink, Shooter};
use crate::protocol::{Message, ShotRequest};

/// Observable phase of an [`AgentConnection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentState {
    Disconnected,
    Idle,
    /// An agent is choosing its shot.
    Deciding(GameId),
    /// The shot is upstream, waiting for its result.
    AwaitingResult(GameId),
}

impl AgentState {
    fn name(self) -> &'static str {
        match self {
            AgentState::Disconnected => "Disconnected",
            AgentState::Idle => "Idle",
            AgentState::Deciding(_) => "Deciding",
            AgentState::AwaitingResult(_) => "AwaitingResult",
        }
    }
}

#[derive(Debug)]
enum AgentPhase {
    Disconnected,
    Idle {
        outbound: Outbound,
    },
    Deciding {
        outbound: Outbound,
        game_id: GameId,
    },
    AwaitingResult {
        outbound: Outbound,
        game_id: GameId,
        reply: oneshot::Sender<CellState>,
    },
}

impl AgentPhase {
    fn state(&self) -> AgentState {
        match self {
            AgentPhase::Disconnected => AgentState::Disconnected,
            AgentPhase::Idle { .. } => AgentState::Idle,
            AgentPhase::Deciding { game_id, .. } => AgentState::Deciding(*game_id),
            AgentPhase::AwaitingResult { game_id, .. } => AgentState::AwaitingResult(*game_id),
        }
    }

    fn wrong_state(&self, op: &'static str) -> ConnectionError {
        ConnectionError::WrongState {
            op,
            state: self.state().name(),
        }
    }
}

type Shared = Arc<Mutex<AgentPhase>>;

#[derive(Clone)]
pub struct AgentConnection {
    phase: Shared,
    registry: Arc<PlayerRegistry>,
    config: AgentConfig,
}

impl AgentConnection {
    pub fn new(registry: Arc<PlayerRegistry>, config: AgentConfig) -> Self {
        Self {
            phase: Arc::new(Mutex::new(AgentPhase::Disconnected)),
            registry,
            config,
        }
    }

    pub async fn state(&self) -> AgentState {
        self.phase.lock().await.state()
    }

    pub async fn connect(&self, outbound: Outbound) -> Result<(), ConnectionError> {
        let mut phase = self.phase.lock().await;
        match *phase {
            AgentPhase::Disconnected => {
                *phase = AgentPhase::Idle { outbound };
                Ok(())
            }
            _ => Err(ConnectionError::AlreadyConnected),
        }
    }

    /// Drop the writer queue. An agent waiting for its result sees the shot
    /// fail with [`ConnectionError::Abandoned`].
    pub async fn disconnect(&self) {
        let previous = mem::replace(&mut *self.phase.lock().await, AgentPhase::Disconnected);
        debug!("agent connection {:?} -> Disconnected", previous.state());
    }

    /// Process one inbound message from the referee.
    pub async fn handle(&self, msg: Message) -> Result<(), ConnectionError> {
        debug!("<- {}", msg.kind());
        match msg {
            Message::ShotRequest(request) => self.start_turn(request).await,
            Message::ShotResult { game_id, cell } => self.deliver_result(game_id, cell).await,
            other => Err(ConnectionError::UnexpectedMessage(other.kind())),
        }
    }

    async fn start_turn(&self, request: ShotRequest) -> Result<(), ConnectionError> {
        let mut phase = self.phase.lock().await;
        let outbound = match &*phase {
            AgentPhase::Idle { outbound } => outbound.clone(),
            other => return Err(other.wrong_state("ShotRequest")),
        };

        let ctx = ShotContext {
            game_id: request.game_id,
            opponent: self.registry.label(request.opponent),
            board: request.board_view()?,
            last_shot: request.last_shot()?,
        };
        let agent = self
            .registry
            .create(request.shooter)
            .ok_or(ConnectionError::UnknownPlayer(request.shooter))?;

        *phase = AgentPhase::Deciding {
            outbound,
            game_id: request.game_id,
        };
        drop(phase);

        let turn = Turn {
            phase: self.phase.clone(),
            game_id: request.game_id,
            shooter: self.registry.label(request.shooter),
            budget: self.config.turn_budget,
        };
        tokio::spawn(turn.run(agent, ctx));
        Ok(())
    }

    async fn deliver_result(&self, game_id: GameId, cell: CellState) -> Result<(), ConnectionError> {
        let mut phase = self.phase.lock().await;
        let current = mem::replace(&mut *phase, AgentPhase::Disconnected);
        match current {
            AgentPhase::AwaitingResult {
                outbound,
                game_id: expected,
                reply,
            } if expected == game_id => {
                if reply.send(cell).is_err() {
                    debug!("shot result for game {} arrived after the agent gave up", game_id);
                }
                *phase = AgentPhase::Deciding { outbound, game_id };
                Ok(())
            }
            AgentPhase::AwaitingResult {
                outbound,
                game_id: expected,
                reply,
            } => {
                *phase = AgentPhase::AwaitingResult {
                    outbound,
                    game_id: expected,
                    reply,
                };
                Err(ConnectionError::GameMismatch {
                    expected,
                    received: game_id,
                })
            }
            other => {
                let err = other.wrong_state("ShotResult");
                *phase = other;
                Err(err)
            }
        }
    }
}

/// One agent turn running on its own task.
///
/// The budget covers the agent's decision only. Once the coordinate is
/// upstream the turn waits for the result however long the referee takes.
struct Turn {
    phase: Shared,
    game_id: GameId,
    shooter: String,
    budget: std::time::Duration,
}

impl Turn {
    async fn run(self, mut agent: Box<dyn Shooter>, ctx: ShotContext) {
        let (fired_tx, mut fired_rx) = oneshot::channel();
        let mut sink = RemoteSink {
            phase: self.phase.clone(),
            game_id: self.game_id,
            fired: Some(fired_tx),
        };
        let outcome = {
            let mut shot = agent.shoot(&ctx, Fire::new(&mut sink));
            tokio::select! {
                biased;
                outcome = &mut shot => Some(outcome),
                Ok(()) = &mut fired_rx => Some(shot.await),
                _ = sleep(self.budget) => None,
            }
        };

        let completed = match outcome {
            Some(Ok(())) if sink.fired.is_none() => true,
            Some(Ok(())) => {
                warn!("agent {} returned without firing", self.shooter);
                false
            }
            Some(Err(e)) => {
                error!("agent {} failed: {:#}", self.shooter, e);
                false
            }
            None => {
                warn!(
                    "agent {} did not fire within its turn budget of {:?}",
                    self.shooter, self.budget
                );
                false
            }
        };
        self.finish(completed).await;
    }

    /// Send the ack for a completed turn and return to `Idle`.
    async fn finish(self, completed: bool) {
        let mut phase = self.phase.lock().await;
        let current = mem::replace(&mut *phase, AgentPhase::Disconnected);
        *phase = match current {
            AgentPhase::Deciding { outbound, game_id }
            | AgentPhase::AwaitingResult {
                outbound, game_id, ..
            } if game_id == self.game_id => {
                if completed {
                    if let Err(e) = send(&outbound, Message::ShotResultAck) {
                        warn!("could not acknowledge shot result: {}", e);
                    }
                }
                AgentPhase::Idle { outbound }
            }
            // torn down or superseded while the agent was running
            other => other,
        };
    }
}

/// Sends the agent's shot to the referee and waits for the result.
struct RemoteSink {
    phase: Shared,
    game_id: GameId,
    /// Signals the turn that the shot is upstream; taken on the first fire.
    fired: Option<oneshot::Sender<()>>,
}

#[async_trait]
impl ShotSink for RemoteSink {
    async fn fire(&mut self, at: Coordinate) -> anyhow::Result<CellState> {
        let result = {
            let mut phase = self.phase.lock().await;
            let current = mem::replace(&mut *phase, AgentPhase::Disconnected);
            match current {
                AgentPhase::Deciding { outbound, game_id }
                    if game_id == self.game_id && self.fired.is_some() =>
                {
                    let msg = Message::ShotCoordinate {
                        game_id,
                        location: at.label(),
                    };
                    if let Err(e) = send(&outbound, msg) {
                        *phase = AgentPhase::Deciding { outbound, game_id };
                        return Err(e.into());
                    }
                    let (reply, result) = oneshot::channel();
                    *phase = AgentPhase::AwaitingResult {
                        outbound,
                        game_id,
                        reply,
                    };
                    if let Some(fired) = self.fired.take() {
                        let _ = fired.send(());
                    }
                    result
                }
                other => {
                    let err = other.wrong_state("fire");
                    *phase = other;
                    return Err(err.into());
                }
            }
        };
        result.await.map_err(|_| ConnectionError::Abandoned.into())
    }
}
