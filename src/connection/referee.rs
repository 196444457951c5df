//! Referee side of the connection: owns the running [`Game`].
//!
//! ```text
//! Disconnected -> Connected -> GameRunning -> WaitingForShot
//!                    ^              ^               |
//!                    |              |               v
//!                 end_game          +------ WaitingForShotAck
//! ```
//!
//! Every transition goes through [`RefereeConnection::advance`], which takes
//! the current phase out, hands it to a transition function and puts back
//! either the new phase or, on error, the old one.

use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::task::{Context, Poll};

use log::{debug, info};
use tokio::sync::oneshot;

use super::{send, ConnectionError, ConnectionState, Outbound};
use crate::core::{CellState, Coordinate, Game, GameFactory};
use crate::protocol::{Message, ShotRequest};

/// A shot that made the full request/coordinate/result/ack round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotOutcome {
    pub seat: u8,
    pub location: Coordinate,
    pub result: CellState,
}

/// The shot currently in flight.
#[derive(Debug)]
struct Turn {
    seat: u8,
    done: oneshot::Sender<ShotOutcome>,
}

#[derive(Debug)]
enum Phase {
    Disconnected,
    Connected {
        outbound: Outbound,
    },
    GameRunning {
        outbound: Outbound,
        game: Game,
    },
    WaitingForShot {
        outbound: Outbound,
        game: Game,
        turn: Turn,
    },
    WaitingForShotAck {
        outbound: Outbound,
        game: Game,
        turn: Turn,
        outcome: ShotOutcome,
    },
}

impl Phase {
    fn state(&self) -> ConnectionState {
        match self {
            Phase::Disconnected => ConnectionState::Disconnected,
            Phase::Connected { .. } => ConnectionState::Connected,
            Phase::GameRunning { .. } => ConnectionState::GameRunning,
            Phase::WaitingForShot { .. } => ConnectionState::WaitingForShot,
            Phase::WaitingForShotAck { .. } => ConnectionState::WaitingForShotAck,
        }
    }

    fn game(&self) -> Option<&Game> {
        match self {
            Phase::Disconnected | Phase::Connected { .. } => None,
            Phase::GameRunning { game, .. }
            | Phase::WaitingForShot { game, .. }
            | Phase::WaitingForShotAck { game, .. } => Some(game),
        }
    }

    fn wrong_state(&self, op: &'static str) -> ConnectionError {
        ConnectionError::WrongState {
            op,
            state: self.state().name(),
        }
    }
}

type Transition<T> = Result<(Phase, T), (Phase, ConnectionError)>;

/// Resolves when the shot it was returned for has been acknowledged.
///
/// Resolves to [`ConnectionError::Abandoned`] if the connection is torn down
/// first.
#[derive(Debug)]
pub struct PendingShot {
    rx: oneshot::Receiver<ShotOutcome>,
}

impl Future for PendingShot {
    type Output = Result<ShotOutcome, ConnectionError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|res| res.map_err(|_| ConnectionError::Abandoned))
    }
}

pub struct RefereeConnection {
    phase: Phase,
    factory: Box<dyn GameFactory>,
}

impl RefereeConnection {
    pub fn new(factory: Box<dyn GameFactory>) -> Self {
        Self {
            phase: Phase::Disconnected,
            factory,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.phase.state()
    }

    pub fn is_connected(&self) -> bool {
        self.state() != ConnectionState::Disconnected
    }

    pub fn can_start_game(&self) -> bool {
        matches!(
            self.state(),
            ConnectionState::Connected | ConnectionState::GameRunning
        )
    }

    /// The current game, if one has been started.
    pub fn game(&self) -> Option<&Game> {
        self.phase.game()
    }

    fn advance<T>(
        &mut self,
        step: impl FnOnce(Phase, &mut dyn GameFactory) -> Transition<T>,
    ) -> Result<T, ConnectionError> {
        let current = mem::replace(&mut self.phase, Phase::Disconnected);
        let from = current.state();
        match step(current, self.factory.as_mut()) {
            Ok((next, value)) => {
                if next.state() != from {
                    debug!("referee connection {:?} -> {:?}", from, next.state());
                }
                self.phase = next;
                Ok(value)
            }
            Err((unchanged, err)) => {
                self.phase = unchanged;
                Err(err)
            }
        }
    }

    /// Attach the writer queue of a freshly connected agent host.
    pub fn connect(&mut self, outbound: Outbound) -> Result<(), ConnectionError> {
        self.advance(|phase, _| match phase {
            Phase::Disconnected => Ok((Phase::Connected { outbound }, ())),
            other => Err((other, ConnectionError::AlreadyConnected)),
        })
    }

    /// Start a new game, replacing any finished one.
    pub fn start_game(&mut self, player1: usize, player2: usize) -> Result<(), ConnectionError> {
        self.advance(|phase, factory| {
            if !matches!(phase, Phase::Connected { .. } | Phase::GameRunning { .. }) {
                let err = phase.wrong_state("start_game");
                return Err((phase, err));
            }
            let game = match factory.create(player1, player2) {
                Ok(game) => game,
                Err(e) => return Err((phase, e.into())),
            };
            match phase {
                Phase::Connected { outbound } | Phase::GameRunning { outbound, .. } => {
                    info!(
                        "game {} started: player {} vs player {}",
                        game.id(),
                        player1,
                        player2
                    );
                    Ok((Phase::GameRunning { outbound, game }, ()))
                }
                other => {
                    let err = other.wrong_state("start_game");
                    Err((other, err))
                }
            }
        })
    }

    /// Ask the agent host for the next shot of `seat`.
    ///
    /// Only one shot may be in flight; calling this again before the returned
    /// [`PendingShot`] resolves fails with [`ConnectionError::WrongState`].
    pub fn shoot(&mut self, seat: u8) -> Result<PendingShot, ConnectionError> {
        self.advance(|phase, _| match phase {
            Phase::GameRunning { outbound, game } => {
                let request = match shot_request(&game, seat) {
                    Ok(request) => request,
                    Err(e) => return Err((Phase::GameRunning { outbound, game }, e)),
                };
                if let Err(e) = send(&outbound, Message::ShotRequest(request)) {
                    return Err((Phase::GameRunning { outbound, game }, e));
                }
                let (done, rx) = oneshot::channel();
                let turn = Turn { seat, done };
                Ok((
                    Phase::WaitingForShot {
                        outbound,
                        game,
                        turn,
                    },
                    PendingShot { rx },
                ))
            }
            other => {
                let err = other.wrong_state("shoot");
                Err((other, err))
            }
        })
    }

    /// Process one inbound message from the agent host.
    pub fn handle(&mut self, msg: Message) -> Result<(), ConnectionError> {
        debug!("<- {}", msg.kind());
        match msg {
            Message::ShotCoordinate { game_id, location } => {
                self.advance(|phase, _| match phase {
                    Phase::WaitingForShot {
                        outbound,
                        mut game,
                        turn,
                    } => {
                        if game_id != game.id() {
                            let err = ConnectionError::GameMismatch {
                                expected: game.id(),
                                received: game_id,
                            };
                            return Err((Phase::WaitingForShot { outbound, game, turn }, err));
                        }
                        let resolved = location
                            .parse::<Coordinate>()
                            .and_then(|at| Ok((at, game.shoot(turn.seat, at)?)));
                        let (at, result) = match resolved {
                            Ok(shot) => shot,
                            Err(e) => {
                                return Err((Phase::WaitingForShot { outbound, game, turn }, e.into()))
                            }
                        };
                        debug!("seat {} shot at {} -> {:?}", turn.seat, at, result);
                        let reply = Message::ShotResult {
                            game_id,
                            cell: result,
                        };
                        let outcome = ShotOutcome {
                            seat: turn.seat,
                            location: at,
                            result,
                        };
                        // the shot is already applied, so a failed send is not rolled back
                        match send(&outbound, reply) {
                            Ok(()) => Ok((
                                Phase::WaitingForShotAck {
                                    outbound,
                                    game,
                                    turn,
                                    outcome,
                                },
                                (),
                            )),
                            Err(e) => Err((Phase::WaitingForShot { outbound, game, turn }, e)),
                        }
                    }
                    other => {
                        let err = other.wrong_state("ShotCoordinate");
                        Err((other, err))
                    }
                })
            }
            Message::ShotResultAck => self.advance(|phase, _| match phase {
                Phase::WaitingForShotAck {
                    outbound,
                    game,
                    turn,
                    outcome,
                } => {
                    if turn.done.send(outcome).is_err() {
                        debug!("shot of seat {} completed with nobody waiting", outcome.seat);
                    }
                    Ok((Phase::GameRunning { outbound, game }, ()))
                }
                other => {
                    let err = other.wrong_state("ShotResultAck");
                    Err((other, err))
                }
            }),
            other => Err(ConnectionError::UnexpectedMessage(other.kind())),
        }
    }

    /// Return to `Connected`, handing back the finished game.
    pub fn end_game(&mut self) -> Result<Game, ConnectionError> {
        self.advance(|phase, _| match phase {
            Phase::GameRunning { outbound, game } => Ok((Phase::Connected { outbound }, game)),
            other => {
                let err = other.wrong_state("end_game");
                Err((other, err))
            }
        })
    }

    /// Drop the writer queue, any game and any in-flight shot.
    pub fn disconnect(&mut self) {
        let previous = mem::replace(&mut self.phase, Phase::Disconnected);
        if previous.state() != ConnectionState::Disconnected {
            info!("agent host disconnected (was {:?})", previous.state());
        }
    }
}

fn shot_request(game: &Game, seat: u8) -> Result<ShotRequest, ConnectionError> {
    Ok(ShotRequest::new(
        game.id(),
        game.player(seat)?,
        game.opponent(seat)?,
        game.shooting_board(seat)?,
        game.last_shot(seat)?,
    ))
}
