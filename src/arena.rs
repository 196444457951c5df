//! Match coordinator: alternates shots until the game has a winner.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use serde::Serialize;

use crate::core::{CellState, Coordinate, Game, GameFactory, GameId, Winner};
use crate::player::{Fire, PlayerRegistry, ShotContext, ShotSink};
use crate::session::SharedReferee;

/// Summary of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub game_id: GameId,
    pub players: [usize; 2],
    pub winner: Winner,
    pub shots: usize,
    /// Hit or sunk cells seen by each seat.
    pub hits: [usize; 2],
}

impl MatchReport {
    pub fn from_game(game: &Game) -> anyhow::Result<Self> {
        Ok(Self {
            game_id: game.id(),
            players: game.players(),
            winner: game.winner()?,
            shots: game.log().len(),
            hits: [
                game.shooting_board(1)?.hit_count(),
                game.shooting_board(2)?.hit_count(),
            ],
        })
    }

    /// Registry index of the winning player, if the game was not a draw.
    pub fn winning_player(&self) -> Option<usize> {
        match self.winner {
            Winner::Player1 => Some(self.players[0]),
            Winner::Player2 => Some(self.players[1]),
            Winner::Draw | Winner::NoWinner => None,
        }
    }
}

/// Wait until an agent host has attached to `referee`.
pub async fn wait_for_agent_host(referee: &SharedReferee, limit: Option<Duration>) -> anyhow::Result<()> {
    let poll = async {
        loop {
            if referee.lock().await.can_start_game() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    };
    match limit {
        Some(limit) => tokio::time::timeout(limit, poll)
            .await
            .map_err(|_| anyhow::anyhow!("no agent host attached within {:?}", limit)),
        None => {
            poll.await;
            Ok(())
        }
    }
}

/// Play one game over the attached agent host.
///
/// The lock on the referee is only held to issue each shot, never while the
/// round trip is in flight, so the session can feed replies in.
pub async fn run_remote_match(
    referee: &SharedReferee,
    player1: usize,
    player2: usize,
) -> anyhow::Result<MatchReport> {
    referee.lock().await.start_game(player1, player2)?;

    let mut seat = 1u8;
    loop {
        let pending = {
            let mut connection = referee.lock().await;
            let game = connection
                .game()
                .ok_or_else(|| anyhow::anyhow!("game vanished while running"))?;
            if game.winner()? != Winner::NoWinner {
                break;
            }
            connection.shoot(seat)?
        };
        let outcome = pending.await?;
        debug!(
            "seat {} fired at {}: {:?}",
            outcome.seat, outcome.location, outcome.result
        );
        seat = 3 - seat;
    }

    let game = referee.lock().await.end_game()?;
    let report = MatchReport::from_game(&game)?;
    info!(
        "game {} finished after {} shots: {:?}",
        report.game_id, report.shots, report.winner
    );
    Ok(report)
}

/// Applies shots directly to an in-process game.
struct LocalSink<'a> {
    game: &'a mut Game,
    seat: u8,
    fired: bool,
}

#[async_trait]
impl ShotSink for LocalSink<'_> {
    async fn fire(&mut self, at: Coordinate) -> anyhow::Result<CellState> {
        if self.fired {
            return Err(anyhow::anyhow!("seat {} fired twice in one turn", self.seat));
        }
        self.fired = true;
        Ok(self.game.shoot(self.seat, at)?)
    }
}

/// Play one game between two registry agents without any transport.
///
/// Returns the finished game so callers can render the boards.
pub async fn run_local_match(
    registry: &PlayerRegistry,
    factory: &mut dyn GameFactory,
    player1: usize,
    player2: usize,
) -> anyhow::Result<Game> {
    let mut game = factory.create(player1, player2)?;
    info!(
        "local game {}: {} vs {}",
        game.id(),
        registry.label(player1),
        registry.label(player2)
    );

    let mut seat = 1u8;
    while game.winner()? == Winner::NoWinner {
        let player = game.player(seat)?;
        let mut agent = registry
            .create(player)
            .ok_or_else(|| anyhow::anyhow!("no player with index {}", player))?;
        let ctx = ShotContext {
            game_id: game.id(),
            opponent: registry.label(game.opponent(seat)?),
            board: game.shooting_board(seat)?.clone(),
            last_shot: game.last_shot(seat)?,
        };
        let mut sink = LocalSink {
            game: &mut game,
            seat,
            fired: false,
        };
        agent.shoot(&ctx, Fire::new(&mut sink)).await?;
        if !sink.fired {
            return Err(anyhow::anyhow!(
                "agent {} returned without firing",
                registry.label(player)
            ));
        }
        seat = 3 - seat;
    }
    Ok(game)
}
