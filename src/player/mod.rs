//! Shooter agents and the registry that names them.
//!
//! A [`Shooter`] sees the shooter's view of the opponent's board and must fire
//! exactly once per call through the [`Fire`] handle it is given. Agents are
//! created fresh for every shot, so anything carried between turns has to come
//! in through the [`ShotContext`].

use async_trait::async_trait;

use crate::core::{CellState, Coordinate, GameId, Grid};

pub mod probability;
pub mod random;
pub mod scatter;
pub mod sequential;
pub mod stepping;

pub use probability::ProbabilityShooter;
pub use random::RandomShooter;
pub use scatter::ScatterShooter;
pub use sequential::SequentialShooter;
pub use stepping::SteppingShooter;

/// Everything an agent is told about the shot it has to make.
#[derive(Debug, Clone)]
pub struct ShotContext {
    pub game_id: GameId,
    /// Registry name of the opponent.
    pub opponent: String,
    /// Shooter's view of the opponent's board.
    pub board: Grid,
    /// Where this shooter fired last, if anywhere.
    pub last_shot: Option<Coordinate>,
}

impl ShotContext {
    /// Unknown cells in row-major order.
    pub fn unknown_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.board
            .iter()
            .filter(|&(_, state)| state == CellState::Unknown)
            .map(|(at, _)| at)
    }
}

/// Where a fired shot ends up: a remote referee or a local game.
#[async_trait]
pub trait ShotSink: Send {
    async fn fire(&mut self, at: Coordinate) -> anyhow::Result<CellState>;
}

/// Single-use handle for firing the one shot of a turn.
pub struct Fire<'a> {
    sink: &'a mut dyn ShotSink,
}

impl<'a> Fire<'a> {
    pub fn new(sink: &'a mut dyn ShotSink) -> Self {
        Self { sink }
    }

    /// Fire at `at` and wait for the result.
    pub async fn at(self, at: Coordinate) -> anyhow::Result<CellState> {
        self.sink.fire(at).await
    }
}

#[async_trait]
pub trait Shooter: Send {
    async fn shoot(&mut self, ctx: &ShotContext, fire: Fire<'_>) -> anyhow::Result<()>;
}

pub type ShooterFactory = fn() -> Box<dyn Shooter>;

/// Explicit table of available agents. A player's index in the table is its
/// identity on the wire, so referee and agent host must build the same table.
#[derive(Clone, Default)]
pub struct PlayerRegistry {
    entries: Vec<(&'static str, ShooterFactory)>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The agents that ship with this crate.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("sequential", || Box::new(SequentialShooter));
        registry.register("random", || Box::new(RandomShooter::new()));
        registry.register("scatter", || Box::new(ScatterShooter));
        registry.register("probability", || Box::new(ProbabilityShooter::new()));
        registry.register("stepping", || Box::new(SteppingShooter));
        registry
    }

    /// Add an agent and return its index.
    pub fn register(&mut self, name: &'static str, factory: ShooterFactory) -> usize {
        self.entries.push((name, factory));
        self.entries.len() - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn name(&self, index: usize) -> Option<&'static str> {
        self.entries.get(index).map(|(name, _)| *name)
    }

    /// Display name for `index`, falling back to the bare index.
    pub fn label(&self, index: usize) -> String {
        self.name(index)
            .map(str::to_string)
            .unwrap_or_else(|| format!("player #{index}"))
    }

    pub fn names(&self) -> impl Iterator<Item = (usize, &'static str)> + '_ {
        self.entries.iter().enumerate().map(|(i, (name, _))| (i, *name))
    }

    /// Resolve a registry name or a numeric index.
    pub fn resolve(&self, name_or_index: &str) -> Option<usize> {
        if let Ok(index) = name_or_index.parse::<usize>() {
            return (index < self.len()).then_some(index);
        }
        self.entries
            .iter()
            .position(|(name, _)| name.eq_ignore_ascii_case(name_or_index))
    }

    /// A fresh instance of the agent at `index`.
    pub fn create(&self, index: usize) -> Option<Box<dyn Shooter>> {
        self.entries.get(index).map(|(_, factory)| factory())
    }
}

impl std::fmt::Debug for PlayerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.iter().map(|(name, _)| name)).finish()
    }
}
