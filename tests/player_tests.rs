use async_trait::async_trait;
use broadside::arena::{run_local_match, MatchReport};
use broadside::core::{
    fleet_lengths, CellState, Coordinate, Grid, RandomFiller, RandomGameFactory, Winner,
    CELL_COUNT, FLEET_CELLS,
};
use broadside::player::probability::{heat_map, remaining_lengths};
use broadside::player::{Fire, PlayerRegistry, ShotContext, ShotSink, Shooter, SteppingShooter};
use uuid::Uuid;

fn at(label: &str) -> Coordinate {
    label.parse().unwrap()
}

#[test]
fn registry_resolves_names_and_indices() {
    let registry = PlayerRegistry::builtin();
    assert_eq!(registry.len(), 5);
    assert_eq!(registry.resolve("sequential"), Some(0));
    assert_eq!(registry.resolve("Probability"), Some(3));
    assert_eq!(registry.resolve("2"), Some(2));
    assert_eq!(registry.resolve("4"), Some(4));
    assert_eq!(registry.resolve("5"), None);
    assert_eq!(registry.resolve("nobody"), None);
    assert_eq!(registry.name(1), Some("random"));
    assert_eq!(registry.label(9), "player #9");
    assert!(registry.create(9).is_none());
    assert_eq!(
        registry.names().map(|(_, name)| name).collect::<Vec<_>>(),
        ["sequential", "random", "scatter", "probability", "stepping"]
    );
}

#[tokio::test]
async fn every_builtin_agent_finishes_a_game() -> anyhow::Result<()> {
    let registry = PlayerRegistry::builtin();
    for (index, name) in registry.names() {
        let mut factory = RandomGameFactory::new(RandomFiller::seeded(index as u64));
        let game = run_local_match(&registry, &mut factory, index, index).await?;
        let report = MatchReport::from_game(&game)?;
        assert_ne!(report.winner, Winner::NoWinner, "{name} never finished");
        assert!(game.is_over()?);
    }
    Ok(())
}

#[tokio::test]
async fn sequential_game_ends_within_two_sweeps() -> anyhow::Result<()> {
    let registry = PlayerRegistry::builtin();
    let mut factory = RandomGameFactory::new(RandomFiller::seeded(42));
    let game = run_local_match(&registry, &mut factory, 0, 0).await?;
    // two sequential sweeps each need at most 100 shots
    assert!(game.log().len() <= 2 * CELL_COUNT);
    let report = MatchReport::from_game(&game)?;
    assert!(report.hits.iter().any(|&h| h == FLEET_CELLS));
    Ok(())
}

struct Idle;

#[async_trait]
impl Shooter for Idle {
    async fn shoot(&mut self, _ctx: &ShotContext, _fire: Fire<'_>) -> anyhow::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn local_match_rejects_an_agent_that_never_fires() {
    let mut registry = PlayerRegistry::builtin();
    let idle = registry.register("idle", || Box::new(Idle));
    let mut factory = RandomGameFactory::new(RandomFiller::seeded(1));
    let err = run_local_match(&registry, &mut factory, idle, 0)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("without firing"), "{err:#}");
}

#[test]
fn remaining_lengths_drop_sunken_ships() {
    let mut view = Grid::unknown();
    assert_eq!(remaining_lengths(&view), fleet_lengths().to_vec());

    for label in ["A1", "B1", "C1"] {
        view[at(label)] = CellState::SunkenShip;
    }
    view[at("J9")] = CellState::SunkenShip;
    view[at("J10")] = CellState::SunkenShip;

    let mut expected = fleet_lengths().to_vec();
    for gone in [3, 2] {
        let pos = expected.iter().position(|&l| l == gone).unwrap();
        expected.remove(pos);
    }
    assert_eq!(remaining_lengths(&view), expected);
}

#[test]
fn heat_map_is_a_distribution_over_unknown_cells() {
    let mut view = Grid::unknown();
    view[at("E5")] = CellState::HitShip;
    view[at("A1")] = CellState::Water;
    let pdf = heat_map(&view, &remaining_lengths(&view));

    let total: f64 = pdf.iter().sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert_eq!(pdf[at("E5").index()], 0.0);
    assert_eq!(pdf[at("A1").index()], 0.0);
    // cells next to the hit outweigh a far corner
    assert!(pdf[at("E6").index()] > pdf[at("J10").index()]);
}

#[test]
fn heat_map_falls_back_to_uniform() {
    let mut view = Grid::water();
    view[at("C3")] = CellState::Unknown;
    view[at("H8")] = CellState::Unknown;
    // nothing longer than one cell fits in isolated holes
    let pdf = heat_map(&view, &[5]);
    assert_eq!(pdf[at("C3").index()], 0.5);
    assert_eq!(pdf[at("H8").index()], 0.5);
}

/// Records where the agent fired and reports water.
#[derive(Default)]
struct Recorder {
    target: Option<Coordinate>,
}

#[async_trait]
impl ShotSink for Recorder {
    async fn fire(&mut self, at: Coordinate) -> anyhow::Result<CellState> {
        self.target = Some(at);
        Ok(CellState::Water)
    }
}

async fn stepping_target(last_shot: Option<&str>) -> anyhow::Result<Option<Coordinate>> {
    let ctx = ShotContext {
        game_id: Uuid::new_v4(),
        opponent: "anyone".into(),
        board: Grid::unknown(),
        last_shot: last_shot.map(at),
    };
    let mut sink = Recorder::default();
    SteppingShooter.shoot(&ctx, Fire::new(&mut sink)).await?;
    Ok(sink.target)
}

#[tokio::test]
async fn stepping_agent_follows_its_last_shot() -> anyhow::Result<()> {
    assert_eq!(stepping_target(None).await?, Some(at("A1")));
    assert_eq!(stepping_target(Some("C4")).await?, Some(at("D4")));
    // wraps to the next row, and back to A1 after the last cell
    assert_eq!(stepping_target(Some("J4")).await?, Some(at("A5")));
    assert_eq!(stepping_target(Some("J10")).await?, Some(at("A1")));
    Ok(())
}
