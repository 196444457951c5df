use broadside::core::{
    BoardError, CellState, Coordinate, Game, GameFactory, Grid, RandomFiller, RandomGameFactory,
    Winner, FLEET_CELLS, MAX_SHOTS,
};
use uuid::Uuid;

fn at(label: &str) -> Coordinate {
    label.parse().unwrap()
}

fn layout(ships: &[&str]) -> Grid {
    let mut grid = Grid::water();
    for label in ships {
        grid[at(label)] = CellState::Ship;
    }
    grid
}

fn game(seat1_fleet: &[&str], seat2_fleet: &[&str]) -> Game {
    Game::new(Uuid::new_v4(), [10, 20], [layout(seat1_fleet), layout(seat2_fleet)]).unwrap()
}

#[test]
fn two_cell_ship_sinks_on_second_hit() -> anyhow::Result<()> {
    let mut game = game(&["J10"], &["A1", "B1"]);

    assert_eq!(game.shoot(1, at("A1"))?, CellState::HitShip);
    assert_eq!(game.shooting_board(1)?[at("A1")], CellState::HitShip);

    assert_eq!(game.shoot(1, at("B1"))?, CellState::SunkenShip);
    let view = game.shooting_board(1)?;
    assert_eq!(view[at("A1")], CellState::SunkenShip);
    assert_eq!(view[at("B1")], CellState::SunkenShip);
    // the fleet layout itself never changes
    assert_eq!(game.board(2)?[at("A1")], CellState::Ship);
    Ok(())
}

#[test]
fn ship_extent_comes_from_the_fleet_layout() -> anyhow::Result<()> {
    let mut game = game(&["J10"], &["E4", "E5", "E6"]);

    // every neighbour is still unknown in the shooter's view
    assert_eq!(game.shoot(1, at("E6"))?, CellState::HitShip);
    assert_eq!(game.shoot(1, at("E4"))?, CellState::HitShip);
    assert_eq!(game.shooting_board(1)?.count(CellState::Unknown), 98);
    assert_eq!(game.shoot(1, at("E5"))?, CellState::SunkenShip);

    let view = game.shooting_board(1)?;
    for label in ["E4", "E5", "E6"] {
        assert_eq!(view[at(label)], CellState::SunkenShip);
    }
    assert_eq!(view[at("D5")], CellState::Unknown);
    Ok(())
}

#[test]
fn water_is_revealed_as_water() -> anyhow::Result<()> {
    let mut game = game(&["J10"], &["A1"]);
    assert_eq!(game.shoot(1, at("E5"))?, CellState::Water);
    assert_eq!(game.shooting_board(1)?[at("E5")], CellState::Water);
    assert_eq!(game.shooting_board(1)?.count(CellState::Unknown), 99);
    Ok(())
}

#[test]
fn seat_two_shoots_at_seat_one() -> anyhow::Result<()> {
    let mut game = game(&["C3"], &["H8"]);
    assert_eq!(game.shoot(2, at("C3"))?, CellState::SunkenShip);
    assert_eq!(game.shoot(2, at("H8"))?, CellState::Water);
    assert_eq!(game.shooting_board(1)?.count(CellState::Unknown), 100);
    Ok(())
}

#[test]
fn invalid_seats_are_rejected() {
    let mut game = game(&["A1"], &["A1"]);
    assert_eq!(game.shoot(0, at("A1")), Err(BoardError::InvalidSeat(0)));
    assert_eq!(game.shoot(3, at("A1")), Err(BoardError::InvalidSeat(3)));
    assert!(game.log().is_empty());
}

#[test]
fn reshooting_never_double_counts() -> anyhow::Result<()> {
    let mut game = game(&["J10"], &["A1", "B1", "C1"]);
    game.shoot(1, at("A1"))?;
    let before = game.shooting_board(1)?.clone();

    assert_eq!(game.shoot(1, at("A1"))?, CellState::HitShip);
    assert_eq!(game.shooting_board(1)?, &before);

    game.shoot(1, at("B1"))?;
    assert_eq!(game.shoot(1, at("C1"))?, CellState::SunkenShip);
    assert_eq!(game.shoot(1, at("B1"))?, CellState::SunkenShip);
    assert_eq!(game.shooting_board(1)?.hit_count(), 3);
    // every call is logged, repeated ones included
    assert_eq!(game.log().len(), 5);
    Ok(())
}

#[test]
fn log_records_seat_player_and_result() -> anyhow::Result<()> {
    let mut game = game(&["J10"], &["A1"]);
    game.shoot(1, at("B2"))?;
    game.shoot(2, at("J10"))?;

    let log = game.log();
    assert_eq!((log[0].seat, log[0].player), (1, 10));
    assert_eq!(log[0].location, at("B2"));
    assert_eq!(log[0].result, CellState::Water);
    assert_eq!((log[1].seat, log[1].player), (2, 20));
    assert_eq!(log[1].result, CellState::SunkenShip);

    assert_eq!(game.last_shot(1)?, Some(at("B2")));
    assert_eq!(game.last_shot(2)?, Some(at("J10")));
    Ok(())
}

#[test]
fn winner_is_the_opponent_of_the_seat_that_has_lost() -> anyhow::Result<()> {
    let mut fleet = RandomGameFactory::new(RandomFiller::seeded(3)).create(0, 1)?;
    assert_eq!(fleet.winner()?, Winner::NoWinner);

    let targets: Vec<Coordinate> = fleet
        .board(2)?
        .iter()
        .filter(|&(_, s)| s == CellState::Ship)
        .map(|(at, _)| at)
        .collect();
    assert_eq!(targets.len(), FLEET_CELLS);
    for target in targets {
        fleet.shoot(1, target)?;
    }

    assert!(fleet.has_lost(1)?);
    assert!(!fleet.has_lost(2)?);
    assert_eq!(fleet.winner()?, Winner::Player2);
    Ok(())
}

#[test]
fn both_fleets_down_is_a_draw() -> anyhow::Result<()> {
    let mut game = RandomGameFactory::new(RandomFiller::seeded(11)).create(0, 1)?;
    for seat in [1u8, 2] {
        let opponent = 3 - seat;
        let targets: Vec<Coordinate> = game
            .board(opponent)?
            .iter()
            .filter(|&(_, s)| s == CellState::Ship)
            .map(|(at, _)| at)
            .collect();
        for target in targets {
            game.shoot(seat, target)?;
        }
    }
    assert_eq!(game.winner()?, Winner::Draw);
    Ok(())
}

#[test]
fn shot_cap_forces_a_draw() -> anyhow::Result<()> {
    let mut game = game(&["J10"], &["J10"]);
    for _ in 0..MAX_SHOTS - 1 {
        game.shoot(1, at("A1"))?;
    }
    assert_eq!(game.winner()?, Winner::NoWinner);
    game.shoot(2, at("A1"))?;
    assert_eq!(game.log().len(), MAX_SHOTS);
    assert_eq!(game.winner()?, Winner::Draw);
    Ok(())
}

#[test]
fn factory_creates_distinct_games() -> anyhow::Result<()> {
    let mut factory = RandomGameFactory::new(RandomFiller::seeded(5));
    let a = factory.create(1, 2)?;
    let b = factory.create(1, 2)?;
    assert_ne!(a.id(), b.id());
    assert_eq!(a.players(), [1, 2]);
    for seat in [1, 2] {
        assert_eq!(a.board(seat)?.count(CellState::Ship), FLEET_CELLS);
        assert_eq!(a.shooting_board(seat)?.count(CellState::Unknown), 100);
    }
    Ok(())
}
