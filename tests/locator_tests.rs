use broadside::core::{find_ship, CellState, Coordinate, Grid, ShipRange, ShipSearch};

fn at(label: &str) -> Coordinate {
    label.parse().unwrap()
}

fn range(from: &str, to: &str) -> ShipRange {
    ShipRange::new(at(from), at(to)).unwrap()
}

#[test]
fn horizontal_ship_is_complete_from_any_cell() {
    let mut grid = Grid::water();
    for label in ["C4", "D4", "E4"] {
        grid[at(label)] = CellState::Ship;
    }
    for label in ["C4", "D4", "E4"] {
        let found = find_ship(&grid, at(label));
        assert_eq!(found, ShipSearch::Complete(range("C4", "E4")));
        assert_eq!(found.range().map(|r| r.len()), Some(3));
    }
}

#[test]
fn vertical_ship_uses_the_vertical_run() {
    let mut grid = Grid::water();
    for label in ["B2", "B3", "B4", "B5"] {
        grid[at(label)] = CellState::Ship;
    }
    assert_eq!(find_ship(&grid, at("B3")), ShipSearch::Complete(range("B2", "B5")));
}

#[test]
fn board_edges_bound_a_ship() {
    let mut grid = Grid::water();
    for label in ["H10", "I10", "J10"] {
        grid[at(label)] = CellState::Ship;
    }
    assert_eq!(find_ship(&grid, at("J10")), ShipSearch::Complete(range("H10", "J10")));
}

#[test]
fn water_and_unknown_cells_hold_no_ship() {
    let grid = Grid::water();
    assert_eq!(find_ship(&grid, at("A1")), ShipSearch::NoShip);
    assert_eq!(find_ship(&Grid::unknown(), at("A1")), ShipSearch::NoShip);

    let mut view = Grid::unknown();
    view[at("A1")] = CellState::SunkenShip;
    assert_eq!(find_ship(&view, at("A1")), ShipSearch::NoShip);
}

#[test]
fn unknown_neighbour_makes_the_result_partial() {
    let mut view = Grid::unknown();
    view[at("A1")] = CellState::Water;
    view[at("B1")] = CellState::HitShip;
    view[at("C1")] = CellState::HitShip;
    // D1 is still unknown
    assert_eq!(find_ship(&view, at("B1")), ShipSearch::Partial(range("B1", "C1")));

    view[at("D1")] = CellState::Water;
    assert_eq!(find_ship(&view, at("C1")), ShipSearch::Complete(range("B1", "C1")));
}

#[test]
fn single_hit_is_judged_by_its_vertical_run() {
    let mut view = Grid::unknown();
    view[at("E5")] = CellState::HitShip;
    view[at("D5")] = CellState::Water;
    view[at("F5")] = CellState::Water;
    assert_eq!(find_ship(&view, at("E5")), ShipSearch::Partial(ShipRange::single(at("E5"))));

    view[at("E4")] = CellState::Water;
    view[at("E6")] = CellState::Water;
    assert_eq!(find_ship(&view, at("E5")), ShipSearch::Complete(ShipRange::single(at("E5"))));
}

#[test]
fn single_hit_ignores_unknown_horizontal_neighbours() {
    let mut view = Grid::unknown();
    view[at("E5")] = CellState::HitShip;
    view[at("E4")] = CellState::Water;
    view[at("E6")] = CellState::Water;
    // D5 and F5 are still unknown
    assert_eq!(find_ship(&view, at("E5")), ShipSearch::Complete(ShipRange::single(at("E5"))));
}

#[test]
fn sunken_cells_extend_the_run() {
    let mut view = Grid::water();
    view[at("A3")] = CellState::SunkenShip;
    view[at("B3")] = CellState::HitShip;
    view[at("C3")] = CellState::HitShip;
    assert_eq!(find_ship(&view, at("C3")), ShipSearch::Complete(range("A3", "C3")));
}
