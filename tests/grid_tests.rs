use broadside::core::{BoardError, CellState, Coordinate, Grid};

fn at(label: &str) -> Coordinate {
    label.parse().unwrap()
}

#[test]
fn compact_form_round_trips() -> anyhow::Result<()> {
    let mut grid = Grid::unknown();
    grid[at("A1")] = CellState::Water;
    grid[at("B1")] = CellState::Ship;
    grid[at("C1")] = CellState::HitShip;
    grid[at("J10")] = CellState::SunkenShip;

    let text = grid.to_compact();
    assert_eq!(text.len(), 100);
    assert!(text.starts_with("WSH "));
    assert!(text.ends_with('X'));
    assert_eq!(text.parse::<Grid>()?, grid);
    Ok(())
}

#[test]
fn compact_form_rejects_bad_input() {
    assert_eq!(
        Grid::from_compact(&"W".repeat(99)),
        Err(BoardError::InvalidGridLength(99))
    );
    assert_eq!(
        Grid::from_compact(&"W".repeat(101)),
        Err(BoardError::InvalidGridLength(101))
    );
    let mut text = "W".repeat(99);
    text.push('?');
    assert_eq!(Grid::from_compact(&text), Err(BoardError::InvalidCellCode('?')));
}

#[test]
fn wire_bytes_use_cell_codes() {
    let mut grid = Grid::water();
    grid[at("A1")] = CellState::Unknown;
    let bytes = grid.to_bytes();
    assert_eq!(bytes.len(), 100);
    assert_eq!(bytes[0], 4);
    assert!(bytes[1..].iter().all(|&b| b == 0));
    assert_eq!(Grid::from_bytes(&bytes).unwrap(), grid);

    let mut bad = bytes.clone();
    bad[5] = 7;
    assert_eq!(Grid::from_bytes(&bad), Err(BoardError::InvalidCellByte(7)));
    assert_eq!(Grid::from_bytes(&bytes[..50]), Err(BoardError::InvalidGridLength(50)));
}

#[test]
fn clear_resets_every_cell() {
    let mut grid = Grid::water();
    grid[at("D4")] = CellState::Ship;
    grid.clear(CellState::Unknown);
    assert_eq!(grid.count(CellState::Unknown), 100);
}

#[test]
fn has_lost_counts_hit_and_sunk_cells() {
    let mut grid = Grid::unknown();
    let fleet = [2, 1];
    grid[at("A1")] = CellState::SunkenShip;
    grid[at("B1")] = CellState::SunkenShip;
    assert!(!grid.has_lost(&fleet).unwrap());
    grid[at("E5")] = CellState::HitShip;
    assert!(grid.has_lost(&fleet).unwrap());
    assert_eq!(grid.has_lost(&[]), Err(BoardError::EmptyFleet));
}

#[test]
fn rendering_draws_a_box() {
    let rendered = Grid::water().to_string();
    let lines: Vec<&str> = rendered.lines().collect();
    // top border, 10 rows, 9 separators, bottom border
    assert_eq!(lines.len(), 21);
    assert!(lines[0].starts_with('┏') && lines[0].ends_with('┓'));
    assert!(lines[20].starts_with('┗') && lines[20].ends_with('┛'));
    assert_eq!(lines[1].matches("~~").count(), 10);
}
