use super::ship::ShipClass;

/// Side length of the square board.
pub const BOARD_SIZE: u8 = 10;
/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;
/// Longest ship the placement engine accepts.
pub const MAX_SHIP_LENGTH: usize = BOARD_SIZE as usize;

pub const NUM_SHIPS: usize = 5;
pub const FLEET: [ShipClass; NUM_SHIPS] = [
    ShipClass::new("Carrier", 5),
    ShipClass::new("Battleship", 4),
    ShipClass::new("Cruiser", 3),
    ShipClass::new("Submarine", 3),
    ShipClass::new("Destroyer", 2),
];

/// Total number of ship cells in the standard fleet.
pub const FLEET_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// A game whose log reaches this many shots is a draw.
pub const MAX_SHOTS: usize = 200;

/// Random draws the filler makes per ship before giving up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Ship lengths of the standard fleet, in placement order.
pub fn fleet_lengths() -> [usize; NUM_SHIPS] {
    FLEET.map(|class| class.length())
}
