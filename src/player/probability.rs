// Probability-based targeting over the shooter's view of the board.

use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::{Fire, ShotContext, Shooter};
use crate::core::{fleet_lengths, Axis, CellState, Coordinate, Grid, BOARD_SIZE, CELL_COUNT};

const SIDE: usize = BOARD_SIZE as usize;

/// Placements covering more observed hits get dramatically more weight, so
/// cells next to a wounded ship stand out.
const HIT_BIAS: f64 = 10.0;

/// Lower temperature biases sampling towards higher probability cells.
pub const TEMPERATURE: f64 = 0.5;

/// Cells that cannot hold an unsunk ship: water, sunken ships and the halo
/// around sunken ships (ships never touch).
fn blocked_cells(view: &Grid) -> [bool; CELL_COUNT] {
    let mut blocked = [false; CELL_COUNT];
    for (at, state) in view.iter() {
        match state {
            CellState::Water => blocked[at.index()] = true,
            CellState::SunkenShip => {
                blocked[at.index()] = true;
                for n in at.neighbours() {
                    blocked[n.index()] = true;
                }
            }
            _ => {}
        }
    }
    blocked
}

/// Length of the sunken ship whose top-left cell is `at`, if `at` is one.
fn sunken_run_at(view: &Grid, at: Coordinate) -> Option<usize> {
    let sunk = |c: Option<Coordinate>| c.is_some_and(|c| view[c] == CellState::SunkenShip);
    if view[at] != CellState::SunkenShip
        || sunk(at.try_previous(Axis::Horizontal))
        || sunk(at.try_previous(Axis::Vertical))
    {
        return None;
    }
    let axis = if sunk(at.try_next(Axis::Horizontal)) {
        Axis::Horizontal
    } else {
        Axis::Vertical
    };
    let mut length = 1;
    let mut current = at;
    while let Some(next) = current.try_next(axis).filter(|&c| view[c] == CellState::SunkenShip) {
        length += 1;
        current = next;
    }
    Some(length)
}

/// Fleet lengths not yet accounted for by sunken ships in `view`.
pub fn remaining_lengths(view: &Grid) -> Vec<usize> {
    let mut remaining = fleet_lengths().to_vec();
    for at in Coordinate::all() {
        if let Some(length) = sunken_run_at(view, at) {
            if let Some(pos) = remaining.iter().position(|&l| l == length) {
                remaining.remove(pos);
            }
        }
    }
    remaining
}

/// Relative likelihood of each cell holding part of a remaining ship.
///
/// Every legal placement of every remaining length is counted; placements
/// overlapping known hits are weighted up. Only unknown cells receive weight.
/// The result sums to 1 unless the view has no unknown cells.
pub fn heat_map(view: &Grid, remaining: &[usize]) -> [f64; CELL_COUNT] {
    let blocked = blocked_cells(view);
    let mut hits = [false; CELL_COUNT];
    let mut unknown = [false; CELL_COUNT];
    for (at, state) in view.iter() {
        hits[at.index()] = state == CellState::HitShip;
        unknown[at.index()] = state == CellState::Unknown;
    }
    let mut matrix = [0.0f64; CELL_COUNT];

    for &len in remaining {
        if len == 0 || len > SIDE {
            continue;
        }
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let (max_col, max_row) = match axis {
                Axis::Horizontal => (SIDE - len, SIDE - 1),
                Axis::Vertical => (SIDE - 1, SIDE - len),
            };
            for r in 0..=max_row {
                for c in 0..=max_col {
                    let cells = (0..len).map(|k| match axis {
                        Axis::Horizontal => r * SIDE + c + k,
                        Axis::Vertical => (r + k) * SIDE + c,
                    });
                    if cells.clone().any(|i| blocked[i]) {
                        continue;
                    }
                    let n_hits = cells.clone().filter(|&i| hits[i]).count();
                    let weight = HIT_BIAS.powi(n_hits as i32);
                    for i in cells.filter(|&i| unknown[i]) {
                        matrix[i] += weight;
                    }
                }
            }
        }
    }

    normalize(view, matrix)
}

fn normalize(view: &Grid, mut matrix: [f64; CELL_COUNT]) -> [f64; CELL_COUNT] {
    let total: f64 = matrix.iter().sum();
    if total == 0.0 {
        // nothing fits: spread evenly over whatever is still unknown
        let unknown = view.count(CellState::Unknown);
        if unknown > 0 {
            let uniform = 1.0 / unknown as f64;
            for (at, state) in view.iter() {
                if state == CellState::Unknown {
                    matrix[at.index()] = uniform;
                }
            }
        }
        return matrix;
    }
    for v in matrix.iter_mut() {
        *v /= total;
    }
    matrix
}

/// Sample a cell from `pdf`, sharpened by `temperature`.
pub fn sample<R: Rng + ?Sized>(pdf: &[f64; CELL_COUNT], temperature: f64, rng: &mut R) -> Coordinate {
    let mut adjusted = [0.0f64; CELL_COUNT];
    let mut total = 0.0;
    for (a, &p) in adjusted.iter_mut().zip(pdf.iter()) {
        *a = p.powf(1.0 / temperature);
        total += *a;
    }
    if total == 0.0 || !total.is_finite() {
        return Coordinate::new(rng.random_range(0..CELL_COUNT)).unwrap_or(Coordinate::FIRST);
    }
    let threshold: f64 = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (at, &v) in Coordinate::all().zip(adjusted.iter()) {
        cumulative += v;
        if threshold < cumulative {
            return at;
        }
    }
    Coordinate::LAST
}

/// Samples from the placement heat map of the remaining fleet.
pub struct ProbabilityShooter {
    rng: SmallRng,
}

impl ProbabilityShooter {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for ProbabilityShooter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Shooter for ProbabilityShooter {
    async fn shoot(&mut self, ctx: &ShotContext, fire: Fire<'_>) -> anyhow::Result<()> {
        let pdf = heat_map(&ctx.board, &remaining_lengths(&ctx.board));
        let target = sample(&pdf, TEMPERATURE, &mut self.rng);
        fire.at(target).await?;
        Ok(())
    }
}
