//! Terminal output for finished games.

use crate::arena::MatchReport;
use crate::core::{Game, Winner, FLEET};
use crate::player::PlayerRegistry;

/// One line describing who won.
pub fn winner_message(report: &MatchReport, registry: &PlayerRegistry) -> String {
    let [p1, p2] = report.players.map(|p| registry.label(p));
    match report.winner {
        Winner::Player1 => format!("{p1} (seat 1) beats {p2} after {} shots", report.shots),
        Winner::Player2 => format!("{p2} (seat 2) beats {p1} after {} shots", report.shots),
        Winner::Draw => format!("{p1} and {p2} draw after {} shots", report.shots),
        Winner::NoWinner => format!("{p1} vs {p2} is still running"),
    }
}

pub fn print_report(report: &MatchReport, registry: &PlayerRegistry) {
    println!("game {}", report.game_id);
    println!("  {}", winner_message(report, registry));
    println!(
        "  hits: seat 1 {} / seat 2 {}",
        report.hits[0], report.hits[1]
    );
}

/// The standard fleet as `Carrier (5), Battleship (4), ...`.
pub fn fleet_summary() -> String {
    FLEET
        .iter()
        .map(|class| format!("{} ({})", class.name(), class.length()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Both fleets and what each seat saw of the other.
pub fn print_game(game: &Game, registry: &PlayerRegistry) -> anyhow::Result<()> {
    println!("Fleet: {}", fleet_summary());
    for seat in [1u8, 2] {
        let name = registry.label(game.player(seat)?);
        println!("\nSeat {seat} ({name}) fleet:");
        print!("{}", game.board(seat)?);
        println!("Seat {seat} ({name}) view of the opponent:");
        print!("{}", game.shooting_board(seat)?);
    }
    Ok(())
}

pub fn print_players(registry: &PlayerRegistry) {
    println!("Available players:");
    for (index, name) in registry.names() {
        println!("  {index:>2}  {name}");
    }
}
