use broadside::prelude::*;
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if !(3..=4).contains(&args.len()) {
        eprintln!("Usage: {} <player1> <player2> [seed]", args[0]);
        std::process::exit(1);
    }
    let registry = PlayerRegistry::builtin();
    let resolve = |name: &str| {
        registry
            .resolve(name)
            .ok_or_else(|| anyhow::anyhow!("unknown player {:?}", name))
    };
    let p1 = resolve(&args[1])?;
    let p2 = resolve(&args[2])?;
    let filler = match args.get(3) {
        Some(seed) => RandomFiller::seeded(seed.parse()?),
        None => RandomFiller::new(),
    };

    let mut factory = RandomGameFactory::new(filler);
    let game = run_local_match(&registry, &mut factory, p1, p2).await?;
    let report = MatchReport::from_game(&game)?;

    let result = json!({
        "game_id": report.game_id,
        "player1": {"name": registry.label(p1), "hits": report.hits[0]},
        "player2": {"name": registry.label(p2), "hits": report.hits[1]},
        "shots": report.shots,
        "winner": report.winner,
        "winning_player": report.winning_player().map(|p| registry.label(p)),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
