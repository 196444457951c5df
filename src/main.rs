use std::sync::Arc;
use std::time::Duration;

use broadside::prelude::*;
use broadside::transport::is_closed;
use broadside::{init_logging, ui};

use clap::{Parser, Subcommand};
use log::{error, info, warn, LevelFilter};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level, overrides BROADSIDE_LOG (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    log_level: Option<LevelFilter>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Host games and wait for an agent host to connect.
    Referee {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
        /// Player in seat 1, by registry name or index.
        #[arg(long, default_value = "probability")]
        player1: String,
        /// Player in seat 2, by registry name or index.
        #[arg(long, default_value = "scatter")]
        player2: String,
        #[arg(long, default_value_t = 1)]
        games: usize,
        #[arg(long, help = "Fix RNG seed for reproducible fleets (e.g., --seed 12345)")]
        seed: Option<u64>,
        /// Give up if no agent host connects within this many seconds.
        #[arg(long)]
        wait_secs: Option<u64>,
    },
    /// Connect to a referee and run agents on its behalf.
    AgentHost {
        #[arg(long, default_value = "127.0.0.1:8080")]
        connect: String,
        /// Wall-clock budget for one agent turn, in milliseconds.
        #[arg(long, default_value_t = 500)]
        budget_ms: u64,
    },
    /// Play one game in-process.
    Local {
        #[arg(long, default_value = "probability")]
        player1: String,
        #[arg(long, default_value = "scatter")]
        player2: String,
        #[arg(long, help = "Fix RNG seed for reproducible fleets (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// List the registered players.
    Players,
}

fn resolve(registry: &PlayerRegistry, name: &str) -> anyhow::Result<usize> {
    registry.resolve(name).ok_or_else(|| {
        anyhow::anyhow!("unknown player {:?}; run `broadside players` for the list", name)
    })
}

fn filler(seed: Option<u64>) -> RandomFiller {
    match seed {
        Some(s) => {
            info!("Using fixed seed: {} (fleets will be reproducible)", s);
            RandomFiller::seeded(s)
        }
        None => RandomFiller::new(),
    }
}

async fn accept_agent_hosts(listener: TcpListener, referee: SharedReferee, config: TransportConfig) {
    loop {
        let (stream, addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("accept failed: {}", e);
                continue;
            }
        };
        if referee.lock().await.is_connected() {
            warn!("declining agent host {}: one is already attached", addr);
            continue;
        }
        info!("agent host connected from {}", addr);
        let referee = referee.clone();
        tokio::spawn(async move {
            let _ = stream.set_nodelay(true);
            let transport = TcpTransport::with_config(stream, config);
            match serve_referee(transport, referee).await {
                Ok(()) => info!("agent host {} left", addr),
                Err(e) => error!("session with {} ended: {:#}", addr, e),
            }
        });
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);
    let registry = PlayerRegistry::builtin();

    match cli.command {
        Commands::Referee {
            bind,
            player1,
            player2,
            games,
            seed,
            wait_secs,
        } => {
            let p1 = resolve(&registry, &player1)?;
            let p2 = resolve(&registry, &player2)?;
            let factory = RandomGameFactory::new(filler(seed));
            let referee: SharedReferee =
                Arc::new(Mutex::new(RefereeConnection::new(Box::new(factory))));

            let listener = TcpListener::bind(&bind).await?;
            println!("Referee listening on {}, waiting for an agent host...", bind);
            tokio::spawn(accept_agent_hosts(
                listener,
                referee.clone(),
                TransportConfig::default(),
            ));
            wait_for_agent_host(&referee, wait_secs.map(Duration::from_secs)).await?;

            let mut reports: Vec<MatchReport> = Vec::with_capacity(games);
            for _ in 0..games {
                let report = run_remote_match(&referee, p1, p2).await?;
                ui::print_report(&report, &registry);
                reports.push(report);
            }
            let wins = |player| {
                reports
                    .iter()
                    .filter(|r| r.winning_player() == Some(player))
                    .count()
            };
            println!(
                "\n{} won {}, {} won {}, {} drawn",
                registry.label(p1),
                wins(p1),
                registry.label(p2),
                wins(p2),
                reports.iter().filter(|r| r.winning_player().is_none()).count()
            );
            referee.lock().await.disconnect();
        }
        Commands::AgentHost { connect, budget_ms } => {
            println!("Connecting to referee at {}...", connect);
            let stream = TcpStream::connect(&connect).await?;
            stream.set_nodelay(true)?;
            let transport = TcpTransport::new(stream);
            let agent = AgentConnection::new(
                Arc::new(registry),
                AgentConfig {
                    turn_budget: Duration::from_millis(budget_ms),
                },
            );
            match serve_agent(transport, agent).await {
                Ok(()) => println!("Referee closed the session."),
                Err(e) if is_closed(&e) => println!("Referee closed the session."),
                Err(e) => return Err(e),
            }
        }
        Commands::Local {
            player1,
            player2,
            seed,
        } => {
            let p1 = resolve(&registry, &player1)?;
            let p2 = resolve(&registry, &player2)?;
            let mut factory = RandomGameFactory::new(filler(seed));
            let game = run_local_match(&registry, &mut factory, p1, p2).await?;
            ui::print_game(&game, &registry)?;
            let report = MatchReport::from_game(&game)?;
            println!();
            ui::print_report(&report, &registry);
        }
        Commands::Players => ui::print_players(&registry),
    }

    Ok(())
}
