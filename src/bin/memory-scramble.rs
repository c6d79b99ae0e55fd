//! Load a board file and drive it with simulated players.
//!
//! ```text
//! memory-scramble boards/perfect.txt --players 10 --flips 100
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use memory_scramble::board::Board;
use memory_scramble::game::Game;
use memory_scramble::sim::{self, SimConfig};

#[derive(Debug, Parser)]
#[command(version, about = "Run a random-play simulation against a Memory Scramble board")]
struct Args {
    /// Board file: a `ROWSxCOLUMNS` header followed by the card values.
    board_file: PathBuf,

    /// Concurrent simulated players.
    #[arg(long, default_value_t = 10)]
    players: usize,

    /// Flips issued by each player.
    #[arg(long, default_value_t = 100)]
    flips: usize,

    /// Root seed for every player's random stream.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Upper bound of the pause between a player's requests.
    #[arg(long, default_value_t = 2)]
    max_delay_ms: u64,

    /// Threads issuing watch requests while the players run.
    #[arg(long, default_value_t = 0)]
    watchers: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let board = Board::from_file(&args.board_file)
        .with_context(|| format!("loading board from {}", args.board_file.display()))?;
    info!("loaded board:\n{board}");

    let game = Game::new(board).context("starting board worker")?;
    let config = SimConfig::default()
        .with_players(args.players)
        .with_flips(args.flips)
        .with_seed(args.seed)
        .with_max_delay(Duration::from_millis(args.max_delay_ms))
        .with_watchers(args.watchers);

    let report = sim::run(&game, &config).context("simulation failed")?;

    for stats in &report.players {
        println!(
            "player {} average response time: {:.3} ms",
            stats.player,
            stats.mean_latency().as_secs_f64() * 1000.0
        );
    }
    info!(
        requests = report.total_requests(),
        failures = report.total_failures(),
        watch_responses = report.watch_responses,
        "final board:\n{}",
        report.final_board
    );

    Ok(())
}
