//! Threads that drive a game with random flips.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::config::SimConfig;
use super::stats::{PlayerStats, SimReport};
use crate::core::{GameRng, PlayerId};
use crate::error::{GameError, SimError};
use crate::game::Game;
use crate::rules;

/// Play `config.players` random players against `game` until each has made
/// its flips and released its cards.
///
/// # Errors
///
/// Fails if a thread cannot be spawned or panics, or if the scheduler stops
/// before the final snapshot.
pub fn run(game: &Game, config: &SimConfig) -> Result<SimReport, SimError> {
    info!(
        players = config.players,
        flips = config.flips_per_player,
        watchers = config.watchers,
        seed = config.seed,
        "starting simulation"
    );
    let started = Instant::now();
    let root = GameRng::new(config.seed);

    let players = (0..config.players)
        .map(|i| {
            let player = PlayerId::new(format!("player-{i}"));
            let rng = root.for_context(player.as_str());
            let (game, flips, max_delay) = (game.clone(), config.flips_per_player, config.max_delay);
            thread::Builder::new()
                .name(player.to_string())
                .spawn(move || play(&game, player, rng, flips, max_delay))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let done = Arc::new(AtomicBool::new(false));
    let watchers = (0..config.watchers)
        .map(|i| {
            let watcher = PlayerId::new(format!("watcher-{i}"));
            let (game, done) = (game.clone(), Arc::clone(&done));
            thread::Builder::new()
                .name(watcher.to_string())
                .spawn(move || watch(&game, &watcher, &done))
        })
        .collect::<Result<Vec<_>, _>>()?;

    nudge_until_finished(game, &players, config.nudge_interval)?;
    done.store(true, Ordering::SeqCst);
    nudge_until_finished(game, &watchers, config.nudge_interval)?;

    let players = join_all(players)?;
    let watch_responses: u64 = join_all(watchers)?.into_iter().sum();
    let final_board = game.snapshot()?;
    let elapsed = started.elapsed();

    let report = SimReport {
        players,
        watch_responses,
        elapsed,
        final_board,
    };
    info!(
        requests = report.total_requests(),
        failures = report.total_failures(),
        elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        "simulation finished"
    );
    Ok(report)
}

fn play(game: &Game, player: PlayerId, mut rng: GameRng, flips: usize, max_delay: Duration) -> PlayerStats {
    let mut stats = PlayerStats::new(player.clone());

    for _ in 0..flips {
        let pos = rng.gen_position(game.rows(), game.columns());
        let started = Instant::now();
        let result = game.flip(&player, pos.row, pos.col);
        stats.record(started.elapsed(), result.as_ref().err());

        if matches!(result, Err(GameError::SchedulerStopped)) {
            break;
        }
        thread::sleep(rng.gen_delay(max_delay));
    }

    release(game, &player);
    debug!(
        %player,
        requests = stats.requests,
        failures = stats.failures,
        mean_us = u64::try_from(stats.mean_latency().as_micros()).unwrap_or(u64::MAX),
        "player finished"
    );
    stats
}

/// Give up every card `player` still controls.
///
/// One held card: flipping it again as a second card fails and releases
/// it. Two held cards are a finished match: flipping either starts a new
/// turn, the sweep removes the pair and the flip fails on the empty cell.
fn release(game: &Game, player: &PlayerId) {
    let Ok(board) = game.snapshot() else {
        return;
    };
    if let Some(pos) = rules::controlled(&board, player).first() {
        // The failure is the point.
        let _ = game.flip(player, pos.row, pos.col);
    }
}

fn watch(game: &Game, watcher: &PlayerId, done: &AtomicBool) -> u64 {
    let mut responses = 0;
    while !done.load(Ordering::SeqCst) {
        if game.watch(watcher).is_err() {
            break;
        }
        responses += 1;
    }
    responses
}

/// Re-admit parked requests until every thread in `handles` has exited.
///
/// A flip parked behind a card is re-admitted only after a later flip, and
/// near the end of a run there may be none.
fn nudge_until_finished<T>(game: &Game, handles: &[JoinHandle<T>], interval: Duration) -> Result<(), GameError> {
    while handles.iter().any(|h| !h.is_finished()) {
        game.scheduler().wake_watchers()?;
        thread::sleep(interval);
    }
    Ok(())
}

fn join_all<T>(handles: Vec<JoinHandle<T>>) -> Result<Vec<T>, SimError> {
    handles
        .into_iter()
        .map(|handle| {
            let name = handle.thread().name().unwrap_or("<unnamed>").to_string();
            handle.join().map_err(|_| SimError::Panicked { name })
        })
        .collect()
}
