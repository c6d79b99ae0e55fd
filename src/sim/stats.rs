//! Per-player and whole-run simulation statistics.

use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::PlayerId;
use crate::error::GameError;

/// Request statistics for one simulated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player: PlayerId,

    /// Flip requests issued, cleanup excluded.
    pub requests: u32,

    /// Requests that returned an error.
    pub failures: u32,

    /// Failure counts keyed by [`GameError::kind`].
    pub failures_by_kind: FxHashMap<String, u32>,

    /// Sum of request latencies (microseconds).
    pub total_latency_us: u64,

    /// Slowest single request (microseconds).
    pub max_latency_us: u64,
}

impl PlayerStats {
    #[must_use]
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            requests: 0,
            failures: 0,
            failures_by_kind: FxHashMap::default(),
            total_latency_us: 0,
            max_latency_us: 0,
        }
    }

    /// Record one completed request.
    pub fn record(&mut self, latency: Duration, error: Option<&GameError>) {
        let micros = u64::try_from(latency.as_micros()).unwrap_or(u64::MAX);
        self.requests += 1;
        self.total_latency_us = self.total_latency_us.saturating_add(micros);
        self.max_latency_us = self.max_latency_us.max(micros);

        if let Some(err) = error {
            self.failures += 1;
            *self.failures_by_kind.entry(err.kind().to_string()).or_default() += 1;
        }
    }

    /// Mean request latency (zero when no requests were made).
    #[must_use]
    pub fn mean_latency(&self) -> Duration {
        if self.requests == 0 {
            Duration::ZERO
        } else {
            Duration::from_micros(self.total_latency_us / u64::from(self.requests))
        }
    }

    #[must_use]
    pub fn max_latency(&self) -> Duration {
        Duration::from_micros(self.max_latency_us)
    }
}

/// Outcome of a simulation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimReport {
    /// One entry per player, in spawn order.
    pub players: Vec<PlayerStats>,

    /// Views returned to watcher threads.
    pub watch_responses: u64,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,

    /// Board after every player has cleaned up.
    pub final_board: Board,
}

impl SimReport {
    /// Total flip requests across all players.
    #[must_use]
    pub fn total_requests(&self) -> u64 {
        self.players.iter().map(|p| u64::from(p.requests)).sum()
    }

    #[must_use]
    pub fn total_failures(&self) -> u64 {
        self.players.iter().map(|p| u64::from(p.failures)).sum()
    }

    /// Failure counts by kind, summed over players.
    #[must_use]
    pub fn failures_by_kind(&self) -> FxHashMap<String, u32> {
        let mut totals = FxHashMap::default();
        for stats in &self.players {
            for (kind, count) in &stats.failures_by_kind {
                *totals.entry(kind.clone()).or_default() += count;
            }
        }
        totals
    }
}
