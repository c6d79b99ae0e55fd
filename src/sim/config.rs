//! Simulation configuration parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Random-play simulation parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Concurrent simulated players, one thread each.
    pub players: usize,

    /// Random flips each player issues before cleaning up.
    pub flips_per_player: usize,

    /// Root seed; every player derives its own stream from it.
    pub seed: u64,

    /// Upper bound of the random pause between a player's requests.
    pub max_delay: Duration,

    /// Threads issuing `watch` requests until the players finish.
    pub watchers: usize,

    /// How often the coordinator nudges parked requests.
    /// A flip can stay parked when no one else flips; this bounds that.
    pub nudge_interval: Duration,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            players: 10,
            flips_per_player: 100,
            seed: 42,
            max_delay: Duration::from_millis(2),
            watchers: 0,
            nudge_interval: Duration::from_millis(5),
        }
    }
}

impl SimConfig {
    /// Set the number of players.
    #[must_use]
    pub fn with_players(mut self, players: usize) -> Self {
        self.players = players;
        self
    }

    /// Set the number of flips per player.
    #[must_use]
    pub fn with_flips(mut self, flips: usize) -> Self {
        self.flips_per_player = flips;
        self
    }

    /// Set the root seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    #[must_use]
    pub fn with_watchers(mut self, watchers: usize) -> Self {
        self.watchers = watchers;
        self
    }

    #[must_use]
    pub fn with_nudge_interval(mut self, interval: Duration) -> Self {
        self.nudge_interval = interval;
        self
    }
}
