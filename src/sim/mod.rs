//! Concurrent random-play simulation.
//!
//! Drives a [`Game`](crate::game::Game) with many player threads issuing
//! random flips, the way a load test would drive a server, and reports
//! per-player latency.

mod config;
mod runner;
mod stats;

pub use config::SimConfig;
pub use runner::run;
pub use stats::{PlayerStats, SimReport};
