//! Core types shared by every layer: player ids, positions, configuration, RNG.

pub mod player;
pub mod position;
pub mod config;
pub mod rng;

pub use player::PlayerId;
pub use position::Position;
pub use config::SchedulerConfig;
pub use rng::GameRng;
