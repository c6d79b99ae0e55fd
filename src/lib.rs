//! # memory-scramble
//!
//! Concurrency core for a multiplayer Memory Scramble board.
//!
//! ## Design Principles
//!
//! 1. **Single Writer**: One worker thread owns the board. Every read and
//!    write is a job submitted to it, so there is no per-card locking.
//!
//! 2. **Retry Is Data**: A flip that must wait for another player's card
//!    returns `Outcome::Retry`. The scheduler parks it and runs it again
//!    after the next flip or mutation instead of spinning.
//!
//! 3. **Derived Turn State**: A player's turn is whatever face-up cards it
//!    controls, found by scanning the grid. No per-player index exists.
//!
//! ## Architecture
//!
//! - **Persistent Grid**: Cells live in an `im::Vector`, so snapshots for
//!   readers and tests are O(1) clones.
//!
//! - **Typed Results**: `Scheduler::submit` is generic over the result
//!   type; a job owns its one-shot result slot.
//!
//! ## Modules
//!
//! - `core`: Player ids, positions, scheduler configuration, RNG
//! - `cards`: Card values and per-cell card records
//! - `board`: The grid, invariant checks, rendering and parsing
//! - `rules`: Flip and substitute transitions
//! - `scheduler`: Worker thread and its three queues
//! - `game`: Public operations (`look`, `flip`, `substitute`, `watch`)
//! - `sim`: Concurrent random-play simulation
//! - `error`: Error types

pub mod core;
pub mod cards;
pub mod board;
pub mod rules;
pub mod scheduler;
pub mod game;
pub mod sim;
pub mod error;

// Re-export commonly used types
pub use crate::core::{GameRng, PlayerId, Position, SchedulerConfig};

pub use crate::cards::{Card, CardState, CardValue};

pub use crate::board::{Board, MAX_CONTROLLED};

pub use crate::rules::{Blocker, Outcome, PendingSubstitution};

pub use crate::scheduler::{OpKind, Scheduler};

pub use crate::game::Game;

pub use crate::sim::{PlayerStats, SimConfig, SimReport};

pub use crate::error::{BoardParseError, GameError, InvariantViolation, SimError, StartError};
