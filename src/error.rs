//! Error types.
//!
//! - [`GameError`]: failures surfaced to the caller of a game operation
//! - [`BoardParseError`]: a board file or value list could not be turned into a board
//! - [`InvariantViolation`]: the board broke its own representation rules
//! - [`StartError`]: a board worker could not be started
//! - [`SimError`]: the random-play simulation could not run to completion

use std::path::PathBuf;

use crate::core::{PlayerId, Position};

/// Failure returned to the caller of a game operation.
///
/// Partial side effects are not rolled back: a failed second flip has
/// already relinquished the player's first card when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("{position} is out of bounds for a {rows}x{columns} board")]
    OutOfBounds {
        position: Position,
        rows: usize,
        columns: usize,
    },

    #[error("no card at {position}")]
    NoCard { position: Position },

    #[error("no card at second-card location {position}; first card relinquished")]
    SecondCardGone { position: Position },

    #[error("second card at {position} already controlled by {owner}; first card relinquished")]
    SecondCardClaimed { position: Position, owner: PlayerId },

    #[error("scheduler is not running")]
    SchedulerStopped,
}

impl GameError {
    /// Short stable label, for tallies and structured logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::OutOfBounds { .. } => "out-of-bounds",
            GameError::NoCard { .. } => "no-card",
            GameError::SecondCardGone { .. } => "second-card-gone",
            GameError::SecondCardClaimed { .. } => "second-card-claimed",
            GameError::SchedulerStopped => "scheduler-stopped",
        }
    }
}

/// A board description that cannot become a valid [`Board`](crate::board::Board).
#[derive(Debug, thiserror::Error)]
pub enum BoardParseError {
    #[error("board description is empty")]
    Empty,

    #[error("bad board header {header:?}, expected ROWSxCOLUMNS")]
    BadHeader { header: String },

    #[error("board must have at least one row and one column, got {rows}x{columns}")]
    ZeroDimension { rows: usize, columns: usize },

    #[error("expected {expected} cards, found {found}")]
    WrongCardCount { expected: usize, found: usize },

    #[error("invalid card value {value:?}: must be non-empty with no whitespace")]
    InvalidValue { value: String },

    #[error("cannot read board file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A broken board or card invariant. Indicates a programming defect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("board has {found} cells, expected {rows}x{columns}")]
    Dimensions {
        rows: usize,
        columns: usize,
        found: usize,
    },

    #[error("card at {position} is {state} but owned by {owner}")]
    OwnerWithoutUp {
        position: Position,
        state: &'static str,
        owner: PlayerId,
    },

    #[error("face-down card at {position} still carries turn bookkeeping")]
    BookkeepingOnDown { position: Position },

    #[error("{player} controls {count} face-up cards")]
    TooManyControlled { player: PlayerId, count: usize },

    #[error("card at {position} has an uncommitted display mask")]
    DanglingMask { position: Position },
}

/// A board worker could not be started.
#[derive(Debug, thiserror::Error)]
pub enum StartError {
    #[error("board cannot start a game")]
    InvalidBoard(#[from] InvariantViolation),

    #[error("failed to spawn board worker thread")]
    Spawn(#[from] std::io::Error),
}

/// The simulation could not run to completion.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("failed to spawn simulation thread")]
    Spawn(#[from] std::io::Error),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("simulation thread {name} panicked")]
    Panicked { name: String },
}
