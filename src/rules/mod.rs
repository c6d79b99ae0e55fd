//! Game rules: pure, synchronous transitions over the board.
//!
//! - `flip`: first and second flips of a turn, and the finalize sweep
//! - `substitute`: staged, atomically committed value rewrite
//! - `Outcome`: `Done | Retry | Fail`, the tag the scheduler branches on
//!
//! Nothing here blocks, logs or owns a thread. The scheduler decides what
//! a `Retry` means.

pub mod flip;
pub mod outcome;
pub mod substitute;

pub use flip::{controlled, finalize_turn, flip};
pub use outcome::{Blocker, Outcome};
pub use substitute::{stage, substitute, PendingSubstitution};
