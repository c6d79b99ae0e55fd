//! Board model: the grid of cards, its invariants, and its text views.
//!
//! The board has no game behavior of its own. It is built once at startup,
//! mutated only by the rules engine, and the rules engine is only ever
//! invoked by the scheduler's worker.

mod grid;
mod invariants;
mod parse;
mod view;

pub use grid::Board;
pub use invariants::MAX_CONTROLLED;
