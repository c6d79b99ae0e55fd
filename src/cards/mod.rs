//! Card model: face values and per-cell card records.
//!
//! ## Key Types
//!
//! - `CardValue`: validated face token (`[^\s]+`)
//! - `CardState`: `down`, `up` or `removed`
//! - `Card`: value, state, controlling player and turn bookkeeping

pub mod card;
pub mod value;

pub use card::{Card, CardState};
pub use value::CardValue;
