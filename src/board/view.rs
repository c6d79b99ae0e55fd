//! Text view of the board from one player's perspective.
//!
//! ```text
//! 2x2
//! my A
//! down
//! up B
//! none
//! ```
//!
//! The header is `ROWSxCOLUMNS`, then one line per cell in row-major order.
//! Every line, including the last, ends with `\n`.

use std::fmt::Write;

use super::Board;
use crate::cards::CardState;
use crate::core::PlayerId;

impl Board {
    /// Render the board as seen by `viewer`.
    #[must_use]
    pub fn render(&self, viewer: &PlayerId) -> String {
        let mut out = String::with_capacity(16 + self.len() * 8);
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{}x{}", self.rows(), self.columns());

        for (_, card) in self.iter() {
            match card.state {
                CardState::Removed => out.push_str("none\n"),
                _ if card.owner.as_ref() == Some(viewer) => {
                    let _ = writeln!(out, "my {}", card.value);
                }
                CardState::Down => out.push_str("down\n"),
                CardState::Up => {
                    let _ = writeln!(out, "up {}", card.value);
                }
            }
        }

        out
    }
}
