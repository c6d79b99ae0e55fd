//! Representation invariants of the board.
//!
//! Per card:
//! - `owner` is set only while the card is up
//! - `matched_by` and `pending_conceal_by` are never set on a face-down card
//! - `display_mask` is empty outside an in-flight substitution
//!
//! Per board:
//! - exactly `rows * columns` cells
//! - no player controls more than two face-up cards

use rustc_hash::FxHashMap;

use super::Board;
use crate::cards::CardState;
use crate::core::PlayerId;
use crate::error::InvariantViolation;

/// Most face-up cards a single player can control (mid-turn).
pub const MAX_CONTROLLED: usize = 2;

impl Board {
    /// Check every invariant, returning the first violation found.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let expected = self.rows().checked_mul(self.columns());
        if self.rows() == 0 || self.columns() == 0 || expected != Some(self.len()) {
            return Err(InvariantViolation::Dimensions {
                rows: self.rows(),
                columns: self.columns(),
                found: self.len(),
            });
        }

        let mut controlled: FxHashMap<&PlayerId, usize> = FxHashMap::default();

        for (position, card) in self.iter() {
            if let Some(owner) = &card.owner {
                if card.state != CardState::Up {
                    return Err(InvariantViolation::OwnerWithoutUp {
                        position,
                        state: card.state.as_str(),
                        owner: owner.clone(),
                    });
                }
                *controlled.entry(owner).or_default() += 1;
            }

            if card.state == CardState::Down
                && (card.matched_by.is_some() || card.pending_conceal_by.is_some())
            {
                return Err(InvariantViolation::BookkeepingOnDown { position });
            }

            if card.display_mask.is_some() {
                return Err(InvariantViolation::DanglingMask { position });
            }
        }

        if let Some((player, count)) = controlled
            .into_iter()
            .find(|(_, count)| *count > MAX_CONTROLLED)
        {
            return Err(InvariantViolation::TooManyControlled {
                player: player.clone(),
                count,
            });
        }

        Ok(())
    }

    /// Assert the invariants hold.
    ///
    /// # Panics
    ///
    /// Panics on any violation. A broken invariant is a defect in the
    /// rules engine, not bad input, and must not be retried.
    pub fn check_rep(&self) {
        if let Err(violation) = self.validate() {
            panic!("board invariant violated: {violation}");
        }
    }
}
