//! Bulk value substitution ("map").
//!
//! Substitution is two-phase: [`stage`] writes the replacement into each
//! matching card's `display_mask` and returns a [`PendingSubstitution`]
//! record, and [`PendingSubstitution::commit`] swaps every staged value in
//! one pass. The scheduler runs both phases inside a single job, so no
//! other operation ever sees a half-rewritten board.
//!
//! State, ownership and turn bookkeeping are untouched; only face values
//! change.

use crate::board::Board;
use crate::cards::CardValue;
use crate::core::{PlayerId, Position};

/// Staged substitution awaiting commit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use = "a staged substitution does nothing until committed"]
pub struct PendingSubstitution {
    to: CardValue,
    staged: Vec<Position>,
}

impl PendingSubstitution {
    /// Positions whose value will change.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.staged
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.staged.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Replacement value.
    #[must_use]
    pub fn target(&self) -> &CardValue {
        &self.to
    }

    /// Apply every staged value and clear the masks.
    pub fn commit(self, board: &mut Board) {
        for pos in self.staged {
            if let Some(card) = board.get_mut(pos) {
                if let Some(value) = card.display_mask.take() {
                    card.value = value;
                }
            }
        }
    }
}

/// Mark every card whose current value is `from` for rewriting to `to`.
pub fn stage(board: &mut Board, from: &CardValue, to: &CardValue) -> PendingSubstitution {
    let mut staged = Vec::new();
    for (pos, card) in board.iter_mut() {
        if &card.value == from {
            card.display_mask = Some(to.clone());
            staged.push(pos);
        }
    }

    PendingSubstitution {
        to: to.clone(),
        staged,
    }
}

/// Replace every `from` card with `to` and render the board for `viewer`.
///
/// Never fails. Once committed, repeating the call matches nothing unless
/// `from == to`.
pub fn substitute(board: &mut Board, viewer: &PlayerId, from: &CardValue, to: &CardValue) -> String {
    stage(board, from, to).commit(board);
    board.render(viewer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::flip;

    fn value(v: &str) -> CardValue {
        CardValue::new(v).unwrap()
    }

    fn board(rows: usize, columns: usize, values: &[&str]) -> Board {
        Board::new(rows, columns, values.iter().map(|v| value(v))).unwrap()
    }

    #[test]
    fn test_stage_marks_without_changing_values() {
        let mut b = board(2, 2, &["A", "B", "A", "C"]);

        let pending = stage(&mut b, &value("A"), &value("Z"));

        assert_eq!(pending.len(), 2);
        assert_eq!(pending.positions(), &[Position::new(0, 0), Position::new(1, 0)]);
        assert_eq!(pending.target(), &value("Z"));
        assert_eq!(b.count_value(&value("A")), 2);
        assert_eq!(
            b.get(Position::new(1, 0)).unwrap().display_mask,
            Some(value("Z"))
        );
        assert!(b.validate().is_err());

        pending.commit(&mut b);
        assert_eq!(b.count_value(&value("A")), 0);
        assert_eq!(b.count_value(&value("Z")), 2);
        b.check_rep();
    }

    #[test]
    fn test_substitute_preserves_game_state() {
        let mut b = board(1, 3, &["A", "B", "A"]);
        let p = PlayerId::new("p");
        flip::flip(&mut b, &p, Position::new(0, 0));

        let view = substitute(&mut b, &p, &value("A"), &value("Q"));

        assert_eq!(view, "1x3\nmy Q\ndown\ndown\n");
        assert!(b.get(Position::new(0, 0)).unwrap().is_controlled_by(&p));
        b.check_rep();
    }

    #[test]
    fn test_substitute_is_idempotent_after_commit() {
        let mut b = board(1, 2, &["A", "B"]);
        let p = PlayerId::new("p");

        substitute(&mut b, &p, &value("A"), &value("C"));
        let once = b.clone();
        substitute(&mut b, &p, &value("A"), &value("C"));

        assert_eq!(b, once);
    }

    #[test]
    fn test_substitute_same_value() {
        let mut b = board(1, 2, &["A", "A"]);
        let p = PlayerId::new("p");

        substitute(&mut b, &p, &value("A"), &value("A"));
        assert_eq!(b.count_value(&value("A")), 2);
        b.check_rep();
    }

    #[test]
    fn test_substitution_can_create_a_match() {
        let mut b = board(1, 2, &["A", "B"]);
        let p = PlayerId::new("p");

        flip::flip(&mut b, &p, Position::new(0, 0));
        substitute(&mut b, &p, &value("B"), &value("A"));
        flip::flip(&mut b, &p, Position::new(0, 1));

        let card = b.get(Position::new(0, 1)).unwrap();
        assert_eq!(card.matched_by, Some(p));
    }
}
