//! Flip transitions.
//!
//! A player's turn state is derived from the board on every request: the
//! face-up cards it controls. With none controlled the flip is the first
//! of a new turn, and the previous turn is finalized before it is applied.
//! With one controlled it is the second flip, which either matches the
//! pair or leaves both cards face-up and unowned.
//!
//! Failed second flips still relinquish the first card. That side effect
//! is part of the rules and is never rolled back.

use smallvec::SmallVec;

use super::outcome::{Blocker, Outcome};
use crate::board::Board;
use crate::cards::{Card, CardState};
use crate::core::{PlayerId, Position};
use crate::error::GameError;

/// Flip the card at `pos` for `player` and render the result for them.
pub fn flip(board: &mut Board, player: &PlayerId, pos: Position) -> Outcome<String> {
    if !board.contains(pos) {
        return Outcome::Fail(out_of_bounds(board, pos));
    }

    let outcome = match controlled(board, player).as_slice() {
        [first] => second_flip(board, player, *first, pos),
        // Zero cards is a fresh turn; more than one is left over from a
        // finished pair and is finalized the same way.
        _ => {
            finalize_turn(board, player);
            first_flip(board, player, pos)
        }
    };

    outcome.map(|()| board.render(player))
}

/// Positions of the face-up cards `player` controls.
///
/// A full O(rows x columns) scan; the finalize sweep needs one anyway.
#[must_use]
pub fn controlled(board: &Board, player: &PlayerId) -> SmallVec<[Position; 2]> {
    board
        .iter()
        .filter(|(_, card)| card.is_controlled_by(player))
        .map(|(pos, _)| pos)
        .collect()
}

/// Finish `player`'s previous turn.
///
/// Cards the player matched are removed. Cards the player left face-up
/// are turned back down unless someone else has claimed them since.
/// Running it twice in a row is a no-op the second time.
pub fn finalize_turn(board: &mut Board, player: &PlayerId) {
    for (_, card) in board.iter_mut() {
        if card.matched_by.as_ref() == Some(player) {
            card.remove();
        }

        if card.pending_conceal_by.as_ref() == Some(player) {
            match card.state {
                CardState::Up if card.owner.is_none() => card.conceal(),
                CardState::Removed => card.pending_conceal_by = None,
                _ => {}
            }
        }
    }
}

fn first_flip(board: &mut Board, player: &PlayerId, pos: Position) -> Outcome<()> {
    let card = match card_at(board, pos) {
        Ok(card) => card,
        Err(err) => return Outcome::Fail(err),
    };

    match card.state {
        CardState::Removed => Outcome::Fail(GameError::NoCard { position: pos }),
        CardState::Down => {
            card.take(player);
            Outcome::Done(())
        }
        CardState::Up => match card.owner.clone() {
            None => {
                card.take(player);
                Outcome::Done(())
            }
            Some(owner) if &owner == player => Outcome::Done(()),
            Some(owner) => Outcome::Retry(Blocker {
                position: pos,
                owner,
            }),
        },
    }
}

fn second_flip(board: &mut Board, player: &PlayerId, first: Position, pos: Position) -> Outcome<()> {
    let target = match card_at(board, pos) {
        Ok(card) => card,
        Err(err) => return Outcome::Fail(err),
    };

    if target.is_removed() {
        relinquish(board, player, first);
        return Outcome::Fail(GameError::SecondCardGone { position: pos });
    }

    if let Some(owner) = target.owner.clone().filter(|_| target.is_up()) {
        relinquish(board, player, first);
        return Outcome::Fail(GameError::SecondCardClaimed {
            position: pos,
            owner,
        });
    }

    target.take(player);
    let second_value = target.value.clone();

    let is_match = board
        .get(first)
        .is_some_and(|card| card.value == second_value);

    for at in [first, pos] {
        if let Some(card) = board.get_mut(at) {
            if is_match {
                card.matched_by = Some(player.clone());
            } else {
                card.relinquish(player);
            }
        }
    }

    Outcome::Done(())
}

fn relinquish(board: &mut Board, player: &PlayerId, pos: Position) {
    if let Some(card) = board.get_mut(pos) {
        card.relinquish(player);
    }
}

fn card_at(board: &mut Board, pos: Position) -> Result<&mut Card, GameError> {
    let (rows, columns) = (board.rows(), board.columns());
    board.get_mut(pos).ok_or(GameError::OutOfBounds {
        position: pos,
        rows,
        columns,
    })
}

fn out_of_bounds(board: &Board, pos: Position) -> GameError {
    GameError::OutOfBounds {
        position: pos,
        rows: board.rows(),
        columns: board.columns(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardValue;

    fn board(rows: usize, columns: usize, values: &[&str]) -> Board {
        Board::new(
            rows,
            columns,
            values.iter().map(|v| CardValue::new(*v).unwrap()),
        )
        .unwrap()
    }

    fn at(board: &Board, row: usize, col: usize) -> &Card {
        board.get(Position::new(row, col)).unwrap()
    }

    #[test]
    fn test_first_flip_turns_card_up() {
        let mut b = board(1, 2, &["A", "B"]);
        let p = PlayerId::new("p");

        let out = flip(&mut b, &p, Position::new(0, 0));

        assert_eq!(out, Outcome::Done("1x2\nmy A\ndown\n".to_string()));
        assert!(at(&b, 0, 0).is_controlled_by(&p));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut b = board(1, 2, &["A", "B"]);
        let p = PlayerId::new("p");

        let out = flip(&mut b, &p, Position::new(0, 2));
        assert!(matches!(out, Outcome::Fail(GameError::OutOfBounds { .. })));

        let out = flip(&mut b, &p, Position::new(1, 0));
        assert!(matches!(out, Outcome::Fail(GameError::OutOfBounds { .. })));
    }

    #[test]
    fn test_first_flip_on_foreign_card_retries() {
        let mut b = board(1, 2, &["A", "B"]);
        let p = PlayerId::new("p");
        let q = PlayerId::new("q");

        flip(&mut b, &p, Position::new(0, 0));
        let out = flip(&mut b, &q, Position::new(0, 0));

        assert_eq!(
            out,
            Outcome::Retry(Blocker {
                position: Position::new(0, 0),
                owner: p.clone(),
            })
        );
        assert!(at(&b, 0, 0).is_controlled_by(&p));
    }

    #[test]
    fn test_match_keeps_control_until_next_turn() {
        let mut b = board(1, 3, &["A", "A", "B"]);
        let p = PlayerId::new("p");

        flip(&mut b, &p, Position::new(0, 0));
        let out = flip(&mut b, &p, Position::new(0, 1));

        assert_eq!(out, Outcome::Done("1x3\nmy A\nmy A\ndown\n".to_string()));
        for col in 0..2 {
            let card = at(&b, 0, col);
            assert!(card.is_controlled_by(&p));
            assert_eq!(card.matched_by, Some(p.clone()));
        }

        // Next turn removes the pair before flipping.
        let out = flip(&mut b, &p, Position::new(0, 2));
        assert_eq!(out, Outcome::Done("1x3\nnone\nnone\nmy B\n".to_string()));
    }

    #[test]
    fn test_mismatch_releases_both() {
        let mut b = board(1, 3, &["A", "B", "C"]);
        let p = PlayerId::new("p");

        flip(&mut b, &p, Position::new(0, 0));
        let out = flip(&mut b, &p, Position::new(0, 1));

        assert_eq!(out, Outcome::Done("1x3\nup A\nup B\ndown\n".to_string()));
        for col in 0..2 {
            let card = at(&b, 0, col);
            assert!(card.is_up());
            assert!(card.owner.is_none());
            assert_eq!(card.pending_conceal_by, Some(p.clone()));
        }

        let out = flip(&mut b, &p, Position::new(0, 2));
        assert_eq!(out, Outcome::Done("1x3\ndown\ndown\nmy C\n".to_string()));
    }

    #[test]
    fn test_second_flip_on_removed_relinquishes_first() {
        let mut b = board(1, 4, &["A", "A", "B", "C"]);
        let p = PlayerId::new("p");
        let q = PlayerId::new("q");

        flip(&mut b, &q, Position::new(0, 0));
        flip(&mut b, &q, Position::new(0, 1));
        flip(&mut b, &q, Position::new(0, 3)); // removes the A pair

        flip(&mut b, &p, Position::new(0, 2));
        let out = flip(&mut b, &p, Position::new(0, 0));

        assert_eq!(
            out,
            Outcome::Fail(GameError::SecondCardGone {
                position: Position::new(0, 0)
            })
        );
        let first = at(&b, 0, 2);
        assert!(first.is_up());
        assert!(first.owner.is_none());
        assert_eq!(first.pending_conceal_by, Some(p));
    }

    #[test]
    fn test_second_flip_on_claimed_card_relinquishes_first() {
        let mut b = board(1, 2, &["A", "B"]);
        let p = PlayerId::new("p");
        let q = PlayerId::new("q");

        flip(&mut b, &q, Position::new(0, 1));
        flip(&mut b, &p, Position::new(0, 0));
        let out = flip(&mut b, &p, Position::new(0, 1));

        assert_eq!(
            out,
            Outcome::Fail(GameError::SecondCardClaimed {
                position: Position::new(0, 1),
                owner: q.clone(),
            })
        );
        assert!(at(&b, 0, 0).owner.is_none());
        assert!(at(&b, 0, 1).is_controlled_by(&q));
    }

    #[test]
    fn test_second_flip_on_own_first_card_fails() {
        let mut b = board(1, 2, &["A", "B"]);
        let p = PlayerId::new("p");

        flip(&mut b, &p, Position::new(0, 0));
        let out = flip(&mut b, &p, Position::new(0, 0));

        assert!(matches!(out, Outcome::Fail(GameError::SecondCardClaimed { .. })));
        assert!(controlled(&b, &p).is_empty());
    }

    #[test]
    fn test_first_flip_claims_uncontrolled_up_card() {
        let mut b = board(1, 3, &["A", "B", "C"]);
        let p = PlayerId::new("p");
        let q = PlayerId::new("q");

        flip(&mut b, &p, Position::new(0, 0));
        flip(&mut b, &p, Position::new(0, 1)); // mismatch, both left up

        let out = flip(&mut b, &q, Position::new(0, 1));
        assert_eq!(out, Outcome::Done("1x3\nup A\nmy B\ndown\n".to_string()));

        // p's next turn conceals (0,0) but leaves q's card alone.
        flip(&mut b, &p, Position::new(0, 2));
        assert!(at(&b, 0, 0).is_down());
        assert!(at(&b, 0, 1).is_controlled_by(&q));
    }

    #[test]
    fn test_first_flip_on_removed_card() {
        let mut b = board(1, 3, &["A", "A", "B"]);
        let p = PlayerId::new("p");

        flip(&mut b, &p, Position::new(0, 0));
        flip(&mut b, &p, Position::new(0, 1));
        let out = flip(&mut b, &p, Position::new(0, 0));

        assert_eq!(
            out,
            Outcome::Fail(GameError::NoCard {
                position: Position::new(0, 0)
            })
        );
        assert_eq!(b.removed_count(), 2);
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let mut b = board(1, 4, &["A", "A", "B", "C"]);
        let p = PlayerId::new("p");
        let q = PlayerId::new("q");

        flip(&mut b, &p, Position::new(0, 0));
        flip(&mut b, &p, Position::new(0, 1));
        flip(&mut b, &q, Position::new(0, 2));
        flip(&mut b, &q, Position::new(0, 3));

        finalize_turn(&mut b, &p);
        let once = b.clone();
        finalize_turn(&mut b, &p);
        assert_eq!(b, once);

        finalize_turn(&mut b, &q);
        let once = b.clone();
        finalize_turn(&mut b, &q);
        assert_eq!(b, once);
        b.check_rep();
    }

    #[test]
    fn test_finalize_clears_conceal_on_removed_card() {
        let mut b = board(1, 4, &["A", "B", "B", "C"]);
        let p = PlayerId::new("p");
        let q = PlayerId::new("q");

        flip(&mut b, &p, Position::new(0, 0));
        flip(&mut b, &p, Position::new(0, 1)); // mismatch, (0,1) pending for p
        flip(&mut b, &q, Position::new(0, 1));
        flip(&mut b, &q, Position::new(0, 2)); // q matches B
        flip(&mut b, &q, Position::new(0, 3)); // q's pair removed

        assert!(at(&b, 0, 1).is_removed());
        assert_eq!(at(&b, 0, 1).pending_conceal_by, Some(p.clone()));

        finalize_turn(&mut b, &p);
        assert!(at(&b, 0, 1).pending_conceal_by.is_none());
        assert!(at(&b, 0, 0).is_down());
        b.check_rep();
    }
}
