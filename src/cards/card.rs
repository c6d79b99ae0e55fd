//! Card records: one cell of the board.
//!
//! A card carries its face value, visibility state, the player controlling
//! it, and two turn-bookkeeping flags that the next finalize sweep acts on:
//!
//! - `matched_by`: the pair was matched by this player and is removed when
//!   that player starts a new turn
//! - `pending_conceal_by`: the card was left face-up by this player and is
//!   turned back down when that player starts a new turn (if still unowned)

use serde::{Deserialize, Serialize};

use super::value::CardValue;
use crate::core::PlayerId;

/// Visibility state of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardState {
    Down,
    Up,
    Removed,
}

impl CardState {
    /// Lowercase name, as used in the text view.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CardState::Down => "down",
            CardState::Up => "up",
            CardState::Removed => "removed",
        }
    }
}

impl std::fmt::Display for CardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cell of the grid.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Face value. Only rewritten by a committed substitution.
    pub value: CardValue,

    pub state: CardState,

    /// Controlling player. Only set while the card is up.
    pub owner: Option<PlayerId>,

    /// Player who just matched this card.
    pub matched_by: Option<PlayerId>,

    /// Player whose next turn turns this card back down.
    pub pending_conceal_by: Option<PlayerId>,

    /// Staged replacement value for an in-flight substitution.
    #[serde(default)]
    pub display_mask: Option<CardValue>,
}

impl Card {
    /// A fresh face-down card.
    #[must_use]
    pub fn new(value: CardValue) -> Self {
        Self {
            value,
            state: CardState::Down,
            owner: None,
            matched_by: None,
            pending_conceal_by: None,
            display_mask: None,
        }
    }

    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.state == CardState::Removed
    }

    #[must_use]
    pub fn is_down(&self) -> bool {
        self.state == CardState::Down
    }

    #[must_use]
    pub fn is_up(&self) -> bool {
        self.state == CardState::Up
    }

    /// Face-up and controlled by `player`.
    #[must_use]
    pub fn is_controlled_by(&self, player: &PlayerId) -> bool {
        self.is_up() && self.owner.as_ref() == Some(player)
    }

    /// Turn the card up (if down) and give control to `player`.
    pub(crate) fn take(&mut self, player: &PlayerId) {
        self.state = CardState::Up;
        self.owner = Some(player.clone());
    }

    /// Drop control, leaving the card face-up until `player`'s next turn.
    pub(crate) fn relinquish(&mut self, player: &PlayerId) {
        self.owner = None;
        self.pending_conceal_by = Some(player.clone());
    }

    /// Take the card off the board.
    pub(crate) fn remove(&mut self) {
        self.state = CardState::Removed;
        self.owner = None;
        self.matched_by = None;
    }

    /// Turn a relinquished card back face-down.
    pub(crate) fn conceal(&mut self) {
        self.state = CardState::Down;
        self.pending_conceal_by = None;
    }
}
