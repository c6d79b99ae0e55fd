//! The board grid.
//!
//! Cells are stored row-major in an `im::Vector`, so cloning a board is
//! O(1). Snapshots handed out by the scheduler share structure with the
//! live board until the worker mutates it again.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardValue};
use crate::core::Position;
use crate::error::BoardParseError;

/// `rows x columns` grid of cards.
///
/// Mutation is crate-private: the rules engine is the only writer, and
/// it is only ever invoked by the scheduler's worker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRecord")]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vector<Card>,
}

/// Unchecked serialized form of a [`Board`].
#[derive(Deserialize)]
struct BoardRecord {
    rows: usize,
    columns: usize,
    cells: Vector<Card>,
}

impl TryFrom<BoardRecord> for Board {
    type Error = BoardParseError;

    fn try_from(record: BoardRecord) -> Result<Self, Self::Error> {
        Board::from_cards(record.rows, record.columns, record.cells)
    }
}

impl Board {
    /// Build an all-face-down board from row-major values.
    pub fn new(
        rows: usize,
        columns: usize,
        values: impl IntoIterator<Item = CardValue>,
    ) -> Result<Self, BoardParseError> {
        Self::from_cards(rows, columns, values.into_iter().map(Card::new))
    }

    /// Build a board from explicit card records (row-major).
    ///
    /// Only the dimensions are checked here; call [`Board::validate`] to
    /// check the card invariants of a hand-built board.
    pub fn from_cards(
        rows: usize,
        columns: usize,
        cards: impl IntoIterator<Item = Card>,
    ) -> Result<Self, BoardParseError> {
        if rows == 0 || columns == 0 {
            return Err(BoardParseError::ZeroDimension { rows, columns });
        }

        let cells: Vector<Card> = cards.into_iter().collect();
        let expected = rows.checked_mul(columns).unwrap_or(usize::MAX);
        if cells.len() != expected {
            return Err(BoardParseError::WrongCardCount {
                expected,
                found: cells.len(),
            });
        }

        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of cells (`rows * columns`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.in_bounds(self.rows, self.columns)
    }

    /// Card at `pos`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&Card> {
        if !self.contains(pos) {
            return None;
        }
        self.cells.get(pos.index(self.columns))
    }

    pub(crate) fn get_mut(&mut self, pos: Position) -> Option<&mut Card> {
        if !self.contains(pos) {
            return None;
        }
        self.cells.get_mut(pos.index(self.columns))
    }

    /// Iterate over `(position, card)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Card)> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, card)| (Position::from_index(i, columns), card))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (Position, &mut Card)> + '_ {
        let columns = self.columns;
        self.cells
            .iter_mut()
            .enumerate()
            .map(move |(i, card)| (Position::from_index(i, columns), card))
    }

    /// Number of cells, removed ones included, whose face value is `value`.
    #[must_use]
    pub fn count_value(&self, value: &CardValue) -> usize {
        self.cells.iter().filter(|c| &c.value == value).count()
    }

    /// Number of cards that have been removed.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_removed()).count()
    }
}

/// Debug rendering: the header, then the face values, one row per line.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}x{}", self.rows, self.columns)?;
        for row in 0..self.rows {
            let start = row * self.columns;
            for col in 0..self.columns {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", self.cells[start + col].value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
