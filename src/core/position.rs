//! Grid coordinates.

use serde::{Deserialize, Serialize};

/// Zero-based `(row, column)` coordinate on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check whether this position lies on a `rows x columns` grid.
    #[must_use]
    pub const fn in_bounds(self, rows: usize, columns: usize) -> bool {
        self.row < rows && self.col < columns
    }

    /// Row-major index on a grid with `columns` columns.
    #[must_use]
    pub const fn index(self, columns: usize) -> usize {
        self.row * columns + self.col
    }

    /// Inverse of [`Position::index`].
    #[must_use]
    pub const fn from_index(index: usize, columns: usize) -> Self {
        Self {
            row: index / columns,
            col: index % columns,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}
