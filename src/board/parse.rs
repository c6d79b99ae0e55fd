//! Board file format.
//!
//! ```text
//! 3x3
//! 🦄
//! 🦄
//! 🌈
//! ...
//! ```
//!
//! The first non-blank line is the `ROWSxCOLUMNS` header. It is followed by
//! exactly `ROWS * COLUMNS` card values in row-major order, separated by
//! any whitespace. One value per line is the usual layout; one row per
//! line (the `Display` form of a board) parses the same way.

use std::path::Path;
use std::str::FromStr;

use super::Board;
use crate::cards::CardValue;
use crate::error::BoardParseError;

impl Board {
    /// Parse a board description.
    pub fn parse(text: &str) -> Result<Self, BoardParseError> {
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

        let header = lines.next().ok_or(BoardParseError::Empty)?;
        let (rows, columns, expected) = parse_header(header)?;

        let values = lines
            .flat_map(str::split_whitespace)
            .map(CardValue::new)
            .collect::<Result<Vec<_>, _>>()?;
        if values.len() != expected {
            return Err(BoardParseError::WrongCardCount {
                expected,
                found: values.len(),
            });
        }

        Board::new(rows, columns, values)
    }

    /// Read and parse a board file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BoardParseError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| BoardParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// `(rows, columns, rows * columns)` from a `ROWSxCOLUMNS` header.
fn parse_header(header: &str) -> Result<(usize, usize, usize), BoardParseError> {
    let bad = || BoardParseError::BadHeader {
        header: header.to_string(),
    };

    let (rows, columns) = header.split_once('x').ok_or_else(bad)?;
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(rows) || !digits(columns) {
        return Err(bad());
    }

    let rows: usize = rows.parse().map_err(|_| bad())?;
    let columns: usize = columns.parse().map_err(|_| bad())?;
    let cells = rows.checked_mul(columns).ok_or_else(bad)?;
    Ok((rows, columns, cells))
}
