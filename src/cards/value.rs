//! Card face values.

use serde::{Deserialize, Serialize};

use crate::error::BoardParseError;

/// Opaque face value of a card: a non-empty token with no whitespace.
///
/// Values are compared for equality only; the engine never interprets them.
///
/// ```
/// use memory_scramble::cards::CardValue;
///
/// assert!(CardValue::new("🦄").is_ok());
/// assert!(CardValue::new("two words").is_err());
/// assert!(CardValue::new("").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardValue(String);

impl CardValue {
    /// Validate and wrap a face value.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardParseError> {
        let value = value.into();
        if value.is_empty() || value.chars().any(char::is_whitespace) {
            return Err(BoardParseError::InvalidValue { value });
        }
        Ok(Self(value))
    }

    /// Get the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CardValue {
    type Error = BoardParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CardValue> for String {
    fn from(value: CardValue) -> Self {
        value.0
    }
}

impl std::str::FromStr for CardValue {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for CardValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_values() {
        for raw in ["A", "🌈", "card-7", "x_y"] {
            assert_eq!(CardValue::new(raw).unwrap().as_str(), raw);
        }
    }

    #[test]
    fn test_rejects_whitespace_and_empty() {
        for raw in ["", " ", "a b", "tab\there", "nl\n", " lead"] {
            assert!(
                matches!(CardValue::new(raw), Err(BoardParseError::InvalidValue { .. })),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_serde_validates() {
        let value: CardValue = serde_json::from_str("\"ok\"").unwrap();
        assert_eq!(value.as_str(), "ok");
        assert!(serde_json::from_str::<CardValue>("\"not ok\"").is_err());
    }
}
