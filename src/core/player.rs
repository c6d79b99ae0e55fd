//! Player identification.
//!
//! Players are opaque string ids chosen by clients. The core never
//! registers players up front: a player exists as soon as it issues a
//! request, and its turn state is derived from the cards it controls.

use serde::{Deserialize, Serialize};

/// Opaque player identifier.
///
/// ```
/// use memory_scramble::core::PlayerId;
///
/// let alice = PlayerId::new("alice");
/// assert_eq!(alice.as_str(), "alice");
/// assert_eq!(alice.to_string(), "alice");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p = PlayerId::new("p1");
        assert_eq!(p.as_str(), "p1");
        assert_eq!(format!("{}", p), "p1");
        assert_eq!(p, PlayerId::from("p1"));
        assert_ne!(p, PlayerId::from(String::from("p2")));
    }

    #[test]
    fn test_player_id_serialization() {
        let p = PlayerId::new("alice");
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"alice\"");
        let deserialized: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(p, deserialized);
    }
}
