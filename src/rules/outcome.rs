//! Result of running one operation against the board.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Position};
use crate::error::GameError;

/// The card an operation is waiting on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blocker {
    pub position: Position,
    /// Player controlling the card at the time of the attempt.
    pub owner: PlayerId,
}

impl std::fmt::Display for Blocker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "card at {} controlled by {}", self.position, self.owner)
    }
}

/// Tagged result of an operation.
///
/// `Retry` is not a failure: it tells the scheduler to park the operation
/// and run it again after a later state change. It never reaches the
/// end caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation completed.
    Done(T),
    /// A card the operation needs is controlled by another player.
    Retry(Blocker),
    /// The operation failed permanently.
    Fail(GameError),
}

impl<T> Outcome<T> {
    /// Map the completed value, leaving `Retry` and `Fail` untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Done(value) => Outcome::Done(f(value)),
            Outcome::Retry(blocker) => Outcome::Retry(blocker),
            Outcome::Fail(err) => Outcome::Fail(err),
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }

    #[must_use]
    pub fn is_retry(&self) -> bool {
        matches!(self, Outcome::Retry(_))
    }
}

impl<T> From<Result<T, GameError>> for Outcome<T> {
    fn from(result: Result<T, GameError>) -> Self {
        match result {
            Ok(value) => Outcome::Done(value),
            Err(err) => Outcome::Fail(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_only_touches_done() {
        let done: Outcome<u32> = Outcome::Done(2);
        assert_eq!(done.map(|v| v * 10), Outcome::Done(20));

        let blocker = Blocker {
            position: Position::new(0, 0),
            owner: PlayerId::new("p"),
        };
        let retry: Outcome<u32> = Outcome::Retry(blocker.clone());
        assert_eq!(retry.map(|v| v * 10), Outcome::Retry(blocker));

        let fail: Outcome<u32> = Outcome::Fail(GameError::SchedulerStopped);
        assert_eq!(fail.map(|v| v * 10), Outcome::Fail(GameError::SchedulerStopped));
    }

    #[test]
    fn test_from_result() {
        let ok: Outcome<&str> = Ok("view").into();
        assert!(ok.is_done());

        let err: Outcome<&str> = Err(GameError::SchedulerStopped).into();
        assert!(!err.is_done());
        assert!(!err.is_retry());
    }

    #[test]
    fn test_blocker_display() {
        let blocker = Blocker {
            position: Position::new(1, 2),
            owner: PlayerId::new("bob"),
        };
        assert_eq!(blocker.to_string(), "card at (1,2) controlled by bob");
    }
}
