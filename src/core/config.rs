//! Scheduler configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the request scheduler's worker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Name given to the worker thread (shows up in panics and profilers).
    pub thread_name: String,

    /// Run `Board::check_rep` after every executed operation.
    ///
    /// A violation panics the worker; the scheduler then reports
    /// `SchedulerStopped` to every pending and later request.
    pub check_invariants: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            thread_name: "board-worker".to_string(),
            check_invariants: cfg!(debug_assertions),
        }
    }
}

impl SchedulerConfig {
    /// Set the worker thread name.
    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Enable or disable the post-operation invariant check.
    #[must_use]
    pub fn with_invariant_checks(mut self, enabled: bool) -> Self {
        self.check_invariants = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SchedulerConfig::default();
        assert_eq!(config.thread_name, "board-worker");
        assert_eq!(config.check_invariants, cfg!(debug_assertions));
    }

    #[test]
    fn test_builder_pattern() {
        let config = SchedulerConfig::default()
            .with_thread_name("test-worker")
            .with_invariant_checks(true);

        assert_eq!(config.thread_name, "test-worker");
        assert!(config.check_invariants);
    }

    #[test]
    fn test_serialization() {
        let config = SchedulerConfig::default().with_thread_name("w");
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SchedulerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
