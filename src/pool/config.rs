//! Pool configuration parameters.

use crate::core::State;
use serde::{Deserialize, Serialize};

/// Configuration for an [`FsmPool`](super::FsmPool).
///
/// Fixed at construction: the pool never grows or shrinks afterwards.
/// Missing fields fall back to their defaults when deserialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Number of preallocated instances.
    ///
    /// Default: 64.
    pub capacity: usize,

    /// State every instance starts in and returns to on release.
    ///
    /// Default: state 0.
    pub initial_state: State,

    /// Instance labels are `"{id_prefix}-{index}"`.
    ///
    /// Default: `"fsm"`.
    pub id_prefix: String,
}

impl PoolConfig {
    /// Default number of preallocated instances.
    pub const DEFAULT_CAPACITY: usize = 64;

    /// Default instance label prefix.
    pub const DEFAULT_ID_PREFIX: &'static str = "fsm";

    /// Create a config for `capacity` instances starting in `initial_state`.
    pub fn new(capacity: usize, initial_state: State) -> Self {
        Self {
            capacity,
            initial_state,
            id_prefix: Self::DEFAULT_ID_PREFIX.to_string(),
        }
    }

    /// Use `prefix` for instance labels.
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Label of the instance stored at `index`.
    pub fn instance_id(&self, index: usize) -> String {
        format!("{}-{}", self.id_prefix, index)
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY, State::new(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PoolConfig::default();
        assert_eq!(config.capacity, 64);
        assert_eq!(config.initial_state, State::new(0));
        assert_eq!(config.instance_id(3), "fsm-3");
    }

    #[test]
    fn custom_prefix() {
        let config = PoolConfig::new(8, State::new(2)).with_id_prefix("session");
        assert_eq!(config.instance_id(0), "session-0");
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: PoolConfig = serde_json::from_str(r#"{"capacity": 10}"#).unwrap();
        assert_eq!(config.capacity, 10);
        assert_eq!(config.initial_state, State::new(0));
        assert_eq!(config.id_prefix, "fsm");
    }
}
