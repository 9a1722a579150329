//! Checkpoint error types.

use crate::core::State;
use thiserror::Error;

/// Errors that can occur during checkpoint operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint version is not supported by this version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The recorded state has no row in the target machine's table
    #[error("State {state} is not a state of the table ({states} states)")]
    UnknownState { state: State, states: usize },

    /// Restore was attempted from one of the machine's own callbacks
    #[error("Machine '{machine_id}' is in the middle of a transition")]
    InTransition { machine_id: String },
}
