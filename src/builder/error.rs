//! Build errors for table builders and machine definitions.

use crate::table::TableError;
use thiserror::Error;

/// Errors that can occur when building a table from a builder or definition.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Invalid machine definition: {0}")]
    InvalidDefinition(#[from] serde_json::Error),

    #[error("Initial state {state} is not a state of the table ({states} states)")]
    UnknownInitialState { state: crate::core::State, states: usize },
}
