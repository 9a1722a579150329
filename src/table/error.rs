//! Table construction errors.

use crate::core::{Event, State};
use thiserror::Error;

/// Configuration errors detected while building a transition table.
///
/// These represent mistakes in the caller's static definitions, not runtime
/// conditions; construction is aborted and no table is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("transition ({from}, {event}) -> {to} uses the reserved state {}", State::INVALID.id())]
    ReservedState { from: State, event: Event, to: State },

    #[error("table dimensions {states} x {events} exceed addressable memory")]
    DimensionOverflow { states: usize, events: usize },
}
