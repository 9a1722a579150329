//! Trigger outcome errors.

use crate::core::{Event, State};
use thiserror::Error;

/// Why an event did not produce a transition.
///
/// Neither variant is a fault: both mean "this event does not apply right
/// now" and leave the machine's state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TriggerError {
    /// No transition is defined for the pair, either up front or after
    /// another thread moved the machine while this call waited.
    #[error("no transition from state {state} on event {event}")]
    NoTransition { state: State, event: Event },

    /// A callback tried to trigger the instance it is running on.
    #[error("event {event} triggered from a callback of the same instance")]
    Reentrant { event: Event },
}
