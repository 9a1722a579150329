//! Transition definitions.

use super::state::{Event, State};
use serde::{Deserialize, Serialize};

/// A defined `(from, event) -> to` mapping supplied at table construction.
///
/// # Example
///
/// ```rust
/// use densefsm::{Event, State, Transition};
///
/// let start = Transition::new(State::new(0), Event::new(0), State::new(1));
/// assert!(start.is_well_formed());
/// assert!(!Transition::new(State::INVALID, Event::new(0), State::new(1)).is_well_formed());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    /// The state the transition leaves.
    pub from: State,
    /// The triggering event.
    pub event: Event,
    /// The state the transition enters.
    pub to: State,
}

impl Transition {
    /// Create a transition.
    pub const fn new(from: State, event: Event, to: State) -> Self {
        Self { from, event, to }
    }

    /// Neither endpoint is the reserved sentinel.
    pub const fn is_well_formed(&self) -> bool {
        self.from.is_valid() && self.to.is_valid()
    }
}

impl From<(State, Event, State)> for Transition {
    fn from((from, event, to): (State, Event, State)) -> Self {
        Self::new(from, event, to)
    }
}

impl From<(u32, u32, u32)> for Transition {
    fn from((from, event, to): (u32, u32, u32)) -> Self {
        Self::new(State::new(from), Event::new(event), State::new(to))
    }
}
