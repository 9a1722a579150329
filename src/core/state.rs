//! State and event identifiers.
//!
//! Both are small dense integers used directly as array indices by the
//! transition table. `State` reserves `u32::MAX` as the "no such state"
//! sentinel; it is never a valid transition endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a condition the machine can be in.
///
/// # Example
///
/// ```rust
/// use densefsm::State;
///
/// const IDLE: State = State::new(0);
/// const RUNNING: State = State::new(1);
///
/// assert_eq!(RUNNING.index(), 1);
/// assert!(IDLE.is_valid());
/// assert!(!State::INVALID.is_valid());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(u32);

impl State {
    /// Reserved sentinel meaning "no transition" / "uninitialized".
    pub const INVALID: State = State(u32::MAX);

    /// Create a state from its dense index.
    pub const fn new(id: u32) -> Self {
        State(id)
    }

    /// The raw identifier.
    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }

    /// The identifier as an array index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this is a real state rather than the reserved sentinel.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl From<u32> for State {
    fn from(id: u32) -> Self {
        State(id)
    }
}

impl From<State> for u32 {
    fn from(state: State) -> Self {
        state.0
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "State({})", self.0)
        } else {
            f.write_str("State(INVALID)")
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.0)
        } else {
            f.write_str("-")
        }
    }
}

/// Identifier of a stimulus that may cause a transition.
///
/// Events have no sentinel: every value is a potential column of the table.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Event(u32);

impl Event {
    /// Create an event from its dense index.
    pub const fn new(id: u32) -> Self {
        Event(id)
    }

    /// The raw identifier.
    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }

    /// The identifier as an array index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for Event {
    fn from(id: u32) -> Self {
        Event(id)
    }
}

impl From<Event> for u32 {
    fn from(event: Event) -> Self {
        event.0
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
