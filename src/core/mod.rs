//! Core identifier and transition types.
//!
//! This module contains the plain value types every other module builds on:
//! - `State` and `Event`, dense integer identifiers
//! - `Transition`, a `(from, event, to)` triple

mod state;
mod transition;

pub use state::{Event, State};
pub use transition::Transition;
