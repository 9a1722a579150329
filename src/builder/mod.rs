//! Builder API for ergonomic table construction.
//!
//! This module provides a fluent builder, serializable machine definitions
//! and macros for declaring dense state and event enums.

pub mod definition;
pub mod error;
pub mod macros;
pub mod table;

pub use definition::MachineDefinition;
pub use error::BuildError;
pub use table::TableBuilder;

use crate::core::{Event, State, Transition};

/// Build the transition list of a linear chain `states[0] -> states[1] -> ...`
/// where every step is triggered by the same event.
///
/// # Example
///
/// ```
/// use densefsm::builder::chain;
/// use densefsm::{Event, State, TransitionTable};
///
/// let steps = [State::new(0), State::new(1), State::new(2)];
/// let table: TransitionTable = TransitionTable::new(chain(&steps, Event::new(0)));
/// assert_eq!(table.transition_count(), 2);
/// ```
pub fn chain(states: &[State], event: Event) -> Vec<Transition> {
    states
        .windows(2)
        .map(|pair| Transition::new(pair[0], event, pair[1]))
        .collect()
}

/// Build the transition list of a cycle that returns from the last state to
/// the first.
///
/// # Example
///
/// ```
/// use densefsm::builder::cycle;
/// use densefsm::{Event, Fsm, State, TransitionTable};
///
/// let lights = [State::new(0), State::new(1), State::new(2)];
/// let table = TransitionTable::new(cycle(&lights, Event::new(0))).into_shared();
/// let light: Fsm = Fsm::new("light", lights[0], table);
///
/// for _ in 0..3 {
///     assert!(light.trigger(Event::new(0)));
/// }
/// assert_eq!(light.current_state(), lights[0]);
/// ```
pub fn cycle(states: &[State], event: Event) -> Vec<Transition> {
    let mut transitions = chain(states, event);
    if let (Some(&first), Some(&last)) = (states.first(), states.last()) {
        if states.len() > 1 {
            transitions.push(Transition::new(last, event, first));
        }
    }
    transitions
}
