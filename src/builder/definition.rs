//! Serializable machine definitions.

use crate::builder::error::BuildError;
use crate::builder::table::TableBuilder;
use crate::core::{State, Transition};
use crate::pool::PoolConfig;
use crate::table::TransitionTable;
use serde::{Deserialize, Serialize};

/// Declarative description of a machine: where it starts and how it moves.
///
/// Lets transition tables live in configuration files instead of code.
/// Callbacks are not part of a definition; attach them through
/// [`builder`](Self::builder).
///
/// # Example
///
/// ```
/// use densefsm::builder::MachineDefinition;
/// use densefsm::{Event, Fsm, State};
///
/// let definition = MachineDefinition::from_json(
///     r#"{
///         "initial_state": 0,
///         "transitions": [
///             { "from": 0, "event": 0, "to": 1 },
///             { "from": 1, "event": 1, "to": 0 }
///         ]
///     }"#,
/// )
/// .unwrap();
///
/// let table = definition.table().unwrap().into_shared();
/// let fsm: Fsm = Fsm::new("door", definition.initial_state, table);
/// assert!(fsm.trigger(Event::new(0)));
/// assert_eq!(fsm.current_state(), State::new(1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineDefinition {
    /// State new instances start in.
    pub initial_state: State,
    /// Every `(from, event, to)` triple of the table.
    pub transitions: Vec<Transition>,
}

impl MachineDefinition {
    /// Create a definition.
    pub fn new<I, T>(initial_state: State, transitions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Transition>,
    {
        Self {
            initial_state,
            transitions: transitions.into_iter().map(Into::into).collect(),
        }
    }

    /// Capture the transitions of an existing table.
    pub fn from_table<D, A>(initial_state: State, table: &TransitionTable<D, A>) -> Self {
        Self {
            initial_state,
            transitions: table.transitions().collect(),
        }
    }

    /// Parse a definition from JSON.
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the definition as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, BuildError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// A builder preloaded with this definition's transitions.
    pub fn builder<D, A>(&self) -> TableBuilder<D, A> {
        TableBuilder::new().transitions(self.transitions.iter().copied())
    }

    /// Build the table, checking that the initial state is one of its rows.
    pub fn table<D, A>(&self) -> Result<TransitionTable<D, A>, BuildError> {
        let table = self.builder().build()?;
        if !table.contains_state(self.initial_state) {
            return Err(BuildError::UnknownInitialState {
                state: self.initial_state,
                states: table.state_count(),
            });
        }
        Ok(table)
    }

    /// Pool settings for `capacity` instances of this machine.
    pub fn pool_config(&self, capacity: usize) -> PoolConfig {
        PoolConfig::new(capacity, self.initial_state)
    }
}
