//! Builder for constructing transition tables.

use crate::builder::error::BuildError;
use crate::core::{Event, State, Transition};
use crate::machine::Fsm;
use crate::table::{CallbackKind, Handler, TransitionTable};
use std::sync::Arc;

/// Builder for transition tables with a fluent API.
///
/// Collects transitions and callbacks, then builds and freezes the table in
/// one step so callbacks can never be registered on a shared table.
///
/// # Example
///
/// ```
/// use densefsm::builder::TableBuilder;
/// use densefsm::{Event, Fsm, State};
///
/// let (red, green) = (State::new(0), State::new(1));
/// let tick = Event::new(0);
///
/// let table = TableBuilder::new()
///     .transition(red, tick, green)
///     .transition(green, tick, red)
///     .on_enter_state(green, |_, _, _, _, _| println!("go"))
///     .build_shared()
///     .unwrap();
///
/// let light: Fsm = Fsm::new("light", red, table);
/// assert!(light.trigger(tick));
/// assert_eq!(light.current_state(), green);
/// ```
pub struct TableBuilder<D = (), A = ()> {
    transitions: Vec<Transition>,
    callbacks: Vec<(CallbackKind, State, Event, Handler<D, A>)>,
}

impl<D, A> TableBuilder<D, A> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            callbacks: Vec::new(),
        }
    }

    /// Add a transition `(from, event) -> to`.
    pub fn transition(mut self, from: State, event: Event, to: State) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions<I, T>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Transition>,
    {
        self.transitions
            .extend(transitions.into_iter().map(Into::into));
        self
    }

    /// Add a callback of any kind. `event` is ignored for state-scoped kinds.
    pub fn callback<F>(mut self, kind: CallbackKind, state: State, event: Event, handler: F) -> Self
    where
        F: Fn(&Fsm<D, A>, State, State, Event, &A) + Send + Sync + 'static,
    {
        self.callbacks.push((kind, state, event, Box::new(handler)));
        self
    }

    /// Run `handler` before the transition for `(state, event)`.
    pub fn on_before_event<F>(self, state: State, event: Event, handler: F) -> Self
    where
        F: Fn(&Fsm<D, A>, State, State, Event, &A) + Send + Sync + 'static,
    {
        self.callback(CallbackKind::BeforeEvent, state, event, handler)
    }

    /// Run `handler` after the transition for `(state, event)`.
    pub fn on_after_event<F>(self, state: State, event: Event, handler: F) -> Self
    where
        F: Fn(&Fsm<D, A>, State, State, Event, &A) + Send + Sync + 'static,
    {
        self.callback(CallbackKind::AfterEvent, state, event, handler)
    }

    /// Run `handler` whenever the machine leaves `state`.
    pub fn on_leave_state<F>(self, state: State, handler: F) -> Self
    where
        F: Fn(&Fsm<D, A>, State, State, Event, &A) + Send + Sync + 'static,
    {
        self.callback(CallbackKind::LeaveState, state, Event::new(0), handler)
    }

    /// Run `handler` whenever the machine enters `state`.
    pub fn on_enter_state<F>(self, state: State, handler: F) -> Self
    where
        F: Fn(&Fsm<D, A>, State, State, Event, &A) + Send + Sync + 'static,
    {
        self.callback(CallbackKind::EnterState, state, Event::new(0), handler)
    }

    /// Build the table.
    /// Returns an error if a transition uses the reserved state. Callbacks
    /// outside the table's bounds are dropped.
    pub fn build(self) -> Result<TransitionTable<D, A>, BuildError> {
        let mut table = TransitionTable::try_new(self.transitions)?;
        for (kind, state, event, handler) in self.callbacks {
            table.install(kind, state, event, handler);
        }
        Ok(table)
    }

    /// Build the table and freeze it for sharing.
    pub fn build_shared(self) -> Result<Arc<TransitionTable<D, A>>, BuildError> {
        self.build().map(TransitionTable::into_shared)
    }
}

impl<D, A> Default for TableBuilder<D, A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const IDLE: State = State::new(0);
    const RUNNING: State = State::new(1);
    const STOPPED: State = State::new(2);

    const START: Event = Event::new(0);
    const STOP: Event = Event::new(1);

    #[test]
    fn builder_collects_transitions() {
        let table: TransitionTable = TableBuilder::new()
            .transition(IDLE, START, RUNNING)
            .add_transition(Transition::new(RUNNING, STOP, STOPPED))
            .build()
            .unwrap();

        assert_eq!(table.lookup(IDLE, START), Some(RUNNING));
        assert_eq!(table.lookup(RUNNING, STOP), Some(STOPPED));
        assert_eq!(table.transition_count(), 2);
    }

    #[test]
    fn builder_accepts_tuples() {
        let table: TransitionTable = TableBuilder::new()
            .transitions([(0u32, 0u32, 1u32), (1, 1, 2)])
            .build()
            .unwrap();
        assert_eq!(table.state_count(), 3);
    }

    #[test]
    fn builder_rejects_reserved_state() {
        let result: Result<TransitionTable, _> = TableBuilder::new()
            .transition(IDLE, START, State::INVALID)
            .build();

        assert!(matches!(
            result,
            Err(BuildError::Table(TableError::ReservedState { .. }))
        ));
    }

    #[test]
    fn builder_installs_callbacks() {
        let table = TableBuilder::<AtomicUsize>::new()
            .transition(IDLE, START, RUNNING)
            .transition(RUNNING, STOP, STOPPED)
            .on_before_event(IDLE, START, |fsm, _, _, _, _| {
                fsm.data().fetch_add(1, Ordering::SeqCst);
            })
            .on_leave_state(RUNNING, |fsm, _, _, _, _| {
                fsm.data().fetch_add(10, Ordering::SeqCst);
            })
            .on_enter_state(STOPPED, |fsm, _, _, _, _| {
                fsm.data().fetch_add(100, Ordering::SeqCst);
            })
            .on_after_event(RUNNING, STOP, |fsm, _, _, _, _| {
                fsm.data().fetch_add(1000, Ordering::SeqCst);
            })
            .build_shared()
            .unwrap();

        let fsm = Fsm::new("built", IDLE, table);
        assert!(fsm.trigger(START));
        assert!(fsm.trigger(STOP));
        assert_eq!(fsm.data().load(Ordering::SeqCst), 1111);
    }

    #[test]
    fn out_of_bounds_callbacks_are_dropped() {
        let table: TransitionTable = TableBuilder::new()
            .transition(IDLE, START, RUNNING)
            .on_enter_state(State::new(7), |_, _, _, _, _| {})
            .build()
            .unwrap();

        assert!(table
            .callback(CallbackKind::EnterState, State::new(7), START)
            .is_none());
    }
}
