//! FSM instances and the transition protocol.

use super::error::TriggerError;
use crate::core::{Event, State};
use crate::table::{CallbackKind, TransitionTable};
use parking_lot::ReentrantMutex;
use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// A state machine instance driving a shared [`TransitionTable`].
///
/// The current state lives in an atomic cell: [`current_state`] never
/// blocks. Transitions are serialized per instance by an exclusive region
/// that spans the whole callback sequence; different instances never
/// contend with each other.
///
/// `D` is the caller's user data, reachable from callbacks through
/// [`data`](Self::data). `A` is the argument type forwarded verbatim to
/// callbacks by [`trigger_with`](Self::trigger_with).
///
/// [`current_state`]: Self::current_state
///
/// # Example
///
/// ```rust
/// use densefsm::{Event, Fsm, State, TransitionTable};
///
/// let table = TransitionTable::new([(0u32, 0u32, 1u32), (1, 1, 0)]).into_shared();
/// let light: Fsm = Fsm::new("light", State::new(0), table);
///
/// assert!(light.trigger(Event::new(0)));
/// assert_eq!(light.current_state(), State::new(1));
/// assert!(!light.trigger(Event::new(0)));
/// ```
pub struct Fsm<D = (), A = ()> {
    id: String,
    state: AtomicU32,
    table: Arc<TransitionTable<D, A>>,
    data: D,
    /// Held for the whole transition; the flag marks a transition in progress
    /// so that a callback re-entering on the same thread is refused instead of
    /// silently nesting.
    region: ReentrantMutex<Cell<bool>>,
}

/// Clears the in-transition flag when the guarded section ends, panics
/// included.
struct InTransition<'a>(&'a Cell<bool>);

impl Drop for InTransition<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<D: Default, A> Fsm<D, A> {
    /// Create an instance with default user data.
    pub fn new(id: impl Into<String>, initial: State, table: Arc<TransitionTable<D, A>>) -> Self {
        Self::with_data(id, initial, table, D::default())
    }
}

impl<D, A> Fsm<D, A> {
    /// Create an instance carrying `data`.
    pub fn with_data(
        id: impl Into<String>,
        initial: State,
        table: Arc<TransitionTable<D, A>>,
        data: D,
    ) -> Self {
        Self {
            id: id.into(),
            state: AtomicU32::new(initial.id()),
            table,
            data,
            region: ReentrantMutex::new(Cell::new(false)),
        }
    }

    /// The instance label.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The user data slot.
    pub fn data(&self) -> &D {
        &self.data
    }

    /// The shared transition table.
    pub fn table(&self) -> &Arc<TransitionTable<D, A>> {
        &self.table
    }

    /// Atomic read of the current state.
    #[inline]
    pub fn current_state(&self) -> State {
        State::new(self.state.load(Ordering::Acquire))
    }

    /// Whether `event` has a transition from the current state.
    ///
    /// Advisory only: another thread may move the machine before a
    /// subsequent trigger.
    pub fn can_trigger(&self, event: Event) -> bool {
        self.table.lookup(self.current_state(), event).is_some()
    }

    /// Fire `event`, forwarding `args` to every callback.
    ///
    /// Returns `true` if the machine moved, `false` if the event does not
    /// apply in the current state.
    pub fn trigger_with(&self, event: Event, args: &A) -> bool {
        self.try_trigger_with(event, args).is_ok()
    }

    /// Fire `event` and report the new state or why nothing happened.
    ///
    /// The sequence is:
    /// 1. lock-free rejection when `(current, event)` has no transition;
    /// 2. under the instance's exclusive region, re-resolve the transition,
    ///    run before-event and leave-state callbacks, publish the new state
    ///    with compare-and-swap, then run enter-state and after-event
    ///    callbacks.
    ///
    /// A callback that triggers its own instance gets
    /// [`TriggerError::Reentrant`] rather than deadlocking.
    pub fn try_trigger_with(&self, event: Event, args: &A) -> Result<State, TriggerError> {
        let current = self.current_state();
        if self.table.lookup(current, event).is_none() {
            return Err(TriggerError::NoTransition {
                state: current,
                event,
            });
        }

        let region = self.region.lock();
        if region.replace(true) {
            tracing::warn!(id = %self.id, %event, "rejected re-entrant trigger");
            return Err(TriggerError::Reentrant { event });
        }
        let _in_transition = InTransition(&region);

        loop {
            let current = self.current_state();
            let Some(next) = self.table.lookup(current, event) else {
                return Err(TriggerError::NoTransition {
                    state: current,
                    event,
                });
            };

            self.fire(CallbackKind::BeforeEvent, current, event, current, next, args);
            self.fire(CallbackKind::LeaveState, current, event, current, next, args);

            if self
                .state
                .compare_exchange(current.id(), next.id(), Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                self.fire(CallbackKind::EnterState, next, event, current, next, args);
                self.fire(CallbackKind::AfterEvent, current, event, current, next, args);

                tracing::trace!(id = %self.id, from = %current, to = %next, %event, "transition");
                return Ok(next);
            }
        }
    }

    #[inline]
    fn fire(
        &self,
        kind: CallbackKind,
        slot: State,
        event: Event,
        from: State,
        to: State,
        args: &A,
    ) {
        if let Some(handler) = self.table.callback(kind, slot, event) {
            handler(self, from, to, event, args);
        }
    }

    /// Force the state without running callbacks. Callers must hold
    /// exclusive access to the instance (a pool slot being released).
    pub(crate) fn reset(&self, state: State) {
        self.state.store(state.id(), Ordering::Release);
    }

    /// Replace the state under the exclusive region, refusing when called
    /// from one of this instance's own callbacks.
    pub(crate) fn overwrite_state(&self, state: State) -> bool {
        let region = self.region.lock();
        if region.get() {
            return false;
        }
        self.state.store(state.id(), Ordering::Release);
        true
    }
}

impl<D> Fsm<D, ()> {
    /// Fire `event` with no arguments.
    pub fn trigger(&self, event: Event) -> bool {
        self.trigger_with(event, &())
    }

    /// Fire `event` with no arguments, reporting the outcome.
    pub fn try_trigger(&self, event: Event) -> Result<State, TriggerError> {
        self.try_trigger_with(event, &())
    }
}

impl<D: fmt::Debug, A> fmt::Debug for Fsm<D, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fsm")
            .field("id", &self.id)
            .field("state", &self.current_state())
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}
