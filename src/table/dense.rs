//! Dense array-backed transition table.

use super::callback::{CallbackKind, Handler};
use super::error::TableError;
use crate::core::{Event, State, Transition};
use crate::machine::Fsm;
use std::fmt;
use std::sync::Arc;

const NO_TRANSITION: u32 = State::INVALID.id();

/// Dense `(state, event) -> state` mapping plus four callback tables.
///
/// The next-state matrix is stored row-major as one flat array indexed by
/// `from * event_count + event`. Every cell not set by a supplied transition
/// holds the sentinel, which never escapes [`lookup`](Self::lookup).
///
/// Callbacks are registered through `&mut self`; once the table is frozen
/// into an `Arc` (see [`into_shared`](Self::into_shared)) it is read-only and
/// can be shared by any number of instances and threads.
///
/// # Example
///
/// ```rust
/// use densefsm::{Event, State, TransitionTable};
///
/// let table: TransitionTable = TransitionTable::new([(0u32, 0u32, 1u32), (1, 1, 0)]);
/// assert_eq!(table.lookup(State::new(0), Event::new(0)), Some(State::new(1)));
/// assert_eq!(table.lookup(State::new(0), Event::new(1)), None);
/// assert_eq!(table.state_count(), 2);
/// assert_eq!(table.event_count(), 2);
/// ```
pub struct TransitionTable<D = (), A = ()> {
    state_count: usize,
    event_count: usize,
    next: Box<[u32]>,
    before_event: Box<[Option<Handler<D, A>>]>,
    after_event: Box<[Option<Handler<D, A>>]>,
    leave_state: Box<[Option<Handler<D, A>>]>,
    enter_state: Box<[Option<Handler<D, A>>]>,
}

fn empty_slots<D, A>(len: usize) -> Box<[Option<Handler<D, A>>]> {
    std::iter::repeat_with(|| None).take(len).collect()
}

impl<D, A> TransitionTable<D, A> {
    /// Build a table from a transition list.
    ///
    /// # Panics
    ///
    /// Panics if a transition uses [`State::INVALID`] as an endpoint. Use
    /// [`try_new`](Self::try_new) to receive the error instead.
    pub fn new<I, T>(transitions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Transition>,
    {
        match Self::try_new(transitions) {
            Ok(table) => table,
            Err(err) => panic!("invalid transition table: {err}"),
        }
    }

    /// Build a table from a transition list, reporting configuration errors.
    pub fn try_new<I, T>(transitions: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Transition>,
    {
        let transitions: Vec<Transition> = transitions.into_iter().map(Into::into).collect();

        if let Some(bad) = transitions.iter().find(|t| !t.is_well_formed()) {
            return Err(TableError::ReservedState {
                from: bad.from,
                event: bad.event,
                to: bad.to,
            });
        }

        let (state_count, event_count) = dimensions(&transitions);
        let cells = state_count
            .checked_mul(event_count)
            .ok_or(TableError::DimensionOverflow {
                states: state_count,
                events: event_count,
            })?;

        let mut table = Self {
            state_count,
            event_count,
            next: vec![NO_TRANSITION; cells].into_boxed_slice(),
            before_event: empty_slots(cells),
            after_event: empty_slots(cells),
            leave_state: empty_slots(state_count),
            enter_state: empty_slots(state_count),
        };

        for transition in &transitions {
            if let Some(index) = table.cell(transition.from, transition.event) {
                table.next[index] = transition.to.id();
            }
        }

        tracing::debug!(
            states = state_count,
            events = event_count,
            transitions = transitions.len(),
            "built transition table"
        );

        Ok(table)
    }

    /// Freeze the table for sharing across instances and threads.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Number of rows: one more than the largest state mentioned.
    pub fn state_count(&self) -> usize {
        self.state_count
    }

    /// Number of columns: one more than the largest event mentioned.
    pub fn event_count(&self) -> usize {
        self.event_count
    }

    /// Whether `state` has a row in this table.
    pub fn contains_state(&self, state: State) -> bool {
        state.index() < self.state_count
    }

    /// Number of defined transitions.
    pub fn transition_count(&self) -> usize {
        self.next.iter().filter(|&&to| to != NO_TRANSITION).count()
    }

    /// Resolve the target of `(from, event)`.
    ///
    /// Returns `None` if either coordinate is outside the table or no
    /// transition was defined for the pair.
    #[inline]
    pub fn lookup(&self, from: State, event: Event) -> Option<State> {
        let to = self.next[self.cell(from, event)?];
        (to != NO_TRANSITION).then_some(State::new(to))
    }

    /// Iterate over the defined transitions in row-major order.
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        let events = self.event_count;
        self.next.iter().enumerate().filter_map(move |(index, &to)| {
            (to != NO_TRANSITION).then(|| {
                Transition::new(
                    State::new((index / events) as u32),
                    Event::new((index % events) as u32),
                    State::new(to),
                )
            })
        })
    }

    /// Install `handler` in the slot for `kind`.
    ///
    /// `event` is ignored for the state-scoped kinds. A slot holds at most one
    /// handler; registering again replaces it. Returns `false` and leaves the
    /// table untouched if the slot lies outside the table.
    pub fn register_callback<F>(
        &mut self,
        kind: CallbackKind,
        state: State,
        event: Event,
        handler: F,
    ) -> bool
    where
        F: Fn(&Fsm<D, A>, State, State, Event, &A) + Send + Sync + 'static,
    {
        self.install(kind, state, event, Box::new(handler))
    }

    pub(crate) fn install(
        &mut self,
        kind: CallbackKind,
        state: State,
        event: Event,
        handler: Handler<D, A>,
    ) -> bool {
        let slot = match kind {
            CallbackKind::BeforeEvent => self
                .cell(state, event)
                .map(|index| &mut self.before_event[index]),
            CallbackKind::AfterEvent => self
                .cell(state, event)
                .map(|index| &mut self.after_event[index]),
            CallbackKind::LeaveState => self.row(state).map(|index| &mut self.leave_state[index]),
            CallbackKind::EnterState => self.row(state).map(|index| &mut self.enter_state[index]),
        };

        match slot {
            Some(slot) => {
                *slot = Some(handler);
                true
            }
            None => {
                tracing::warn!(?kind, %state, %event, "ignoring callback outside table bounds");
                false
            }
        }
    }

    /// Register a handler fired before the transition for `(state, event)`.
    pub fn on_before_event<F>(&mut self, state: State, event: Event, handler: F) -> bool
    where
        F: Fn(&Fsm<D, A>, State, State, Event, &A) + Send + Sync + 'static,
    {
        self.register_callback(CallbackKind::BeforeEvent, state, event, handler)
    }

    /// Register a handler fired after the transition for `(state, event)`.
    pub fn on_after_event<F>(&mut self, state: State, event: Event, handler: F) -> bool
    where
        F: Fn(&Fsm<D, A>, State, State, Event, &A) + Send + Sync + 'static,
    {
        self.register_callback(CallbackKind::AfterEvent, state, event, handler)
    }

    /// Register a handler fired whenever the machine leaves `state`.
    pub fn on_leave_state<F>(&mut self, state: State, handler: F) -> bool
    where
        F: Fn(&Fsm<D, A>, State, State, Event, &A) + Send + Sync + 'static,
    {
        self.register_callback(CallbackKind::LeaveState, state, Event::new(0), handler)
    }

    /// Register a handler fired whenever the machine enters `state`.
    pub fn on_enter_state<F>(&mut self, state: State, handler: F) -> bool
    where
        F: Fn(&Fsm<D, A>, State, State, Event, &A) + Send + Sync + 'static,
    {
        self.register_callback(CallbackKind::EnterState, state, Event::new(0), handler)
    }

    /// The handler registered for `kind` at the given slot, if any.
    #[inline]
    pub fn callback(&self, kind: CallbackKind, state: State, event: Event) -> Option<&Handler<D, A>> {
        let slot = match kind {
            CallbackKind::BeforeEvent => &self.before_event[self.cell(state, event)?],
            CallbackKind::AfterEvent => &self.after_event[self.cell(state, event)?],
            CallbackKind::LeaveState => &self.leave_state[self.row(state)?],
            CallbackKind::EnterState => &self.enter_state[self.row(state)?],
        };
        slot.as_ref()
    }

    #[inline]
    fn cell(&self, state: State, event: Event) -> Option<usize> {
        let (row, column) = (state.index(), event.index());
        (row < self.state_count && column < self.event_count)
            .then_some(row * self.event_count + column)
    }

    #[inline]
    fn row(&self, state: State) -> Option<usize> {
        (state.index() < self.state_count).then_some(state.index())
    }

    fn registered(slots: &[Option<Handler<D, A>>]) -> usize {
        slots.iter().filter(|slot| slot.is_some()).count()
    }
}

fn dimensions(transitions: &[Transition]) -> (usize, usize) {
    let (max_state, max_event) = transitions.iter().fold((0u32, 0u32), |(s, e), t| {
        (s.max(t.from.id()).max(t.to.id()), e.max(t.event.id()))
    });
    (max_state as usize + 1, max_event as usize + 1)
}

impl<D, A> fmt::Debug for TransitionTable<D, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionTable")
            .field("state_count", &self.state_count)
            .field("event_count", &self.event_count)
            .field("transitions", &self.transition_count())
            .field("before_event", &Self::registered(&self.before_event))
            .field("after_event", &Self::registered(&self.after_event))
            .field("leave_state", &Self::registered(&self.leave_state))
            .field("enter_state", &Self::registered(&self.enter_state))
            .finish()
    }
}

/// Dumps every cell as `from<TAB>event<TAB>to`, `-` marking empty cells.
impl<D, A> fmt::Display for TransitionTable<D, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "From\tEvent\tTo")?;
        for (index, &to) in self.next.iter().enumerate() {
            writeln!(
                f,
                "{}\t{}\t{}",
                index / self.event_count,
                index % self.event_count,
                State::new(to)
            )?;
        }
        Ok(())
    }
}
