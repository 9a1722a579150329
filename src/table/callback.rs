//! Callback kinds and the handler value type.

use crate::core::{Event, State};
use crate::machine::Fsm;

/// Opaque business-logic hook invoked by the transition protocol.
///
/// Receives the instance, the `from` and `to` states, the triggering event
/// and the argument value passed to `trigger_with`. Handlers run inside the
/// instance's exclusive region and must be fast and non-blocking.
pub type Handler<D, A> = Box<dyn Fn(&Fsm<D, A>, State, State, Event, &A) + Send + Sync>;

/// Which of the four callback tables a handler belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackKind {
    /// Fires first, keyed by `(from, event)`.
    BeforeEvent,
    /// Fires last, keyed by `(from, event)`.
    AfterEvent,
    /// Fires after `BeforeEvent`, keyed by `from`.
    LeaveState,
    /// Fires once the new state is visible, keyed by `to`.
    EnterState,
}

impl CallbackKind {
    /// All kinds in firing order.
    pub const ALL: [CallbackKind; 4] = [
        CallbackKind::BeforeEvent,
        CallbackKind::LeaveState,
        CallbackKind::EnterState,
        CallbackKind::AfterEvent,
    ];

    /// Whether the slot is keyed by `(state, event)` rather than `state` alone.
    pub const fn is_event_scoped(self) -> bool {
        matches!(self, CallbackKind::BeforeEvent | CallbackKind::AfterEvent)
    }
}
