//! densefsm: table-driven finite state machines for concurrent programs
//!
//! States and events are small dense integers. Every transition of a machine
//! lives in one flat two-dimensional table indexed by `(state, event)`, so
//! resolving a transition is a single array load. One table is shared by any
//! number of instances; each instance only owns its current state.
//!
//! # Core Concepts
//!
//! - **TransitionTable**: The immutable `(state, event) -> state` mapping plus
//!   four optional callback slots per cell
//! - **Fsm**: An instance whose state is read lock-free and advanced by
//!   [`Fsm::trigger`], with transitions serialized per instance
//! - **FsmPool**: A fixed set of preconstructed instances handed out and
//!   returned in constant time
//! - **Checkpoint**: A serializable snapshot of an instance's state
//!
//! # Example
//!
//! ```rust
//! use densefsm::{Event, Fsm, FsmPool, State, TransitionTable};
//!
//! const IDLE: State = State::new(0);
//! const RUNNING: State = State::new(1);
//! const START: Event = Event::new(0);
//! const STOP: Event = Event::new(1);
//!
//! let mut table: TransitionTable = TransitionTable::new([(0u32, 0u32, 1u32), (1, 1, 0)]);
//! table.on_enter_state(RUNNING, |fsm, from, to, event, _| {
//!     println!("{}: {from} -> {to} on {event}", fsm.id());
//! });
//! let table = table.into_shared();
//!
//! let fsm: Fsm = Fsm::new("worker", IDLE, table.clone());
//! assert!(fsm.trigger(START));
//! assert!(!fsm.trigger(START));
//! assert!(fsm.trigger(STOP));
//!
//! let pool: FsmPool = FsmPool::new(4, IDLE, table);
//! let handle = pool.allocate().unwrap();
//! assert!(handle.trigger(START));
//! drop(handle);
//! assert_eq!(pool.free_count(), 4);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod machine;
pub mod pool;
pub mod table;

// Re-export commonly used types
pub use builder::{BuildError, MachineDefinition, TableBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use core::{Event, State, Transition};
pub use machine::{Fsm, TriggerError};
pub use pool::{FsmPool, PoolConfig, PooledFsm};
pub use table::{CallbackKind, Handler, TableError, TransitionTable};
