//! Dense transition tables.
//!
//! A [`TransitionTable`] maps `(state, event)` pairs to target states using
//! flat arrays sized from the transitions it was built from, and holds the
//! four callback tables consulted by the transition protocol.
//!
//! Tables are mutable only while they are exclusively owned. Freezing one
//! into an `Arc` publishes it read-only to any number of instances.

mod callback;
mod dense;
mod error;

pub use callback::{CallbackKind, Handler};
pub use dense::TransitionTable;
pub use error::TableError;
