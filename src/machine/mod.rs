//! State machine instances.
//!
//! An [`Fsm`] owns an atomic current-state cell and shares its transition
//! table with every other instance built from it. Reads never block;
//! transitions on one instance are serialized by that instance alone.

mod error;
mod fsm;

pub use error::TriggerError;
pub use fsm::Fsm;
