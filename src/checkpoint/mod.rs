//! Checkpoint and resume for machine instances.
//!
//! A checkpoint records which state an instance was in, so long-lived
//! machines can survive process restarts. Tables and callbacks are code and
//! are not part of a checkpoint; restore targets an instance built from the
//! same table.

use crate::core::State;
use crate::machine::Fsm;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of one instance's state.
///
/// # Example
///
/// ```rust
/// use densefsm::checkpoint::Checkpoint;
/// use densefsm::{Event, Fsm, State, TransitionTable};
///
/// let table = TransitionTable::new([(0u32, 0u32, 1u32)]).into_shared();
/// let before: Fsm = Fsm::new("job-1", State::new(0), table.clone());
/// before.trigger(Event::new(0));
///
/// let json = before.checkpoint().to_json().unwrap();
///
/// let after: Fsm = Fsm::new("job-1", State::new(0), table);
/// after.restore(&Checkpoint::from_json(&json).unwrap()).unwrap();
/// assert_eq!(after.current_state(), State::new(1));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Label of the instance the checkpoint was taken from
    pub machine_id: String,

    /// State of the instance at capture time
    pub state: State,
}

impl Checkpoint {
    /// Capture the current state of `fsm`.
    pub fn capture<D, A>(fsm: &Fsm<D, A>) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            machine_id: fsm.id().to_string(),
            state: fsm.current_state(),
        }
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode from JSON, rejecting unsupported versions.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    /// Encode in the compact binary format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode from the compact binary format, rejecting unsupported versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    /// Move `fsm` into the recorded state without running callbacks.
    ///
    /// Waits for any in-flight transition on `fsm` to finish. Fails if the
    /// state is not part of `fsm`'s table or if called from one of `fsm`'s
    /// own callbacks.
    pub fn restore<D, A>(&self, fsm: &Fsm<D, A>) -> Result<(), CheckpointError> {
        self.check_version()?;

        let table = fsm.table();
        if !self.state.is_valid() || !table.contains_state(self.state) {
            return Err(CheckpointError::UnknownState {
                state: self.state,
                states: table.state_count(),
            });
        }

        if !fsm.overwrite_state(self.state) {
            return Err(CheckpointError::InTransition {
                machine_id: fsm.id().to_string(),
            });
        }

        tracing::debug!(
            machine = fsm.id(),
            checkpoint = %self.id,
            state = %self.state,
            "restored checkpoint"
        );
        Ok(())
    }

    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}

impl<D, A> Fsm<D, A> {
    /// Snapshot the current state.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::capture(self)
    }

    /// Restore a state recorded by [`checkpoint`](Self::checkpoint).
    pub fn restore(&self, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        checkpoint.restore(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Event;
    use crate::table::TransitionTable;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const IDLE: State = State::new(0);
    const RUNNING: State = State::new(1);
    const DONE: State = State::new(2);

    const START: Event = Event::new(0);
    const FINISH: Event = Event::new(1);

    fn table<D>() -> Arc<TransitionTable<D>> {
        TransitionTable::new([(0u32, 0u32, 1u32), (1, 1, 2)]).into_shared()
    }

    #[test]
    fn capture_records_current_state() {
        let fsm: Fsm = Fsm::new("job", IDLE, table());
        fsm.trigger(START);

        let checkpoint = fsm.checkpoint();
        assert_eq!(checkpoint.version, CHECKPOINT_VERSION);
        assert_eq!(checkpoint.machine_id, "job");
        assert_eq!(checkpoint.state, RUNNING);
    }

    #[test]
    fn checkpoints_have_unique_ids() {
        let fsm: Fsm = Fsm::new("job", IDLE, table());
        assert_ne!(fsm.checkpoint().id, fsm.checkpoint().id);
    }

    #[test]
    fn json_checkpoint_restores_state() {
        let table = table();
        let original: Fsm = Fsm::new("job", IDLE, Arc::clone(&table));
        original.trigger(START);
        original.trigger(FINISH);

        let json = original.checkpoint().to_json().unwrap();
        let resumed: Fsm = Fsm::new("job", IDLE, table);
        resumed.restore(&Checkpoint::from_json(&json).unwrap()).unwrap();

        assert_eq!(resumed.current_state(), DONE);
    }

    #[test]
    fn binary_checkpoint_restores_state() {
        let table = table();
        let original: Fsm = Fsm::new("job", IDLE, Arc::clone(&table));
        original.trigger(START);

        let checkpoint = original.checkpoint();
        let bytes = checkpoint.to_bytes().unwrap();
        let decoded = Checkpoint::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, checkpoint);

        let resumed: Fsm = Fsm::new("job", IDLE, table);
        resumed.restore(&decoded).unwrap();
        assert_eq!(resumed.current_state(), RUNNING);
    }

    #[test]
    fn restore_rejects_unknown_state() {
        let fsm: Fsm = Fsm::new("job", IDLE, table());
        let mut checkpoint = fsm.checkpoint();
        checkpoint.state = State::new(9);

        let err = fsm.restore(&checkpoint).unwrap_err();
        assert!(matches!(
            err,
            CheckpointError::UnknownState { states: 3, .. }
        ));
        assert_eq!(fsm.current_state(), IDLE);

        checkpoint.state = State::INVALID;
        assert!(fsm.restore(&checkpoint).is_err());
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let fsm: Fsm = Fsm::new("job", IDLE, table());
        let mut checkpoint = fsm.checkpoint();
        checkpoint.version = CHECKPOINT_VERSION + 1;

        let json = serde_json::to_string(&checkpoint).unwrap();
        assert!(matches!(
            Checkpoint::from_json(&json),
            Err(CheckpointError::UnsupportedVersion { found: 2, supported: 1 })
        ));
        assert!(matches!(
            fsm.restore(&checkpoint),
            Err(CheckpointError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn garbage_input_fails_to_decode() {
        assert!(matches!(
            Checkpoint::from_json("not json"),
            Err(CheckpointError::DeserializationFailed(_))
        ));
        assert!(matches!(
            Checkpoint::from_bytes(&[1, 2, 3]),
            Err(CheckpointError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn restore_from_own_callback_is_refused() {
        let checkpoint = Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            machine_id: "job".to_string(),
            state: IDLE,
        };
        let refusals = Arc::new(AtomicUsize::new(0));

        let mut table: TransitionTable = TransitionTable::new([(0u32, 0u32, 1u32), (1, 1, 2)]);
        let counter = Arc::clone(&refusals);
        table.on_enter_state(RUNNING, move |fsm, _, _, _, _| {
            if let Err(CheckpointError::InTransition { .. }) = fsm.restore(&checkpoint) {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        let fsm = Fsm::new("job", IDLE, table.into_shared());
        assert!(fsm.trigger(START));
        assert_eq!(refusals.load(Ordering::SeqCst), 1);
        assert_eq!(fsm.current_state(), RUNNING);
    }
}
