//! Checkpoint and Resume
//!
//! This example demonstrates saving an instance's state and resuming it in a
//! fresh instance, as a process restart would.
//!
//! Key concepts:
//! - Machine definitions loaded from JSON
//! - JSON checkpoints for readability, binary for compactness
//! - Restore validates the state against the table
//!
//! Run with: cargo run --example checkpoint_resume

use densefsm::{Checkpoint, Event, Fsm, MachineDefinition, State};

const DEFINITION: &str = r#"{
    "initial_state": 0,
    "transitions": [
        { "from": 0, "event": 0, "to": 1 },
        { "from": 1, "event": 1, "to": 2 },
        { "from": 2, "event": 2, "to": 3 },
        { "from": 1, "event": 3, "to": 4 },
        { "from": 2, "event": 3, "to": 4 }
    ]
}"#;

const PHASES: [&str; 5] = ["Initializing", "Mapping", "Reducing", "Complete", "Failed"];

const BEGIN: Event = Event::new(0);
const MAPPED: Event = Event::new(1);

fn phase(state: State) -> &'static str {
    PHASES.get(state.index()).copied().unwrap_or("?")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Checkpoint and Resume ===\n");

    let definition = MachineDefinition::from_json(DEFINITION)?;
    let table = definition.table()?.into_shared();

    // First run: get partway through, then "crash".
    let (json, bytes) = {
        let job: Fsm = Fsm::new("job-42", definition.initial_state, table.clone());
        job.try_trigger(BEGIN)?;
        job.try_trigger(MAPPED)?;
        println!("Before interruption: {}", phase(job.current_state()));

        let checkpoint = job.checkpoint();
        (checkpoint.to_json()?, checkpoint.to_bytes()?)
    };

    println!("JSON checkpoint ({} bytes):\n{json}\n", json.len());
    println!("Binary checkpoint: {} bytes\n", bytes.len());

    // Second run: a fresh instance picks up where the first stopped.
    let resumed: Fsm = Fsm::new("job-42", definition.initial_state, table.clone());
    let checkpoint = Checkpoint::from_bytes(&bytes)?;
    resumed.restore(&checkpoint)?;
    println!(
        "Resumed '{}' from checkpoint {} taken at {}",
        checkpoint.machine_id, checkpoint.id, checkpoint.timestamp
    );
    println!("After restore: {}", phase(resumed.current_state()));

    resumed.try_trigger(Event::new(2))?;
    println!("Finished in: {}", phase(resumed.current_state()));

    // A checkpoint from a different machine is refused.
    let mut foreign = Checkpoint::from_json(&json)?;
    foreign.state = State::new(17);
    if let Err(err) = resumed.restore(&foreign) {
        println!("\nRejected foreign checkpoint: {err}");
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
