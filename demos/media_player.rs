//! Media Player State Machine
//!
//! This example demonstrates a table-driven player with lifecycle callbacks.
//!
//! Key concepts:
//! - Dense state and event enums declared with macros
//! - Callbacks on leaving and entering states
//! - Rejected events leave the state untouched
//!
//! Run with: cargo run --example media_player

use densefsm::{event_enum, state_enum, Event, Fsm, State, TableBuilder};

state_enum! {
    enum Player {
        Idle,
        Running,
        Paused,
        Stopped,
    }
}

event_enum! {
    enum Control {
        Start,
        Pause,
        Resume,
        Stop,
    }
}

fn name(state: State) -> &'static str {
    Player::try_from(state).map(|p| p.name()).unwrap_or("?")
}

fn main() {
    println!("=== Media Player State Machine ===\n");

    let table = TableBuilder::new()
        .transition(Player::Idle.into(), Control::Start.into(), Player::Running.into())
        .transition(Player::Running.into(), Control::Pause.into(), Player::Paused.into())
        .transition(Player::Running.into(), Control::Stop.into(), Player::Stopped.into())
        .transition(Player::Paused.into(), Control::Resume.into(), Player::Running.into())
        .transition(Player::Paused.into(), Control::Stop.into(), Player::Stopped.into())
        .on_leave_state(Player::Running.into(), |fsm: &Fsm, _, to, _, _| {
            println!("  [{}] leaving Running for {}", fsm.id(), name(to));
        })
        .on_enter_state(Player::Running.into(), |fsm: &Fsm, from, _, _, _| {
            println!("  [{}] playback running (was {})", fsm.id(), name(from));
        })
        .build_shared()
        .unwrap();

    println!("{table}");

    let player = Fsm::new("player-1", Player::Idle.into(), table);

    let script = [
        Control::Start,
        Control::Pause,
        Control::Start,
        Control::Resume,
        Control::Stop,
        Control::Resume,
    ];

    for control in script {
        let before = name(player.current_state());
        match player.try_trigger(Event::from(control)) {
            Ok(next) => println!("{:>7}: {before} -> {}", control.name(), name(next)),
            Err(err) => println!("{:>7}: ignored ({err})", control.name()),
        }
    }

    println!("\nFinal state: {}", name(player.current_state()));
    println!("\n=== Example Complete ===");
}
