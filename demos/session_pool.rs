//! Session Pool
//!
//! This example demonstrates many worker threads sharing a fixed pool of
//! connection state machines.
//!
//! Key concepts:
//! - One shared table for every instance
//! - Constant-time allocate and release
//! - Handles return to the pool when dropped
//! - Per-slot user data
//!
//! Run with: cargo run --example session_pool

use densefsm::{Event, FsmPool, PoolConfig, State, TransitionTable};
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

const CLOSED: State = State::new(0);
const CONNECTING: State = State::new(1);
const OPEN: State = State::new(2);

const DIAL: Event = Event::new(0);
const ACCEPT: Event = Event::new(1);
const HANGUP: Event = Event::new(2);

fn main() {
    println!("=== Session Pool ===\n");

    let mut table: TransitionTable<AtomicU64> = TransitionTable::new([
        (CLOSED, DIAL, CONNECTING),
        (CONNECTING, ACCEPT, OPEN),
        (CONNECTING, HANGUP, CLOSED),
        (OPEN, HANGUP, CLOSED),
    ]);
    table.on_enter_state(OPEN, |fsm, _, _, _, _| {
        fsm.data().fetch_add(1, Ordering::Relaxed);
    });

    let config = PoolConfig::new(4, CLOSED).with_id_prefix("session");
    let pool = FsmPool::with_data(&config, table.into_shared(), |_| AtomicU64::new(0));

    let served = AtomicU64::new(0);
    let turned_away = AtomicU64::new(0);

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..250 {
                    let Some(session) = pool.allocate() else {
                        turned_away.fetch_add(1, Ordering::Relaxed);
                        thread::yield_now();
                        continue;
                    };
                    session.trigger(DIAL);
                    session.trigger(ACCEPT);
                    session.trigger(HANGUP);
                    served.fetch_add(1, Ordering::Relaxed);
                }
            });
        }
    });

    println!("Requests served:      {}", served.load(Ordering::Relaxed));
    println!("Requests turned away: {}", turned_away.load(Ordering::Relaxed));
    println!("Sessions in use:      {}\n", pool.allocated_count());

    println!("Connections opened per slot:");
    let mut sessions = Vec::with_capacity(pool.size());
    while let Some(session) = pool.allocate() {
        println!(
            "  {}: {} (state {})",
            session.id(),
            session.data().load(Ordering::Relaxed),
            session.current_state()
        );
        sessions.push(session);
    }
    drop(sessions);

    println!("\n=== Example Complete ===");
}
