//! Coin-Operated Gate
//!
//! This example demonstrates a declarative two-state machine.
//!
//! Key concepts:
//! - Declaring a machine with the machine_config! macro
//! - Driving transitions with string-named events
//! - Inspecting declared states and event handlers
//! - Error reporting for events a state does not handle
//!
//! Run with: cargo run --example coin_gate

use turnstile::{machine_config, StateMachine};

fn main() {
    println!("=== Coin-Operated Gate ===\n");

    let mut gate = StateMachine::new(machine_config! {
        initial: "locked",
        "locked" => { "coin" => "unlocked" },
        "unlocked" => { "push" => "locked" },
    });

    println!("Initial state: {}\n", gate.current_state());

    println!("Declared states: {:?}", gate.states());
    println!("States handling 'coin': {:?}", gate.states_handling("coin"));
    println!("States handling 'push': {:?}\n", gate.states_handling("push"));

    println!("Pushing without paying...");
    match gate.trigger("push") {
        Ok(()) => println!("State: {}", gate.current_state()),
        Err(err) => println!("Rejected: {}", err),
    }
    println!("State is still: {}\n", gate.current_state());

    println!("Inserting a coin...");
    gate.trigger("coin").unwrap();
    println!("State: {}\n", gate.current_state());

    println!("Undo: {}", gate.undo());
    println!("State: {}", gate.current_state());
    println!("Redo: {}", gate.redo());
    println!("State: {}\n", gate.current_state());

    println!("Pushing through...");
    gate.trigger("push").unwrap();
    println!("State: {}", gate.current_state());

    println!("\n=== Example Complete ===");
}
