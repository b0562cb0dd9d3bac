//! Media Player Controls
//!
//! This example demonstrates the fluent builder and one-step history.
//!
//! Key concepts:
//! - Building a validated machine with MachineBuilder
//! - Direct state changes that bypass transition rules
//! - Single-step undo and redo
//! - Resetting to the initial state
//!
//! Run with: cargo run --example media_player

use turnstile::MachineBuilder;

fn main() {
    println!("=== Media Player Controls ===\n");

    let mut player = MachineBuilder::new()
        .initial("stopped")
        .state("stopped")
        .state("playing")
        .state("paused")
        .transition("stopped", "play", "playing")
        .transition("playing", "pause", "paused")
        .transition("playing", "stop", "stopped")
        .transition("paused", "play", "playing")
        .transition("paused", "stop", "stopped")
        .build()
        .unwrap();

    println!("Player built, state: {}\n", player.current_state());

    println!("1. Playing and pausing");
    player.trigger("play").unwrap();
    println!("   play  -> {}", player.current_state());
    player.trigger("pause").unwrap();
    println!("   pause -> {}", player.current_state());

    println!("\n2. Undo and redo (one step deep)");
    player.undo();
    println!("   undo  -> {}", player.current_state());
    println!("   undo again succeeds: {}", player.undo());
    player.redo();
    println!("   redo  -> {}", player.current_state());

    println!("\n3. Jumping straight to a state");
    player.change_state("stopped").unwrap();
    println!("   change_state -> {}", player.current_state());
    player.undo();
    println!("   undo  -> {}", player.current_state());

    println!("\n4. Reset clears position and history");
    player.reset();
    println!("   state: {}", player.current_state());
    println!("   undo after reset succeeds: {}", player.undo());

    println!("\n=== Example Complete ===");
}
