//! Turnstile: a declarative finite state machine with single-step undo/redo.
//!
//! States are identified by plain strings, and a machine is described by
//! data: each state lists which event names it responds to and where each
//! event leads. The machine tracks the active state, steps through
//! transitions on [`trigger`](StateMachine::trigger), and remembers one
//! step of history so the latest transition can be undone and redone.
//!
//! # Core Concepts
//!
//! - **Configuration**: `MachineConfig` declares states and their
//!   event -> destination rules; declaration order is preserved everywhere
//! - **Machine**: `StateMachine` walks a configuration and tracks the
//!   current state by name
//! - **History**: one undo slot and one redo slot, no deep stack
//!
//! # Example
//!
//! ```rust
//! use turnstile::{machine_config, StateMachine};
//!
//! let mut machine = StateMachine::new(machine_config! {
//!     initial: "idle",
//!     "idle" => { "start" => "running" },
//!     "running" => { "stop" => "idle" },
//! });
//!
//! machine.trigger("start").unwrap();
//! assert_eq!(machine.current_state(), "running");
//!
//! assert!(machine.undo());
//! assert_eq!(machine.current_state(), "idle");
//! assert!(machine.redo());
//! assert_eq!(machine.current_state(), "running");
//!
//! assert_eq!(machine.states_handling("stop"), vec!["running"]);
//! ```

pub mod builder;
pub mod core;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder};
pub use core::{
    ConfigError, EventName, HistorySlot, MachineConfig, MachineError, StateDef, StateMachine,
    StateName,
};
