//! Core state machine types and logic.
//!
//! This module contains the working parts of the machine:
//! - Declarative configuration: [`MachineConfig`] and [`StateDef`]
//! - The [`StateMachine`] that walks a configuration
//! - One-slot undo/redo tracking via [`HistorySlot`]
//!
//! Configurations are plain serializable data; all behavior lives on
//! [`StateMachine`].

mod config;
mod error;
mod history;
mod machine;

pub use config::{ConfigError, EventName, MachineConfig, StateDef, StateName};
pub use error::MachineError;
pub use history::HistorySlot;
pub use machine::StateMachine;
