//! Runtime errors raised by machine operations.

use thiserror::Error;

/// Errors raised by [`StateMachine`](crate::StateMachine) operations.
///
/// Both variants carry the offending names for diagnostics. They are
/// raised synchronously to the caller; the machine never retries,
/// recovers, or logs.
#[derive(Debug, Error)]
pub enum MachineError {
    /// The named state has no definition in the machine's configuration.
    ///
    /// Raised by [`change_state`](crate::StateMachine::change_state) for an
    /// undeclared target, and by [`trigger`](crate::StateMachine::trigger)
    /// when the current state itself is undeclared (possible only with an
    /// unvalidated configuration).
    #[error("State '{state}' is not defined in this machine")]
    InvalidState { state: String },

    /// The current state has no transition rule for the named event.
    #[error("No transition for event '{event}' from state '{state}'")]
    InvalidEvent { state: String, event: String },
}
