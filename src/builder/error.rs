//! Build errors for the machine builder.

use crate::core::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a machine configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(name) before .build()")]
    MissingInitialState,

    #[error("Initial state '{state}' is not declared. Add it with .state(...)")]
    UnknownInitialState { state: String },

    #[error("Transition source state '{state}' is not declared. Add it with .state(...)")]
    UnknownSourceState { state: String },

    #[error("Transition '{event}' from '{state}' points at undeclared state '{target}'")]
    UnknownTargetState {
        state: String,
        event: String,
        target: String,
    },

    #[error("State '{state}' is declared more than once")]
    DuplicateState { state: String },

    #[error("State '{state}' declares more than one transition for event '{event}'")]
    DuplicateTransition { state: String, event: String },
}

impl From<ConfigError> for BuildError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::UnknownInitial { initial } => Self::UnknownInitialState { state: initial },
            ConfigError::DuplicateState { state } => Self::DuplicateState { state },
            ConfigError::DuplicateEvent { state, event } => {
                Self::DuplicateTransition { state, event }
            }
            ConfigError::UnknownTarget {
                state,
                event,
                target,
            } => Self::UnknownTargetState {
                state,
                event,
                target,
            },
        }
    }
}
