//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::core::{EventName, MachineConfig, StateDef, StateMachine, StateName};

/// Builder for machine configurations with a fluent API.
///
/// Unlike a hand-written [`MachineConfig`], which stays permissive until
/// [`validate`](MachineConfig::validate) is called, the builder validates
/// on build: the initial state and every transition endpoint must be
/// declared, and no state or event may be declared twice.
///
/// # Example
///
/// ```rust
/// use turnstile::MachineBuilder;
///
/// let mut machine = MachineBuilder::new()
///     .initial("idle")
///     .state("idle")
///     .state("running")
///     .transition("idle", "start", "running")
///     .transition("running", "stop", "idle")
///     .build()
///     .unwrap();
///
/// machine.trigger("start").unwrap();
/// assert_eq!(machine.current_state(), "running");
/// ```
pub struct MachineBuilder {
    initial: Option<StateName>,
    states: Vec<(StateName, StateDef)>,
    transitions: Vec<(StateName, EventName, StateName)>,
}

impl MachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<StateName>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Declare a state with no transitions of its own.
    pub fn state(mut self, name: impl Into<StateName>) -> Self {
        self.states.push((name.into(), StateDef::new()));
        self
    }

    /// Declare a state with a pre-built definition.
    pub fn add_state(mut self, name: impl Into<StateName>, def: StateDef) -> Self {
        self.states.push((name.into(), def));
        self
    }

    /// Add a transition rule: `event` moves the machine from `from` to `to`.
    ///
    /// Rules are appended to the source state's definition at build time,
    /// after any rules the definition already carries.
    pub fn transition(
        mut self,
        from: impl Into<StateName>,
        event: impl Into<EventName>,
        to: impl Into<StateName>,
    ) -> Self {
        self.transitions.push((from.into(), event.into(), to.into()));
        self
    }

    /// Build the validated configuration.
    /// Returns an error if required fields are missing or any name dangles.
    pub fn build_config(self) -> Result<MachineConfig, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut states = self.states;
        for (from, event, to) in self.transitions {
            let def = match states.iter_mut().find(|(name, _)| *name == from) {
                Some((_, def)) => def,
                None => return Err(BuildError::UnknownSourceState { state: from }),
            };
            def.transitions.push((event, to));
        }

        let config = MachineConfig { initial, states };
        config.validate()?;
        Ok(config)
    }

    /// Build the state machine.
    /// Returns an error if required fields are missing or any name dangles.
    pub fn build(self) -> Result<StateMachine, BuildError> {
        Ok(StateMachine::new(self.build_config()?))
    }
}

impl Default for MachineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
