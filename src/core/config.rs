//! Declarative machine configuration.
//!
//! A machine is described by a [`MachineConfig`]: the name of the initial
//! state plus every state and its event -> destination transition rules.
//! Declaration order is part of the contract: state listings iterate in the
//! order states were declared, and the serde representation is a map whose
//! document order survives a round-trip unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of a state. States are identified by plain strings.
pub type StateName = String;

/// Name of an event that triggers transitions.
pub type EventName = String;

/// Declarative transition rules for a single state.
///
/// Maps event names to destination state names, in declaration order.
/// Lookups scan the pairs linearly; configurations are small and the scan
/// keeps the declaration-order contract for free.
///
/// # Example
///
/// ```rust
/// use turnstile::StateDef;
///
/// let def = StateDef::new().on("start", "running").on("kill", "crashed");
///
/// assert_eq!(def.target_for("start"), Some("running"));
/// assert!(def.handles("kill"));
/// assert!(!def.handles("pause"));
/// assert_eq!(def.events().collect::<Vec<_>>(), vec!["start", "kill"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateDef {
    /// Event name -> destination state name pairs, in declaration order.
    #[serde(with = "ordered", default)]
    pub transitions: Vec<(EventName, StateName)>,
}

impl StateDef {
    /// Create a state definition with no outgoing transitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transition rule, returning the definition for chaining.
    ///
    /// # Example
    ///
    /// ```rust
    /// use turnstile::StateDef;
    ///
    /// let def = StateDef::new().on("play", "playing");
    /// assert_eq!(def.target_for("play"), Some("playing"));
    /// ```
    pub fn on(mut self, event: impl Into<EventName>, target: impl Into<StateName>) -> Self {
        self.transitions.push((event.into(), target.into()));
        self
    }

    /// Destination state for `event`, if this state handles it.
    ///
    /// When duplicate rules exist for the same event the first declaration
    /// wins; [`MachineConfig::validate`] reports such duplicates.
    pub fn target_for(&self, event: &str) -> Option<&str> {
        self.transitions
            .iter()
            .find(|(name, _)| name == event)
            .map(|(_, target)| target.as_str())
    }

    /// Whether this state has a transition rule for `event`.
    pub fn handles(&self, event: &str) -> bool {
        self.transitions.iter().any(|(name, _)| name == event)
    }

    /// Event names this state handles, in declaration order.
    pub fn events(&self) -> impl Iterator<Item = &str> + '_ {
        self.transitions.iter().map(|(name, _)| name.as_str())
    }
}

/// Declarative description of a whole machine: the initial state name plus
/// every state and its transition rules, in declaration order.
///
/// The serde representation mirrors the shape machines are written in by
/// hand: `states` is a map keyed by state name, and document order is
/// preserved both when reading and writing.
///
/// Constructing a [`StateMachine`](crate::StateMachine) from a config does
/// not validate it; call [`MachineConfig::validate`], or build through
/// [`MachineBuilder`](crate::MachineBuilder) which validates on build, to
/// catch dangling references eagerly.
///
/// # Example
///
/// ```rust
/// use turnstile::MachineConfig;
///
/// let config: MachineConfig = serde_json::from_str(
///     r#"{
///         "initial": "idle",
///         "states": {
///             "idle": { "transitions": { "start": "running" } },
///             "running": { "transitions": { "stop": "idle" } }
///         }
///     }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.initial, "idle");
/// assert!(config.contains("running"));
/// assert_eq!(
///     config.state_names().collect::<Vec<_>>(),
///     vec!["idle", "running"]
/// );
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Name of the state the machine starts in (and returns to on reset).
    pub initial: StateName,
    /// Every declared state with its transition rules, in declaration order.
    #[serde(with = "ordered")]
    pub states: Vec<(StateName, StateDef)>,
}

impl MachineConfig {
    /// Definition of the named state, if declared.
    ///
    /// When a name is declared more than once the first declaration wins;
    /// [`MachineConfig::validate`] reports the duplication.
    pub fn state(&self, name: &str) -> Option<&StateDef> {
        self.states
            .iter()
            .find(|(declared, _)| declared == name)
            .map(|(_, def)| def)
    }

    /// Whether `name` is a declared state.
    pub fn contains(&self, name: &str) -> bool {
        self.states.iter().any(|(declared, _)| declared == name)
    }

    /// Declared state names, in declaration order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.states.iter().map(|(name, _)| name.as_str())
    }

    /// Check the configuration for internal consistency.
    ///
    /// Reports the first problem found: an initial state that is not
    /// declared, a state declared twice, two rules for the same event on
    /// one state, or a transition whose destination is not declared.
    ///
    /// Machine construction never runs this; deserialized configurations
    /// can opt in before use.
    ///
    /// # Example
    ///
    /// ```rust
    /// use turnstile::{machine_config, ConfigError};
    ///
    /// let config = machine_config! {
    ///     initial: "idle",
    ///     "idle" => { "start" => "running" },
    /// };
    ///
    /// // "running" is never declared.
    /// assert!(matches!(
    ///     config.validate(),
    ///     Err(ConfigError::UnknownTarget { .. })
    /// ));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.contains(&self.initial) {
            return Err(ConfigError::UnknownInitial {
                initial: self.initial.clone(),
            });
        }

        for (index, (name, def)) in self.states.iter().enumerate() {
            if self.states[..index].iter().any(|(earlier, _)| earlier == name) {
                return Err(ConfigError::DuplicateState {
                    state: name.clone(),
                });
            }

            for (offset, (event, target)) in def.transitions.iter().enumerate() {
                if def.transitions[..offset]
                    .iter()
                    .any(|(earlier, _)| earlier == event)
                {
                    return Err(ConfigError::DuplicateEvent {
                        state: name.clone(),
                        event: event.clone(),
                    });
                }

                if !self.contains(target) {
                    return Err(ConfigError::UnknownTarget {
                        state: name.clone(),
                        event: event.clone(),
                        target: target.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Problems detected by [`MachineConfig::validate`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The initial state is not among the declared states.
    #[error("Initial state '{initial}' is not declared")]
    UnknownInitial { initial: String },

    /// A state name appears more than once.
    #[error("State '{state}' is declared more than once")]
    DuplicateState { state: String },

    /// One state declares two rules for the same event.
    #[error("State '{state}' declares more than one transition for event '{event}'")]
    DuplicateEvent { state: String, event: String },

    /// A transition points at a state that is not declared.
    #[error("Transition '{event}' from '{state}' targets undeclared state '{target}'")]
    UnknownTarget {
        state: String,
        event: String,
        target: String,
    },
}

/// Serde support for order-preserving string-keyed maps.
///
/// Serializes `Vec<(String, V)>` as a map and deserializes a map back into
/// the `Vec` in document order, so declaration order is never lost to a
/// hash map on the way through serde.
mod ordered {
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;
    use std::marker::PhantomData;

    pub fn serialize<V, S>(entries: &[(String, V)], serializer: S) -> Result<S::Ok, S::Error>
    where
        V: Serialize,
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, V, D>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
    where
        V: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        struct OrderedVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
            type Value = Vec<(String, V)>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map with string keys")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}
