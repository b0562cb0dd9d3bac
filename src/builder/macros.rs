//! Macros for ergonomic machine construction.

/// Build a [`MachineConfig`](crate::MachineConfig) from a declarative listing.
///
/// States and their transition rules keep the order they are written in.
/// The macro performs no validation; call
/// [`MachineConfig::validate`](crate::MachineConfig::validate), or build
/// through [`MachineBuilder`](crate::MachineBuilder), to check the result.
///
/// # Example
///
/// ```
/// use turnstile::{machine_config, StateMachine};
///
/// let config = machine_config! {
///     initial: "idle",
///     "idle" => { "start" => "running" },
///     "running" => { "stop" => "idle", "kill" => "crashed" },
///     "crashed" => {},
/// };
///
/// let machine = StateMachine::new(config);
/// assert_eq!(machine.states(), vec!["idle", "running", "crashed"]);
/// ```
#[macro_export]
macro_rules! machine_config {
    (
        initial: $initial:expr
        $(, $state:expr => { $( $event:expr => $target:expr ),* $(,)? } )*
        $(,)?
    ) => {
        $crate::core::MachineConfig {
            initial: String::from($initial),
            states: vec![
                $(
                    (
                        String::from($state),
                        $crate::core::StateDef {
                            transitions: vec![
                                $((String::from($event), String::from($target))),*
                            ],
                        },
                    )
                ),*
            ],
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{MachineConfig, StateDef};

    #[test]
    fn macro_matches_hand_built_config() {
        let from_macro = machine_config! {
            initial: "idle",
            "idle" => { "start" => "running" },
            "running" => { "stop" => "idle", "kill" => "crashed" },
            "crashed" => {},
        };

        let by_hand = MachineConfig {
            initial: "idle".to_string(),
            states: vec![
                ("idle".to_string(), StateDef::new().on("start", "running")),
                (
                    "running".to_string(),
                    StateDef::new().on("stop", "idle").on("kill", "crashed"),
                ),
                ("crashed".to_string(), StateDef::new()),
            ],
        };

        assert_eq!(from_macro, by_hand);
    }

    #[test]
    fn trailing_commas_are_optional() {
        let with = machine_config! {
            initial: "a",
            "a" => { "go" => "b", },
            "b" => {},
        };
        let without = machine_config! {
            initial: "a",
            "a" => { "go" => "b" },
            "b" => {}
        };

        assert_eq!(with, without);
    }

    #[test]
    fn empty_transition_blocks_are_allowed() {
        let config = machine_config! {
            initial: "done",
            "done" => {},
        };

        let def = config.state("done").unwrap();
        assert!(def.transitions.is_empty());
        assert!(!def.handles("anything"));
    }

    #[test]
    fn initial_only_config_has_no_states() {
        let config = machine_config! { initial: "lone" };

        assert_eq!(config.initial, "lone");
        assert!(config.states.is_empty());
    }
}
