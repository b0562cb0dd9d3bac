//! The state machine itself.
//!
//! [`StateMachine`] owns a declarative configuration, tracks the active
//! state by name, and keeps a one-slot history for single-step undo/redo.
//! Every operation is synchronous and performs a single atomic mutation or
//! none, with one documented exception on [`trigger`](StateMachine::trigger).

use super::config::{MachineConfig, StateName};
use super::error::MachineError;
use super::history::HistorySlot;
use std::mem;

/// A finite state machine over string-named states.
///
/// The machine takes ownership of its [`MachineConfig`] and never mutates
/// it. Construction performs no validation: an inconsistent configuration
/// surfaces through each operation's own lookup. Validate eagerly with
/// [`MachineConfig::validate`] or build through
/// [`MachineBuilder`](crate::MachineBuilder) when that is not acceptable.
///
/// # Example
///
/// ```rust
/// use turnstile::{machine_config, StateMachine};
///
/// let mut machine = StateMachine::new(machine_config! {
///     initial: "idle",
///     "idle" => { "start" => "running" },
///     "running" => { "stop" => "idle" },
/// });
///
/// machine.trigger("start").unwrap();
/// assert_eq!(machine.current_state(), "running");
///
/// assert!(machine.undo());
/// assert_eq!(machine.current_state(), "idle");
/// assert!(machine.redo());
/// assert_eq!(machine.current_state(), "running");
/// ```
#[derive(Clone, Debug)]
pub struct StateMachine {
    config: MachineConfig,
    current: StateName,
    history: HistorySlot,
}

impl StateMachine {
    /// Create a machine positioned at the configuration's initial state,
    /// with empty history.
    pub fn new(config: MachineConfig) -> Self {
        let current = config.initial.clone();
        Self {
            config,
            current,
            history: HistorySlot::new(),
        }
    }

    /// Name of the active state. Pure, no side effects.
    pub fn current_state(&self) -> &str {
        &self.current
    }

    /// Name of the state the machine started in and returns to on
    /// [`reset`](StateMachine::reset).
    pub fn initial_state(&self) -> &str {
        &self.config.initial
    }

    /// Move directly to a declared state, bypassing transition rules.
    ///
    /// On success the state left behind becomes the undo target. The redo
    /// slot is deliberately not cleared: a redo armed by an earlier
    /// [`undo`](StateMachine::undo) stays pending across direct changes
    /// (and may then point at a state the machine has since left).
    ///
    /// Fails with [`MachineError::InvalidState`] when `state` is not
    /// declared; nothing is mutated in that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use turnstile::{machine_config, StateMachine};
    ///
    /// let mut machine = StateMachine::new(machine_config! {
    ///     initial: "idle",
    ///     "idle" => { "start" => "running" },
    ///     "running" => {},
    /// });
    ///
    /// machine.change_state("running").unwrap();
    /// assert_eq!(machine.current_state(), "running");
    ///
    /// assert!(machine.change_state("paused").is_err());
    /// assert_eq!(machine.current_state(), "running");
    /// ```
    pub fn change_state(&mut self, state: &str) -> Result<(), MachineError> {
        if !self.config.contains(state) {
            return Err(MachineError::InvalidState {
                state: state.to_string(),
            });
        }

        let from = mem::replace(&mut self.current, state.to_string());
        self.history.record(from);
        Ok(())
    }

    /// Apply the current state's transition rule for `event`.
    ///
    /// The undo slot always tracks the state before the latest transition
    /// attempt, successful or not: it is rewritten before the event is
    /// validated, so a failed trigger leaves the current state untouched
    /// but still rearms undo with the pre-call state. The redo slot is
    /// never touched.
    ///
    /// The destination named by the rule is not checked against the
    /// declared states; with an unvalidated configuration the machine can
    /// land in an undeclared state, and the next trigger then fails with
    /// [`MachineError::InvalidState`]. An event the current state has no
    /// rule for fails with [`MachineError::InvalidEvent`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use turnstile::{machine_config, StateMachine};
    ///
    /// let mut machine = StateMachine::new(machine_config! {
    ///     initial: "idle",
    ///     "idle" => { "start" => "running" },
    ///     "running" => { "stop" => "idle" },
    /// });
    ///
    /// machine.trigger("start").unwrap();
    /// assert_eq!(machine.current_state(), "running");
    ///
    /// // Unknown event: the state stays, the undo target was rewritten.
    /// assert!(machine.trigger("start").is_err());
    /// assert_eq!(machine.current_state(), "running");
    /// assert_eq!(machine.previous_state(), Some("running"));
    /// ```
    pub fn trigger(&mut self, event: &str) -> Result<(), MachineError> {
        // Rewritten before validation on purpose: the slot tracks the state
        // before the latest attempt, not the latest success.
        self.history.record(self.current.clone());

        let def = self
            .config
            .state(&self.current)
            .ok_or_else(|| MachineError::InvalidState {
                state: self.current.clone(),
            })?;

        let target = def
            .target_for(event)
            .ok_or_else(|| MachineError::InvalidEvent {
                state: self.current.clone(),
                event: event.to_string(),
            })?;

        self.current = target.to_string();
        Ok(())
    }

    /// Return to the initial state and drop all history. Always succeeds.
    ///
    /// # Example
    ///
    /// ```rust
    /// use turnstile::{machine_config, StateMachine};
    ///
    /// let mut machine = StateMachine::new(machine_config! {
    ///     initial: "idle",
    ///     "idle" => { "start" => "running" },
    ///     "running" => {},
    /// });
    ///
    /// machine.trigger("start").unwrap();
    /// machine.reset();
    ///
    /// assert_eq!(machine.current_state(), "idle");
    /// assert!(!machine.undo());
    /// assert!(!machine.redo());
    /// ```
    pub fn reset(&mut self) {
        self.current = self.config.initial.clone();
        self.history.clear();
    }

    /// All declared state names, in declaration order.
    pub fn states(&self) -> Vec<&str> {
        self.config.state_names().collect()
    }

    /// Names of the states with a transition rule for `event`, in
    /// declaration order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use turnstile::{machine_config, StateMachine};
    ///
    /// let machine = StateMachine::new(machine_config! {
    ///     initial: "idle",
    ///     "idle" => { "start" => "running" },
    ///     "running" => { "stop" => "idle" },
    /// });
    ///
    /// assert_eq!(machine.states(), vec!["idle", "running"]);
    /// assert_eq!(machine.states_handling("stop"), vec!["running"]);
    /// assert!(machine.states_handling("pause").is_empty());
    /// ```
    pub fn states_handling(&self, event: &str) -> Vec<&str> {
        self.config
            .states
            .iter()
            .filter(|(_, def)| def.handles(event))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Step back to the state held before the latest transition.
    ///
    /// Arms redo with the state being left. Returns `false` and mutates
    /// nothing when no undo target is stored; the history is one slot
    /// deep, so two consecutive undos never both succeed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use turnstile::{machine_config, StateMachine};
    ///
    /// let mut machine = StateMachine::new(machine_config! {
    ///     initial: "idle",
    ///     "idle" => { "start" => "running" },
    ///     "running" => {},
    /// });
    ///
    /// machine.trigger("start").unwrap();
    /// assert!(machine.undo());
    /// assert_eq!(machine.current_state(), "idle");
    /// assert!(!machine.undo());
    /// ```
    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.current)
    }

    /// Step forward to the state left by the latest
    /// [`undo`](StateMachine::undo).
    ///
    /// Arms undo with the state being left. Returns `false` and mutates
    /// nothing when no redo target is pending.
    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.current)
    }

    /// Drop both history slots; the current state is kept.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Undo target: the state held before the latest transition attempt,
    /// if any.
    pub fn previous_state(&self) -> Option<&str> {
        self.history.previous()
    }

    /// Pending redo target, if any. May name a state the machine has since
    /// moved away from; redo targets survive later transitions.
    pub fn next_state(&self) -> Option<&str> {
        self.history.next()
    }

    /// The machine's configuration.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// The undo/redo history slot.
    pub fn history(&self) -> &HistorySlot {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StateDef;

    fn job_machine() -> StateMachine {
        StateMachine::new(MachineConfig {
            initial: "idle".to_string(),
            states: vec![
                ("idle".to_string(), StateDef::new().on("start", "running")),
                (
                    "running".to_string(),
                    StateDef::new().on("stop", "idle").on("kill", "crashed"),
                ),
                ("crashed".to_string(), StateDef::new()),
            ],
        })
    }

    #[test]
    fn starts_in_initial_state() {
        let machine = job_machine();

        assert_eq!(machine.current_state(), "idle");
        assert_eq!(machine.initial_state(), "idle");
        assert!(machine.previous_state().is_none());
        assert!(machine.next_state().is_none());
    }

    #[test]
    fn change_state_moves_to_declared_state() {
        let mut machine = job_machine();

        machine.change_state("crashed").unwrap();

        assert_eq!(machine.current_state(), "crashed");
        assert_eq!(machine.previous_state(), Some("idle"));
    }

    #[test]
    fn change_state_arms_exactly_one_undo() {
        let mut machine = job_machine();
        machine.change_state("running").unwrap();

        assert!(machine.undo());
        assert_eq!(machine.current_state(), "idle");
        assert!(!machine.undo());
    }

    #[test]
    fn change_state_rejects_undeclared_state() {
        let mut machine = job_machine();

        let err = machine.change_state("paused").unwrap_err();

        assert!(matches!(
            err,
            MachineError::InvalidState { state } if state == "paused"
        ));
        assert_eq!(machine.current_state(), "idle");
        // Nothing mutated: undo stays disarmed.
        assert!(!machine.undo());
    }

    #[test]
    fn change_state_to_current_state_still_records_undo() {
        let mut machine = job_machine();

        machine.change_state("idle").unwrap();

        assert_eq!(machine.previous_state(), Some("idle"));
        assert!(machine.undo());
        assert_eq!(machine.current_state(), "idle");
    }

    #[test]
    fn trigger_follows_transition_rule() {
        let mut machine = job_machine();

        machine.trigger("start").unwrap();
        assert_eq!(machine.current_state(), "running");

        machine.trigger("kill").unwrap();
        assert_eq!(machine.current_state(), "crashed");
    }

    #[test]
    fn trigger_rejects_unknown_event() {
        let mut machine = job_machine();

        let err = machine.trigger("stop").unwrap_err();

        assert!(matches!(
            err,
            MachineError::InvalidEvent { state, event }
                if state == "idle" && event == "stop"
        ));
        assert_eq!(machine.current_state(), "idle");
    }

    #[test]
    fn failed_trigger_still_rewrites_undo_slot() {
        let mut machine = job_machine();
        machine.trigger("start").unwrap();
        assert_eq!(machine.previous_state(), Some("idle"));

        // "start" has no rule in "running": the call fails but the undo
        // target becomes the pre-call state.
        assert!(machine.trigger("start").is_err());

        assert_eq!(machine.current_state(), "running");
        assert_eq!(machine.previous_state(), Some("running"));
        assert!(machine.undo());
        assert_eq!(machine.current_state(), "running");
    }

    #[test]
    fn undo_then_redo_restores_pre_undo_state() {
        let mut machine = job_machine();
        machine.trigger("start").unwrap();

        assert!(machine.undo());
        assert_eq!(machine.current_state(), "idle");

        assert!(machine.redo());
        assert_eq!(machine.current_state(), "running");
        assert!(!machine.redo());
    }

    #[test]
    fn undo_without_history_returns_false() {
        let mut machine = job_machine();

        assert!(!machine.undo());
        assert_eq!(machine.current_state(), "idle");
    }

    #[test]
    fn redo_without_pending_next_returns_false() {
        let mut machine = job_machine();
        machine.trigger("start").unwrap();

        assert!(!machine.redo());
        assert_eq!(machine.current_state(), "running");
    }

    #[test]
    fn redo_target_survives_direct_state_change() {
        let mut machine = job_machine();
        machine.change_state("running").unwrap();
        assert!(machine.undo());

        // Direct change rewrites the undo slot but leaves the pending redo
        // target in place, even though it is now stale.
        machine.change_state("crashed").unwrap();
        assert_eq!(machine.next_state(), Some("running"));

        assert!(machine.redo());
        assert_eq!(machine.current_state(), "running");
        assert_eq!(machine.previous_state(), Some("crashed"));
    }

    #[test]
    fn reset_returns_to_initial_and_disarms_history() {
        let mut machine = job_machine();
        machine.trigger("start").unwrap();
        machine.undo();

        machine.reset();

        assert_eq!(machine.current_state(), "idle");
        assert!(!machine.undo());
        assert!(!machine.redo());
    }

    #[test]
    fn clear_history_keeps_current_state() {
        let mut machine = job_machine();
        machine.trigger("start").unwrap();
        machine.undo();

        machine.clear_history();

        assert_eq!(machine.current_state(), "idle");
        assert!(!machine.undo());
        assert!(!machine.redo());
    }

    #[test]
    fn states_list_declaration_order() {
        let machine = job_machine();

        assert_eq!(machine.states(), vec!["idle", "running", "crashed"]);
    }

    #[test]
    fn states_handling_filters_in_declaration_order() {
        let machine = StateMachine::new(MachineConfig {
            initial: "a".to_string(),
            states: vec![
                ("a".to_string(), StateDef::new().on("go", "b")),
                ("b".to_string(), StateDef::new().on("halt", "a")),
                ("c".to_string(), StateDef::new().on("go", "a")),
            ],
        });

        assert_eq!(machine.states_handling("go"), vec!["a", "c"]);
        assert_eq!(machine.states_handling("halt"), vec!["b"]);
        assert!(machine.states_handling("warp").is_empty());
    }

    #[test]
    fn undeclared_initial_surfaces_at_trigger_time() {
        let mut machine = StateMachine::new(MachineConfig {
            initial: "ghost".to_string(),
            states: vec![("real".to_string(), StateDef::new())],
        });

        // Construction is permissive; the broken lookup happens later.
        assert_eq!(machine.current_state(), "ghost");

        let err = machine.trigger("anything").unwrap_err();
        assert!(matches!(
            err,
            MachineError::InvalidState { state } if state == "ghost"
        ));
        // The undo slot was still rewritten before the lookup failed.
        assert_eq!(machine.previous_state(), Some("ghost"));
    }

    #[test]
    fn dangling_target_surfaces_on_next_trigger() {
        let mut machine = StateMachine::new(MachineConfig {
            initial: "a".to_string(),
            states: vec![("a".to_string(), StateDef::new().on("jump", "gone"))],
        });

        // Destinations are not checked at trigger time.
        machine.trigger("jump").unwrap();
        assert_eq!(machine.current_state(), "gone");

        let err = machine.trigger("jump").unwrap_err();
        assert!(matches!(
            err,
            MachineError::InvalidState { state } if state == "gone"
        ));
    }

    #[test]
    fn empty_string_state_is_a_real_state() {
        let mut machine = StateMachine::new(MachineConfig {
            initial: "named".to_string(),
            states: vec![
                ("named".to_string(), StateDef::new()),
                (String::new(), StateDef::new()),
            ],
        });

        machine.change_state("").unwrap();
        assert_eq!(machine.current_state(), "");

        // An empty name never reads as "no history".
        assert!(machine.undo());
        assert_eq!(machine.current_state(), "named");
        assert_eq!(machine.next_state(), Some(""));
    }
}
