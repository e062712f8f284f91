//! Game engines.
//!
//! The host runs a game through an engine chosen by the board map
//! (`"engine": {"type": "demo-engine"}`). Engines come in two layers:
//!
//! - [`GameEngine`]: what the host calls on every engine (init, state
//!   updates, player actions, UI requirements, cleanup)
//! - [`TurnBasedGameEngine`]: the turn-phase handlers of the host's
//!   turn-based engine. Each handler has a default that runs the host flow
//!   in [`flow`]; engines override a handler and call the `flow` function to
//!   fall back to the default.
//!
//! [`EngineCore`] holds the primitives both layers share (state, bus, phase
//! machine, turn manager, die, timer and roll-button flags, action log).

mod base;
pub mod flow;
mod turn_based;
mod turn_manager;
mod demo_state;
mod demo;

pub use base::{EngineCore, LogEntry};
pub use demo::{DemoGameEngine, PlayerMessage};
pub use demo_state::DemoGameState;
pub use turn_based::TurnBasedEngine;
pub use turn_manager::{DemoTurnManager, RoundRobinTurnManager, TurnManager};

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{BaseGameState, GameStateKind, PlayerId, PluginConfig};
use crate::host::{EventBus, PhaseMachineConfig, PhaseStateMachine};

/// Host-provided source of a typed move count (the "how far?" prompt).
///
/// Returns the raw text the player entered, or `None` if they dismissed it.
pub type MoveInput = Box<dyn FnMut() -> Option<String>>;

/// Collaborators the host hands an engine at construction.
pub struct EngineDependencies {
    pub game_state: Box<dyn GameStateKind>,
    pub event_bus: Rc<dyn EventBus>,
    pub turn_manager: Box<dyn TurnManager>,
    pub phase_machine: PhaseStateMachine,
    pub move_input: Option<MoveInput>,
}

impl EngineDependencies {
    /// Dependencies with a round-robin turn manager and a phase machine
    /// accepting every phase.
    pub fn new(game_state: Box<dyn GameStateKind>, event_bus: Rc<dyn EventBus>) -> Self {
        let phase_machine =
            PhaseStateMachine::new(PhaseMachineConfig::default(), Some(Rc::clone(&event_bus)));
        Self {
            game_state,
            event_bus,
            turn_manager: Box::new(RoundRobinTurnManager),
            phase_machine,
            move_input: None,
        }
    }

    /// Set the turn manager (builder pattern).
    #[must_use]
    pub fn with_turn_manager(mut self, turn_manager: Box<dyn TurnManager>) -> Self {
        self.turn_manager = turn_manager;
        self
    }

    /// Set the phase machine (builder pattern).
    #[must_use]
    pub fn with_phase_machine(mut self, phase_machine: PhaseStateMachine) -> Self {
        self.phase_machine = phase_machine;
        self
    }

    /// Set the move prompt (builder pattern).
    #[must_use]
    pub fn with_move_input(mut self, input: impl FnMut() -> Option<String> + 'static) -> Self {
        self.move_input = Some(Box::new(input));
        self
    }
}

impl std::fmt::Debug for EngineDependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineDependencies")
            .field("game_state", &self.game_state)
            .field("phase_machine", &self.phase_machine)
            .field("move_input", &self.move_input.is_some())
            .finish()
    }
}

/// Engine configuration from the board map's `engine.config`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Ask the player how far to move instead of rolling.
    pub manual_move_choice: bool,
    /// Faces on the die.
    pub dice_sides: u32,
    pub dice_seed: u64,
    /// Keys this crate does not interpret, kept for the host.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EngineConfig {
    /// Engine configuration using the plugin's die settings.
    #[must_use]
    pub fn from_plugin(config: &PluginConfig) -> Self {
        Self {
            dice_sides: config.dice_sides,
            dice_seed: config.dice_seed,
            ..Self::default()
        }
    }

    /// Enable or disable manual move choice (builder pattern).
    #[must_use]
    pub fn with_manual_move_choice(mut self, manual: bool) -> Self {
        self.manual_move_choice = manual;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            manual_move_choice: false,
            dice_sides: 6,
            dice_seed: 0,
            extra: Map::new(),
        }
    }
}

/// Events a UI component emits and listens to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiEvents {
    pub emits: Vec<String>,
    pub listens: Vec<String>,
}

/// A UI component an engine asks the host to mount.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiComponentSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub required: bool,
    pub description: String,
    #[serde(default)]
    pub config: Value,
    #[serde(default)]
    pub events: UiEvents,
}

impl UiComponentSpec {
    /// A component whose id doubles as its type.
    pub fn new(id: impl Into<String>, required: bool, description: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            kind: id.clone(),
            id,
            required,
            description: description.into(),
            config: Value::Null,
            events: UiEvents::default(),
        }
    }

    /// Set the component config (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: Value) -> Self {
        self.config = config;
        self
    }

    /// Set the component events (builder pattern).
    #[must_use]
    pub fn with_events(mut self, emits: &[&str], listens: &[&str]) -> Self {
        self.events = UiEvents {
            emits: emits.iter().map(|e| e.to_string()).collect(),
            listens: listens.iter().map(|e| e.to_string()).collect(),
        };
        self
    }
}

/// Reply to a player action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    /// Number of messages the engine has stored, for engines that keep them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResponse {
    #[must_use]
    pub fn stored(count: usize) -> Self {
        Self {
            success: true,
            stored: Some(count),
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            stored: None,
            error: Some(error.into()),
        }
    }
}

/// Reply to a roll-dice request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RollResponse {
    #[must_use]
    pub fn rolled(roll: u32) -> Self {
        Self {
            success: true,
            roll: Some(roll),
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            roll: None,
            error: Some(error.into()),
        }
    }
}

/// What the host calls on every engine.
pub trait GameEngine {
    /// Factory key of this engine type.
    fn engine_type(&self) -> &'static str;

    fn init(&mut self);

    /// Replace the engine's game state with a newer one from the host.
    fn update_game_state(&mut self, game_state: Box<dyn GameStateKind>);

    fn game_state(&self) -> &dyn GameStateKind;

    fn game_state_mut(&mut self) -> &mut dyn GameStateKind;

    /// Emit an event on the host's bus.
    fn emit_event(&self, name: &str, payload: Value);

    /// Handle an action a player sent to the engine.
    fn on_player_action(
        &mut self,
        player_id: PlayerId,
        action_type: &str,
        action_data: Value,
    ) -> ActionResponse;

    /// UI components the engine cannot run without.
    fn required_ui_components(&self) -> Vec<UiComponentSpec>;

    /// UI components the engine can use if the host has them.
    fn optional_ui_components(&self) -> Vec<UiComponentSpec>;

    fn cleanup(&mut self);

    /// Shortcut to the host base state.
    fn base_state(&self) -> &BaseGameState {
        self.game_state().base()
    }

    /// Id of the player whose turn it is.
    ///
    /// Defaults to the state's `current_player_index`; engines with a turn
    /// manager ask the manager instead.
    fn current_player_id(&self) -> Option<PlayerId> {
        self.base_state().current_player().map(|player| player.id)
    }
}

/// Turn-phase handlers of the host's turn-based engine.
///
/// Every handler defaults to the host flow. Overrides call the matching
/// [`flow`] function to fall back to it.
pub trait TurnBasedGameEngine: GameEngine {
    fn core(&self) -> &EngineCore;

    fn core_mut(&mut self) -> &mut EngineCore;

    /// Run the handler for the current turn phase.
    ///
    /// Does nothing (and returns `false`) unless the game is in progress.
    fn step(&mut self) -> bool {
        flow::step(self)
    }

    fn handle_change_turn(&mut self) {
        flow::change_turn(self.core_mut());
    }

    fn handle_begin_turn(&mut self) {
        flow::begin_turn(self.core_mut());
    }

    fn handle_waiting_for_move(&mut self) {
        flow::waiting_for_move(self.core_mut());
    }

    fn handle_processing_move(&mut self) {
        flow::processing_move(self.core_mut());
    }

    fn handle_end_turn(&mut self) {
        flow::end_turn(self.core_mut());
    }

    /// A player asked to roll.
    fn handle_player_roll_dice(&mut self, player_id: PlayerId) -> RollResponse {
        flow::player_roll_dice(self, player_id)
    }

    /// Produce the current player's move count, or `None` if no roll happened.
    fn roll_dice_for_current_player(&mut self) -> Option<u32> {
        flow::roll_dice(self.core_mut())
    }

    fn handle_after_dice_roll(&mut self, roll: Option<u32>) {
        flow::after_dice_roll(self.core_mut(), roll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_engine_config_keeps_unknown_keys() {
        let config: EngineConfig =
            serde_json::from_value(json!({ "manualMoveChoice": true, "boardTheme": "dark" })).unwrap();

        assert!(config.manual_move_choice);
        assert_eq!(config.dice_sides, 6);
        assert_eq!(config.extra.get("boardTheme"), Some(&json!("dark")));
    }

    #[test]
    fn test_engine_config_from_plugin() {
        let plugin = PluginConfig::default().with_dice_seed(11).with_dice_sides(4);
        let config = EngineConfig::from_plugin(&plugin);
        assert_eq!(config.dice_seed, 11);
        assert_eq!(config.dice_sides, 4);
        assert!(!config.manual_move_choice);
    }

    #[test]
    fn test_responses_skip_empty_fields() {
        let json = serde_json::to_value(ActionResponse::stored(2)).unwrap();
        assert_eq!(json, json!({ "success": true, "stored": 2 }));

        let json = serde_json::to_value(RollResponse::rejected("nope")).unwrap();
        assert_eq!(json, json!({ "success": false, "error": "nope" }));
    }

    #[test]
    fn test_ui_component_spec_shape() {
        let spec = UiComponentSpec::new("demo-ui", false, "Simple demo UI component")
            .with_config(json!({ "label": "Demo UI" }))
            .with_events(&["demoClick"], &[]);
        let json = serde_json::to_value(&spec).unwrap();

        assert_eq!(json["type"], "demo-ui");
        assert_eq!(json["required"], false);
        assert_eq!(json["events"]["emits"], json!(["demoClick"]));
    }
}
