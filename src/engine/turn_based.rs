//! The host's stock turn-based engine.

use serde_json::Value;

use crate::core::{GameStateKind, PlayerId};

use super::{
    flow, ActionResponse, EngineConfig, EngineCore, EngineDependencies, GameEngine,
    TurnBasedGameEngine, UiComponentSpec,
};

/// Turn-based engine running the default flow with no overrides.
#[derive(Debug)]
pub struct TurnBasedEngine {
    core: EngineCore,
}

impl TurnBasedEngine {
    /// Factory key.
    pub const TYPE: &'static str = "turn-based";

    pub fn new(dependencies: EngineDependencies, config: EngineConfig) -> Self {
        Self {
            core: EngineCore::new(dependencies, config),
        }
    }

    /// Engine factory constructor.
    pub fn create(dependencies: EngineDependencies, config: EngineConfig) -> Box<dyn GameEngine> {
        Box::new(Self::new(dependencies, config))
    }
}

impl GameEngine for TurnBasedEngine {
    fn engine_type(&self) -> &'static str {
        Self::TYPE
    }

    fn init(&mut self) {
        flow::init(&mut self.core);
    }

    fn update_game_state(&mut self, game_state: Box<dyn GameStateKind>) {
        flow::update_game_state(&mut self.core, game_state);
    }

    fn game_state(&self) -> &dyn GameStateKind {
        self.core.game_state()
    }

    fn game_state_mut(&mut self) -> &mut dyn GameStateKind {
        self.core.game_state_mut()
    }

    fn current_player_id(&self) -> Option<PlayerId> {
        self.core.current_player().map(|player| player.id)
    }

    fn emit_event(&self, name: &str, payload: Value) {
        self.core.emit(name, payload);
    }

    fn on_player_action(
        &mut self,
        player_id: PlayerId,
        action_type: &str,
        action_data: Value,
    ) -> ActionResponse {
        flow::player_action(self, player_id, action_type, action_data)
    }

    fn required_ui_components(&self) -> Vec<UiComponentSpec> {
        flow::required_ui_components()
    }

    fn optional_ui_components(&self) -> Vec<UiComponentSpec> {
        flow::optional_ui_components()
    }

    fn cleanup(&mut self) {
        flow::cleanup(&mut self.core);
    }
}

impl TurnBasedGameEngine for TurnBasedEngine {
    fn core(&self) -> &EngineCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EngineCore {
        &mut self.core
    }
}
