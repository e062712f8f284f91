//! `demo-engine`: the turn-based engine with finished-player handling.
//!
//! Players reach the `FINISHED` status by landing on the demo board's finish
//! space. From then on their turns are skipped, they cannot roll, and once
//! every player is finished the game ends. Moves are chosen by hand rather
//! than rolled.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::core::{GameStateKind, PlayerId};
use crate::host::{names, PhaseChange, TurnPhase};
use crate::stats::DemoStat;

use super::{
    flow, ActionResponse, EngineConfig, EngineCore, EngineDependencies, GameEngine, RollResponse,
    TurnBasedGameEngine, UiComponentSpec,
};

const ALL_FINISHED: &str = "All players have finished the game.";

/// A player action the demo engine stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMessage {
    pub player_id: PlayerId,
    pub action_type: String,
    pub action_data: Value,
}

/// Turn-based engine that skips finished players and stores player actions.
#[derive(Debug)]
pub struct DemoGameEngine {
    core: EngineCore,
    demo_messages: Vec<PlayerMessage>,
}

impl DemoGameEngine {
    /// Factory key.
    pub const TYPE: &'static str = "demo-engine";

    /// Build the engine. Manual move choice is always on.
    pub fn new(dependencies: EngineDependencies, config: EngineConfig) -> Self {
        let config = config.with_manual_move_choice(true);
        Self {
            core: EngineCore::new(dependencies, config),
            demo_messages: Vec::new(),
        }
    }

    /// Engine factory constructor.
    pub fn create(dependencies: EngineDependencies, config: EngineConfig) -> Box<dyn GameEngine> {
        Box::new(Self::new(dependencies, config))
    }

    /// Player actions stored so far.
    #[must_use]
    pub fn demo_messages(&self) -> &[PlayerMessage] {
        &self.demo_messages
    }

    /// Give every player a `demo-stat` if they lack one.
    fn ensure_demo_stats(&mut self) {
        for player in self.core.state_mut().players.iter_mut() {
            if player.stat(DemoStat::DEFAULT_ID).is_none() {
                player.add_stat(DemoStat::default().into_base());
            }
        }
    }

    fn end_game_if_all_finished(&mut self) -> bool {
        if !self.core.state().all_players_finished() {
            return false;
        }
        self.core.end_game(ALL_FINISHED);
        true
    }
}

impl GameEngine for DemoGameEngine {
    fn engine_type(&self) -> &'static str {
        Self::TYPE
    }

    fn init(&mut self) {
        flow::init(&mut self.core);
        self.ensure_demo_stats();
        self.core.emit(names::DEMO_ENGINE_INIT, Value::Null);
    }

    fn update_game_state(&mut self, game_state: Box<dyn GameStateKind>) {
        flow::update_game_state(&mut self.core, game_state);
        let counter = self
            .core
            .game_state()
            .to_json()
            .get("demoCounter")
            .cloned()
            .unwrap_or(Value::Null);
        self.core
            .emit(names::DEMO_GAME_STATE_UPDATED, json!({ "counter": counter }));
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
        self.core.emit(
            names::DEMO_PLAYER_ACTION,
            json!({
                "playerId": player_id,
                "actionType": action_type,
                "actionData": action_data,
            }),
        );
        self.demo_messages.push(PlayerMessage {
            player_id,
            action_type: action_type.to_string(),
            action_data,
        });
        ActionResponse::stored(self.demo_messages.len())
    }

    fn required_ui_components(&self) -> Vec<UiComponentSpec> {
        flow::required_ui_components()
    }

    fn optional_ui_components(&self) -> Vec<UiComponentSpec> {
        let mut components = flow::optional_ui_components();
        components.push(
            UiComponentSpec::new("demo-ui", false, "Simple demo UI component")
                .with_config(json!({ "label": "Demo UI" }))
                .with_events(&["demoClick"], &[]),
        );
        components
    }

    fn cleanup(&mut self) {
        self.demo_messages.clear();
        flow::cleanup(&mut self.core);
    }
}

impl TurnBasedGameEngine for DemoGameEngine {
    fn core(&self) -> &EngineCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EngineCore {
        &mut self.core
    }

    fn handle_begin_turn(&mut self) {
        let Some((_, nickname)) = self.core.finished_current_player() else {
            return flow::begin_turn(&mut self.core);
        };
        info!(player = %nickname, "skipping turn for finished player");

        if self.end_game_if_all_finished() {
            return;
        }

        self.core.set_remaining_moves(0);
        self.core.deactivate_roll_button();
        self.core.stop_timer();
        self.core.change_phase(PhaseChange::turn(TurnPhase::EndTurn));
    }

    fn handle_end_turn(&mut self) {
        let Some((id, _)) = self.core.finished_current_player() else {
            return flow::end_turn(&mut self.core);
        };
        self.core.log_player_action(
            Some(id),
            "skipped turn (finished).",
            "turn-end",
            json!({ "reason": "finished" }),
        );
        self.core.next_turn();

        if self.end_game_if_all_finished() {
            return;
        }
        self.core.change_phase(PhaseChange::turn(TurnPhase::ChangeTurn));
    }

    fn handle_waiting_for_move(&mut self) {
        let Some((_, nickname)) = self.core.finished_current_player() else {
            return flow::waiting_for_move(&mut self.core);
        };
        warn!(player = %nickname, "finished player reached WAITING_FOR_MOVE");
        self.core.deactivate_roll_button();
        self.core.change_phase(PhaseChange::turn(TurnPhase::EndTurn));
    }

    fn handle_player_roll_dice(&mut self, player_id: PlayerId) -> RollResponse {
        if self.core.finished_current_player().is_some() {
            return RollResponse::rejected("Cannot roll dice: player has finished the game");
        }
        flow::player_roll_dice(self, player_id)
    }

    fn roll_dice_for_current_player(&mut self) -> Option<u32> {
        if let Some((_, nickname)) = self.core.finished_current_player() {
            warn!(player = %nickname, "roll requested for finished player");
            self.core.deactivate_roll_button();
            return None;
        }

        let moves = self.core.prompt_move_count();
        let player = self.core.current_player().map(|p| (p.id, p.nickname.clone()));
        let name = player.as_ref().map_or("Player", |(_, nickname)| nickname.as_str());
        info!(player = %name, moves, "move count chosen");
        self.core.log_player_action(
            player.as_ref().map(|(id, _)| *id),
            &format!("chose to move {} space(s).", moves),
            "dice-roll",
            json!({ "result": moves }),
        );
        self.core.deactivate_roll_button();
        Some(moves)
    }

    fn handle_after_dice_roll(&mut self, roll: Option<u32>) {
        if roll.is_none() {
            return;
        }
        flow::after_dice_roll(&mut self.core, roll);
    }
}
