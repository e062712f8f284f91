//! Primitives shared by every turn-based engine.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::core::{BaseGameState, DiceRng, GameStateKind, Player, PlayerId};
use crate::host::{EventBus, GamePhase, PhaseChange, PhaseStateMachine, TurnPhase};

use super::{EngineConfig, EngineDependencies, MoveInput, TurnManager};

/// Event the host UI listens to for the remaining-moves counter.
pub const REMAINING_MOVES_EVENT: &str = "remainingMovesUpdated";

/// One line of the game's activity log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub message: String,
    /// Entry kind (`system`, `dice-roll`, `turn-end`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerId>,
    #[serde(default)]
    pub metadata: Value,
}

/// State and host collaborators of a running engine.
pub struct EngineCore {
    game_state: Box<dyn GameStateKind>,
    event_bus: Rc<dyn EventBus>,
    turn_manager: Box<dyn TurnManager>,
    phase_machine: PhaseStateMachine,
    move_input: Option<MoveInput>,
    dice: DiceRng,
    config: EngineConfig,

    initialized: bool,
    running: bool,
    timer_running: bool,
    roll_button_active: bool,
    log: Vec<LogEntry>,
}

impl EngineCore {
    pub fn new(dependencies: EngineDependencies, config: EngineConfig) -> Self {
        let EngineDependencies {
            game_state,
            event_bus,
            turn_manager,
            phase_machine,
            move_input,
        } = dependencies;
        Self {
            game_state,
            event_bus,
            turn_manager,
            phase_machine,
            move_input,
            dice: DiceRng::new(config.dice_seed),
            config,
            initialized: false,
            running: false,
            timer_running: false,
            roll_button_active: false,
            log: Vec::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // === Lifecycle ===

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_initialized(&mut self, initialized: bool) {
        self.initialized = initialized;
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    // === State ===

    pub fn game_state(&self) -> &dyn GameStateKind {
        &*self.game_state
    }

    pub fn game_state_mut(&mut self) -> &mut dyn GameStateKind {
        &mut *self.game_state
    }

    pub fn set_game_state(&mut self, game_state: Box<dyn GameStateKind>) {
        self.game_state = game_state;
    }

    #[must_use]
    pub fn state(&self) -> &BaseGameState {
        self.game_state.base()
    }

    pub fn state_mut(&mut self) -> &mut BaseGameState {
        self.game_state.base_mut()
    }

    // === Players & turns ===

    /// The player the turn manager says is up.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        let state = self.game_state.base();
        self.turn_manager
            .current_player_index(state)
            .and_then(|index| state.players.get(index))
    }

    pub fn current_player_mut(&mut self) -> Option<&mut Player> {
        let index = self.turn_manager.current_player_index(self.game_state.base())?;
        self.game_state.base_mut().players.get_mut(index)
    }

    /// Id and nickname of the current player if that player is finished.
    #[must_use]
    pub fn finished_current_player(&self) -> Option<(PlayerId, String)> {
        self.current_player()
            .filter(|player| player.is_finished())
            .map(|player| (player.id, player.nickname.clone()))
    }

    /// Advance to the next player.
    pub fn next_turn(&mut self) {
        self.turn_manager.next_turn(self.game_state.base_mut());
    }

    /// Set the remaining moves and tell the UI.
    pub fn set_remaining_moves(&mut self, moves: u32) {
        self.game_state.base_mut().set_remaining_moves(moves);
        self.event_bus
            .emit(REMAINING_MOVES_EVENT, json!({ "remainingMoves": moves }));
    }

    // === Phases ===

    #[must_use]
    pub fn phase_machine(&self) -> &PhaseStateMachine {
        &self.phase_machine
    }

    #[must_use]
    pub fn game_phase(&self) -> GamePhase {
        self.phase_machine.game_phase()
    }

    #[must_use]
    pub fn turn_phase(&self) -> TurnPhase {
        self.phase_machine.turn_phase()
    }

    /// Request a phase change. A rejected change is logged and ignored.
    pub fn change_phase(&mut self, change: PhaseChange) {
        if let Err(err) = self.phase_machine.transition(change) {
            warn!(error = %err, "phase change rejected");
        }
    }

    #[must_use]
    pub fn is_game_ended(&self) -> bool {
        self.game_phase() == GamePhase::GameEnded
    }

    /// Move the game to `GAME_ENDED`.
    ///
    /// Returns `false` without doing anything if the game already ended.
    pub fn end_game(&mut self, message: &str) -> bool {
        if self.is_game_ended() {
            return false;
        }
        info!("{}", message);
        self.log(message, "system", Value::Null);
        self.change_phase(PhaseChange::game(GamePhase::GameEnded, TurnPhase::ChangeTurn));
        true
    }

    // === Turn UI ===

    pub fn start_timer(&mut self) {
        self.timer_running = true;
    }

    pub fn stop_timer(&mut self) {
        self.timer_running = false;
    }

    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.timer_running
    }

    pub fn activate_roll_button(&mut self) {
        self.roll_button_active = true;
    }

    pub fn deactivate_roll_button(&mut self) {
        self.roll_button_active = false;
    }

    #[must_use]
    pub fn is_roll_button_active(&self) -> bool {
        self.roll_button_active
    }

    // === Moves ===

    /// Roll the configured die.
    pub fn roll_die(&mut self) -> u32 {
        self.dice.roll(self.config.dice_sides)
    }

    /// Ask the player how far to move.
    ///
    /// Anything other than a positive integer (including no answer) counts
    /// as 1.
    pub fn prompt_move_count(&mut self) -> u32 {
        let answer = self.move_input.as_mut().and_then(|input| input());
        answer
            .as_deref()
            .and_then(|text| text.trim().parse::<u32>().ok())
            .filter(|moves| *moves > 0)
            .unwrap_or(1)
    }

    // === Events & log ===

    pub fn event_bus(&self) -> &Rc<dyn EventBus> {
        &self.event_bus
    }

    pub fn emit(&self, name: &str, payload: Value) {
        self.event_bus.emit(name, payload);
    }

    /// Append a system line to the activity log.
    pub fn log(&mut self, message: impl Into<String>, kind: &str, metadata: Value) {
        self.log.push(LogEntry {
            message: message.into(),
            kind: kind.to_string(),
            player: None,
            metadata,
        });
    }

    /// Append a line about a player; the message is prefixed with their
    /// nickname.
    pub fn log_player_action(
        &mut self,
        player_id: Option<PlayerId>,
        message: &str,
        kind: &str,
        metadata: Value,
    ) {
        let name = player_id
            .and_then(|id| self.state().player(id))
            .map_or("Player", |player| player.nickname.as_str());
        let message = format!("{} {}", name, message);
        self.log.push(LogEntry {
            message,
            kind: kind.to_string(),
            player: player_id,
            metadata,
        });
    }

    #[must_use]
    pub fn log_entries(&self) -> &[LogEntry] {
        &self.log
    }
}

impl std::fmt::Debug for EngineCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineCore")
            .field("game_state", &self.game_state)
            .field("phase_machine", &self.phase_machine)
            .field("initialized", &self.initialized)
            .field("running", &self.running)
            .field("timer_running", &self.timer_running)
            .field("roll_button_active", &self.roll_button_active)
            .field("log", &self.log.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingEventBus;

    fn core_with(players: usize, input: Option<&'static str>) -> (EngineCore, Rc<RecordingEventBus>) {
        let bus = Rc::new(RecordingEventBus::new());
        let state = BaseGameState::new(
            PlayerId::all(players).map(|id| Player::new(id, format!("P{}", id.0))),
        );
        let mut deps = EngineDependencies::new(Box::new(state), bus.clone());
        if let Some(text) = input {
            deps = deps.with_move_input(move || Some(text.to_string()));
        }
        (EngineCore::new(deps, EngineConfig::default()), bus)
    }

    #[test]
    fn test_prompt_move_count_fallbacks() {
        assert_eq!(core_with(1, Some("4")).0.prompt_move_count(), 4);
        assert_eq!(core_with(1, Some(" 2 ")).0.prompt_move_count(), 2);
        assert_eq!(core_with(1, Some("0")).0.prompt_move_count(), 1);
        assert_eq!(core_with(1, Some("-3")).0.prompt_move_count(), 1);
        assert_eq!(core_with(1, Some("lots")).0.prompt_move_count(), 1);
        assert_eq!(core_with(1, None).0.prompt_move_count(), 1);
    }

    #[test]
    fn test_end_game_only_once() {
        let (mut core, _bus) = core_with(2, None);

        assert!(core.end_game("done"));
        assert!(!core.end_game("done"));

        let ended = core
            .phase_machine()
            .history()
            .iter()
            .filter(|c| c.new_game_phase == Some(GamePhase::GameEnded))
            .count();
        assert_eq!(ended, 1);
        assert_eq!(core.log_entries().len(), 1);
    }

    #[test]
    fn test_set_remaining_moves_notifies_ui() {
        let (mut core, bus) = core_with(1, None);
        core.set_remaining_moves(3);

        assert_eq!(core.state().remaining_moves, 3);
        assert_eq!(bus.last(REMAINING_MOVES_EVENT).unwrap().payload["remainingMoves"], 3);
    }

    #[test]
    fn test_log_player_action_prefixes_nickname() {
        let (mut core, _bus) = core_with(2, None);
        core.log_player_action(Some(PlayerId::new(1)), "rolled a 3.", "dice-roll", Value::Null);
        core.log_player_action(None, "waited.", "system", Value::Null);

        assert_eq!(core.log_entries()[0].message, "P1 rolled a 3.");
        assert_eq!(core.log_entries()[1].message, "Player waited.");
    }
}
