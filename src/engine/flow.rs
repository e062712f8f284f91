//! The host's default turn flow.
//!
//! One function per turn-phase handler. [`TurnBasedGameEngine`] uses them as
//! its default method bodies; engines that override a handler call them to
//! fall back to the default behaviour.
//!
//! ```text
//! CHANGE_TURN → BEGIN_TURN → WAITING_FOR_MOVE ──roll──→ PROCESSING_MOVE → END_TURN
//!      ↑                                                                     │
//!      └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::core::{GameStateKind, PlayerId};
use crate::host::{GamePhase, PhaseChange, TurnPhase};

use super::{ActionResponse, EngineCore, RollResponse, TurnBasedGameEngine, UiComponentSpec};

/// Player action type that requests a roll.
pub const ROLL_DICE_ACTION: &str = "ROLL_DICE";

/// Run the handler for the current turn phase. Returns `false` when the
/// game is not in progress.
pub fn step<E: TurnBasedGameEngine + ?Sized>(engine: &mut E) -> bool {
    if engine.core().game_phase() != GamePhase::InGame {
        return false;
    }
    match engine.core().turn_phase() {
        TurnPhase::ChangeTurn => engine.handle_change_turn(),
        TurnPhase::BeginTurn => engine.handle_begin_turn(),
        TurnPhase::WaitingForMove => engine.handle_waiting_for_move(),
        TurnPhase::ProcessingMove => engine.handle_processing_move(),
        TurnPhase::EndTurn => engine.handle_end_turn(),
    }
    true
}

// === Lifecycle ===

/// Mark the engine running and start the game if it is still in the lobby.
pub fn init(core: &mut EngineCore) {
    core.set_initialized(true);
    core.set_running(true);
    if core.game_phase() == GamePhase::InLobby {
        core.change_phase(PhaseChange::game(GamePhase::InGame, TurnPhase::BeginTurn));
    }
}

pub fn update_game_state(core: &mut EngineCore, game_state: Box<dyn GameStateKind>) {
    core.set_game_state(game_state);
}

pub fn cleanup(core: &mut EngineCore) {
    core.stop_timer();
    core.deactivate_roll_button();
    core.set_running(false);
    core.set_initialized(false);
}

/// The roll button and the turn timer.
#[must_use]
pub fn required_ui_components() -> Vec<UiComponentSpec> {
    vec![
        UiComponentSpec::new("roll-button", true, "Rolls the die for the current player")
            .with_events(&["rollDice"], &["turnChanged"]),
        UiComponentSpec::new("timer", true, "Counts down the current turn")
            .with_events(&["timerExpired"], &["turnChanged"]),
    ]
}

#[must_use]
pub fn optional_ui_components() -> Vec<UiComponentSpec> {
    Vec::new()
}

/// Handle a player action; only `ROLL_DICE` is understood.
pub fn player_action<E: TurnBasedGameEngine + ?Sized>(
    engine: &mut E,
    player_id: PlayerId,
    action_type: &str,
    _action_data: Value,
) -> ActionResponse {
    if action_type != ROLL_DICE_ACTION {
        return ActionResponse::rejected(format!("Unknown action type: {}", action_type));
    }
    let response = engine.handle_player_roll_dice(player_id);
    ActionResponse {
        success: response.success,
        stored: None,
        error: response.error,
    }
}

// === Turn phases ===

pub fn change_turn(core: &mut EngineCore) {
    core.change_phase(PhaseChange::turn(TurnPhase::BeginTurn));
}

pub fn begin_turn(core: &mut EngineCore) {
    let Some(player) = core.current_player() else {
        warn!("no current player; turn not started");
        return;
    };
    debug!(player = %player.nickname, "turn started");
    core.set_remaining_moves(0);
    core.start_timer();
    core.change_phase(PhaseChange::turn(TurnPhase::WaitingForMove));
}

pub fn waiting_for_move(core: &mut EngineCore) {
    core.activate_roll_button();
}

/// Spend the rolled moves and end the turn.
pub fn processing_move(core: &mut EngineCore) {
    core.set_remaining_moves(0);
    core.change_phase(PhaseChange::turn(TurnPhase::EndTurn));
}

/// Sweep spent effects, then hand the turn to the next player.
pub fn end_turn(core: &mut EngineCore) {
    core.stop_timer();
    core.deactivate_roll_button();
    if let Some(player) = core.current_player_mut() {
        let removed = player.remove_expired_effects();
        if removed > 0 {
            debug!(player = %player.nickname, removed, "expired effects removed");
        }
    }
    core.next_turn();
    core.change_phase(PhaseChange::turn(TurnPhase::ChangeTurn));
}

// === Dice ===

/// Check the request, roll, and continue the turn with the result.
pub fn player_roll_dice<E: TurnBasedGameEngine + ?Sized>(
    engine: &mut E,
    player_id: PlayerId,
) -> RollResponse {
    let core = engine.core();
    if core.turn_phase() != TurnPhase::WaitingForMove {
        return RollResponse::rejected("Cannot roll dice right now");
    }
    match core.current_player() {
        None => return RollResponse::rejected("No current player"),
        Some(player) if player.id != player_id => return RollResponse::rejected("Not your turn"),
        Some(_) => {}
    }

    let roll = engine.roll_dice_for_current_player();
    engine.handle_after_dice_roll(roll);
    roll.map_or_else(|| RollResponse::rejected("No roll result"), RollResponse::rolled)
}

/// Roll (or ask for) the current player's move count.
pub fn roll_dice(core: &mut EngineCore) -> Option<u32> {
    core.deactivate_roll_button();
    let player = core.current_player().map(|player| player.id);
    let roll = if core.config().manual_move_choice {
        core.prompt_move_count()
    } else {
        core.roll_die()
    };
    core.log_player_action(
        player,
        &format!("rolled a {}.", roll),
        "dice-roll",
        json!({ "result": roll }),
    );
    Some(roll)
}

/// Grant the rolled moves, or end the turn if there was no roll.
pub fn after_dice_roll(core: &mut EngineCore, roll: Option<u32>) {
    match roll {
        Some(moves) => {
            core.set_remaining_moves(moves);
            core.change_phase(PhaseChange::turn(TurnPhase::ProcessingMove));
        }
        None => {
            warn!("no roll result; ending turn");
            core.change_phase(PhaseChange::turn(TurnPhase::EndTurn));
        }
    }
}
