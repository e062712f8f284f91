//! Game and turn phases, and the host's phase state machine.
//!
//! The host moves a game through two nested phase sets:
//! - `GamePhase`: lobby → in game → (paused) → ended
//! - `TurnPhase`: the steps of one player's turn
//!
//! Engines request transitions with a `PhaseChange`; the machine checks the
//! requested phases are part of its configured sets, records the change, and
//! announces it on the event bus.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::core::{HostError, HostResult};

use super::event::EventBus;

/// Event emitted on every accepted phase change.
pub const PHASE_CHANGED_EVENT: &str = "phaseChanged";

/// Phase of the overall game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    InLobby,
    InGame,
    Paused,
    GameEnded,
}

impl GamePhase {
    pub const ALL: [GamePhase; 4] = [
        GamePhase::InLobby,
        GamePhase::InGame,
        GamePhase::Paused,
        GamePhase::GameEnded,
    ];
}

/// Step within one player's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnPhase {
    ChangeTurn,
    BeginTurn,
    WaitingForMove,
    ProcessingMove,
    EndTurn,
}

impl TurnPhase {
    pub const ALL: [TurnPhase; 5] = [
        TurnPhase::ChangeTurn,
        TurnPhase::BeginTurn,
        TurnPhase::WaitingForMove,
        TurnPhase::ProcessingMove,
        TurnPhase::EndTurn,
    ];
}

/// A requested phase transition. Unset fields keep their current value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseChange {
    pub new_game_phase: Option<GamePhase>,
    pub new_turn_phase: Option<TurnPhase>,
    /// Delay in milliseconds before the host processes the new phase.
    pub delay: u32,
}

impl PhaseChange {
    /// Change only the turn phase, immediately.
    #[must_use]
    pub fn turn(phase: TurnPhase) -> Self {
        Self {
            new_game_phase: None,
            new_turn_phase: Some(phase),
            delay: 0,
        }
    }

    /// Change both phases, immediately.
    #[must_use]
    pub fn game(game: GamePhase, turn: TurnPhase) -> Self {
        Self {
            new_game_phase: Some(game),
            new_turn_phase: Some(turn),
            delay: 0,
        }
    }
}

/// Phase sets a state machine accepts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhaseMachineConfig {
    /// Accepted game phases. Empty means "use the host's full set".
    pub game_phases: Vec<GamePhase>,
    /// Accepted turn phases. Empty means "use the host's full set".
    pub turn_phases: Vec<TurnPhase>,
}

impl PhaseMachineConfig {
    /// Every game and turn phase the host knows.
    #[must_use]
    pub fn all() -> Self {
        Self {
            game_phases: GamePhase::ALL.to_vec(),
            turn_phases: TurnPhase::ALL.to_vec(),
        }
    }

    /// Fill empty phase sets from `defaults`.
    #[must_use]
    pub fn or_defaults(self, defaults: &PhaseMachineConfig) -> Self {
        Self {
            game_phases: if self.game_phases.is_empty() {
                defaults.game_phases.clone()
            } else {
                self.game_phases
            },
            turn_phases: if self.turn_phases.is_empty() {
                defaults.turn_phases.clone()
            } else {
                self.turn_phases
            },
        }
    }
}

/// Host phase state machine.
pub struct PhaseStateMachine {
    game_phases: Vec<GamePhase>,
    turn_phases: Vec<TurnPhase>,
    game_phase: GamePhase,
    turn_phase: TurnPhase,
    history: Vec<PhaseChange>,
    event_bus: Option<Rc<dyn EventBus>>,
}

impl PhaseStateMachine {
    /// Create a machine starting in the lobby.
    ///
    /// Empty phase sets in `config` fall back to every known phase.
    pub fn new(config: PhaseMachineConfig, event_bus: Option<Rc<dyn EventBus>>) -> Self {
        let PhaseMachineConfig {
            game_phases,
            turn_phases,
        } = config.or_defaults(&PhaseMachineConfig::all());

        Self {
            game_phases,
            turn_phases,
            game_phase: GamePhase::InLobby,
            turn_phase: TurnPhase::BeginTurn,
            history: Vec::new(),
            event_bus,
        }
    }

    #[must_use]
    pub fn game_phase(&self) -> GamePhase {
        self.game_phase
    }

    #[must_use]
    pub fn turn_phase(&self) -> TurnPhase {
        self.turn_phase
    }

    #[must_use]
    pub fn game_phases(&self) -> &[GamePhase] {
        &self.game_phases
    }

    #[must_use]
    pub fn turn_phases(&self) -> &[TurnPhase] {
        &self.turn_phases
    }

    /// Every accepted change, oldest first.
    #[must_use]
    pub fn history(&self) -> &[PhaseChange] {
        &self.history
    }

    /// Apply a phase change.
    ///
    /// Fails without changing anything if either requested phase is not in
    /// the configured sets.
    pub fn transition(&mut self, change: PhaseChange) -> HostResult<()> {
        if let Some(game) = change.new_game_phase {
            if !self.game_phases.contains(&game) {
                return Err(HostError::UnknownPhase(format!("{:?}", game)));
            }
        }
        if let Some(turn) = change.new_turn_phase {
            if !self.turn_phases.contains(&turn) {
                return Err(HostError::UnknownPhase(format!("{:?}", turn)));
            }
        }

        if let Some(game) = change.new_game_phase {
            self.game_phase = game;
        }
        if let Some(turn) = change.new_turn_phase {
            self.turn_phase = turn;
        }
        self.history.push(change);

        debug!(game = ?self.game_phase, turn = ?self.turn_phase, "phase changed");
        if let Some(bus) = &self.event_bus {
            bus.emit(
                PHASE_CHANGED_EVENT,
                json!({ "gamePhase": self.game_phase, "turnPhase": self.turn_phase }),
            );
        }
        Ok(())
    }
}

impl std::fmt::Debug for PhaseStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseStateMachine")
            .field("game_phase", &self.game_phase)
            .field("turn_phase", &self.turn_phase)
            .field("transitions", &self.history.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::event::RecordingEventBus;

    #[test]
    fn test_defaults_to_full_phase_sets() {
        let machine = PhaseStateMachine::new(PhaseMachineConfig::default(), None);

        assert_eq!(machine.game_phases(), &GamePhase::ALL);
        assert_eq!(machine.turn_phases(), &TurnPhase::ALL);
        assert_eq!(machine.game_phase(), GamePhase::InLobby);
    }

    #[test]
    fn test_transition_updates_and_records() {
        let bus = Rc::new(RecordingEventBus::new());
        let mut machine = PhaseStateMachine::new(PhaseMachineConfig::default(), Some(bus.clone()));

        machine.transition(PhaseChange::game(GamePhase::InGame, TurnPhase::BeginTurn)).unwrap();
        machine.transition(PhaseChange::turn(TurnPhase::WaitingForMove)).unwrap();

        assert_eq!(machine.game_phase(), GamePhase::InGame);
        assert_eq!(machine.turn_phase(), TurnPhase::WaitingForMove);
        assert_eq!(machine.history().len(), 2);
        assert_eq!(bus.count(PHASE_CHANGED_EVENT), 2);
    }

    #[test]
    fn test_rejects_unconfigured_phase() {
        let config = PhaseMachineConfig {
            game_phases: vec![GamePhase::InLobby, GamePhase::InGame],
            turn_phases: vec![],
        };
        let mut machine = PhaseStateMachine::new(config, None);

        let err = machine.transition(PhaseChange::game(GamePhase::GameEnded, TurnPhase::ChangeTurn));
        assert!(matches!(err, Err(HostError::UnknownPhase(_))));
        assert_eq!(machine.game_phase(), GamePhase::InLobby);
        assert_eq!(machine.turn_phase(), TurnPhase::BeginTurn);
        assert!(machine.history().is_empty());
    }

    #[test]
    fn test_phase_names_match_host() {
        assert_eq!(serde_json::to_value(GamePhase::GameEnded).unwrap(), "GAME_ENDED");
        assert_eq!(serde_json::to_value(TurnPhase::WaitingForMove).unwrap(), "WAITING_FOR_MOVE");
    }
}
