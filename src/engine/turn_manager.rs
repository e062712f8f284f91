//! Turn managers: who is up, and who is next.

use serde_json::Value;

use crate::core::BaseGameState;

/// Decides whose turn it is.
pub trait TurnManager {
    /// Index into `state.players` of the player who is up.
    fn current_player_index(&self, state: &BaseGameState) -> Option<usize>;

    /// Hand the turn on.
    fn next_turn(&mut self, state: &mut BaseGameState) {
        state.advance_to_next_player();
    }
}

/// The host's default: seats take turns in order.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoundRobinTurnManager;

impl TurnManager for RoundRobinTurnManager {
    fn current_player_index(&self, state: &BaseGameState) -> Option<usize> {
        (state.current_player_index < state.player_count()).then_some(state.current_player_index)
    }
}

/// Demonstration turn manager: the first seat is always up.
#[derive(Clone, Debug, Default)]
pub struct DemoTurnManager {
    config: Value,
}

impl DemoTurnManager {
    /// Factory key.
    pub const TYPE: &'static str = "demo-turn-manager";

    pub fn new(config: Value) -> Self {
        Self { config }
    }

    /// Turn manager factory constructor.
    pub fn create(config: Value) -> Box<dyn TurnManager> {
        Box::new(Self::new(config))
    }

    pub fn config(&self) -> &Value {
        &self.config
    }
}

impl TurnManager for DemoTurnManager {
    fn current_player_index(&self, state: &BaseGameState) -> Option<usize> {
        (!state.players.is_empty()).then_some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Player, PlayerId};

    fn state(players: usize) -> BaseGameState {
        BaseGameState::new(PlayerId::all(players).map(|id| Player::new(id, "p")))
    }

    #[test]
    fn test_round_robin_follows_state() {
        let mut manager = RoundRobinTurnManager;
        let mut state = state(3);

        assert_eq!(manager.current_player_index(&state), Some(0));
        manager.next_turn(&mut state);
        assert_eq!(manager.current_player_index(&state), Some(1));
        assert_eq!(manager.current_player_index(&BaseGameState::default()), None);
    }

    #[test]
    fn test_demo_manager_picks_first_player() {
        let mut manager = DemoTurnManager::default();
        let mut state = state(3);

        manager.next_turn(&mut state);
        assert_eq!(manager.current_player_index(&state), Some(0));
        assert_eq!(manager.current_player_index(&BaseGameState::default()), None);
    }
}
