//! Game state shared between the host and engine extensions.
//!
//! ## BaseGameState
//!
//! What every board game tracks:
//! - Players (seat order, status, position, effects, stats)
//! - Whose turn it is and how many moves remain
//! - A version counter bumped on every mutation the host must sync
//!
//! ## GameStateKind
//!
//! Extension point for plugin states. A plugin state wraps a
//! `BaseGameState` and adds its own fields; the host reaches the base
//! through `base()` and the plugin fields through `as_any()`.

use std::any::Any;

use im::Vector;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::host::FactoryManager;

use super::error::HostResult;
use super::player::{Player, PlayerId};

/// Host base game state.
///
/// Uses `im::Vector` for the player list so snapshots handed to the UI
/// and to delta sync are O(1) clones. Fields missing from host JSON take
/// their `Default` values, so a new game starts on turn 1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BaseGameState {
    /// Players in seat order.
    pub players: Vector<Player>,

    /// Index into `players` of the player whose turn it is.
    pub current_player_index: usize,

    /// Moves the current player still has to spend this turn.
    pub remaining_moves: u32,

    /// Turn number (starts at 1).
    pub turn_number: u32,

    /// Monotonic state version.
    pub version: u64,
}

impl BaseGameState {
    /// Fields the host diffs when sending state deltas.
    pub const DELTA_FIELDS: [&'static str; 4] =
        ["players", "currentPlayerIndex", "remainingMoves", "turnNumber"];

    /// Create a state with the given players, first player to move.
    pub fn new(players: impl IntoIterator<Item = Player>) -> Self {
        Self {
            players: players.into_iter().collect(),
            current_player_index: 0,
            remaining_moves: 0,
            turn_number: 1,
            version: 0,
        }
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    // === Players ===

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    /// The player whose turn it is, mutably.
    pub fn current_player_mut(&mut self) -> Option<&mut Player> {
        self.players.get_mut(self.current_player_index)
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Look up a player by id, mutably.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// True when there is at least one player and every player is finished.
    #[must_use]
    pub fn all_players_finished(&self) -> bool {
        !self.players.is_empty() && self.players.iter().all(Player::is_finished)
    }

    // === Moves ===

    #[must_use]
    pub fn has_moves_left(&self) -> bool {
        self.remaining_moves > 0
    }

    pub fn set_remaining_moves(&mut self, moves: u32) {
        self.remaining_moves = moves;
        self.increment_version();
    }

    // === Turn Advancement ===

    /// Hand the turn to the next seat, wrapping around.
    pub fn advance_to_next_player(&mut self) {
        if self.players.is_empty() {
            return;
        }
        self.current_player_index = (self.current_player_index + 1) % self.players.len();
        if self.current_player_index == 0 {
            self.turn_number += 1;
        }
        self.increment_version();
    }

    // === Stats ===

    /// Set one player's stat through its registered stat type.
    ///
    /// Returns `false` when the player or the stat does not exist.
    pub fn set_player_stat(
        &mut self,
        player: PlayerId,
        stat_id: &str,
        value: i64,
        factories: &FactoryManager,
    ) -> bool {
        let updated = self
            .player_mut(player)
            .is_some_and(|p| p.set_stat(stat_id, value, factories));
        if updated {
            self.increment_version();
        }
        updated
    }

    /// Bump the state version.
    pub fn increment_version(&mut self) {
        self.version += 1;
    }

    // === Serialization ===

    /// Serialize to the host's JSON shape.
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Deserialize from the host's JSON shape.
    pub fn from_json(json: &Value) -> HostResult<Self> {
        Ok(Self::deserialize(json)?)
    }
}

impl Default for BaseGameState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// A concrete game state type registered with the host's state factory.
pub trait GameStateKind: std::fmt::Debug {
    /// Factory key of this state type.
    fn state_type(&self) -> &'static str;

    fn base(&self) -> &BaseGameState;

    fn base_mut(&mut self) -> &mut BaseGameState;

    /// Fields the host diffs when sending state deltas.
    fn delta_fields(&self) -> Vec<&'static str> {
        BaseGameState::DELTA_FIELDS.to_vec()
    }

    /// Serialize to the host's JSON shape.
    fn to_json(&self) -> Value {
        self.base().to_json()
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl GameStateKind for BaseGameState {
    fn state_type(&self) -> &'static str {
        "base"
    }

    fn base(&self) -> &BaseGameState {
        self
    }

    fn base_mut(&mut self) -> &mut BaseGameState {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::PlayerStatus;

    fn three_players() -> BaseGameState {
        BaseGameState::new((0..3).map(|i| Player::new(PlayerId::new(i), format!("P{}", i))))
    }

    #[test]
    fn test_new_state() {
        let state = three_players();

        assert_eq!(state.player_count(), 3);
        assert_eq!(state.turn_number, 1);
        assert_eq!(state.current_player().unwrap().id, PlayerId::new(0));
        assert!(!state.has_moves_left());
    }

    #[test]
    fn test_advance_wraps_and_counts_turns() {
        let mut state = three_players();

        state.advance_to_next_player();
        state.advance_to_next_player();
        assert_eq!(state.current_player_index, 2);
        assert_eq!(state.turn_number, 1);

        state.advance_to_next_player();
        assert_eq!(state.current_player_index, 0);
        assert_eq!(state.turn_number, 2);
        assert_eq!(state.version, 3);
    }

    #[test]
    fn test_all_players_finished() {
        let mut state = three_players();
        assert!(!state.all_players_finished());

        for player in state.players.iter_mut() {
            player.status = PlayerStatus::finished();
        }
        assert!(state.all_players_finished());

        assert!(!BaseGameState::default().all_players_finished());
    }

    #[test]
    fn test_remaining_moves_bump_version() {
        let mut state = three_players();
        state.set_remaining_moves(3);

        assert!(state.has_moves_left());
        assert_eq!(state.version, 1);
    }

    #[test]
    fn test_json_round_trip() {
        let mut state = three_players();
        state.set_remaining_moves(2);

        let json = state.to_json();
        assert_eq!(json["remainingMoves"], 2);

        let back = BaseGameState::from_json(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_partial_json_keeps_players() {
        let json = serde_json::json!({
            "players": [{ "id": 0, "nickname": "Ada", "state": "ACTIVE", "currentSpaceId": "start" }],
            "remainingMoves": 2,
        });

        let state = BaseGameState::from_json(&json).unwrap();
        assert_eq!(state.player_count(), 1);
        assert_eq!(state.remaining_moves, 2);
        assert_eq!(state.turn_number, 1);
        assert_eq!(state.current_player_index, 0);
    }

    #[test]
    fn test_set_player_stat_bumps_version() {
        let mut state = three_players();
        state
            .player_mut(PlayerId::new(1))
            .unwrap()
            .add_stat(crate::stats::BaseStat::new("score", "Plain", 0));
        let factories = FactoryManager::new();

        assert!(state.set_player_stat(PlayerId::new(1), "score", 5, &factories));
        assert_eq!(state.version, 1);
        assert_eq!(state.player(PlayerId::new(1)).unwrap().stat("score").unwrap().value, 5);

        assert!(!state.set_player_stat(PlayerId::new(0), "score", 5, &factories));
        assert!(!state.set_player_stat(PlayerId::new(9), "score", 5, &factories));
        assert_eq!(state.version, 1);
    }
}
