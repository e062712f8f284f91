//! Player identification and per-player board data.
//!
//! ## PlayerId
//!
//! Type-safe player identifier supporting 1-255 players.
//!
//! ## Player
//!
//! A seat at the board: nickname, status, the space the piece stands on,
//! and the effects and stats attached to it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::effects::PlayerEffect;
use crate::host::FactoryManager;
use crate::stats::{BaseStat, Stat};

/// Player identifier supporting 1-255 players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use board_plugin_example::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Player status name.
///
/// The host ships `ACTIVE`; plugins add their own names through the
/// player-state registry, so the status is an open string rather than an enum.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerStatus(String);

impl PlayerStatus {
    /// Built-in status of a player who is still moving around the board.
    pub const ACTIVE: &'static str = "ACTIVE";

    /// Status registered by this plugin for players who reached the finish.
    pub const FINISHED: &'static str = "FINISHED";

    /// Create a status from its registered name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The default status.
    #[must_use]
    pub fn active() -> Self {
        Self::new(Self::ACTIVE)
    }

    /// The plugin's terminal status.
    #[must_use]
    pub fn finished() -> Self {
        Self::new(Self::FINISHED)
    }

    /// Registered name of this status.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.0 == Self::FINISHED
    }
}

impl Default for PlayerStatus {
    fn default() -> Self {
        Self::active()
    }
}

impl std::fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A player seated at the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,

    /// Display name used in logs and prompts.
    pub nickname: String,

    /// Current status (`ACTIVE`, `FINISHED`, or another registered name).
    #[serde(rename = "state", default)]
    pub status: PlayerStatus,

    /// Space the player's piece stands on, if placed.
    #[serde(default)]
    pub current_space_id: Option<String>,

    /// Effects attached to this player, in application order.
    #[serde(default)]
    pub effects: Vec<PlayerEffect>,

    /// Stats tracked for this player.
    #[serde(default)]
    pub stats: Vec<BaseStat>,
}

impl Player {
    /// Create an active player with no effects or stats.
    pub fn new(id: PlayerId, nickname: impl Into<String>) -> Self {
        Self {
            id,
            nickname: nickname.into(),
            status: PlayerStatus::active(),
            current_space_id: None,
            effects: Vec::new(),
            stats: Vec::new(),
        }
    }

    /// Place the player on a space (builder pattern).
    #[must_use]
    pub fn on_space(mut self, space_id: impl Into<String>) -> Self {
        self.current_space_id = Some(space_id.into());
        self
    }

    /// Set the status (builder pattern).
    #[must_use]
    pub fn with_status(mut self, status: PlayerStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    // === Effects ===

    /// Attach an effect.
    pub fn add_effect(&mut self, effect: PlayerEffect) {
        self.effects.push(effect);
    }

    /// Look up an attached effect by id.
    #[must_use]
    pub fn effect(&self, id: &str) -> Option<&PlayerEffect> {
        self.effects.iter().find(|e| e.id == id)
    }

    /// Look up an attached effect by id, mutably.
    pub fn effect_mut(&mut self, id: &str) -> Option<&mut PlayerEffect> {
        self.effects.iter_mut().find(|e| e.id == id)
    }

    /// Drop every effect that has been marked for removal.
    ///
    /// Returns the number of effects removed.
    pub fn remove_expired_effects(&mut self) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| !e.to_remove);
        before - self.effects.len()
    }

    // === Stats ===

    /// Add a stat.
    pub fn add_stat(&mut self, stat: BaseStat) {
        self.stats.push(stat);
    }

    /// Look up a stat by id.
    #[must_use]
    pub fn stat(&self, id: &str) -> Option<&BaseStat> {
        self.stats.iter().find(|s| s.id == id)
    }

    /// Look up a stat by id, mutably.
    pub fn stat_mut(&mut self, id: &str) -> Option<&mut BaseStat> {
        self.stats.iter_mut().find(|s| s.id == id)
    }

    /// Set a stat's value through the stat type registered for its kind,
    /// so the type's change hook sees the update.
    ///
    /// A kind with no registered factory gets a plain value write. Returns
    /// `false` if the player has no stat with this id.
    pub fn set_stat(&mut self, id: &str, value: i64, factories: &FactoryManager) -> bool {
        let Some(stat) = self.stat_mut(id) else {
            return false;
        };
        match factories.create_stat(&stat.kind, &stat.id, stat.value) {
            Some(mut typed) => {
                *typed.base_mut() = stat.clone();
                typed.set_value(value);
                *stat = typed.base().clone();
            }
            None => {
                debug!(stat = %stat.id, kind = %stat.kind, "no stat factory, writing value directly");
                stat.value = value;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::DemoStat;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p0), "Player 0");
    }

    #[test]
    fn test_player_id_all() {
        let players: Vec<_> = PlayerId::all(3).collect();
        assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    }

    #[test]
    fn test_status_defaults_to_active() {
        let player = Player::new(PlayerId::new(0), "Ada");
        assert_eq!(player.status.name(), PlayerStatus::ACTIVE);
        assert!(!player.is_finished());

        let done = player.with_status(PlayerStatus::finished());
        assert!(done.is_finished());
    }

    #[test]
    fn test_effect_lookup_and_expiry() {
        let mut player = Player::new(PlayerId::new(0), "Ada");
        player.add_effect(PlayerEffect::new("a", "DemoEffect", 1));
        player.add_effect(PlayerEffect::new("b", "DemoEffect", 1));

        player.effect_mut("a").unwrap().mark_for_removal();
        assert_eq!(player.remove_expired_effects(), 1);
        assert!(player.effect("a").is_none());
        assert!(player.effect("b").is_some());
    }

    #[test]
    fn test_player_serialization_uses_host_field_names() {
        let player = Player::new(PlayerId::new(2), "Bo").on_space("start");
        let json = serde_json::to_value(&player).unwrap();

        assert_eq!(json["state"], "ACTIVE");
        assert_eq!(json["currentSpaceId"], "start");

        let back: Player = serde_json::from_value(json).unwrap();
        assert_eq!(back, player);
    }

    #[test]
    fn test_set_stat_runs_the_stat_type() {
        let mut factories = FactoryManager::new();
        factories
            .stats_mut()
            .unwrap()
            .register(DemoStat::TYPE, DemoStat::create);

        let mut player = Player::new(PlayerId::new(0), "Ada");
        player.add_stat(DemoStat::default().into_base());

        assert!(player.set_stat(DemoStat::DEFAULT_ID, 42, &factories));
        let stat = player.stat(DemoStat::DEFAULT_ID).unwrap();
        assert_eq!(stat.value, 42);
        assert_eq!(
            stat.metadata.get("lastChange"),
            Some(&serde_json::json!({ "oldValue": 0, "newValue": 42 }))
        );
        assert!(!player.set_stat("missing", 1, &factories));
    }

    #[test]
    fn test_set_stat_without_factory_writes_value() {
        let mut player = Player::new(PlayerId::new(0), "Ada");
        player.add_stat(DemoStat::default().into_base());

        assert!(player.set_stat(DemoStat::DEFAULT_ID, 7, &FactoryManager::new()));
        let stat = player.stat(DemoStat::DEFAULT_ID).unwrap();
        assert_eq!(stat.value, 7);
        assert!(stat.metadata.is_empty());
    }

    #[test]
    fn test_player_defaults_missing_status() {
        let player: Player =
            serde_json::from_value(serde_json::json!({ "id": 1, "nickname": "Bo" })).unwrap();

        assert_eq!(player.status, PlayerStatus::active());
        assert!(player.current_space_id.is_none());
    }
}
