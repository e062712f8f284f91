//! Custom player statuses.

use tracing::{debug, warn};

use crate::core::PlayerStatus;
use crate::host::{PlayerStateInfo, RegistryManager};

/// Descriptor of the `FINISHED` status.
#[must_use]
pub fn finished_state() -> PlayerStateInfo {
    PlayerStateInfo {
        display_name: "Finished".to_string(),
        description: "Player has completed the game and reached the finish".to_string(),
        category: "demo".to_string(),
    }
}

/// Register `FINISHED` with the host's player-state registry.
///
/// Returns `false` (and warns) when the host has no such registry.
pub fn register_player_states(registries: &mut RegistryManager) -> bool {
    let Some(registry) = registries.player_state_registry_mut() else {
        warn!("player state registry not available");
        return false;
    };
    registry.register(PlayerStatus::FINISHED, finished_state());
    debug!(state = PlayerStatus::FINISHED, "custom player state registered");
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registers_finished() {
        let mut registries = RegistryManager::new();
        assert!(register_player_states(&mut registries));
        assert!(register_player_states(&mut registries));

        let registry = registries.player_state_registry().unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("FINISHED").unwrap().display_name, "Finished");
    }

    #[test]
    fn test_missing_registry_is_skipped() {
        let mut registries = RegistryManager::empty();
        assert!(!register_player_states(&mut registries));
    }
}
