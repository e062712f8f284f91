//! Host map storage and per-plugin map providers.
//!
//! Plugins never write to map storage directly. They obtain a
//! `MapProvider` scoped to their plugin id, register documents through it,
//! and ask it to remove everything they registered on teardown.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{HostError, HostResult};
use crate::maps::BoardMap;

/// Listing entry shown in the host's map picker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapRegistration {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl MapRegistration {
    /// Listing entry taken from a document's own metadata.
    #[must_use]
    pub fn from_map(map: &BoardMap) -> Self {
        Self {
            id: map.metadata.id.clone(),
            name: map.metadata.name.clone(),
            description: map.metadata.description.clone(),
        }
    }
}

/// A plugin's handle on the host's map storage.
pub trait MapProvider {
    /// Store a map document under `info.id`.
    fn register_map(&mut self, map: BoardMap, info: MapRegistration) -> HostResult<()>;

    /// Remove every map this provider registered. Returns how many were removed.
    fn unregister_all_maps(&mut self) -> usize;

    /// Ids of the maps this provider currently owns.
    fn registered_maps(&self) -> Vec<String>;
}

/// A stored document and the plugin that owns it.
#[derive(Clone, Debug)]
pub struct StoredMap {
    pub owner: String,
    pub info: MapRegistration,
    pub map: BoardMap,
}

/// Host map storage, keyed by map id.
#[derive(Debug, Default)]
pub struct MapStorage {
    maps: FxHashMap<String, StoredMap>,
}

/// Map storage shared between the host and every plugin provider.
pub type SharedMapStorage = Rc<RefCell<MapStorage>>;

impl MapStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage wrapped for sharing.
    #[must_use]
    pub fn shared() -> SharedMapStorage {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Validate and store a document for `owner`.
    ///
    /// The owner may replace its own map; a map owned by someone else is
    /// left untouched.
    pub fn insert(&mut self, owner: &str, map: BoardMap, info: MapRegistration) -> HostResult<()> {
        map.validate()?;

        if let Some(existing) = self.maps.get(&info.id) {
            if existing.owner != owner {
                return Err(HostError::MapOwnedElsewhere {
                    map_id: info.id,
                    owner: existing.owner.clone(),
                });
            }
        }

        debug!(map = %info.id, owner, "map stored");
        self.maps.insert(
            info.id.clone(),
            StoredMap {
                owner: owner.to_string(),
                info,
                map,
            },
        );
        Ok(())
    }

    /// Remove a map, only if `owner` owns it.
    pub fn remove(&mut self, owner: &str, map_id: &str) -> Option<StoredMap> {
        if self.maps.get(map_id)?.owner != owner {
            return None;
        }
        self.maps.remove(map_id)
    }

    #[must_use]
    pub fn get(&self, map_id: &str) -> Option<&StoredMap> {
        self.maps.get(map_id)
    }

    #[must_use]
    pub fn contains(&self, map_id: &str) -> bool {
        self.maps.contains_key(map_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

/// Default provider: writes into shared storage on behalf of one plugin.
#[derive(Debug)]
pub struct PluginMapProvider {
    plugin_id: String,
    storage: SharedMapStorage,
    owned: Vec<String>,
}

impl PluginMapProvider {
    /// Create a provider for `plugin_id`.
    ///
    /// Without host storage the provider keeps its maps in private storage.
    pub fn new(plugin_id: impl Into<String>, storage: Option<SharedMapStorage>) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            storage: storage.unwrap_or_else(MapStorage::shared),
            owned: Vec::new(),
        }
    }

    #[must_use]
    pub fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    /// The storage this provider writes to.
    #[must_use]
    pub fn storage(&self) -> SharedMapStorage {
        Rc::clone(&self.storage)
    }
}

impl MapProvider for PluginMapProvider {
    fn register_map(&mut self, map: BoardMap, info: MapRegistration) -> HostResult<()> {
        let id = info.id.clone();
        self.storage.borrow_mut().insert(&self.plugin_id, map, info)?;
        if !self.owned.contains(&id) {
            self.owned.push(id);
        }
        Ok(())
    }

    fn unregister_all_maps(&mut self) -> usize {
        let mut storage = self.storage.borrow_mut();
        let removed = self
            .owned
            .drain(..)
            .filter(|id| storage.remove(&self.plugin_id, id).is_some())
            .count();
        info!(plugin = %self.plugin_id, removed, "plugin maps unregistered");
        removed
    }

    fn registered_maps(&self) -> Vec<String> {
        self.owned.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PluginConfig;
    use crate::maps::demo_board;

    #[test]
    fn test_register_and_unregister_all() {
        let storage = MapStorage::shared();
        let mut provider = PluginMapProvider::new("p", Some(storage.clone()));
        let board = demo_board(&PluginConfig::default());
        let info = MapRegistration::from_map(&board);

        provider.register_map(board, info.clone()).unwrap();
        assert!(storage.borrow().contains(&info.id));
        assert_eq!(provider.registered_maps(), vec![info.id.clone()]);

        assert_eq!(provider.unregister_all_maps(), 1);
        assert!(storage.borrow().is_empty());
        assert_eq!(provider.unregister_all_maps(), 0);
    }

    #[test]
    fn test_reregister_same_map_tracks_once() {
        let mut provider = PluginMapProvider::new("p", None);
        let board = demo_board(&PluginConfig::default());
        let info = MapRegistration::from_map(&board);

        provider.register_map(board.clone(), info.clone()).unwrap();
        provider.register_map(board, info).unwrap();

        assert_eq!(provider.registered_maps().len(), 1);
        assert_eq!(provider.storage().borrow().len(), 1);
    }

    #[test]
    fn test_map_owned_by_other_plugin_is_protected() {
        let storage = MapStorage::shared();
        let mut first = PluginMapProvider::new("first", Some(storage.clone()));
        let mut second = PluginMapProvider::new("second", Some(storage.clone()));
        let board = demo_board(&PluginConfig::default());
        let info = MapRegistration::from_map(&board);

        first.register_map(board.clone(), info.clone()).unwrap();
        let err = second.register_map(board, info.clone());

        assert!(matches!(err, Err(HostError::MapOwnedElsewhere { .. })));
        assert_eq!(second.unregister_all_maps(), 0);
        assert_eq!(storage.borrow().get(&info.id).unwrap().owner, "first");
    }

    #[test]
    fn test_invalid_map_is_rejected() {
        let mut provider = PluginMapProvider::new("p", None);
        let mut board = demo_board(&PluginConfig::default());
        board.board.topology.spaces[0].connections[0].target_id = "nowhere".to_string();
        let info = MapRegistration::from_map(&board);

        let err = provider.register_map(board, info);
        assert!(matches!(err, Err(HostError::UnresolvedConnection { .. })));
        assert!(provider.registered_maps().is_empty());
    }
}
