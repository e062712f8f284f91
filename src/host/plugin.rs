//! Plugin lifecycle seam and the dependency bundle the host hands plugins.

use std::rc::Rc;

use crate::plugin::PluginMetadata;

use super::event::EventBus;
use super::factory::FactoryManager;
use super::handler::PluginEventHandler;
use super::maps::{MapProvider, PluginMapProvider, SharedMapStorage};
use super::phases::PhaseMachineConfig;
use super::registry::RegistryManager;

/// Host-side map provider constructor, keyed by plugin id.
pub type MapProviderFn = Box<dyn Fn(&str) -> Box<dyn MapProvider>>;

/// How a plugin obtains its map provider.
pub enum MapProviderSource {
    /// The host builds providers itself.
    Factory(MapProviderFn),
    /// The plugin builds a `PluginMapProvider`, on host storage if given.
    PluginProvider { storage: Option<SharedMapStorage> },
    /// The host has no map support.
    Unavailable,
}

impl MapProviderSource {
    /// Build a provider for `plugin_id`, or `None` if the host has no map support.
    #[must_use]
    pub fn provider_for(&self, plugin_id: &str) -> Option<Box<dyn MapProvider>> {
        match self {
            MapProviderSource::Factory(create) => Some(create(plugin_id)),
            MapProviderSource::PluginProvider { storage } => {
                Some(Box::new(PluginMapProvider::new(plugin_id, storage.clone())))
            }
            MapProviderSource::Unavailable => None,
        }
    }
}

impl std::fmt::Debug for MapProviderSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapProviderSource::Factory(_) => f.write_str("Factory"),
            MapProviderSource::PluginProvider { storage } => f
                .debug_struct("PluginProvider")
                .field("host_storage", &storage.is_some())
                .finish(),
            MapProviderSource::Unavailable => f.write_str("Unavailable"),
        }
    }
}

/// Dependencies the host injects when loading a plugin.
///
/// Base behaviours (actions, triggers, engines, ...) are traits in this
/// crate; what remains host-specific is how maps get stored and which
/// game and turn phases the host runs.
#[derive(Debug)]
pub struct HostBundle {
    pub map_provider: MapProviderSource,
    /// The host's game and turn phase sets.
    pub phases: PhaseMachineConfig,
}

impl HostBundle {
    /// Bundle whose plugins write maps into `storage`.
    #[must_use]
    pub fn with_storage(storage: SharedMapStorage) -> Self {
        Self {
            map_provider: MapProviderSource::PluginProvider {
                storage: Some(storage),
            },
            phases: PhaseMachineConfig::all(),
        }
    }

    /// Bundle of a host without map support.
    #[must_use]
    pub fn without_maps() -> Self {
        Self {
            map_provider: MapProviderSource::Unavailable,
            phases: PhaseMachineConfig::all(),
        }
    }

    /// Replace the phase sets (builder pattern).
    #[must_use]
    pub fn with_phases(mut self, phases: PhaseMachineConfig) -> Self {
        self.phases = phases;
        self
    }
}

/// Plugin lifecycle as driven by the host loader.
pub trait Plugin {
    /// Register every extension. Called once per activation.
    fn initialize(
        &mut self,
        event_bus: Rc<dyn EventBus>,
        registries: &mut RegistryManager,
        factories: &mut FactoryManager,
    );

    /// Attach the host's event handler. Called after `initialize`.
    fn set_event_handler(&mut self, _handler: &mut dyn PluginEventHandler) {}

    /// Undo `initialize`. Safe to call more than once.
    fn cleanup(&mut self, registries: &mut RegistryManager);

    /// Descriptor consumed by the host's plugin loader.
    fn metadata(&self) -> PluginMetadata;
}
