//! The example plugin.
//!
//! [`ExamplePlugin`] registers one stand-in for every extension point the
//! host exposes, a custom `FINISHED` player state, two placeholders, and a
//! demo board. `cleanup` removes the placeholders and maps again.
//!
//! ```
//! use std::rc::Rc;
//!
//! use board_plugin_example::core::PluginConfig;
//! use board_plugin_example::host::{
//!     FactoryManager, HostBundle, MapStorage, Plugin, RecordingEventBus, RegistryManager,
//! };
//! use board_plugin_example::plugin::create_plugin;
//!
//! let storage = MapStorage::shared();
//! let mut registries = RegistryManager::new();
//! let mut factories = FactoryManager::new();
//!
//! let mut plugin = create_plugin(HostBundle::with_storage(storage.clone()), PluginConfig::default());
//! plugin.initialize(Rc::new(RecordingEventBus::new()), &mut registries, &mut factories);
//!
//! assert!(factories.game_engines().is_registered("demo-engine"));
//! assert!(storage.borrow().contains("demo-plugin-board"));
//!
//! plugin.cleanup(&mut registries);
//! assert!(storage.borrow().is_empty());
//! ```

mod metadata;
mod player_states;
mod registrar;

pub use metadata::{PluginMetadata, Provides};
pub use player_states::{finished_state, register_player_states};
pub use registrar::{create_plugin, ExamplePlugin, DEMO_COUNTER, DEMO_PHRASE, PING_EVENT};
