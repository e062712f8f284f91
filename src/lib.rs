//! # board-plugin-example
//!
//! An example plugin for a turn-based board game host. It registers one
//! demonstration implementation for every extension point the host offers,
//! so plugin authors can see each seam in use.
//!
//! ## Design Principles
//!
//! 1. **Composition over host base classes**: every extension kind is a
//!    capability trait (`Action`, `Trigger`, `Effect`, `Stat`,
//!    `GameEngine`, ...) and the demo types implement it around a host
//!    base value.
//!
//! 2. **Optional host subsystems**: registries and factories a host lacks
//!    are skipped with a warning, never a panic.
//!
//! 3. **Reversible registration**: `cleanup` removes the placeholders and
//!    maps `initialize` added, and may be called more than once.
//!
//! ## Modules
//!
//! - `core`: players, game state, configuration, errors, RNG
//! - `host`: the host seams (event bus, registries, factories, phases, maps)
//! - `actions`, `triggers`, `effects`, `stats`: space-level extensions
//! - `engine`: game engines, turn managers, the demo game state
//! - `components`: presentation-side extensions and the phase machine
//! - `maps`: board-map documents and the demo board
//! - `plugin`: the registrar tying it all together

pub mod core;
pub mod host;
pub mod actions;
pub mod triggers;
pub mod effects;
pub mod stats;
pub mod engine;
pub mod components;
pub mod maps;
pub mod plugin;

// Re-export commonly used types
pub use crate::core::{
    BaseGameState, GameStateKind, HostError, HostResult, Player, PlayerId, PlayerStatus,
    PluginConfig, PLUGIN_ID,
};

pub use crate::host::{
    EventBus, FactoryManager, HostBundle, MapStorage, Plugin, PluginEventHandler,
    RecordingEventBus, RegistryManager,
};

pub use crate::actions::{Action, DemoAction};
pub use crate::triggers::{DemoTrigger, Trigger, TriggerContext, TriggerScope};
pub use crate::effects::{DemoEffect, Effect, EffectMode};
pub use crate::stats::{DemoStat, Stat};

pub use crate::engine::{
    DemoGameEngine, DemoGameState, EngineConfig, EngineDependencies, GameEngine,
    TurnBasedGameEngine,
};

pub use crate::maps::{demo_board, BoardMap};

pub use crate::plugin::{create_plugin, ExamplePlugin, PluginMetadata};
