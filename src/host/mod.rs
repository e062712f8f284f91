//! Host seams the plugin registers into.
//!
//! The board-game host owns its event bus, registries, factories, phase
//! machine, map storage, and event handler. This module describes each of
//! them as a trait or a small concrete type, with in-memory reference
//! implementations good enough to drive the plugin end to end:
//!
//! - [`EventBus`]: named events with JSON payloads
//! - [`Registry`] / [`RegistryManager`]: placeholder, player-state and
//!   piece-manager registries
//! - [`FactoryManager`]: string key → constructor, per extension kind
//! - [`PhaseStateMachine`]: game and turn phases
//! - [`MapProvider`] / [`MapStorage`]: board-map documents per plugin
//! - [`PluginEventHandler`]: plugin events → player actions
//! - [`Plugin`] / [`HostBundle`]: the plugin lifecycle and its injected
//!   dependencies

pub mod event;
pub mod registry;
pub mod factory;
pub mod phases;
pub mod maps;
pub mod handler;
pub mod plugin;

pub use event::{names, EventBus, GameEvent, NullEventBus, RecordingEventBus};
pub use registry::{
    PieceManagerRegistry, PlaceholderArgs, PlaceholderFn, PlaceholderRegistry, PlayerStateInfo,
    PlayerStateRegistry, Registry, RegistryManager,
};
pub use factory::{
    ActionCtor, AnimationCtor, AnimationEntry, AnimationMetadata, EffectCtor, EventProcessorCtor,
    FactoryKind, FactoryManager, GameEngineCtor, GameStateCtor, PhaseMachineCtor, PieceManagerCtor,
    StatCtor, TriggerCtor, TurnManagerCtor, UiComponentCtor, UiControllerCtor,
};
pub use phases::{GamePhase, PhaseChange, PhaseMachineConfig, PhaseStateMachine, TurnPhase};
pub use maps::{MapProvider, MapRegistration, MapStorage, PluginMapProvider, SharedMapStorage, StoredMap};
pub use handler::{
    LegacyEventHandler, PlayerActionRequest, PluginEventCallback, PluginEventHandler,
    RecordingEventHandler,
};
pub use plugin::{HostBundle, MapProviderFn, MapProviderSource, Plugin};
