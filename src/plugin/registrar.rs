//! The plugin registrar: wires every demo extension into a host.

use std::rc::Rc;

use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::actions::DemoAction;
use crate::components::{
    DemoAnimation, DemoEventProcessor, DemoPhaseMachine, DemoPieceManager, DemoUiComponent,
    DemoUiController,
};
use crate::core::{PlayerId, PluginConfig};
use crate::effects::DemoEffect;
use crate::engine::{DemoGameEngine, DemoGameState, DemoTurnManager};
use crate::host::{
    AnimationEntry, EventBus, FactoryManager, HostBundle, MapProvider, MapProviderSource,
    MapRegistration, PhaseMachineConfig, PlaceholderArgs, PlayerActionRequest, Plugin,
    PluginEventHandler, RegistryManager,
};
use crate::maps::demo_board;
use crate::stats::DemoStat;
use crate::triggers::DemoTrigger;

use super::metadata::PluginMetadata;
use super::player_states::register_player_states;

/// Placeholder rendering a fixed phrase.
pub const DEMO_PHRASE: &str = "DEMO_PHRASE";

/// Placeholder rendering the demo state's counter.
pub const DEMO_COUNTER: &str = "DEMO_COUNTER";

/// Plugin event that dispatches a demo action for a player.
pub const PING_EVENT: &str = "demo:ping";

/// The example plugin.
///
/// Holds what it needs to undo its own registrations: the placeholder keys
/// it added and the map provider it registered the board through.
pub struct ExamplePlugin {
    config: PluginConfig,
    map_source: MapProviderSource,
    phases: PhaseMachineConfig,
    event_bus: Option<Rc<dyn EventBus>>,
    placeholder_keys: Vec<String>,
    map_provider: Option<Box<dyn MapProvider>>,
}

/// Create the plugin for a host.
#[must_use]
pub fn create_plugin(bundle: HostBundle, config: PluginConfig) -> ExamplePlugin {
    ExamplePlugin {
        config,
        map_source: bundle.map_provider,
        phases: bundle.phases,
        event_bus: None,
        placeholder_keys: Vec::new(),
        map_provider: None,
    }
}

impl ExamplePlugin {
    /// Descriptor for the given configuration, without building a plugin.
    #[must_use]
    pub fn plugin_metadata(config: &PluginConfig) -> PluginMetadata {
        PluginMetadata::for_config(config)
    }

    #[must_use]
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Placeholder keys registered by the last `initialize`.
    #[must_use]
    pub fn placeholder_keys(&self) -> &[String] {
        &self.placeholder_keys
    }

    /// Ids of the maps currently registered through this plugin.
    #[must_use]
    pub fn registered_maps(&self) -> Vec<String> {
        self.map_provider
            .as_ref()
            .map(|provider| provider.registered_maps())
            .unwrap_or_default()
    }

    /// Game and turn phase sets the host bundle supplied.
    #[must_use]
    pub fn phases(&self) -> &PhaseMachineConfig {
        &self.phases
    }

    /// Event bus received at `initialize`, if any.
    #[must_use]
    pub fn event_bus(&self) -> Option<&Rc<dyn EventBus>> {
        self.event_bus.as_ref()
    }

    fn register_game_bits(registries: &mut RegistryManager, factories: &mut FactoryManager) {
        let states = factories.game_states_mut();
        if !states.is_registered(DemoGameState::TYPE) {
            states.register(DemoGameState::TYPE, DemoGameState::create);
        }

        let engines = factories.game_engines_mut();
        if !engines.is_registered(DemoGameEngine::TYPE) {
            engines.register(DemoGameEngine::TYPE, DemoGameEngine::create);
        }

        if let Some(pieces) = registries.piece_manager_registry_mut() {
            if !pieces.is_registered(DemoPieceManager::TYPE) {
                pieces.register(DemoPieceManager::TYPE, DemoPieceManager::create);
            }
        }

        register_player_states(registries);
    }

    fn register_factories(factories: &mut FactoryManager, phases: &PhaseMachineConfig) {
        if let Some(machines) = factories.phase_machines_mut() {
            machines.register(DemoPhaseMachine::TYPE, DemoPhaseMachine::ctor(phases.clone()));
        }
        if let Some(managers) = factories.turn_managers_mut() {
            managers.register(DemoTurnManager::TYPE, DemoTurnManager::create);
        }
        if let Some(processors) = factories.event_processors_mut() {
            processors.register(DemoEventProcessor::TYPE, DemoEventProcessor::create);
        }
        if let Some(controllers) = factories.ui_controllers_mut() {
            controllers.register(DemoUiController::TYPE, DemoUiController::create);
        }
        if let Some(components) = factories.ui_components_mut() {
            components.register(DemoUiComponent::TYPE, DemoUiComponent::create);
        }
        if let Some(animations) = factories.animations_mut() {
            animations.register(
                DemoAnimation::TYPE,
                AnimationEntry {
                    ctor: DemoAnimation::create,
                    metadata: Some(DemoAnimation::metadata()),
                },
            );
        }
        if let Some(actions) = factories.actions_mut() {
            actions.register(DemoAction::TYPE, DemoAction::create);
        }
        if let Some(triggers) = factories.triggers_mut() {
            triggers.register(DemoTrigger::TYPE, DemoTrigger::create);
        }
        if let Some(effects) = factories.effects_mut() {
            effects.register(DemoEffect::TYPE, DemoEffect::create);
        }
        if let Some(stats) = factories.stats_mut() {
            stats.register(DemoStat::TYPE, DemoStat::create);
        }
    }

    fn register_placeholders(&mut self, registries: &mut RegistryManager) {
        let Some(placeholders) = registries.placeholder_registry_mut() else {
            warn!("placeholder registry not available");
            return;
        };

        placeholders.register(
            DEMO_PHRASE,
            Box::new(|_: &PlaceholderArgs| "Hello from the plugin!".to_string()),
        );
        placeholders.register(
            DEMO_COUNTER,
            Box::new(|args: &PlaceholderArgs| {
                let counter = args.context["gameState"]["demoCounter"]
                    .as_u64()
                    .unwrap_or(0);
                format!("Demo counter is {}", counter)
            }),
        );

        for key in [DEMO_PHRASE, DEMO_COUNTER] {
            if !self.placeholder_keys.iter().any(|k| k == key) {
                self.placeholder_keys.push(key.to_string());
            }
        }
    }

    fn register_map(&mut self) {
        if self.map_provider.is_none() {
            self.map_provider = self.map_source.provider_for(&self.config.plugin_id);
        }
        let Some(provider) = self.map_provider.as_mut() else {
            warn!(plugin = %self.config.plugin_id, "map provider not available, skipping demo board");
            return;
        };

        let board = demo_board(&self.config);
        let info = MapRegistration::from_map(&board);
        let map_id = info.id.clone();
        match provider.register_map(board, info) {
            Ok(()) => info!(map = %map_id, "demo board registered"),
            Err(err) => error!(map = %map_id, error = %err, "failed to register demo board"),
        }
    }
}

impl Plugin for ExamplePlugin {
    fn initialize(
        &mut self,
        event_bus: Rc<dyn EventBus>,
        registries: &mut RegistryManager,
        factories: &mut FactoryManager,
    ) {
        self.event_bus = Some(event_bus);

        Self::register_game_bits(registries, factories);
        Self::register_factories(factories, &self.phases);
        self.register_placeholders(registries);
        self.register_map();

        info!(plugin = %self.config.plugin_id, version = %self.config.version, "plugin initialized");
    }

    fn set_event_handler(&mut self, handler: &mut dyn PluginEventHandler) {
        if !handler.supports_plugin_events() {
            debug!("event handler has no plugin events, skipping {}", PING_EVENT);
            return;
        }

        handler.register_plugin_event_handler(
            PING_EVENT,
            Box::new(|payload: &Value| {
                let player_id = payload.get("playerId")?.as_u64()?;
                Some(PlayerActionRequest {
                    player_id: PlayerId::new(u8::try_from(player_id).ok()?),
                    action_type: DemoAction::TYPE.to_string(),
                    action_data: json!({ "note": "ping from plugin" }),
                })
            }),
        );
    }

    fn cleanup(&mut self, registries: &mut RegistryManager) {
        let keys = std::mem::take(&mut self.placeholder_keys);
        match registries.placeholder_registry_mut() {
            Some(placeholders) => {
                for key in &keys {
                    placeholders.unregister(key);
                }
            }
            None if !keys.is_empty() => warn!("placeholder registry not available during cleanup"),
            None => {}
        }

        if let Some(mut provider) = self.map_provider.take() {
            let removed = provider.unregister_all_maps();
            debug!(removed, "plugin maps unregistered");
        }

        self.event_bus = None;
        info!(plugin = %self.config.plugin_id, "plugin cleaned up");
    }

    fn metadata(&self) -> PluginMetadata {
        Self::plugin_metadata(&self.config)
    }
}

impl std::fmt::Debug for ExamplePlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExamplePlugin")
            .field("config", &self.config)
            .field("map_source", &self.map_source)
            .field("phases", &self.phases)
            .field("placeholder_keys", &self.placeholder_keys)
            .field("maps", &self.registered_maps())
            .finish()
    }
}
