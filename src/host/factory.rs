//! Host factories: string key → constructor.
//!
//! Every extension kind has its own factory. Constructors are plain `fn`
//! pointers; the factory stores them and the host calls them when a map or
//! a game setup names the key.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::actions::Action;
use crate::components::{Animation, EventProcessor, PieceManager, UiComponent, UiController};
use crate::core::GameStateKind;
use crate::effects::Effect;
use crate::engine::{EngineConfig, EngineDependencies, GameEngine, TurnManager};
use crate::stats::Stat;
use crate::triggers::Trigger;

use super::event::EventBus;
use super::phases::{PhaseMachineConfig, PhaseStateMachine};
use super::registry::Registry;

/// Builds an action from its map payload.
pub type ActionCtor = fn(Value) -> Box<dyn Action>;
/// Builds a trigger from its `when.payload`.
pub type TriggerCtor = fn(Value) -> Box<dyn Trigger>;
/// Builds an effect from its map arguments.
pub type EffectCtor = fn(&Value) -> Box<dyn Effect>;
/// Builds a stat from an id and initial value.
pub type StatCtor = fn(&str, i64) -> Box<dyn Stat>;
/// Builds a game state from host options.
pub type GameStateCtor = fn(&Value) -> Box<dyn GameStateKind>;
/// Builds a game engine.
pub type GameEngineCtor = fn(EngineDependencies, EngineConfig) -> Box<dyn GameEngine>;
/// Builds a phase state machine. A closure, so plugins can capture the
/// host's phase sets.
pub type PhaseMachineCtor = Rc<dyn Fn(PhaseMachineConfig, Option<Rc<dyn EventBus>>) -> PhaseStateMachine>;
/// Builds a turn manager from its config.
pub type TurnManagerCtor = fn(Value) -> Box<dyn TurnManager>;
pub type EventProcessorCtor = fn(Value) -> Box<dyn EventProcessor>;
pub type UiControllerCtor = fn(Value) -> Box<dyn UiController>;
pub type UiComponentCtor = fn(Value) -> Box<dyn UiComponent>;
pub type AnimationCtor = fn(Value) -> Box<dyn Animation>;
pub type PieceManagerCtor = fn() -> Box<dyn PieceManager>;

/// Picker metadata for an animation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationMetadata {
    pub display_name: String,
    pub description: String,
    pub category: String,
    /// Duration class (`instant`, `short`, `long`).
    pub duration: String,
}

/// An animation constructor with its optional picker metadata.
#[derive(Clone, Debug)]
pub struct AnimationEntry {
    pub ctor: AnimationCtor,
    pub metadata: Option<AnimationMetadata>,
}

/// Factories a host may or may not provide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactoryKind {
    PhaseStateMachine,
    TurnManager,
    EventProcessor,
    UiController,
    UiComponent,
    Animation,
    Action,
    Trigger,
    Effect,
    Stat,
}

impl FactoryKind {
    /// Every optional factory kind.
    pub const ALL: [FactoryKind; 10] = [
        FactoryKind::PhaseStateMachine,
        FactoryKind::TurnManager,
        FactoryKind::EventProcessor,
        FactoryKind::UiController,
        FactoryKind::UiComponent,
        FactoryKind::Animation,
        FactoryKind::Action,
        FactoryKind::Trigger,
        FactoryKind::Effect,
        FactoryKind::Stat,
    ];

    /// Name the host's factory manager uses for this factory.
    #[must_use]
    pub const fn host_name(self) -> &'static str {
        match self {
            FactoryKind::PhaseStateMachine => "PhaseStateMachineFactory",
            FactoryKind::TurnManager => "TurnManagerFactory",
            FactoryKind::EventProcessor => "EventProcessorFactory",
            FactoryKind::UiController => "UIControllerFactory",
            FactoryKind::UiComponent => "UIComponentFactory",
            FactoryKind::Animation => "AnimationFactory",
            FactoryKind::Action => "ActionFactory",
            FactoryKind::Trigger => "TriggerFactory",
            FactoryKind::Effect => "EffectFactory",
            FactoryKind::Stat => "StatFactory",
        }
    }
}

impl std::fmt::Display for FactoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.host_name())
    }
}

/// Host factory manager.
///
/// The engine and state factories are always present; the per-kind
/// factories are optional and plugins skip the ones a host lacks.
#[derive(Debug)]
pub struct FactoryManager {
    game_engines: Registry<GameEngineCtor>,
    game_states: Registry<GameStateCtor>,
    phase_machines: Option<Registry<PhaseMachineCtor>>,
    turn_managers: Option<Registry<TurnManagerCtor>>,
    event_processors: Option<Registry<EventProcessorCtor>>,
    ui_controllers: Option<Registry<UiControllerCtor>>,
    ui_components: Option<Registry<UiComponentCtor>>,
    animations: Option<Registry<AnimationEntry>>,
    actions: Option<Registry<ActionCtor>>,
    triggers: Option<Registry<TriggerCtor>>,
    effects: Option<Registry<EffectCtor>>,
    stats: Option<Registry<StatCtor>>,
}

impl FactoryManager {
    /// A manager providing every factory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            game_engines: Registry::new(),
            game_states: Registry::new(),
            phase_machines: Some(Registry::new()),
            turn_managers: Some(Registry::new()),
            event_processors: Some(Registry::new()),
            ui_controllers: Some(Registry::new()),
            ui_components: Some(Registry::new()),
            animations: Some(Registry::new()),
            actions: Some(Registry::new()),
            triggers: Some(Registry::new()),
            effects: Some(Registry::new()),
            stats: Some(Registry::new()),
        }
    }

    /// Drop one optional factory (builder pattern).
    #[must_use]
    pub fn without(mut self, kind: FactoryKind) -> Self {
        match kind {
            FactoryKind::PhaseStateMachine => self.phase_machines = None,
            FactoryKind::TurnManager => self.turn_managers = None,
            FactoryKind::EventProcessor => self.event_processors = None,
            FactoryKind::UiController => self.ui_controllers = None,
            FactoryKind::UiComponent => self.ui_components = None,
            FactoryKind::Animation => self.animations = None,
            FactoryKind::Action => self.actions = None,
            FactoryKind::Trigger => self.triggers = None,
            FactoryKind::Effect => self.effects = None,
            FactoryKind::Stat => self.stats = None,
        }
        self
    }

    /// Is the given optional factory provided?
    #[must_use]
    pub fn has_factory(&self, kind: FactoryKind) -> bool {
        self.registered_keys(kind).is_some()
    }

    /// Keys registered in an optional factory, or `None` if it is absent.
    #[must_use]
    pub fn registered_keys(&self, kind: FactoryKind) -> Option<Vec<&str>> {
        match kind {
            FactoryKind::PhaseStateMachine => self.phase_machines.as_ref().map(Registry::keys),
            FactoryKind::TurnManager => self.turn_managers.as_ref().map(Registry::keys),
            FactoryKind::EventProcessor => self.event_processors.as_ref().map(Registry::keys),
            FactoryKind::UiController => self.ui_controllers.as_ref().map(Registry::keys),
            FactoryKind::UiComponent => self.ui_components.as_ref().map(Registry::keys),
            FactoryKind::Animation => self.animations.as_ref().map(Registry::keys),
            FactoryKind::Action => self.actions.as_ref().map(Registry::keys),
            FactoryKind::Trigger => self.triggers.as_ref().map(Registry::keys),
            FactoryKind::Effect => self.effects.as_ref().map(Registry::keys),
            FactoryKind::Stat => self.stats.as_ref().map(Registry::keys),
        }
    }

    // === Always-present factories ===

    pub fn game_engines(&self) -> &Registry<GameEngineCtor> {
        &self.game_engines
    }

    pub fn game_engines_mut(&mut self) -> &mut Registry<GameEngineCtor> {
        &mut self.game_engines
    }

    pub fn game_states(&self) -> &Registry<GameStateCtor> {
        &self.game_states
    }

    pub fn game_states_mut(&mut self) -> &mut Registry<GameStateCtor> {
        &mut self.game_states
    }

    // === Optional factories ===

    pub fn phase_machines(&self) -> Option<&Registry<PhaseMachineCtor>> {
        self.phase_machines.as_ref()
    }

    pub fn phase_machines_mut(&mut self) -> Option<&mut Registry<PhaseMachineCtor>> {
        self.phase_machines.as_mut()
    }

    pub fn turn_managers(&self) -> Option<&Registry<TurnManagerCtor>> {
        self.turn_managers.as_ref()
    }

    pub fn turn_managers_mut(&mut self) -> Option<&mut Registry<TurnManagerCtor>> {
        self.turn_managers.as_mut()
    }

    pub fn event_processors(&self) -> Option<&Registry<EventProcessorCtor>> {
        self.event_processors.as_ref()
    }

    pub fn event_processors_mut(&mut self) -> Option<&mut Registry<EventProcessorCtor>> {
        self.event_processors.as_mut()
    }

    pub fn ui_controllers(&self) -> Option<&Registry<UiControllerCtor>> {
        self.ui_controllers.as_ref()
    }

    pub fn ui_controllers_mut(&mut self) -> Option<&mut Registry<UiControllerCtor>> {
        self.ui_controllers.as_mut()
    }

    pub fn ui_components(&self) -> Option<&Registry<UiComponentCtor>> {
        self.ui_components.as_ref()
    }

    pub fn ui_components_mut(&mut self) -> Option<&mut Registry<UiComponentCtor>> {
        self.ui_components.as_mut()
    }

    pub fn animations(&self) -> Option<&Registry<AnimationEntry>> {
        self.animations.as_ref()
    }

    pub fn animations_mut(&mut self) -> Option<&mut Registry<AnimationEntry>> {
        self.animations.as_mut()
    }

    pub fn actions(&self) -> Option<&Registry<ActionCtor>> {
        self.actions.as_ref()
    }

    pub fn actions_mut(&mut self) -> Option<&mut Registry<ActionCtor>> {
        self.actions.as_mut()
    }

    pub fn triggers(&self) -> Option<&Registry<TriggerCtor>> {
        self.triggers.as_ref()
    }

    pub fn triggers_mut(&mut self) -> Option<&mut Registry<TriggerCtor>> {
        self.triggers.as_mut()
    }

    pub fn effects(&self) -> Option<&Registry<EffectCtor>> {
        self.effects.as_ref()
    }

    pub fn effects_mut(&mut self) -> Option<&mut Registry<EffectCtor>> {
        self.effects.as_mut()
    }

    pub fn stats(&self) -> Option<&Registry<StatCtor>> {
        self.stats.as_ref()
    }

    pub fn stats_mut(&mut self) -> Option<&mut Registry<StatCtor>> {
        self.stats.as_mut()
    }

    // === Construction ===

    /// Build an action by key.
    pub fn create_action(&self, key: &str, payload: Value) -> Option<Box<dyn Action>> {
        self.actions()?.get(key).map(|ctor| ctor(payload))
    }

    /// Build a trigger by key.
    pub fn create_trigger(&self, key: &str, payload: Value) -> Option<Box<dyn Trigger>> {
        self.triggers()?.get(key).map(|ctor| ctor(payload))
    }

    /// Build an effect by key.
    pub fn create_effect(&self, key: &str, args: &Value) -> Option<Box<dyn Effect>> {
        self.effects()?.get(key).map(|ctor| ctor(args))
    }

    /// Build a stat by key.
    pub fn create_stat(&self, key: &str, id: &str, initial: i64) -> Option<Box<dyn Stat>> {
        self.stats()?.get(key).map(|ctor| ctor(id, initial))
    }

    /// Build a phase state machine by key.
    pub fn create_phase_machine(
        &self,
        key: &str,
        config: PhaseMachineConfig,
        event_bus: Option<Rc<dyn EventBus>>,
    ) -> Option<PhaseStateMachine> {
        self.phase_machines()?.get(key).map(|ctor| ctor(config, event_bus))
    }

    /// Build a game state by key.
    pub fn create_game_state(&self, key: &str, options: &Value) -> Option<Box<dyn GameStateKind>> {
        self.game_states.get(key).map(|ctor| ctor(options))
    }

    /// Build a game engine by key.
    pub fn create_game_engine(
        &self,
        key: &str,
        dependencies: EngineDependencies,
        config: EngineConfig,
    ) -> Option<Box<dyn GameEngine>> {
        self.game_engines.get(key).map(|ctor| ctor(dependencies, config))
    }
}

impl Default for FactoryManager {
    fn default() -> Self {
        Self::new()
    }
}
