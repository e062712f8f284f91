//! Space extension integration tests.
//!
//! These tests build the demo action, trigger, effect, and stat through
//! the factories the plugin registers and run them against a live engine
//! and the demo board, as the host does when a player lands on a space.

use std::rc::Rc;

use serde_json::json;

use board_plugin_example::actions::Action;
use board_plugin_example::core::{
    BaseGameState, GameStateKind, Player, PlayerId, PluginConfig,
};
use board_plugin_example::effects::{DemoEffect, Effect, EffectMode};
use board_plugin_example::engine::{
    DemoGameEngine, DemoGameState, DemoTurnManager, EngineConfig, EngineDependencies,
    GameEngine, TurnBasedGameEngine,
};
use board_plugin_example::host::{
    names, FactoryManager, HostBundle, PlaceholderArgs, Plugin, RecordingEventBus,
    RegistryManager,
};
use board_plugin_example::maps::demo_board;
use board_plugin_example::plugin::{create_plugin, DEMO_COUNTER};
use board_plugin_example::stats::{DemoStat, Stat};
use board_plugin_example::triggers::{DemoTrigger, Trigger, TriggerContext, TriggerScope};

fn registered_factories() -> FactoryManager {
    let mut plugin = create_plugin(HostBundle::without_maps(), PluginConfig::default());
    let mut factories = FactoryManager::new();
    plugin.initialize(
        Rc::new(RecordingEventBus::new()),
        &mut RegistryManager::new(),
        &mut factories,
    );
    factories
}

fn engine_on(space: &str) -> (DemoGameEngine, Rc<RecordingEventBus>) {
    let bus = Rc::new(RecordingEventBus::new());
    let players = vec![
        Player::new(PlayerId::new(0), "Ada").on_space(space),
        Player::new(PlayerId::new(1), "Bo").on_space("start"),
    ];
    let state = DemoGameState::new(BaseGameState::new(players));
    let deps = EngineDependencies::new(Box::new(state), bus.clone())
        .with_move_input(|| Some("1".to_string()));
    let mut engine = DemoGameEngine::new(deps, EngineConfig::default());
    engine.init();
    (engine, bus)
}

/// Test that the demo action announces itself and calls back.
#[test]
fn test_demo_action_executes_with_callback() {
    let factories = registered_factories();
    let (mut engine, bus) = engine_on("demo-action");
    let action = factories
        .create_action("DEMO_ACTION", json!({ "note": "Demo action executed on landing." }))
        .unwrap();

    assert!(action.validate().valid);

    let mut completed = 0;
    let mut on_complete = || completed += 1;
    let outcome = action.execute(&mut engine, Some(&mut on_complete));

    assert!(outcome.success);
    assert_eq!(outcome.message, "Demo action executed");
    assert_eq!(completed, 1);

    let event = bus.last(names::DEMO_ACTION_EXECUTED).unwrap();
    assert_eq!(event.payload["actionType"], "DEMO_ACTION");
    assert_eq!(event.payload["engineType"], "demo-engine");
    assert_eq!(event.payload["payload"]["note"], "Demo action executed on landing.");
}

/// Test that the demo action runs without a callback.
#[test]
fn test_demo_action_without_callback() {
    let factories = registered_factories();
    let (mut engine, bus) = engine_on("demo-action");
    let action = factories.create_action("DEMO_ACTION", json!({})).unwrap();

    let outcome = action.execute(&mut engine, None);

    assert!(outcome.success);
    assert_eq!(bus.count(names::DEMO_ACTION_EXECUTED), 1);
}

/// Test the effect built from the demo board's APPLY_EFFECT arguments.
#[test]
fn test_board_effect_is_one_shot() {
    let factories = registered_factories();
    let board = demo_board(&PluginConfig::default());
    let args = &board.space("demo-effect").unwrap().triggers[0].action.payload["effect"]["args"];

    let (mut engine, bus) = engine_on("demo-effect");
    let mut effect = factories.create_effect("DemoEffect", args).unwrap();
    assert_eq!(effect.id(), "demo-effect-1");

    effect.apply(&mut engine);

    assert!(effect.should_remove());
    let attached = engine.base_state().players[0].effect("demo-effect-1").unwrap().clone();
    assert!(attached.to_remove);
    assert_eq!(
        bus.last(names::DEMO_EFFECT_APPLIED).unwrap().payload,
        json!({ "effectId": "demo-effect-1" })
    );

    // The host sweeps marked effects when the turn ends.
    engine.handle_end_turn();
    assert!(engine.base_state().players[0].effects.is_empty());
}

/// Test that applying twice attaches the effect once.
#[test]
fn test_attached_effect_is_not_duplicated() {
    let (mut engine, bus) = engine_on("demo-effect");
    let mut effect = DemoEffect::new("twice", 2);

    effect.apply(&mut engine);
    effect.apply(&mut engine);

    assert_eq!(engine.base_state().players[0].effects.len(), 1);
    assert_eq!(bus.count(names::DEMO_EFFECT_APPLIED), 2);
}

/// Test that the effect lands on the player the turn manager picks, not
/// the one at the state's current index.
#[test]
fn test_effect_follows_turn_manager() {
    let players = vec![
        Player::new(PlayerId::new(0), "Ada").on_space("start"),
        Player::new(PlayerId::new(1), "Bo").on_space("demo-effect"),
    ];
    let state = DemoGameState::new(BaseGameState::new(players));
    let deps = EngineDependencies::new(Box::new(state), Rc::new(RecordingEventBus::new()))
        .with_turn_manager(DemoTurnManager::create(json!({})));
    let mut engine = DemoGameEngine::new(deps, EngineConfig::default());
    engine.init();
    engine.game_state_mut().base_mut().current_player_index = 1;

    assert_eq!(engine.current_player_id(), Some(PlayerId::new(0)));

    let mut effect = DemoEffect::new("managed", 1);
    effect.apply(&mut engine);

    let players = &engine.base_state().players;
    assert!(players[0].effect("managed").unwrap().to_remove);
    assert!(players[1].effects.is_empty());
}

/// Test that a detached effect leaves the player's effect list alone.
#[test]
fn test_detached_effect() {
    let (mut engine, bus) = engine_on("demo-effect");
    let mut effect = DemoEffect::new("loose", 1).with_mode(EffectMode::Detached);

    effect.apply(&mut engine);

    assert!(effect.should_remove());
    assert!(engine.base_state().players[0].effects.is_empty());
    assert_eq!(bus.count(names::DEMO_EFFECT_APPLIED), 1);
}

/// Test the board's demo trigger against a player landing on its space.
#[test]
fn test_board_trigger_fires_on_landing() {
    let factories = registered_factories();
    let board = demo_board(&PluginConfig::default());
    let space = board.space("demo-trigger").unwrap();
    let when = &space.triggers[0].when;
    let trigger = factories
        .create_trigger(&when.kind, when.payload.clone().unwrap_or_default())
        .unwrap();

    let bus = RecordingEventBus::new();
    let mut state = BaseGameState::new(vec![Player::new(PlayerId::new(0), "Ada").on_space("demo-trigger")]);

    state.set_remaining_moves(1);
    assert!(!trigger.is_triggered(&TriggerContext::new(&state, space, &bus)));

    state.set_remaining_moves(0);
    assert!(trigger.is_triggered(&TriggerContext::new(&state, space, &bus)));

    let event = bus.last(names::DEMO_TRIGGER_CHECKED).unwrap();
    assert_eq!(event.payload["space"]["id"], "demo-trigger");
    assert_eq!(event.payload["gameState"]["players"][0]["currentSpaceId"], "demo-trigger");

    // Other spaces never fire the landing-scoped trigger.
    let elsewhere = board.space("demo-stat").unwrap();
    assert!(!trigger.is_triggered(&TriggerContext::new(&state, elsewhere, &bus)));
    assert_eq!(bus.count(names::DEMO_TRIGGER_CHECKED), 1);
}

/// Test the unscoped trigger's `always` switch.
#[test]
fn test_unscoped_trigger() {
    let board = demo_board(&PluginConfig::default());
    let space = board.space("start").unwrap();
    let state = BaseGameState::new(vec![Player::new(PlayerId::new(0), "Ada")]);
    let bus = RecordingEventBus::new();
    let context = TriggerContext::new(&state, space, &bus);

    let never = DemoTrigger::new(json!({ "always": false })).with_scope(TriggerScope::Unscoped);
    let always = DemoTrigger::new(json!({})).with_scope(TriggerScope::Unscoped);

    assert!(!never.is_triggered(&context));
    assert!(always.is_triggered(&context));
    assert_eq!(bus.count(names::DEMO_TRIGGER_CHECKED), 1);
}

/// Test the stat the board's SET_STAT trigger targets.
#[test]
fn test_board_stat_records_change() {
    let factories = registered_factories();
    let board = demo_board(&PluginConfig::default());
    let payload = &board.space("demo-stat").unwrap().triggers[0].action.payload;
    let stat_id = payload["statId"].as_str().unwrap();
    let value = payload["value"].as_i64().unwrap();

    let mut stat = factories.create_stat("DemoStat", stat_id, 0).unwrap();
    stat.set_value(value);

    assert_eq!(stat.id(), DemoStat::DEFAULT_ID);
    assert_eq!(stat.value(), 42);
    assert_eq!(
        stat.base().metadata.get("lastChange"),
        Some(&json!({ "oldValue": 0, "newValue": 42 }))
    );
}

/// Test that the counter placeholder reads the demo state.
#[test]
fn test_counter_placeholder_reads_demo_state() {
    let mut plugin = create_plugin(HostBundle::without_maps(), PluginConfig::default());
    let mut registries = RegistryManager::new();
    plugin.initialize(
        Rc::new(RecordingEventBus::new()),
        &mut registries,
        &mut FactoryManager::new(),
    );

    let mut state = DemoGameState::new(BaseGameState::default());
    state.increment_demo_counter();
    state.increment_demo_counter();
    let args = PlaceholderArgs::with_context(json!({ "gameState": state.to_json() }));

    let rendered = registries.placeholder_registry().unwrap().resolve(DEMO_COUNTER, &args);
    assert_eq!(rendered.as_deref(), Some("Demo counter is 2"));
}
