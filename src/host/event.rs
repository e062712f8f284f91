//! Host event bus.
//!
//! Extensions report what they did by emitting named events with a JSON
//! payload. The host fans them out to its UI and to other plugins; the
//! plugin never subscribes to its own events.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

/// Event names emitted by the demo extensions.
pub mod names {
    pub const DEMO_ACTION_EXECUTED: &str = "demoActionExecuted";
    pub const DEMO_TRIGGER_CHECKED: &str = "demoTriggerChecked";
    pub const DEMO_EFFECT_APPLIED: &str = "demoEffectApplied";
    pub const DEMO_ENGINE_INIT: &str = "demoEngineInit";
    pub const DEMO_GAME_STATE_UPDATED: &str = "demoGameStateUpdated";
    pub const DEMO_PLAYER_ACTION: &str = "demoPlayerAction";
}

/// An emitted event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub name: String,
    pub payload: Value,
}

impl GameEvent {
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

/// Host-owned event bus.
///
/// Takes `&self`: the bus is shared (`Rc<dyn EventBus>`) between the
/// plugin, the engine, and the host UI, all on the host's single thread.
pub trait EventBus {
    fn emit(&self, name: &str, payload: Value);
}

/// Bus that drops every event. Used where the host provides none.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullEventBus;

impl EventBus for NullEventBus {
    fn emit(&self, name: &str, _payload: Value) {
        trace!(event = name, "event dropped: no bus attached");
    }
}

/// In-memory bus that keeps every event in emission order.
#[derive(Debug, Default)]
pub struct RecordingEventBus {
    events: RefCell<Vec<GameEvent>>,
}

impl RecordingEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events so far.
    #[must_use]
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    /// Number of events emitted under `name`.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.events.borrow().iter().filter(|e| e.name == name).count()
    }

    /// The most recent event emitted under `name`.
    #[must_use]
    pub fn last(&self, name: &str) -> Option<GameEvent> {
        self.events.borrow().iter().rev().find(|e| e.name == name).cloned()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl EventBus for RecordingEventBus {
    fn emit(&self, name: &str, payload: Value) {
        trace!(event = name, "event emitted");
        self.events.borrow_mut().push(GameEvent::new(name, payload));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recording_bus_keeps_order() {
        let bus = RecordingEventBus::new();
        bus.emit("a", json!(1));
        bus.emit("b", json!(2));
        bus.emit("a", json!(3));

        let names: Vec<_> = bus.events().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["a", "b", "a"]);
        assert_eq!(bus.count("a"), 2);
        assert_eq!(bus.last("a").unwrap().payload, json!(3));
    }

    #[test]
    fn test_clear() {
        let bus = RecordingEventBus::new();
        bus.emit("a", Value::Null);
        bus.clear();
        assert!(bus.events().is_empty());
    }
}
