//! Host event handler: routes network/plugin events to player actions.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::PlayerId;

/// A player action the host should run through its engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerActionRequest {
    pub player_id: PlayerId,
    pub action_type: String,
    pub action_data: Value,
}

/// Callback for a plugin-defined event.
///
/// Receives the event payload and returns the player action to dispatch,
/// if any.
pub type PluginEventCallback = Box<dyn Fn(&Value) -> Option<PlayerActionRequest>>;

/// Host event handler seam.
pub trait PluginEventHandler {
    /// Whether this handler accepts plugin-defined events at all.
    fn supports_plugin_events(&self) -> bool {
        true
    }

    /// Register a callback for a plugin-defined event name.
    fn register_plugin_event_handler(&mut self, event: &str, callback: PluginEventCallback);

    /// Run a player action.
    fn handle_player_action(&mut self, request: PlayerActionRequest);
}

/// Reference handler that records dispatched actions.
#[derive(Default)]
pub struct RecordingEventHandler {
    callbacks: FxHashMap<String, PluginEventCallback>,
    actions: Vec<PlayerActionRequest>,
}

impl RecordingEventHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a plugin event. Returns whether any callback handled it.
    pub fn dispatch(&mut self, event: &str, payload: &Value) -> bool {
        let Some(callback) = self.callbacks.get(event) else {
            debug!(event, "no plugin handler registered");
            return false;
        };
        if let Some(request) = callback(payload) {
            self.handle_player_action(request);
        }
        true
    }

    #[must_use]
    pub fn has_handler(&self, event: &str) -> bool {
        self.callbacks.contains_key(event)
    }

    /// Player actions handled so far, in order.
    #[must_use]
    pub fn actions(&self) -> &[PlayerActionRequest] {
        &self.actions
    }
}

impl PluginEventHandler for RecordingEventHandler {
    fn register_plugin_event_handler(&mut self, event: &str, callback: PluginEventCallback) {
        self.callbacks.insert(event.to_string(), callback);
    }

    fn handle_player_action(&mut self, request: PlayerActionRequest) {
        self.actions.push(request);
    }
}

/// Handler of a host built without plugin-event support.
#[derive(Debug, Default)]
pub struct LegacyEventHandler {
    pub actions: Vec<PlayerActionRequest>,
}

impl PluginEventHandler for LegacyEventHandler {
    fn supports_plugin_events(&self) -> bool {
        false
    }

    fn register_plugin_event_handler(&mut self, _event: &str, _callback: PluginEventCallback) {}

    fn handle_player_action(&mut self, request: PlayerActionRequest) {
        self.actions.push(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dispatch_runs_callback() {
        let mut handler = RecordingEventHandler::new();
        handler.register_plugin_event_handler(
            "echo",
            Box::new(|payload: &Value| {
                Some(PlayerActionRequest {
                    player_id: PlayerId::new(1),
                    action_type: "ECHO".to_string(),
                    action_data: payload.clone(),
                })
            }),
        );

        assert!(handler.dispatch("echo", &json!({"x": 1})));
        assert_eq!(handler.actions().len(), 1);
        assert_eq!(handler.actions()[0].action_data, json!({"x": 1}));
    }

    #[test]
    fn test_dispatch_unknown_event() {
        let mut handler = RecordingEventHandler::new();
        assert!(!handler.dispatch("missing", &Value::Null));
        assert!(handler.actions().is_empty());
    }
}
