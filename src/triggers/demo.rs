//! `DEMO_TRIGGER`: a configurable trigger that fires on landing.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::core::{ExtensionMetadata, PayloadField};
use crate::host::names;

use super::{Trigger, TriggerContext};

/// How much of the board the trigger looks at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerScope {
    /// Fires only for its target space, when the current player has landed
    /// on it with no moves left.
    #[default]
    LandingScoped,
    /// Only `payload.always` decides.
    Unscoped,
}

/// Trigger whose outcome is `payload.always` (default `true`), optionally
/// restricted to a landing on `payload.spaceId`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DemoTrigger {
    payload: Value,
    scope: TriggerScope,
}

impl DemoTrigger {
    /// Factory key.
    pub const TYPE: &'static str = "DEMO_TRIGGER";

    /// Target space when the payload names none.
    pub const DEFAULT_SPACE_ID: &'static str = "demo-trigger";

    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            scope: TriggerScope::default(),
        }
    }

    /// Set the scope (builder pattern).
    #[must_use]
    pub fn with_scope(mut self, scope: TriggerScope) -> Self {
        self.scope = scope;
        self
    }

    /// Trigger factory constructor.
    pub fn create(payload: Value) -> Box<dyn Trigger> {
        Box::new(Self::new(payload))
    }

    #[must_use]
    pub fn scope(&self) -> TriggerScope {
        self.scope
    }

    /// `payload.always`, defaulting to `true`.
    #[must_use]
    pub fn always(&self) -> bool {
        match self.payload.get("always") {
            None | Some(Value::Null) => true,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    /// `payload.spaceId`, defaulting to `demo-trigger`.
    #[must_use]
    pub fn target_space_id(&self) -> &str {
        self.payload
            .get("spaceId")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .unwrap_or(Self::DEFAULT_SPACE_ID)
    }

    fn has_landed(&self, context: &TriggerContext<'_>) -> bool {
        if context.space.id != self.target_space_id() {
            return false;
        }
        let Some(player) = context.game_state.current_player() else {
            return false;
        };
        let on_space = player.current_space_id.as_deref() == Some(context.space.id.as_str());
        on_space && !context.game_state.has_moves_left()
    }
}

impl Trigger for DemoTrigger {
    fn trigger_type(&self) -> &str {
        Self::TYPE
    }

    fn payload(&self) -> &Value {
        &self.payload
    }

    fn is_triggered(&self, context: &TriggerContext<'_>) -> bool {
        let triggered = match self.scope {
            TriggerScope::LandingScoped => self.has_landed(context) && self.always(),
            TriggerScope::Unscoped => self.always(),
        };

        if triggered {
            debug!(space = %context.space.id, scope = ?self.scope, "demo trigger fired");
            context.event_bus.emit(
                names::DEMO_TRIGGER_CHECKED,
                json!({
                    "space": context.space,
                    "gameState": context.game_state.to_json(),
                }),
            );
        }
        triggered
    }

    fn describe() -> ExtensionMetadata {
        ExtensionMetadata::new(
            Self::TYPE,
            "Demo Trigger",
            "Always triggers (configurable).",
            "demo",
        )
        .with_field(
            "always",
            PayloadField::optional("boolean")
                .with_default(Value::Bool(true))
                .with_description("Return true by default"),
        )
        .with_field(
            "spaceId",
            PayloadField::optional("string")
                .with_default(Value::from(Self::DEFAULT_SPACE_ID))
                .with_description("Space the player must land on"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BaseGameState, Player, PlayerId};
    use crate::host::RecordingEventBus;
    use crate::maps::{Space, SpaceKind};

    fn state_on(space_id: &str, moves: u32) -> BaseGameState {
        let mut state = BaseGameState::new(vec![Player::new(PlayerId::new(0), "Ada").on_space(space_id)]);
        state.remaining_moves = moves;
        state
    }

    fn demo_space() -> Space {
        Space::new("demo-trigger", "Demo Trigger", SpaceKind::Action)
    }

    #[test]
    fn test_fires_on_landing() {
        let bus = RecordingEventBus::new();
        let state = state_on("demo-trigger", 0);
        let space = demo_space();
        let trigger = DemoTrigger::new(json!({}));

        assert!(trigger.is_triggered(&TriggerContext::new(&state, &space, &bus)));
        let event = bus.last(names::DEMO_TRIGGER_CHECKED).unwrap();
        assert_eq!(event.payload["space"]["id"], "demo-trigger");
    }

    #[test]
    fn test_passing_through_does_not_fire() {
        let bus = RecordingEventBus::new();
        let state = state_on("demo-trigger", 2);
        let space = demo_space();

        let trigger = DemoTrigger::new(json!({ "always": true }));
        assert!(!trigger.is_triggered(&TriggerContext::new(&state, &space, &bus)));
        assert_eq!(bus.count(names::DEMO_TRIGGER_CHECKED), 0);
    }

    #[test]
    fn test_other_space_does_not_fire() {
        let bus = RecordingEventBus::new();
        let state = state_on("finish", 0);
        let space = Space::new("finish", "Finish", SpaceKind::End);

        let trigger = DemoTrigger::new(json!({}));
        assert!(!trigger.is_triggered(&TriggerContext::new(&state, &space, &bus)));
    }

    #[test]
    fn test_custom_space_id() {
        let bus = RecordingEventBus::new();
        let state = state_on("finish", 0);
        let space = Space::new("finish", "Finish", SpaceKind::End);

        let trigger = DemoTrigger::new(json!({ "spaceId": "finish" }));
        assert!(trigger.is_triggered(&TriggerContext::new(&state, &space, &bus)));
    }

    #[test]
    fn test_unscoped_follows_always() {
        let bus = RecordingEventBus::new();
        let state = BaseGameState::default();
        let space = Space::new("anywhere", "Anywhere", SpaceKind::Action);

        let off = DemoTrigger::new(json!({ "always": false })).with_scope(TriggerScope::Unscoped);
        assert!(!off.is_triggered(&TriggerContext::new(&state, &space, &bus)));

        let on = DemoTrigger::new(Value::Null).with_scope(TriggerScope::Unscoped);
        assert!(on.is_triggered(&TriggerContext::new(&state, &space, &bus)));
        assert_eq!(bus.count(names::DEMO_TRIGGER_CHECKED), 1);
    }

    #[test]
    fn test_always_coercion() {
        assert!(DemoTrigger::new(json!({ "always": 1 })).always());
        assert!(!DemoTrigger::new(json!({ "always": 0 })).always());
        assert!(!DemoTrigger::new(json!({ "always": "" })).always());
        assert!(DemoTrigger::new(json!({ "always": null })).always());
    }
}
