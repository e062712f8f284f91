//! `DEMO_ACTION`: announces that it ran.

use serde_json::{json, Value};
use tracing::debug;

use crate::core::{ExtensionMetadata, PayloadField};
use crate::engine::GameEngine;
use crate::host::names;

use super::{Action, ActionOutcome, Validation};

/// Emits `demoActionExecuted` and always succeeds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DemoAction {
    payload: Value,
}

impl DemoAction {
    /// Factory key.
    pub const TYPE: &'static str = "DEMO_ACTION";

    pub fn new(payload: Value) -> Self {
        Self { payload }
    }

    /// Action factory constructor.
    pub fn create(payload: Value) -> Box<dyn Action> {
        Box::new(Self::new(payload))
    }

    /// The optional `note` carried in the payload.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.payload.get("note").and_then(Value::as_str)
    }
}

impl Action for DemoAction {
    fn action_type(&self) -> &str {
        Self::TYPE
    }

    fn payload(&self) -> &Value {
        &self.payload
    }

    fn execute(
        &self,
        engine: &mut dyn GameEngine,
        on_complete: Option<&mut dyn FnMut()>,
    ) -> ActionOutcome {
        debug!(note = self.note(), "demo action executed");
        engine.emit_event(
            names::DEMO_ACTION_EXECUTED,
            json!({
                "actionType": Self::TYPE,
                "payload": self.payload,
                "engineType": engine.engine_type(),
            }),
        );
        if let Some(callback) = on_complete {
            callback();
        }
        ActionOutcome::success("Demo action executed")
    }

    fn validate(&self) -> Validation {
        Validation::ok()
    }

    fn describe() -> ExtensionMetadata {
        ExtensionMetadata::new(
            Self::TYPE,
            "Demo Action",
            "Logs that the demo action ran.",
            "demo",
        )
        .with_field(
            "note",
            PayloadField::optional("string").with_description("Optional note to log"),
        )
    }
}
