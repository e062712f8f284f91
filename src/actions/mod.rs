//! Space actions.
//!
//! Board maps attach actions to space triggers (`"action": {"type": ...}`).
//! When a trigger fires the host builds the action from the action factory
//! and executes it against the running engine.

mod demo;

pub use demo::DemoAction;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::ExtensionMetadata;
use crate::engine::GameEngine;

/// Result of executing an action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub success: bool,
    pub message: String,
}

impl ActionOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Result of validating an action's payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl Validation {
    /// A passing validation.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }
}

/// An action type.
pub trait Action {
    /// Factory key (e.g. `DEMO_ACTION`).
    fn action_type(&self) -> &str;

    /// Payload the action was built with.
    fn payload(&self) -> &Value;

    /// Run the action.
    ///
    /// `on_complete` is the host's post-execution callback; actions call it
    /// once their work is done.
    fn execute(&self, engine: &mut dyn GameEngine, on_complete: Option<&mut dyn FnMut()>)
        -> ActionOutcome;

    /// Check the payload before the action is placed on a map.
    fn validate(&self) -> Validation {
        Validation::ok()
    }

    /// Picker metadata for this action type.
    fn describe() -> ExtensionMetadata
    where
        Self: Sized;
}
