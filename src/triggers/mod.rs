//! Space triggers.
//!
//! Each space of a board map lists triggers as `when` / `action` pairs. The
//! host builds the `when` part from the trigger factory and asks it, for the
//! space being checked, whether the action should run.
//!
//! ## Key Components
//!
//! - [`Trigger`]: the condition trait
//! - [`TriggerContext`]: what a trigger sees while it is evaluated
//! - [`DemoTrigger`] / [`TriggerScope`]: the demonstration trigger and its
//!   two evaluation modes

mod demo;

pub use demo::{DemoTrigger, TriggerScope};

use serde_json::Value;

use crate::core::{BaseGameState, ExtensionMetadata};
use crate::host::EventBus;
use crate::maps::Space;

/// Everything a trigger may look at while it is evaluated.
#[derive(Clone, Copy)]
pub struct TriggerContext<'a> {
    pub game_state: &'a BaseGameState,
    /// The space whose triggers are being checked.
    pub space: &'a Space,
    pub event_bus: &'a dyn EventBus,
}

impl<'a> TriggerContext<'a> {
    pub fn new(game_state: &'a BaseGameState, space: &'a Space, event_bus: &'a dyn EventBus) -> Self {
        Self {
            game_state,
            space,
            event_bus,
        }
    }
}

/// A trigger type.
pub trait Trigger {
    /// Factory key (e.g. `DEMO_TRIGGER`).
    fn trigger_type(&self) -> &str;

    /// The `when.payload` the trigger was built with.
    fn payload(&self) -> &Value;

    /// Should the paired action run?
    fn is_triggered(&self, context: &TriggerContext<'_>) -> bool;

    /// Picker metadata for this trigger type.
    fn describe() -> ExtensionMetadata
    where
        Self: Sized;
}
