//! Player effects.
//!
//! An effect is something applied to a player for a number of turns. The
//! host keeps the data (`PlayerEffect`) on the player and drops effects
//! marked for removal; effect types implement [`Effect`] to decide what
//! applying them does.

mod demo;

pub use demo::{DemoEffect, EffectMode};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::ExtensionMetadata;
use crate::engine::GameEngine;

/// Effect data as the host stores it on a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerEffect {
    pub id: String,

    /// Factory key of the effect type.
    #[serde(rename = "type")]
    pub kind: String,

    /// Turns the effect stays active.
    pub duration: u32,

    /// Set once the effect is spent; the host removes it at its next sweep.
    pub to_remove: bool,
}

impl PlayerEffect {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, duration: u32) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            duration,
            to_remove: false,
        }
    }

    pub fn mark_for_removal(&mut self) {
        self.to_remove = true;
    }

    #[must_use]
    pub fn should_remove(&self) -> bool {
        self.to_remove
    }

    /// Count down one turn; marks the effect for removal when it runs out.
    pub fn tick(&mut self) {
        self.duration = self.duration.saturating_sub(1);
        if self.duration == 0 {
            self.mark_for_removal();
        }
    }
}

/// An effect type.
pub trait Effect {
    fn base(&self) -> &PlayerEffect;

    fn base_mut(&mut self) -> &mut PlayerEffect;

    fn id(&self) -> &str {
        &self.base().id
    }

    /// Apply the effect through the engine (attach, enact, bookkeeping).
    fn apply(&mut self, engine: &mut dyn GameEngine);

    /// The effect's own behaviour, without any bookkeeping.
    fn enact(&mut self, engine: &mut dyn GameEngine);

    fn should_remove(&self) -> bool {
        self.base().should_remove()
    }

    /// Picker metadata for this effect type.
    fn describe() -> ExtensionMetadata
    where
        Self: Sized;
}

/// Flatten effect constructor arguments into one object.
///
/// Maps write arguments either as one object or as a list of
/// single-field objects (`[{"id": "x"}, {"duration": 1}]`).
#[must_use]
pub fn merge_args(args: &Value) -> Map<String, Value> {
    match args {
        Value::Object(map) => map.clone(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_object)
            .flat_map(|map| map.iter().map(|(k, v)| (k.clone(), v.clone())))
            .collect(),
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tick_expires() {
        let mut effect = PlayerEffect::new("e", "DemoEffect", 2);

        effect.tick();
        assert!(!effect.should_remove());
        effect.tick();
        assert!(effect.should_remove());
    }

    #[test]
    fn test_merge_args_list_and_object() {
        let list = merge_args(&json!([{ "id": "x" }, { "duration": 3 }, "ignored"]));
        assert_eq!(list.get("id"), Some(&json!("x")));
        assert_eq!(list.get("duration"), Some(&json!(3)));

        let object = merge_args(&json!({ "id": "y" }));
        assert_eq!(object.get("id"), Some(&json!("y")));

        assert!(merge_args(&Value::Null).is_empty());
    }
}
