//! Player stats.
//!
//! A stat is a named numeric counter attached to a player. The host stores
//! the data (`BaseStat`); stat types implement [`Stat`] to react when the
//! value changes.

mod demo;

pub use demo::DemoStat;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::ExtensionMetadata;

/// Stat data as the host stores and syncs it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaseStat {
    pub id: String,

    /// Factory key of the stat type that created this stat.
    #[serde(rename = "type")]
    pub kind: String,

    pub value: i64,

    /// Free-form data stat types keep alongside the value.
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl BaseStat {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, value: i64) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            value,
            metadata: Map::new(),
        }
    }
}

/// A stat type.
pub trait Stat {
    fn base(&self) -> &BaseStat;

    fn base_mut(&mut self) -> &mut BaseStat;

    fn id(&self) -> &str {
        &self.base().id
    }

    fn value(&self) -> i64 {
        self.base().value
    }

    /// Set the value, calling `on_change` if it differs from the current one.
    fn set_value(&mut self, value: i64) {
        let old = self.base().value;
        if old == value {
            return;
        }
        self.base_mut().value = value;
        self.on_change(old, value);
    }

    /// Add `delta` to the value, saturating at the `i64` bounds.
    fn modify(&mut self, delta: i64) {
        let value = self.value().saturating_add(delta);
        self.set_value(value);
    }

    /// Hook run after the value changed.
    fn on_change(&mut self, _old_value: i64, _new_value: i64) {}

    /// Picker metadata for this stat type.
    fn describe() -> ExtensionMetadata
    where
        Self: Sized;
}
