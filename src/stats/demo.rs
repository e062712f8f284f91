//! `DemoStat`: a counter that remembers its last change.

use serde_json::{json, Value};

use crate::core::{ExtensionMetadata, PayloadField};

use super::{BaseStat, Stat};

/// Numeric counter that records `{oldValue, newValue}` of its last change
/// in `metadata.lastChange`.
#[derive(Clone, Debug, PartialEq)]
pub struct DemoStat {
    base: BaseStat,
}

impl DemoStat {
    /// Factory key.
    pub const TYPE: &'static str = "DemoStat";

    /// Id used when none is given.
    pub const DEFAULT_ID: &'static str = "demo-stat";

    pub fn new(id: impl Into<String>, initial: i64) -> Self {
        Self {
            base: BaseStat::new(id, Self::TYPE, initial),
        }
    }

    /// Stat factory constructor.
    pub fn create(id: &str, initial: i64) -> Box<dyn Stat> {
        let id = if id.is_empty() { Self::DEFAULT_ID } else { id };
        Box::new(Self::new(id, initial))
    }

    /// The recorded last change as `(old, new)`.
    #[must_use]
    pub fn last_change(&self) -> Option<(i64, i64)> {
        let change = self.base.metadata.get("lastChange")?;
        Some((change["oldValue"].as_i64()?, change["newValue"].as_i64()?))
    }

    /// Hand the stat data to the host.
    #[must_use]
    pub fn into_base(self) -> BaseStat {
        self.base
    }
}

impl Default for DemoStat {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ID, 0)
    }
}

impl Stat for DemoStat {
    fn base(&self) -> &BaseStat {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseStat {
        &mut self.base
    }

    fn on_change(&mut self, old_value: i64, new_value: i64) {
        self.base.metadata.insert(
            "lastChange".to_string(),
            json!({ "oldValue": old_value, "newValue": new_value }),
        );
    }

    fn describe() -> ExtensionMetadata {
        ExtensionMetadata::new(
            Self::TYPE,
            "Demo Stat",
            "Tracks a numeric counter for demonstration.",
            "demo",
        )
        .with_field("value", PayloadField::optional("number").with_default(Value::from(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_change_records_last_change() {
        let mut stat = DemoStat::default();
        stat.on_change(0, 42);

        assert_eq!(
            stat.base().metadata.get("lastChange"),
            Some(&json!({ "oldValue": 0, "newValue": 42 }))
        );
        assert_eq!(stat.last_change(), Some((0, 42)));
    }

    #[test]
    fn test_set_value_triggers_on_change() {
        let mut stat = DemoStat::new("score", 5);
        stat.set_value(8);
        stat.modify(-2);

        assert_eq!(stat.value(), 6);
        assert_eq!(stat.last_change(), Some((8, 6)));
    }

    #[test]
    fn test_modify_saturates() {
        let mut stat = DemoStat::new("score", i64::MAX - 1);
        stat.modify(10);
        assert_eq!(stat.value(), i64::MAX);
        assert_eq!(stat.last_change(), Some((i64::MAX - 1, i64::MAX)));

        stat.set_value(i64::MIN);
        stat.modify(-1);
        assert_eq!(stat.value(), i64::MIN);
    }

    #[test]
    fn test_unchanged_value_records_nothing() {
        let mut stat = DemoStat::default();
        stat.set_value(0);
        assert_eq!(stat.last_change(), None);
    }

    #[test]
    fn test_factory_defaults_id() {
        let stat = DemoStat::create("", 3);
        assert_eq!(stat.id(), DemoStat::DEFAULT_ID);
        assert_eq!(stat.value(), 3);
        assert_eq!(stat.base().kind, DemoStat::TYPE);
    }

    #[test]
    fn test_describe() {
        let metadata = DemoStat::describe();
        assert_eq!(metadata.kind, "DemoStat");
        assert_eq!(metadata.category, "demo");
    }
}
