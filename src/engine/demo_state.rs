//! `demo-state`: the base state plus a counter.

use std::any::Any;

use serde_json::Value;
use tracing::warn;

use crate::core::{BaseGameState, GameStateKind, HostResult};

/// Host base state with an extra `demoCounter`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DemoGameState {
    base: BaseGameState,
    demo_counter: u64,
}

impl DemoGameState {
    /// Factory key.
    pub const TYPE: &'static str = "demo-state";

    const COUNTER_FIELD: &'static str = "demoCounter";

    pub fn new(base: BaseGameState) -> Self {
        Self {
            base,
            demo_counter: 0,
        }
    }

    /// Set the starting counter (builder pattern).
    #[must_use]
    pub fn with_counter(mut self, counter: u64) -> Self {
        self.demo_counter = counter;
        self
    }

    /// Game state factory constructor.
    ///
    /// Reads the base state and `demoCounter` from the host's options.
    /// Missing fields take their defaults; options that do not decode at
    /// all start an empty game.
    pub fn create(options: &Value) -> Box<dyn GameStateKind> {
        let base = BaseGameState::from_json(options).unwrap_or_else(|err| {
            warn!(error = %err, "demo state options did not decode, starting empty");
            BaseGameState::default()
        });
        Box::new(Self::new(base).with_counter(Self::counter_from(options)))
    }

    #[must_use]
    pub fn demo_counter(&self) -> u64 {
        self.demo_counter
    }

    /// Bump the counter and the state version.
    pub fn increment_demo_counter(&mut self) {
        self.demo_counter += 1;
        self.base.increment_version();
    }

    /// Restore a state from its JSON shape. A missing `demoCounter` is 0.
    pub fn from_json(json: &Value) -> HostResult<Self> {
        let base = BaseGameState::from_json(json)?;
        Ok(Self::new(base).with_counter(Self::counter_from(json)))
    }

    fn counter_from(json: &Value) -> u64 {
        json.get(Self::COUNTER_FIELD)
            .and_then(Value::as_u64)
            .unwrap_or(0)
    }
}

impl GameStateKind for DemoGameState {
    fn state_type(&self) -> &'static str {
        Self::TYPE
    }

    fn base(&self) -> &BaseGameState {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseGameState {
        &mut self.base
    }

    fn delta_fields(&self) -> Vec<&'static str> {
        let mut fields = BaseGameState::DELTA_FIELDS.to_vec();
        fields.push(Self::COUNTER_FIELD);
        fields
    }

    fn to_json(&self) -> Value {
        let mut json = self.base.to_json();
        if let Value::Object(map) = &mut json {
            map.insert(Self::COUNTER_FIELD.to_string(), Value::from(self.demo_counter));
        }
        json
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
