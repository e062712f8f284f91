//! Descriptors the host shows in its extension pickers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One field of an extension's payload schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadField {
    /// JSON type name (`string`, `number`, `boolean`).
    #[serde(rename = "type")]
    pub kind: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PayloadField {
    /// Create an optional field of the given JSON type.
    pub fn optional(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            required: false,
            default: None,
            description: None,
        }
    }

    /// Set the default value (builder pattern).
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Static metadata of an action, trigger, effect, or stat type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionMetadata {
    /// Factory key.
    #[serde(rename = "type")]
    pub kind: String,
    pub display_name: String,
    pub description: String,
    pub category: String,
    /// Payload fields by name, in stable order.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub payload_schema: BTreeMap<String, PayloadField>,
}

impl ExtensionMetadata {
    pub fn new(
        kind: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            display_name: display_name.into(),
            description: description.into(),
            category: category.into(),
            payload_schema: BTreeMap::new(),
        }
    }

    /// Add a payload field (builder pattern).
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, field: PayloadField) -> Self {
        self.payload_schema.insert(name.into(), field);
        self
    }
}
