//! The declarative board-map document.
//!
//! Serialized with the host's field names (`$schema`, `targetId`,
//! `minPlayers`, ...), so a document round-trips through the host's JSON
//! loader unchanged.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;

use crate::core::{HostError, HostResult};

/// A complete board-map document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardMap {
    /// Schema URI. Declared for tooling; nothing here enforces it.
    #[serde(rename = "$schema")]
    pub schema: String,
    pub version: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub metadata: MapMetadata,
    pub requirements: Requirements,
    pub engine: EngineSpec,
    pub ui: UiSpec,
    pub board: Board,
}

impl BoardMap {
    /// Parse a document from JSON text.
    pub fn from_json(json: &str) -> HostResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    #[must_use]
    pub fn spaces(&self) -> &[Space] {
        &self.board.topology.spaces
    }

    /// Look up a space by id.
    #[must_use]
    pub fn space(&self, id: &str) -> Option<&Space> {
        self.spaces().iter().find(|s| s.id == id)
    }

    /// `(space id, target id)` of every connection whose target is not a
    /// space of this document.
    #[must_use]
    pub fn unresolved_connections(&self) -> Vec<(String, String)> {
        let ids: FxHashSet<&str> = self.spaces().iter().map(|s| s.id.as_str()).collect();
        self.spaces()
            .iter()
            .flat_map(|space| {
                space
                    .connections
                    .iter()
                    .filter(|c| !ids.contains(c.target_id.as_str()))
                    .map(move |c| (space.id.clone(), c.target_id.clone()))
            })
            .collect()
    }

    /// Check space ids are unique and every connection resolves.
    pub fn validate(&self) -> HostResult<()> {
        let mut seen = FxHashSet::default();
        for space in self.spaces() {
            if !seen.insert(space.id.as_str()) {
                return Err(HostError::DuplicateSpace {
                    map_id: self.metadata.id.clone(),
                    space_id: space.id.clone(),
                });
            }
        }
        if let Some((space_id, target_id)) = self.unresolved_connections().into_iter().next() {
            return Err(HostError::UnresolvedConnection {
                map_id: self.metadata.id.clone(),
                space_id,
                target_id,
            });
        }
        Ok(())
    }
}

/// Descriptive metadata of a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapMetadata {
    pub id: String,
    pub name: String,
    pub author: String,
    pub description: String,
    /// Plugins bundled with the document.
    #[serde(default)]
    pub plugins: Vec<PluginRef>,
}

/// Where the host loads a plugin from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PluginSource {
    Builtin,
    Remote,
    PluginBundled,
}

/// A plugin a document bundles or requires.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRef {
    pub id: String,
    /// Semver range (`^1.0.0`).
    pub version: String,
    pub source: PluginSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PluginRef {
    pub fn new(id: impl Into<String>, version: impl Into<String>, source: PluginSource) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
            source,
            cdn: None,
            name: None,
            description: None,
        }
    }

    /// Set the CDN url (builder pattern).
    #[must_use]
    pub fn with_cdn(mut self, cdn: impl Into<String>) -> Self {
        self.cdn = Some(cdn.into());
        self
    }

    /// Set the display name (builder pattern).
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// What a host needs before it can load the document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    pub plugins: Vec<PluginRef>,
    pub min_players: u32,
    pub max_players: u32,
}

/// Engine the document runs on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineSpec {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub config: Value,
}

/// UI layout of the document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UiSpec {
    pub layout: String,
    #[serde(default)]
    pub components: Vec<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub topology: Topology,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    /// Spaces in document order.
    pub spaces: Vec<Space>,
}

/// Role of a space on the path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceKind {
    Start,
    Action,
    End,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceVisual {
    pub size: u32,
    pub color: String,
    pub text_color: String,
}

impl SpaceVisual {
    pub fn new(size: u32, color: impl Into<String>, text_color: impl Into<String>) -> Self {
        Self {
            size,
            color: color.into(),
            text_color: text_color.into(),
        }
    }
}

impl Default for SpaceVisual {
    fn default() -> Self {
        Self::new(60, "#ffffff", "#000000")
    }
}

/// A directed edge to another space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub target_id: String,
    /// Whether the host draws the edge.
    #[serde(default = "default_draw")]
    pub draw: bool,
}

fn default_draw() -> bool {
    true
}

/// A space on the board.
///
/// Spaces rarely have more than a couple of connections or triggers, so
/// both lists are inline `SmallVec`s.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SpaceKind,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub visual: SpaceVisual,
    /// Outgoing edges, in order.
    #[serde(default)]
    pub connections: SmallVec<[Connection; 2]>,
    /// Triggers checked for this space, in order.
    #[serde(default)]
    pub triggers: SmallVec<[SpaceTrigger; 3]>,
}

impl Space {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: SpaceKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            position: Position::default(),
            visual: SpaceVisual::default(),
            connections: SmallVec::new(),
            triggers: SmallVec::new(),
        }
    }

    /// Set the position (builder pattern).
    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position { x, y };
        self
    }

    /// Set the visual style (builder pattern).
    #[must_use]
    pub fn with_visual(mut self, visual: SpaceVisual) -> Self {
        self.visual = visual;
        self
    }

    /// Add a drawn connection (builder pattern).
    #[must_use]
    pub fn connect_to(mut self, target_id: impl Into<String>) -> Self {
        self.connections.push(Connection {
            target_id: target_id.into(),
            draw: true,
        });
        self
    }

    /// Add a trigger (builder pattern).
    #[must_use]
    pub fn with_trigger(mut self, trigger: SpaceTrigger) -> Self {
        self.triggers.push(trigger);
        self
    }
}

/// Ordering hint for triggers on the same space. The host does the ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Mid,
    High,
}

/// The condition half of a space trigger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriggerWhen {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

/// The action half of a space trigger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriggerAction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

/// Built-in trigger type that fires when a player lands on the space.
pub const ON_LAND: &str = "ON_LAND";

/// A `when` / `action` pair on a space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpaceTrigger {
    pub when: TriggerWhen,
    pub action: TriggerAction,
    pub priority: Priority,
}

impl SpaceTrigger {
    /// Run `action_type` with `payload` when a player lands on the space.
    pub fn on_land(action_type: impl Into<String>, payload: Value, priority: Priority) -> Self {
        Self::new(ON_LAND, None, action_type, payload, priority)
    }

    pub fn new(
        when_type: impl Into<String>,
        when_payload: Option<Value>,
        action_type: impl Into<String>,
        action_payload: Value,
        priority: Priority,
    ) -> Self {
        Self {
            when: TriggerWhen {
                kind: when_type.into(),
                payload: when_payload,
            },
            action: TriggerAction {
                kind: action_type.into(),
                payload: action_payload,
            },
            priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn space_json() -> Value {
        json!({
            "id": "a",
            "name": "A",
            "type": "start",
            "position": { "x": 1.0, "y": 2.0 },
            "visual": { "size": 60, "color": "#fff", "textColor": "#000" },
            "connections": [{ "targetId": "b", "draw": true }],
            "triggers": [{
                "when": { "type": "ON_LAND" },
                "action": { "type": "DEMO_ACTION", "payload": { "note": "hi" } },
                "priority": "MID"
            }]
        })
    }

    #[test]
    fn test_space_uses_host_field_names() {
        let space: Space = serde_json::from_value(space_json()).unwrap();

        assert_eq!(space.kind, SpaceKind::Start);
        assert_eq!(space.connections[0].target_id, "b");
        assert_eq!(space.triggers[0].priority, Priority::Mid);
        assert_eq!(space.triggers[0].when.payload, None);

        assert_eq!(serde_json::to_value(&space).unwrap(), space_json());
    }

    #[test]
    fn test_connection_draw_defaults_true() {
        let connection: Connection = serde_json::from_value(json!({ "targetId": "x" })).unwrap();
        assert!(connection.draw);
    }

    #[test]
    fn test_priority_order() {
        assert!(Priority::Low < Priority::Mid);
        assert!(Priority::Mid < Priority::High);
        assert_eq!(serde_json::to_value(Priority::High).unwrap(), "HIGH");
    }

    #[test]
    fn test_plugin_source_names() {
        assert_eq!(serde_json::to_value(PluginSource::PluginBundled).unwrap(), "plugin-bundled");
        assert_eq!(serde_json::to_value(PluginSource::Builtin).unwrap(), "builtin");
    }
}
