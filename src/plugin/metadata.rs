//! Descriptor the host's plugin loader reads.

use serde::{Deserialize, Serialize};

use crate::actions::DemoAction;
use crate::components::{DemoAnimation, DemoEventProcessor, DemoPhaseMachine, DemoUiComponent, DemoUiController};
use crate::core::PluginConfig;
use crate::effects::DemoEffect;
use crate::engine::{DemoGameEngine, DemoGameState, DemoTurnManager};
use crate::stats::DemoStat;
use crate::triggers::DemoTrigger;

/// Extension keys a plugin contributes, by kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provides {
    pub actions: Vec<String>,
    pub triggers: Vec<String>,
    pub effects: Vec<String>,
    pub components: Vec<String>,
}

/// Plugin descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginMetadata {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
    pub tags: Vec<String>,
    /// Whether the host enables the plugin without being asked.
    pub is_default: bool,
    pub dependencies: Vec<String>,
    pub provides: Provides,
}

impl PluginMetadata {
    /// Descriptor of the example plugin for the given configuration.
    #[must_use]
    pub fn for_config(config: &PluginConfig) -> Self {
        Self {
            id: config.plugin_id.clone(),
            name: "Example Everything Plugin".to_string(),
            version: config.version.to_string(),
            description: "Registers dummy implementations for every extension point.".to_string(),
            author: "Example".to_string(),
            tags: strings(&["example", "demo", "plugin"]),
            is_default: false,
            dependencies: strings(&["core"]),
            provides: Provides {
                actions: strings(&[DemoAction::TYPE]),
                triggers: strings(&[DemoTrigger::TYPE]),
                effects: strings(&[DemoEffect::TYPE]),
                components: strings(&[
                    DemoGameEngine::TYPE,
                    DemoGameState::TYPE,
                    DemoPhaseMachine::TYPE,
                    DemoTurnManager::TYPE,
                    DemoEventProcessor::TYPE,
                    DemoUiController::TYPE,
                    DemoUiComponent::TYPE,
                    DemoAnimation::TYPE,
                    DemoStat::DEFAULT_ID,
                    "demo-map",
                ]),
            },
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
