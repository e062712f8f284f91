//! The demo board: one space per demo extension, in a line.
//!
//! ```text
//! start → demo-action → demo-effect → demo-stat → demo-trigger → finish
//! ```

use serde_json::json;

use crate::actions::DemoAction;
use crate::core::{PluginConfig, PlayerStatus};
use crate::effects::DemoEffect;
use crate::engine::DemoGameEngine;
use crate::stats::DemoStat;
use crate::triggers::DemoTrigger;

use super::document::{
    Board, BoardMap, EngineSpec, MapMetadata, PluginRef, PluginSource, Priority, Requirements,
    Space, SpaceKind, SpaceTrigger, SpaceVisual, Topology, UiSpec,
};

/// Id of the demo board document.
pub const DEMO_BOARD_ID: &str = "demo-plugin-board";

const SCHEMA: &str = "https://boardgame.example.com/schemas/game-v3.json";
const PROMPT: &str = "PROMPT_CURRENT_PLAYER";

fn prompt(message: &str) -> SpaceTrigger {
    SpaceTrigger::on_land(PROMPT, json!({ "message": message }), Priority::Low)
}

fn visual(color: &str) -> SpaceVisual {
    SpaceVisual::new(60, color, "#000000")
}

/// Build the demo board for the configured plugin version.
#[must_use]
pub fn demo_board(config: &PluginConfig) -> BoardMap {
    let requirement = config.requirement();

    BoardMap {
        schema: SCHEMA.to_string(),
        version: config.version.to_string(),
        kind: "game".to_string(),
        metadata: MapMetadata {
            id: DEMO_BOARD_ID.to_string(),
            name: "Demo Plugin Board".to_string(),
            author: "Plugin Example".to_string(),
            description: "Showcase board that exercises every demo component in the example plugin"
                .to_string(),
            plugins: vec![PluginRef::new(
                config.plugin_id.clone(),
                requirement.clone(),
                PluginSource::PluginBundled,
            )],
        },
        requirements: Requirements {
            plugins: vec![
                PluginRef::new("core", "^1.0.0", PluginSource::Builtin)
                    .with_description("Core game functionality"),
                PluginRef::new(config.plugin_id.clone(), requirement, PluginSource::Remote)
                    .with_cdn(config.cdn_url())
                    .with_name("Example Everything Plugin")
                    .with_description("Registers dummy implementations for every extension point"),
            ],
            min_players: 1,
            max_players: 10,
        },
        engine: EngineSpec {
            kind: DemoGameEngine::TYPE.to_string(),
            config: json!({}),
        },
        ui: UiSpec {
            layout: "standard-board".to_string(),
            components: Vec::new(),
        },
        board: Board {
            topology: Topology {
                spaces: spaces(),
            },
        },
    }
}

fn spaces() -> Vec<Space> {
    vec![
        Space::new("start", "Start", SpaceKind::Start)
            .at(120.0, 200.0)
            .with_visual(visual("#ddeeff"))
            .connect_to("demo-action")
            .with_trigger(prompt(
                "Welcome to the demo board! Move along the path to see each component.",
            )),
        Space::new("demo-action", "Demo Action", SpaceKind::Action)
            .at(260.0, 200.0)
            .with_visual(visual("#e6f7ff"))
            .connect_to("demo-effect")
            .with_trigger(SpaceTrigger::on_land(
                DemoAction::TYPE,
                json!({ "note": "Demo action executed on landing." }),
                Priority::Mid,
            ))
            .with_trigger(prompt("Demo Action space: fired the demo action.")),
        Space::new("demo-effect", "Demo Effect", SpaceKind::Action)
            .at(400.0, 200.0)
            .with_visual(visual("#fff7e6"))
            .connect_to("demo-stat")
            .with_trigger(SpaceTrigger::on_land(
                "APPLY_EFFECT",
                json!({
                    "effect": {
                        "type": DemoEffect::TYPE,
                        "args": [
                            { "id": "demo-effect-1" },
                            { "duration": 1 },
                            { "toRemove": false }
                        ]
                    }
                }),
                Priority::Mid,
            ))
            .with_trigger(prompt("Demo Effect space: applied DemoEffect to your player.")),
        Space::new("demo-stat", "Demo Stat", SpaceKind::Action)
            .at(540.0, 200.0)
            .with_visual(visual("#f0e6ff"))
            .connect_to("demo-trigger")
            .with_trigger(SpaceTrigger::on_land(
                "SET_STAT",
                json!({ "statId": DemoStat::DEFAULT_ID, "value": 42, "mode": "both" }),
                Priority::Mid,
            ))
            .with_trigger(prompt(
                "Demo Stat space: set demo-stat to 42. Check Player Info > Activity.",
            )),
        Space::new("demo-trigger", "Demo Trigger", SpaceKind::Action)
            .at(680.0, 200.0)
            .with_visual(visual("#e6ffe6"))
            .connect_to("finish")
            .with_trigger(SpaceTrigger::new(
                DemoTrigger::TYPE,
                Some(json!({ "always": true, "spaceId": DemoTrigger::DEFAULT_SPACE_ID })),
                PROMPT,
                json!({
                    "message": "Demo trigger fired! Stat demo-stat was set earlier on this path. Check Player Info to see it."
                }),
                Priority::Mid,
            ))
            .with_trigger(prompt("Demo Trigger space: ran custom trigger and prompt.")),
        Space::new("finish", "Finish", SpaceKind::End)
            .at(820.0, 200.0)
            .with_visual(visual("#d9f7be"))
            .with_trigger(SpaceTrigger::on_land(
                "SET_PLAYER_STATE",
                json!({ "state": PlayerStatus::FINISHED }),
                Priority::Mid,
            ))
            .with_trigger(prompt("You reached the finish! Your state is now FINISHED."))
            .with_trigger(prompt("Finish space: game end state applied.")),
    ]
}
