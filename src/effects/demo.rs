//! `DemoEffect`: a one-shot effect.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::core::{ExtensionMetadata, PayloadField};
use crate::engine::GameEngine;
use crate::host::names;

use super::{merge_args, Effect, PlayerEffect};

/// Whether applying the effect also attaches it to the current player.
///
/// Hosts differ on whether applied effects show on the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectMode {
    /// Attach to the current player so it shows in the player's UI.
    #[default]
    Attached,
    /// Only enact; the player's effect list is left alone.
    Detached,
}

/// Emits `demoEffectApplied` and marks itself for removal after one use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoEffect {
    base: PlayerEffect,
    mode: EffectMode,
}

impl DemoEffect {
    /// Factory key.
    pub const TYPE: &'static str = "DemoEffect";

    /// Id used when none is given.
    pub const DEFAULT_ID: &'static str = "demo-effect";

    pub fn new(id: impl Into<String>, duration: u32) -> Self {
        Self {
            base: PlayerEffect::new(id, Self::TYPE, duration),
            mode: EffectMode::default(),
        }
    }

    /// Set the attach mode (builder pattern).
    #[must_use]
    pub fn with_mode(mut self, mode: EffectMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn mode(&self) -> EffectMode {
        self.mode
    }

    /// Effect factory constructor. Reads `id` and `duration` from the map
    /// arguments; a `toRemove` argument is ignored, new effects start live.
    pub fn create(args: &Value) -> Box<dyn Effect> {
        let args = merge_args(args);
        let id = args
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or(Self::DEFAULT_ID);
        let duration = args
            .get("duration")
            .and_then(Value::as_u64)
            .and_then(|d| u32::try_from(d).ok())
            .unwrap_or(1);
        Box::new(Self::new(id, duration))
    }

    fn attach_to_current_player(&self, engine: &mut dyn GameEngine) {
        let Some(id) = engine.current_player_id() else {
            return;
        };
        let Some(player) = engine.game_state_mut().base_mut().player_mut(id) else {
            return;
        };
        if player.effect(&self.base.id).is_none() {
            player.add_effect(self.base.clone());
        }
    }

    fn mark_attached_copy(&self, engine: &mut dyn GameEngine) {
        let Some(id) = engine.current_player_id() else {
            return;
        };
        if let Some(attached) = engine
            .game_state_mut()
            .base_mut()
            .player_mut(id)
            .and_then(|player| player.effect_mut(&self.base.id))
        {
            attached.mark_for_removal();
        }
    }
}

impl Default for DemoEffect {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ID, 1)
    }
}

impl Effect for DemoEffect {
    fn base(&self) -> &PlayerEffect {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PlayerEffect {
        &mut self.base
    }

    fn apply(&mut self, engine: &mut dyn GameEngine) {
        if self.mode == EffectMode::Attached {
            self.attach_to_current_player(engine);
        }
        self.enact(engine);

        self.base.mark_for_removal();
        if self.mode == EffectMode::Attached {
            self.mark_attached_copy(engine);
        }
    }

    fn enact(&mut self, engine: &mut dyn GameEngine) {
        engine.emit_event(names::DEMO_EFFECT_APPLIED, json!({ "effectId": self.base.id }));
    }

    fn describe() -> ExtensionMetadata {
        ExtensionMetadata::new(
            Self::TYPE,
            "Demo Effect",
            "Marks itself for removal after firing once.",
            "demo",
        )
        .with_field("id", PayloadField::optional("string").with_description("Effect id"))
        .with_field("duration", PayloadField::optional("number").with_default(Value::from(1)))
    }
}
