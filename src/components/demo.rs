//! Demo stand-ins for the presentation-side extension points.

use serde_json::Value;
use tracing::trace;

use crate::core::BaseGameState;
use crate::host::AnimationMetadata;

use super::{
    Animation, AnimationResult, EventProcessor, PieceManager, RenderablePiece, UiComponent,
    UiController,
};

/// Marks every event `processed: true`.
#[derive(Clone, Debug, Default)]
pub struct DemoEventProcessor {
    config: Value,
}

impl DemoEventProcessor {
    /// Factory key.
    pub const TYPE: &'static str = "demo-event-processor";

    pub fn new(config: Value) -> Self {
        Self { config }
    }

    pub fn create(config: Value) -> Box<dyn EventProcessor> {
        Box::new(Self::new(config))
    }

    pub fn config(&self) -> &Value {
        &self.config
    }
}

impl EventProcessor for DemoEventProcessor {
    fn process(&mut self, event: Value) -> Value {
        match event {
            Value::Object(mut map) => {
                map.insert("processed".to_string(), Value::Bool(true));
                Value::Object(map)
            }
            _ => serde_json::json!({ "processed": true }),
        }
    }
}

/// UI controller whose initialization does nothing.
#[derive(Clone, Debug, Default)]
pub struct DemoUiController {
    config: Value,
    initialized: bool,
}

impl DemoUiController {
    /// Factory key.
    pub const TYPE: &'static str = "demo-ui-controller";

    pub fn new(config: Value) -> Self {
        Self {
            config,
            initialized: false,
        }
    }

    pub fn create(config: Value) -> Box<dyn UiController> {
        Box::new(Self::new(config))
    }

    pub fn config(&self) -> &Value {
        &self.config
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl UiController for DemoUiController {
    fn init(&mut self) {
        trace!("demo ui controller initialized");
        self.initialized = true;
    }
}

/// UI component that counts how often it was rendered.
#[derive(Clone, Debug, Default)]
pub struct DemoUiComponent {
    config: Value,
    render_count: usize,
}

impl DemoUiComponent {
    /// Factory key.
    pub const TYPE: &'static str = "demo-ui";

    pub fn new(config: Value) -> Self {
        Self {
            config,
            render_count: 0,
        }
    }

    pub fn create(config: Value) -> Box<dyn UiComponent> {
        Box::new(Self::new(config))
    }

    pub fn config(&self) -> &Value {
        &self.config
    }

    #[must_use]
    pub fn render_count(&self) -> usize {
        self.render_count
    }
}

impl UiComponent for DemoUiComponent {
    fn init(&mut self) {
        self.render_count += 1;
    }
}

/// Animation that finishes immediately.
#[derive(Clone, Debug, Default)]
pub struct DemoAnimation {
    options: Value,
}

impl DemoAnimation {
    /// Factory key.
    pub const TYPE: &'static str = "demo-animation";

    pub fn new(options: Value) -> Self {
        Self { options }
    }

    pub fn create(options: Value) -> Box<dyn Animation> {
        Box::new(Self::new(options))
    }

    /// Picker metadata.
    #[must_use]
    pub fn metadata() -> AnimationMetadata {
        AnimationMetadata {
            display_name: "Demo Animation".to_string(),
            description: "Resolves immediately for testing".to_string(),
            category: "demo".to_string(),
            duration: "instant".to_string(),
        }
    }
}

impl Animation for DemoAnimation {
    fn animate(&mut self) -> AnimationResult {
        AnimationResult {
            complete: true,
            options: self.options.clone(),
        }
    }
}

/// Piece manager that draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct DemoPieceManager;

impl DemoPieceManager {
    /// Registry key.
    pub const TYPE: &'static str = "demo-piece-manager";

    pub fn create() -> Box<dyn PieceManager> {
        Box::new(Self)
    }
}

impl PieceManager for DemoPieceManager {
    fn build_renderable_pieces(&self, _state: &BaseGameState) -> Vec<RenderablePiece> {
        Vec::new()
    }
}
