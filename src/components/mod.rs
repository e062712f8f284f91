//! Presentation-side extension points.
//!
//! - [`EventProcessor`]: rewrites events before the host fans them out
//! - [`UiController`] / [`UiComponent`]: UI wiring and mounted widgets
//! - [`Animation`]: move and effect animations
//! - [`PieceManager`]: turns game state into pieces to draw
//!
//! plus the phase-machine constructor the plugin registers.

mod demo;
mod phase_machine;

pub use demo::{DemoAnimation, DemoEventProcessor, DemoPieceManager, DemoUiComponent, DemoUiController};
pub use phase_machine::DemoPhaseMachine;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{BaseGameState, PlayerId};

/// Rewrites events on their way through the host.
pub trait EventProcessor {
    fn process(&mut self, event: Value) -> Value;
}

/// Wires the host UI together for a game.
pub trait UiController {
    fn init(&mut self);
}

/// A UI widget the host mounts.
pub trait UiComponent {
    fn init(&mut self);
}

/// Result of running an animation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationResult {
    pub complete: bool,
    /// Options the animation ran with.
    pub options: Value,
}

/// An animation the host plays.
pub trait Animation {
    fn animate(&mut self) -> AnimationResult;
}

/// A piece to draw on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderablePiece {
    pub player_id: PlayerId,
    pub space_id: String,
    /// Position among the pieces sharing the space.
    pub stack_index: usize,
}

/// Builds the pieces the board renders.
pub trait PieceManager {
    /// One piece per placed player, stacked in seat order per space.
    fn build_renderable_pieces(&self, state: &BaseGameState) -> Vec<RenderablePiece> {
        let mut pieces: Vec<RenderablePiece> = Vec::new();
        for player in state.players.iter() {
            let Some(space_id) = &player.current_space_id else {
                continue;
            };
            let stack_index = pieces.iter().filter(|p| &p.space_id == space_id).count();
            pieces.push(RenderablePiece {
                player_id: player.id,
                space_id: space_id.clone(),
                stack_index,
            });
        }
        pieces
    }
}

/// The host's stock piece manager.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardPieceManager;

impl PieceManager for StandardPieceManager {}
