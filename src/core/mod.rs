//! Core types: players, game state, configuration, errors, RNG.
//!
//! These are shared by the host seams and by every demo extension.

pub mod player;
pub mod state;
pub mod config;
pub mod error;
pub mod metadata;
pub mod rng;

pub use player::{Player, PlayerId, PlayerStatus};
pub use state::{BaseGameState, GameStateKind};
pub use config::{PluginConfig, PLUGIN_ID};
pub use error::{HostError, HostResult};
pub use metadata::{ExtensionMetadata, PayloadField};
pub use rng::DiceRng;
