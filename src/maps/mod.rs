//! Board-map documents.
//!
//! - [`BoardMap`] and its parts: the declarative document format
//! - [`demo_board`]: the document this plugin ships

mod document;
mod demo_board;

pub use document::{
    Board, BoardMap, Connection, EngineSpec, MapMetadata, PluginRef, PluginSource, Position,
    Priority, Requirements, Space, SpaceKind, SpaceTrigger, SpaceVisual, Topology, TriggerAction,
    TriggerWhen, UiSpec, ON_LAND,
};
pub use demo_board::{demo_board, DEMO_BOARD_ID};
