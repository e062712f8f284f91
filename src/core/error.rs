//! Error types for host operations.

use thiserror::Error;

/// Errors raised by host collaborators (map storage, phase machine, state
/// codecs, configuration).
///
/// The plugin itself never propagates these in steady state: it logs them
/// and carries on.
#[derive(Debug, Error)]
pub enum HostError {
    /// A serialized game state or configuration could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A board map connects a space to an id that does not exist in the map.
    #[error("map {map_id}: space {space_id} connects to unknown space {target_id}")]
    UnresolvedConnection {
        map_id: String,
        space_id: String,
        target_id: String,
    },

    /// Two spaces in one board map share an id.
    #[error("map {map_id}: duplicate space id {space_id}")]
    DuplicateSpace { map_id: String, space_id: String },

    /// A map with this id is already stored by another provider.
    #[error("map {map_id} is already registered by {owner}")]
    MapOwnedElsewhere { map_id: String, owner: String },

    /// The phase is not part of the state machine's configured phase set.
    #[error("phase {0} is not configured for this state machine")]
    UnknownPhase(String),

    /// A plugin version or version range failed to parse.
    #[error("invalid version: {0}")]
    Version(#[from] semver::Error),
}

/// Result alias for host operations.
pub type HostResult<T> = Result<T, HostError>;
