//! Name-keyed registries owned by the host.
//!
//! The `Registry` stores entries keyed by string. Factories, placeholder
//! tables, and the player-state table are all registries; the plugin only
//! ever calls `register`, `unregister`, and `is_registered` on them.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::factory::PieceManagerCtor;

/// Registry of entries keyed by name.
///
/// ## Example
///
/// ```
/// use board_plugin_example::host::Registry;
///
/// let mut registry: Registry<u32> = Registry::new();
/// registry.register("answer", 42);
///
/// assert!(registry.is_registered("answer"));
/// assert_eq!(registry.get("answer"), Some(&42));
/// ```
pub struct Registry<T> {
    entries: FxHashMap<String, T>,
}

impl<T> Registry<T> {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Register an entry, replacing any previous entry under the same key.
    ///
    /// Returns the replaced entry.
    pub fn register(&mut self, key: impl Into<String>, entry: T) -> Option<T> {
        self.entries.insert(key.into(), entry)
    }

    /// Remove an entry.
    pub fn unregister(&mut self, key: &str) -> Option<T> {
        self.entries.remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn is_registered(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry").field("keys", &self.keys()).finish()
    }
}

/// Arguments passed to a placeholder template function.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaceholderArgs {
    /// Lower bound for numeric placeholders.
    pub min: i64,
    /// Upper bound for numeric placeholders.
    pub max: i64,
    /// Render context; `gameState` holds the serialized game state.
    pub context: Value,
}

impl PlaceholderArgs {
    /// Arguments with the host defaults (0..10) and the given context.
    pub fn with_context(context: Value) -> Self {
        Self {
            min: 0,
            max: 10,
            context,
        }
    }
}

/// Placeholder template function.
pub type PlaceholderFn = Box<dyn Fn(&PlaceholderArgs) -> String>;

/// Registry of placeholder template functions.
pub type PlaceholderRegistry = Registry<PlaceholderFn>;

impl Registry<PlaceholderFn> {
    /// Render a placeholder, or `None` if the key is unknown.
    #[must_use]
    pub fn resolve(&self, key: &str, args: &PlaceholderArgs) -> Option<String> {
        self.get(key).map(|render| render(args))
    }
}

/// Descriptor of a custom player status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStateInfo {
    pub display_name: String,
    pub description: String,
    pub category: String,
}

/// Registry of player statuses beyond the built-in ones.
pub type PlayerStateRegistry = Registry<PlayerStateInfo>;

/// Registry of piece manager constructors.
pub type PieceManagerRegistry = Registry<PieceManagerCtor>;

/// Host registry manager.
///
/// Each registry is optional: hosts built without a subsystem simply do
/// not provide its registry, and plugins must cope with its absence.
#[derive(Debug, Default)]
pub struct RegistryManager {
    placeholders: Option<PlaceholderRegistry>,
    player_states: Option<PlayerStateRegistry>,
    piece_managers: Option<PieceManagerRegistry>,
}

impl RegistryManager {
    /// A manager providing every registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            placeholders: Some(Registry::new()),
            player_states: Some(Registry::new()),
            piece_managers: Some(Registry::new()),
        }
    }

    /// A manager providing no registries.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Provide a placeholder registry (builder pattern).
    #[must_use]
    pub fn with_placeholder_registry(mut self) -> Self {
        self.placeholders.get_or_insert_with(Registry::new);
        self
    }

    /// Provide a player-state registry (builder pattern).
    #[must_use]
    pub fn with_player_state_registry(mut self) -> Self {
        self.player_states.get_or_insert_with(Registry::new);
        self
    }

    /// Provide a piece manager registry (builder pattern).
    #[must_use]
    pub fn with_piece_manager_registry(mut self) -> Self {
        self.piece_managers.get_or_insert_with(Registry::new);
        self
    }

    #[must_use]
    pub fn placeholder_registry(&self) -> Option<&PlaceholderRegistry> {
        self.placeholders.as_ref()
    }

    pub fn placeholder_registry_mut(&mut self) -> Option<&mut PlaceholderRegistry> {
        self.placeholders.as_mut()
    }

    #[must_use]
    pub fn player_state_registry(&self) -> Option<&PlayerStateRegistry> {
        self.player_states.as_ref()
    }

    pub fn player_state_registry_mut(&mut self) -> Option<&mut PlayerStateRegistry> {
        self.player_states.as_mut()
    }

    #[must_use]
    pub fn piece_manager_registry(&self) -> Option<&PieceManagerRegistry> {
        self.piece_managers.as_ref()
    }

    pub fn piece_manager_registry_mut(&mut self) -> Option<&mut PieceManagerRegistry> {
        self.piece_managers.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_replaces() {
        let mut registry: Registry<&str> = Registry::new();

        assert_eq!(registry.register("k", "a"), None);
        assert_eq!(registry.register("k", "b"), Some("a"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("k"), Some(&"b"));
    }

    #[test]
    fn test_unregister() {
        let mut registry: Registry<u8> = Registry::new();
        registry.register("k", 1);

        assert_eq!(registry.unregister("k"), Some(1));
        assert_eq!(registry.unregister("k"), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_keys_sorted() {
        let mut registry: Registry<u8> = Registry::new();
        registry.register("b", 0);
        registry.register("a", 0);
        registry.register("c", 0);

        assert_eq!(registry.keys(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_placeholder_resolve() {
        let mut registry = PlaceholderRegistry::new();
        registry.register("ECHO", Box::new(|args: &PlaceholderArgs| format!("{}..{}", args.min, args.max)));

        let args = PlaceholderArgs::with_context(json!({}));
        assert_eq!(registry.resolve("ECHO", &args).as_deref(), Some("0..10"));
        assert_eq!(registry.resolve("MISSING", &args), None);
    }

    #[test]
    fn test_manager_optional_registries() {
        let empty = RegistryManager::empty();
        assert!(empty.placeholder_registry().is_none());
        assert!(empty.player_state_registry().is_none());
        assert!(empty.piece_manager_registry().is_none());

        let partial = RegistryManager::empty().with_placeholder_registry();
        assert!(partial.placeholder_registry().is_some());
        assert!(partial.player_state_registry().is_none());

        let full = RegistryManager::new();
        assert!(full.piece_manager_registry().is_some());
    }
}
