//! Plugin configuration.
//!
//! Everything the registrar needs to know about its own build, handed to
//! it at construction:
//! - `version`: the plugin's own semver version
//! - `cdn_repository` / `bundle_path`: where the built bundle is hosted
//! - `dice_seed` / `dice_sides`: the reference engine's die
//!
//! ```
//! use board_plugin_example::core::PluginConfig;
//!
//! let config = PluginConfig::default();
//! assert_eq!(config.requirement(), format!("^{}", config.version));
//! ```

use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};

use super::error::HostResult;

/// Plugin id the host loader keys this plugin by.
pub const PLUGIN_ID: &str = "example-everything-plugin";

/// Plugin configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginConfig {
    /// Id the host loader keys this plugin by.
    pub plugin_id: String,

    /// Plugin version, published in metadata and in map requirements.
    pub version: Version,

    /// `owner/repo` hosting the built bundle on the CDN.
    pub cdn_repository: String,

    /// Path of the bundle inside the repository.
    pub bundle_path: String,

    /// Seed for the reference engine's die.
    pub dice_seed: u64,

    /// Faces on the reference engine's die.
    pub dice_sides: u32,
}

impl PluginConfig {
    /// Create a configuration for the given plugin version.
    pub fn new(version: Version) -> Self {
        Self {
            plugin_id: PLUGIN_ID.to_string(),
            version,
            cdn_repository: "customjack/board_game_plugin_example".to_string(),
            bundle_path: "dist/plugins/example-plugin.js".to_string(),
            dice_seed: 0,
            dice_sides: 6,
        }
    }

    /// Load a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> HostResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the CDN repository (builder pattern).
    #[must_use]
    pub fn with_cdn_repository(mut self, repository: impl Into<String>) -> Self {
        self.cdn_repository = repository.into();
        self
    }

    /// Set the die seed (builder pattern).
    #[must_use]
    pub fn with_dice_seed(mut self, seed: u64) -> Self {
        self.dice_seed = seed;
        self
    }

    /// Set the die size (builder pattern).
    #[must_use]
    pub fn with_dice_sides(mut self, sides: u32) -> Self {
        self.dice_sides = sides;
        self
    }

    /// CDN url of the built bundle for this version.
    #[must_use]
    pub fn cdn_url(&self) -> String {
        format!(
            "https://cdn.jsdelivr.net/gh/{}@v{}/{}",
            self.cdn_repository, self.version, self.bundle_path
        )
    }

    /// Caret range other documents use to require this version.
    #[must_use]
    pub fn requirement(&self) -> String {
        format!("^{}", self.version)
    }

    /// `requirement()` parsed as a semver range.
    pub fn version_req(&self) -> HostResult<VersionReq> {
        Ok(VersionReq::parse(&self.requirement())?)
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self::new(Version::new(1, 1, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PluginConfig::default();

        assert_eq!(config.plugin_id, PLUGIN_ID);
        assert_eq!(config.version, Version::new(1, 1, 0));
        assert_eq!(config.dice_sides, 6);
    }

    #[test]
    fn test_cdn_url() {
        let config = PluginConfig::new(Version::new(2, 0, 1));
        assert_eq!(
            config.cdn_url(),
            "https://cdn.jsdelivr.net/gh/customjack/board_game_plugin_example@v2.0.1/dist/plugins/example-plugin.js"
        );
    }

    #[test]
    fn test_requirement_matches_own_version() {
        let config = PluginConfig::new(Version::new(1, 4, 2));
        let req = config.version_req().unwrap();

        assert_eq!(config.requirement(), "^1.4.2");
        assert!(req.matches(&Version::new(1, 4, 2)));
        assert!(req.matches(&Version::new(1, 9, 0)));
        assert!(!req.matches(&Version::new(2, 0, 0)));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = PluginConfig::from_json(r#"{"version": "3.2.1", "diceSeed": 9}"#).unwrap();

        assert_eq!(config.version, Version::new(3, 2, 1));
        assert_eq!(config.dice_seed, 9);
        assert_eq!(config.plugin_id, PLUGIN_ID);
        assert_eq!(config.bundle_path, "dist/plugins/example-plugin.js");
    }

    #[test]
    fn test_from_json_rejects_bad_version() {
        assert!(PluginConfig::from_json(r#"{"version": "not-a-version"}"#).is_err());
    }
}
