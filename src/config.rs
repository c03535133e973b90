//! Application configuration.
//!
//! The configuration is loaded from `$XDG_CONFIG_HOME/wsorder/config.json`.
//! Every section and field is optional; a missing file means defaults.
//!
//! # Example
//!
//! ```json
//! {
//!   "workspace": {
//!     "new_name": "new-desktop",
//!     "settle_delay_ms": 100
//!   },
//!   "backend": {
//!     "wmctrl": "wmctrl",
//!     "gsettings": "gsettings",
//!     "names_schema": "org.mate.Marco.workspace-names",
//!     "zenity": "zenity"
//!   }
//! }
//! ```

use crate::engine::DEFAULT_NEW_NAME;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Engine and driver behaviour.
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    /// Programs used to talk to the desktop.
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Name given to freshly inserted workspaces.
    pub new_name: String,
    /// Pause after every mutating command so the next invocation reads
    /// settled state (ms).  `0` disables the pause.
    pub settle_delay_ms: u64,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            new_name: DEFAULT_NEW_NAME.to_string(),
            settle_delay_ms: 100,
        }
    }
}

impl WorkspaceConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// Program names (or paths) and the GSettings schema holding workspace
/// names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub wmctrl: String,
    pub gsettings: String,
    /// Schema with 1-based `name-<n>` keys.
    pub names_schema: String,
    pub zenity: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            wmctrl: "wmctrl".into(),
            gsettings: "gsettings".into(),
            names_schema: "org.mate.Marco.workspace-names".into(),
            zenity: "zenity".into(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_config() {
        let json = r#"{
            "workspace": { "new_name": "scratch", "settle_delay_ms": 250 },
            "backend": {
                "wmctrl": "/usr/local/bin/wmctrl",
                "gsettings": "gsettings",
                "names_schema": "org.gnome.desktop.wm.preferences",
                "zenity": "yad"
            }
        }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.workspace.new_name, "scratch");
        assert_eq!(cfg.workspace.settle_delay(), Duration::from_millis(250));
        assert_eq!(cfg.backend.wmctrl, "/usr/local/bin/wmctrl");
        assert_eq!(cfg.backend.names_schema, "org.gnome.desktop.wm.preferences");
        assert_eq!(cfg.backend.zenity, "yad");
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.workspace.new_name, "new-desktop");
        assert_eq!(cfg.workspace.settle_delay_ms, 100);
        let bd = BackendConfig::default();
        assert_eq!(cfg.backend.wmctrl, bd.wmctrl);
        assert_eq!(cfg.backend.names_schema, bd.names_schema);
    }

    #[test]
    fn deserialize_partial_sections() {
        let json = r#"{ "workspace": { "settle_delay_ms": 0 }, "backend": { "zenity": "qarma" } }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert!(cfg.workspace.settle_delay().is_zero());
        assert_eq!(cfg.workspace.new_name, "new-desktop");
        assert_eq!(cfg.backend.zenity, "qarma");
        assert_eq!(cfg.backend.gsettings, "gsettings");
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        let json = r#"{ "workspace": {}, "future_section": { "key": 42 } }"#;
        let _cfg: Config = serde_json::from_str(json).unwrap();
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Config::load(Path::new("/nonexistent/wsorder/config.json")).unwrap_err();
        assert!(err.to_string().starts_with("config error: failed to read"));
    }
}
