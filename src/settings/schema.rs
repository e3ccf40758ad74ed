//! Settings schema definitions for the session tracer.
//!
//! All settings structs use `#[serde(default)]` to allow partial configuration files.
//! Missing fields are filled with sensible defaults.

use serde::{Deserialize, Serialize};

/// Root settings structure.
///
/// Loaded from `~/.session-tracer/settings.toml` with environment variable
/// interpolation support. Version field enables future migrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerSettings {
    /// Schema version for migrations
    pub version: u32,

    /// Jupyter server connection
    pub server: ServerSettings,

    /// Clipboard behavior
    pub clipboard: ClipboardSettings,

    /// Watch mode polling
    pub watch: WatchSettings,

    /// Advanced/debug settings
    pub advanced: AdvancedSettings,
}

/// Jupyter server connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerSettings {
    /// Server base URL, e.g. "http://localhost:8888/" (supports $ENV_VAR syntax)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// API token (supports $ENV_VAR syntax)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardSettings {
    /// Copy snapshots to the system clipboard
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchSettings {
    /// Seconds between server polls
    pub interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedSettings {
    /// Log level when --verbose is not given: "error" | "warn" | "info" | "debug" | "trace"
    pub log_level: String,
}

impl Default for TracerSettings {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSettings::default(),
            clipboard: ClipboardSettings::default(),
            watch: WatchSettings::default(),
            advanced: AdvancedSettings::default(),
        }
    }
}

impl Default for ClipboardSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self { interval_secs: 2 }
    }
}

impl Default for AdvancedSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = TracerSettings::default();
        assert_eq!(settings.version, 1);
        assert!(settings.server.base_url.is_none());
        assert!(settings.clipboard.enabled);
        assert_eq!(settings.watch.interval_secs, 2);
        assert_eq!(settings.advanced.log_level, "warn");
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml = r#"
            version = 1
            [server]
            base_url = "http://localhost:8888/"
        "#;

        let settings: TracerSettings = toml::from_str(toml).unwrap();
        assert_eq!(
            settings.server.base_url.as_deref(),
            Some("http://localhost:8888/")
        );
        // Defaults should fill in missing fields
        assert!(settings.clipboard.enabled);
        assert_eq!(settings.watch.interval_secs, 2);
    }

    #[test]
    fn test_serialize_settings() {
        let settings = TracerSettings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        assert!(toml_str.contains("version = 1"));
        assert!(toml_str.contains("[clipboard]"));
        assert!(!toml_str.contains("token"));
    }
}
