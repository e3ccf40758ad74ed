//! Settings loading and environment variable interpolation.
//!
//! The `SettingsManager` handles:
//! - Loading settings from `~/.session-tracer/settings.toml`
//! - Resolving `$VAR` and `${VAR}` environment variable references
//! - First-run template generation

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::sync::RwLock;

use super::schema::TracerSettings;

/// Embedded template for first-run generation.
const TEMPLATE: &str = include_str!("template.toml");

/// Get the path to the global settings file.
pub fn settings_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".session-tracer")
        .join("settings.toml")
}

/// Manages settings loading and interpolation.
pub struct SettingsManager {
    /// Cached settings (with env vars resolved)
    settings: RwLock<TracerSettings>,

    /// Path to the settings file
    path: PathBuf,
}

impl SettingsManager {
    /// Create a new SettingsManager, loading from the global path if available.
    pub async fn new() -> Result<Self> {
        Self::with_path(settings_path()).await
    }

    /// Create a SettingsManager backed by a specific file.
    pub async fn with_path(path: PathBuf) -> Result<Self> {
        let settings = Self::load_from_path(&path).await?;

        Ok(Self {
            settings: RwLock::new(settings),
            path,
        })
    }

    /// Load settings from a specific path.
    async fn load_from_path(path: &Path) -> Result<TracerSettings> {
        if !path.exists() {
            tracing::debug!("Settings file not found at {:?}, using defaults", path);
            return Ok(TracerSettings::default());
        }

        let contents = tokio::fs::read_to_string(path)
            .await
            .context("Failed to read settings file")?;

        // Parse into typed struct
        let mut settings: TracerSettings =
            toml::from_str(&contents).context("Failed to deserialize settings")?;

        // Resolve environment variable references
        Self::resolve_env_vars(&mut settings);

        tracing::info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Resolve $ENV_VAR references in string fields.
    fn resolve_env_vars(settings: &mut TracerSettings) {
        fn resolve_opt(value: &mut Option<String>) {
            if let Some(v) = value {
                if let Some(resolved) = resolve_env_ref(v) {
                    *v = resolved;
                }
            }
        }

        resolve_opt(&mut settings.server.base_url);
        resolve_opt(&mut settings.server.token);
    }

    /// Get the current settings (read-only).
    pub async fn get(&self) -> TracerSettings {
        self.settings.read().await.clone()
    }

    /// Get the settings file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Ensure settings file exists, creating from template if needed.
    ///
    /// Returns `true` if a new file was created.
    pub async fn ensure_settings_file(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false); // Already exists
        }

        // Create parent directory
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write template
        tokio::fs::write(&self.path, TEMPLATE).await?;
        tracing::info!("Generated settings template at {:?}", self.path);
        Ok(true) // Created new file
    }
}

/// Resolve a $ENV_VAR or ${ENV_VAR} reference.
///
/// Returns `Some(resolved)` if the value starts with `$` and the env var exists.
/// Returns `None` if no env var reference or env var not set.
fn resolve_env_ref(value: &str) -> Option<String> {
    let trimmed = value.trim();

    if let Some(rest) = trimmed.strip_prefix('$') {
        let var_name = rest
            .strip_prefix('{')
            .and_then(|inner| inner.strip_suffix('}'))
            .unwrap_or(rest);

        return std::env::var(var_name).ok();
    }

    None
}

/// Get a setting value with environment variable fallback.
///
/// Priority order:
/// 1. Settings value (if set and non-empty)
/// 2. Environment variable (first match from list)
/// 3. Default value
pub fn get_with_env_fallback(
    setting: &Option<String>,
    env_vars: &[&str],
    default: Option<String>,
) -> Option<String> {
    // 1. Check settings value
    if let Some(v) = setting {
        if !v.is_empty() {
            return Some(v.clone());
        }
    }

    // 2. Check environment variables
    for env_var in env_vars {
        if let Ok(v) = std::env::var(env_var) {
            if !v.is_empty() {
                return Some(v);
            }
        }
    }

    // 3. Return default
    default
}
