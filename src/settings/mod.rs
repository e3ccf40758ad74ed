//! TOML-based settings for the session tracer.
//!
//! Settings are loaded from `~/.session-tracer/settings.toml` with environment
//! variable interpolation support. Values missing from the file fall back to
//! environment variables through the `get_with_env_fallback` helper.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::settings::{SettingsManager, get_with_env_fallback};
//!
//! let manager = SettingsManager::new().await?;
//! let settings = manager.get().await;
//!
//! let token = get_with_env_fallback(&settings.server.token, &["JUPYTER_TOKEN"], None);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{get_with_env_fallback, settings_path, SettingsManager};
pub use schema::TracerSettings;
