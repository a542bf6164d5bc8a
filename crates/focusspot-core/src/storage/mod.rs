mod config;
pub mod database;
pub mod migrations;

pub use config::{Config, StatsConfig, StorageConfig, TrendsConfig};
pub use database::SessionStore;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/focusspot[-dev]/` based on FOCUSSPOT_ENV.
///
/// Set FOCUSSPOT_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOCUSSPOT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("focusspot-dev")
    } else {
        base_dir.join("focusspot")
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
