mod config;

pub use config::{SourceConfig, SyncConfig, SyncSettings, TrackerConfig, ViewSelector};

use crate::error::ConfigError;
use std::path::PathBuf;

/// Returns `~/.config/triage-sync[-dev]/` based on TRIAGE_SYNC_ENV.
///
/// Set TRIAGE_SYNC_ENV=dev to use the development config directory. The
/// directory is not created here.
///
/// # Errors
/// Returns an error if no configuration directory can be determined.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .ok_or(ConfigError::NoConfigDir)?;

    let env = std::env::var("TRIAGE_SYNC_ENV").unwrap_or_else(|_| "production".to_string());

    Ok(if env == "dev" {
        base_dir.join("triage-sync-dev")
    } else {
        base_dir.join("triage-sync")
    })
}
