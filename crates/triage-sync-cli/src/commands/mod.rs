pub mod auth;
pub mod config;
pub mod run;
pub mod validate;

use std::path::{Path, PathBuf};
use triage_sync_core::SyncConfig;

/// `--config` if given, else the default location.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(SyncConfig::default_path()?),
    }
}

/// Load the config file and fill missing secrets from the keyring.
pub fn load_config(explicit: Option<&Path>) -> Result<SyncConfig, Box<dyn std::error::Error>> {
    let path = config_path(explicit)?;
    tracing::debug!(path = %path.display(), "loading configuration");
    Ok(SyncConfig::load_from(&path)?.with_stored_credentials())
}
