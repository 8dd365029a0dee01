//! Core error types for triage-sync-core.
//!
//! Configuration problems are reported before any network traffic; upstream
//! problems carry the service and operation that failed so the top-level
//! caller can print a useful diagnostic before exiting.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for triage-sync-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// OverOps or Jira returned a bad response, or the request never completed
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// OS keyring errors
    #[error("Credential store error: {0}")]
    Credentials(#[from] keyring::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Missing required configuration key
    #[error("'{0}' is required")]
    MissingKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// The configured view name does not exist for the service
    #[error("View '{name}' not found for service {service_id}")]
    UnknownView { service_id: String, name: String },

    /// No home directory to place the config file in
    #[error("Cannot determine the configuration directory")]
    NoConfigDir,
}

/// Failures talking to OverOps or Jira.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The HTTP client or its runtime could not be created
    #[error("Failed to set up {service} client: {message}")]
    Setup {
        service: &'static str,
        message: String,
    },

    /// The request never produced a response
    #[error("{service} request failed while {operation}: {source}")]
    Transport {
        service: &'static str,
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status
    #[error("{service} returned HTTP {status} while {operation}: {message}")]
    BadResponse {
        service: &'static str,
        operation: &'static str,
        status: u16,
        message: String,
    },

    /// A success response whose body could not be understood
    #[error("{service} returned an unreadable payload while {operation}: {message}")]
    Malformed {
        service: &'static str,
        operation: &'static str,
        message: String,
    },
}

impl UpstreamError {
    /// Name of the service that failed.
    pub fn service(&self) -> &'static str {
        match self {
            UpstreamError::Setup { service, .. }
            | UpstreamError::Transport { service, .. }
            | UpstreamError::BadResponse { service, .. }
            | UpstreamError::Malformed { service, .. } => service,
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_like_a_requirement() {
        let err = ConfigError::MissingKey("tracker.url".into());
        assert_eq!(err.to_string(), "'tracker.url' is required");
    }

    #[test]
    fn bad_response_names_service_and_operation() {
        let err = UpstreamError::BadResponse {
            service: "OverOps",
            operation: "listing events",
            status: 502,
            message: "gateway".into(),
        };
        assert_eq!(err.service(), "OverOps");
        assert_eq!(
            CoreError::from(err).to_string(),
            "Upstream error: OverOps returned HTTP 502 while listing events: gateway"
        );
    }
}
