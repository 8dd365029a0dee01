//! TOML-based sync configuration.
//!
//! Holds everything a run needs:
//! - The lookback window (`timespan`, in days)
//! - OverOps API location, key, service and view
//! - Jira location and credentials
//! - Jira status names for each triage concept
//!
//! Configuration is stored at `~/.config/triage-sync/config.toml`. Secrets
//! may be left out of the file and kept in the OS keyring instead.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use super::config_dir;
use crate::error::ConfigError;
use crate::integrations::keyring_store;
use crate::triage::StatusMapping;

/// Longest lookback accepted, in days.
const MAX_TIMESPAN_DAYS: i64 = 36_500;

const REDACTED: &str = "********";

const TEMPLATE: &str = indoc::indoc! {r#"
    # How many days back to look for events.
    timespan = 5

    [source]
    api_url = "https://api.overops.com"
    # api_key = "..."            # or: triage-sync auth source login --secret ...
    service_id = "S12345"
    # view_id = "P42"            # takes precedence over view_name
    view_name = "All Events"

    [tracker]
    url = "https://your-company.atlassian.net"
    username = "triage-bot@your-company.com"
    # password = "..."           # or: triage-sync auth tracker login --secret ...

    [statuses]
    resolved = "Resolved"
    hidden = "Closed"
    inbox = "To Do"
    resurfaced = "Reopened"
"#};

/// OverOps connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default)]
    pub service_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_id: Option<String>,
    #[serde(default = "default_view_name")]
    pub view_name: String,
}

/// Jira connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Sync configuration as written in the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Lookback window in days.
    #[serde(default)]
    pub timespan: i64,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub statuses: StatusMapping,
}

/// How the OverOps view is identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewSelector {
    Id(String),
    /// Resolved to an id over the network at the start of a run.
    Name(String),
}

/// A configuration that passed validation.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    pub timespan_days: u32,
    pub source_url: Url,
    pub api_key: String,
    pub service_id: String,
    pub view: ViewSelector,
    pub tracker_url: Url,
    pub tracker_username: String,
    pub tracker_password: String,
    pub mapping: StatusMapping,
}

fn default_api_url() -> String {
    "https://api.overops.com".into()
}
fn default_view_name() -> String {
    "All Events".into()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            service_id: String::new(),
            view_id: None,
            view_name: default_view_name(),
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn required(key: &str, value: &str) -> Result<String, ConfigError> {
    present(Some(value))
        .map(str::to_string)
        .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
}

fn parse_endpoint(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let raw = required(key, raw)?;
    let url = Url::parse(&raw).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("'{raw}' is not an http(s) URL"),
        });
    }
    Ok(url)
}

impl SyncConfig {
    /// `config.toml` inside [`config_dir`].
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Commented starting point written by `config init`.
    pub fn template() -> &'static str {
        TEMPLATE
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Load from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Persist to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Fill secrets missing from the file from the OS keyring.
    ///
    /// Keyring failures are treated as "not stored"; validation reports
    /// whatever is still missing.
    pub fn with_stored_credentials(mut self) -> Self {
        if present(self.tracker.password.as_deref()).is_none() {
            self.tracker.password = stored_secret(keyring_store::TRACKER_PASSWORD);
        }
        if present(self.source.api_key.as_deref()).is_none() {
            self.source.api_key = stored_secret(keyring_store::SOURCE_API_KEY);
        }
        self
    }

    /// Copy with secrets masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.tracker.password.is_some() {
            copy.tracker.password = Some(REDACTED.to_string());
        }
        if copy.source.api_key.is_some() {
            copy.source.api_key = Some(REDACTED.to_string());
        }
        copy
    }

    /// Check every field a run needs, without touching the network.
    pub fn validate(&self) -> Result<SyncSettings, ConfigError> {
        if self.timespan <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "timespan".to_string(),
                message: "must be at least 1 day".to_string(),
            });
        }
        if self.timespan > MAX_TIMESPAN_DAYS {
            return Err(ConfigError::InvalidValue {
                key: "timespan".to_string(),
                message: format!("must be at most {MAX_TIMESPAN_DAYS} days"),
            });
        }
        let timespan_days = u32::try_from(self.timespan).map_err(|e| ConfigError::InvalidValue {
            key: "timespan".to_string(),
            message: e.to_string(),
        })?;

        let tracker_url = parse_endpoint("tracker.url", &self.tracker.url)?;
        let tracker_username = required("tracker.username", &self.tracker.username)?;
        let tracker_password = present(self.tracker.password.as_deref())
            .map(str::to_string)
            .ok_or_else(|| ConfigError::MissingKey("tracker.password".to_string()))?;

        let source_url = parse_endpoint("source.api_url", &self.source.api_url)?;
        let api_key = present(self.source.api_key.as_deref())
            .map(str::to_string)
            .ok_or_else(|| ConfigError::MissingKey("source.api_key".to_string()))?;
        let service_id = required("source.service_id", &self.source.service_id)?;
        let view = match present(self.source.view_id.as_deref()) {
            Some(id) => ViewSelector::Id(id.to_string()),
            None => ViewSelector::Name(required("source.view_name", &self.source.view_name)?),
        };

        Ok(SyncSettings {
            timespan_days,
            source_url,
            api_key,
            service_id,
            view,
            tracker_url,
            tracker_username,
            tracker_password,
            mapping: self.statuses.clone(),
        })
    }
}

fn stored_secret(key: &str) -> Option<String> {
    match keyring_store::get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(key, error = %e, "keyring lookup failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> SyncConfig {
        SyncConfig::from_toml(
            r#"
            timespan = 3

            [source]
            api_url = "https://api.overops.com"
            api_key = "k"
            service_id = "S1"
            view_id = "P1"

            [tracker]
            url = "https://acme.atlassian.net"
            username = "bot"
            password = "pw"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn template_parses_and_only_lacks_secrets() {
        let cfg = SyncConfig::from_toml(SyncConfig::template()).unwrap();
        assert_eq!(cfg.timespan, 5);
        assert_eq!(cfg.statuses, StatusMapping::default());
        match cfg.validate() {
            Err(ConfigError::MissingKey(key)) => assert_eq!(key, "tracker.password"),
            other => panic!("expected missing password, got {other:?}"),
        }
    }

    #[test]
    fn valid_config_produces_settings() {
        let settings = valid().validate().unwrap();
        assert_eq!(settings.timespan_days, 3);
        assert_eq!(settings.view, ViewSelector::Id("P1".to_string()));
        assert_eq!(settings.tracker_url.as_str(), "https://acme.atlassian.net/");
        assert_eq!(settings.mapping, StatusMapping::default());
    }

    #[test]
    fn zero_timespan_is_rejected_first() {
        let mut cfg = valid();
        cfg.timespan = 0;
        cfg.tracker.url.clear();
        let err = cfg.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for 'timespan': must be at least 1 day"
        );
    }

    #[test]
    fn absurd_timespan_is_rejected() {
        let mut cfg = valid();
        cfg.timespan = i64::MAX;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn missing_timespan_defaults_to_invalid() {
        let cfg = SyncConfig::from_toml("[tracker]\nurl = \"https://x\"").unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn tracker_fields_are_required_in_order() {
        let mut cfg = valid();
        cfg.tracker.username = "  ".to_string();
        cfg.tracker.password = None;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::MissingKey(key)) if key == "tracker.username"
        ));
    }

    #[test]
    fn empty_password_counts_as_missing() {
        let mut cfg = valid();
        cfg.tracker.password = Some(String::new());
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::MissingKey(key)) if key == "tracker.password"
        ));
    }

    #[test]
    fn tracker_url_must_be_http() {
        let mut cfg = valid();
        cfg.tracker.url = "ftp://acme".to_string();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidValue { key, .. }) if key == "tracker.url"
        ));
    }

    #[test]
    fn view_name_used_when_no_view_id() {
        let mut cfg = valid();
        cfg.source.view_id = None;
        let settings = cfg.validate().unwrap();
        assert_eq!(settings.view, ViewSelector::Name("All Events".to_string()));
    }

    #[test]
    fn source_key_and_service_are_required() {
        let mut cfg = valid();
        cfg.source.api_key = None;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::MissingKey(key)) if key == "source.api_key"
        ));

        let mut cfg = valid();
        cfg.source.service_id.clear();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::MissingKey(key)) if key == "source.service_id"
        ));
    }

    #[test]
    fn redacted_masks_secrets_only() {
        let shown = valid().redacted();
        assert_eq!(shown.tracker.password.as_deref(), Some(REDACTED));
        assert_eq!(shown.source.api_key.as_deref(), Some(REDACTED));
        assert_eq!(shown.tracker.username, "bot");
    }

    #[test]
    fn save_and_load_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        valid().save_to(&path).unwrap();

        let loaded = SyncConfig::load_from(&path).unwrap();
        assert_eq!(loaded.timespan, 3);
        assert_eq!(loaded.source.view_id.as_deref(), Some("P1"));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SyncConfig::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::LoadFailed { .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            SyncConfig::from_toml("timespan = \"five\""),
            Err(ConfigError::ParseFailed(_))
        ));
    }
}
