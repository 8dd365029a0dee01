//! OverOps ↔ Jira triage reconciliation.
//!
//! [`decision`] holds the pure decision procedure; [`runner`] walks the
//! events of one run and dispatches writes; [`run`] wires both to the real
//! HTTP clients from a configuration.

pub mod decision;
pub mod runner;
pub mod types;


pub use decision::{decide, source_target, sync_direction};
pub use runner::SyncRunner;
pub use types::{
    EventOutcome, FailurePolicy, Mutation, Outcome, RunOptions, RunReport, SourceAction,
    SyncDecision, SyncDirection,
};

use crate::error::{ConfigError, Result};
use crate::integrations::{JiraClient, OverOpsClient};
use crate::storage::{SyncConfig, ViewSelector};
use chrono::Utc;

/// Validate `config`, connect to both services and run one sync.
///
/// Nothing touches the network until the configuration has been validated.
pub fn run(config: &SyncConfig, options: RunOptions) -> Result<RunReport> {
    let settings = config.validate()?;

    let source = OverOpsClient::new(&settings.source_url, &settings.api_key)?;
    let tracker = JiraClient::new(
        &settings.tracker_url,
        &settings.tracker_username,
        &settings.tracker_password,
    )?;

    tracing::info!(
        url = %settings.tracker_url,
        username = %settings.tracker_username,
        "using Jira"
    );

    let view_id = match settings.view {
        ViewSelector::Id(id) => id,
        ViewSelector::Name(name) => source
            .find_view_by_name(&settings.service_id, &name)?
            .ok_or_else(|| ConfigError::UnknownView {
                service_id: settings.service_id.clone(),
                name,
            })?,
    };

    SyncRunner::new(
        &source,
        &tracker,
        settings.mapping,
        settings.service_id,
        view_id,
        settings.timespan_days,
    )
    .with_options(options)
    .run(Utc::now())
}
