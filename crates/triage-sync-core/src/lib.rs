//! # triage-sync Core Library
//!
//! This library keeps the triage state of OverOps error events in step with
//! the Jira issues linked to them. Each run looks back over a configurable
//! number of days, and for every linked event the side that changed most
//! recently wins: its state is written to the other side, and nothing is
//! written when both already agree.
//!
//! ## Architecture
//!
//! - **Triage**: Labels, statuses and the shared four-state model
//! - **Sync**: The pure decision procedure and the runner that applies it
//! - **Integrations**: Blocking OverOps and Jira REST clients behind traits
//! - **Storage**: TOML configuration and its validation
//!
//! ## Key Components
//!
//! - [`decide`]: Chooses direction, target state and whether a write is due
//! - [`SyncRunner`]: Walks the events of one run
//! - [`SyncConfig`]: Configuration file model
//! - [`EventSource`] / [`Tracker`]: Seams for the two remote systems

pub mod error;
pub mod integrations;
pub mod storage;
pub mod sync;
pub mod triage;

pub use error::{ConfigError, CoreError, UpstreamError};
pub use integrations::{EventSource, JiraClient, OverOpsClient, Tracker};
pub use storage::{SyncConfig, SyncSettings, ViewSelector};
pub use sync::{
    decide, EventOutcome, FailurePolicy, Mutation, Outcome, RunOptions, RunReport, SyncDecision,
    SyncDirection, SyncRunner,
};
pub use triage::{Event, Issue, StatusMapping, Transition, TriageLabels, TriageState};
