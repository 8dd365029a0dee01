//! Triage data model shared by OverOps events and Jira issues.

pub mod event;
pub mod issue;
pub mod labels;
pub mod mapping;

pub use event::{issue_key_from_url, last_modified, Action, Event, EventSnapshot};
pub use issue::{Issue, Transition};
pub use labels::TriageLabels;
pub use mapping::StatusMapping;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four triage concepts both sides agree on.
///
/// On the OverOps side `Hidden` is carried by the `Archive` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageState {
    Resolved,
    Hidden,
    Inbox,
    Resurfaced,
}

impl TriageState {
    pub const ALL: [TriageState; 4] = [
        TriageState::Resolved,
        TriageState::Hidden,
        TriageState::Inbox,
        TriageState::Resurfaced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TriageState::Resolved => "resolved",
            TriageState::Hidden => "hidden",
            TriageState::Inbox => "inbox",
            TriageState::Resurfaced => "resurfaced",
        }
    }
}

impl fmt::Display for TriageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
