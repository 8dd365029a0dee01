//! Correspondence between triage concepts and Jira status names.

use super::TriageState;
use serde::{Deserialize, Serialize};

/// Jira status (and transition) names for each triage concept.
///
/// Loaded once from the `[statuses]` config section and never changed
/// during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMapping {
    #[serde(default = "default_resolved")]
    pub resolved: String,
    #[serde(default = "default_hidden")]
    pub hidden: String,
    #[serde(default = "default_inbox")]
    pub inbox: String,
    #[serde(default = "default_resurfaced")]
    pub resurfaced: String,
}

fn default_resolved() -> String {
    "Resolved".into()
}
fn default_hidden() -> String {
    "Closed".into()
}
fn default_inbox() -> String {
    "To Do".into()
}
fn default_resurfaced() -> String {
    "Reopened".into()
}

impl Default for StatusMapping {
    fn default() -> Self {
        Self {
            resolved: default_resolved(),
            hidden: default_hidden(),
            inbox: default_inbox(),
            resurfaced: default_resurfaced(),
        }
    }
}

impl StatusMapping {
    /// The Jira name configured for `state`.
    pub fn status_for(&self, state: TriageState) -> &str {
        match state {
            TriageState::Resolved => &self.resolved,
            TriageState::Hidden => &self.hidden,
            TriageState::Inbox => &self.inbox,
            TriageState::Resurfaced => &self.resurfaced,
        }
    }

    /// Translate a Jira status into the state OverOps should be driven to.
    ///
    /// Resolved wins over hidden; anything unrecognised lands in the inbox.
    /// There is no way back to resurfaced from the Jira side.
    pub fn state_for_status(&self, status: &str) -> TriageState {
        if status == self.resolved {
            TriageState::Resolved
        } else if status == self.hidden {
            TriageState::Hidden
        } else {
            TriageState::Inbox
        }
    }
}
