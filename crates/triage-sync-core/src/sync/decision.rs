//! Reconciliation decision for a single event/issue pair.
//!
//! Pure functions only: everything needed arrives as arguments and the
//! result says what should change, never how it gets applied.

use crate::sync::types::{SyncDecision, SyncDirection};
use crate::triage::{EventSnapshot, Issue, StatusMapping, TriageLabels, TriageState};
use chrono::{DateTime, Utc};

/// Decide which side wins and what the losing side should become.
pub fn decide(event: &EventSnapshot, issue: &Issue, mapping: &StatusMapping) -> SyncDecision {
    let direction = sync_direction(event.last_modified, issue.last_modified);

    match direction {
        SyncDirection::TrackerToSource => {
            let target = mapping.state_for_status(&issue.status);
            SyncDecision {
                direction,
                target,
                mutation_needed: !event.labels.contains(target),
                transition: None,
            }
        }
        SyncDirection::SourceToTracker => {
            let target = source_target(event.labels);
            let wanted = mapping.status_for(target);
            let mutation_needed = issue.status != wanted;
            let transition = if mutation_needed {
                issue.find_transition(wanted).cloned()
            } else {
                None
            };
            SyncDecision {
                direction,
                target,
                mutation_needed,
                transition,
            }
        }
    }
}

/// Newer side wins; a tie goes to OverOps.
pub fn sync_direction(event_modified: DateTime<Utc>, issue_modified: DateTime<Utc>) -> SyncDirection {
    if issue_modified > event_modified {
        SyncDirection::TrackerToSource
    } else {
        SyncDirection::SourceToTracker
    }
}

/// State Jira should be moved to, from the event's labels.
///
/// Resolved > Archived > Resurfaced > Inbox, first match wins.
pub fn source_target(labels: TriageLabels) -> TriageState {
    if labels.resolved {
        TriageState::Resolved
    } else if labels.archived {
        TriageState::Hidden
    } else if labels.resurfaced {
        TriageState::Resurfaced
    } else {
        TriageState::Inbox
    }
}
