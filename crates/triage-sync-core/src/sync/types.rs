//! Core types for triage reconciliation.

use crate::triage::{Transition, TriageState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side is authoritative for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncDirection {
    /// OverOps labels are pushed into Jira.
    SourceToTracker,
    /// Jira status is pushed into OverOps.
    TrackerToSource,
}

impl fmt::Display for SyncDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncDirection::SourceToTracker => f.write_str("OverOps -> Jira"),
            SyncDirection::TrackerToSource => f.write_str("Jira -> OverOps"),
        }
    }
}

/// State-changing operations OverOps supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceAction {
    Resolve,
    Hide,
    MoveToInbox,
}

impl SourceAction {
    /// The operation that puts an event into `state`, if OverOps has one.
    pub fn for_target(state: TriageState) -> Option<Self> {
        match state {
            TriageState::Resolved => Some(SourceAction::Resolve),
            TriageState::Hidden => Some(SourceAction::Hide),
            TriageState::Inbox => Some(SourceAction::MoveToInbox),
            TriageState::Resurfaced => None,
        }
    }
}

/// A single write to perform on one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "side", rename_all = "snake_case")]
pub enum Mutation {
    Source { action: SourceAction },
    Tracker { transition: Transition },
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::Source { action } => match action {
                SourceAction::Resolve => f.write_str("resolve event"),
                SourceAction::Hide => f.write_str("hide event"),
                SourceAction::MoveToInbox => f.write_str("move event to inbox"),
            },
            Mutation::Tracker { transition } => {
                write!(f, "transition issue via '{}' ({})", transition.name, transition.id)
            }
        }
    }
}

/// Outcome of the reconciliation decision for one event/issue pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncDecision {
    pub direction: SyncDirection,
    pub target: TriageState,
    /// The losing side is not already in `target`.
    pub mutation_needed: bool,
    /// Transition to execute for `SourceToTracker`, when the issue offers one.
    pub transition: Option<Transition>,
}

impl SyncDecision {
    /// The write to perform, if any.
    ///
    /// `None` when nothing needs to change, and also when Jira offers no
    /// transition with the target's name.
    pub fn mutation(&self) -> Option<Mutation> {
        if !self.mutation_needed {
            return None;
        }
        match self.direction {
            SyncDirection::TrackerToSource => {
                SourceAction::for_target(self.target).map(|action| Mutation::Source { action })
            }
            SyncDirection::SourceToTracker => self
                .transition
                .clone()
                .map(|transition| Mutation::Tracker { transition }),
        }
    }
}

/// What to do when a single event fails mid-run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop the whole run on the first failure.
    #[default]
    Abort,
    /// Record the failure and continue with the next event.
    SkipEvent,
}

/// Knobs for a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Compute decisions without writing to either side.
    pub dry_run: bool,
    pub failure_policy: FailurePolicy,
}

/// What happened to one linked event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Applied {
        direction: SyncDirection,
        target: TriageState,
        mutation: Mutation,
    },
    /// Dry run: the mutation that would have been applied.
    Planned {
        direction: SyncDirection,
        target: TriageState,
        mutation: Mutation,
    },
    UpToDate {
        direction: SyncDirection,
        target: TriageState,
    },
    /// Jira offered no transition named after the target status.
    MissingTransition {
        target: TriageState,
        transition_name: String,
    },
    /// Only produced under [`FailurePolicy::SkipEvent`].
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOutcome {
    pub event_id: String,
    pub issue_key: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub dry_run: bool,
    pub events_fetched: usize,
    pub events_linked: usize,
    pub outcomes: Vec<EventOutcome>,
}

impl RunReport {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>, dry_run: bool) -> Self {
        Self {
            from,
            to,
            dry_run,
            events_fetched: 0,
            events_linked: 0,
            outcomes: Vec::new(),
        }
    }

    /// Number of writes actually performed.
    pub fn mutations_applied(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Applied { .. }))
            .count()
    }

    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Failed { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resurfaced_has_no_overops_operation() {
        assert_eq!(SourceAction::for_target(TriageState::Resurfaced), None);
        assert_eq!(
            SourceAction::for_target(TriageState::Hidden),
            Some(SourceAction::Hide)
        );
    }

    #[test]
    fn unneeded_decision_has_no_mutation() {
        let decision = SyncDecision {
            direction: SyncDirection::SourceToTracker,
            target: TriageState::Resolved,
            mutation_needed: false,
            transition: Some(Transition { id: "5".into(), name: "Resolved".into() }),
        };
        assert_eq!(decision.mutation(), None);
    }

    #[test]
    fn outcome_serializes_flat() {
        let outcome = EventOutcome {
            event_id: "e1".into(),
            issue_key: "OPS-1".into(),
            outcome: Outcome::Applied {
                direction: SyncDirection::TrackerToSource,
                target: TriageState::Resolved,
                mutation: Mutation::Source { action: SourceAction::Resolve },
            },
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "applied");
        assert_eq!(json["direction"], "tracker_to_source");
        assert_eq!(json["mutation"]["side"], "source");
        assert_eq!(json["mutation"]["action"], "resolve");
    }
}
