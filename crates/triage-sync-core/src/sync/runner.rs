//! Sync runner: walks the events of one run and applies decisions.

use crate::error::{ConfigError, CoreError, UpstreamError};
use crate::integrations::traits::{EventSource, Tracker};
use crate::sync::decision::decide;
use crate::sync::types::{
    EventOutcome, FailurePolicy, Mutation, Outcome, RunOptions, RunReport, SourceAction,
};
use crate::triage::{Event, StatusMapping};
use chrono::{DateTime, Duration, Utc};

/// Reconciles every linked event of one OverOps view against Jira.
///
/// Events are handled one at a time, in the order OverOps returns them.
pub struct SyncRunner<'a> {
    source: &'a dyn EventSource,
    tracker: &'a dyn Tracker,
    mapping: StatusMapping,
    service_id: String,
    view_id: String,
    timespan_days: u32,
    options: RunOptions,
}

impl<'a> SyncRunner<'a> {
    pub fn new(
        source: &'a dyn EventSource,
        tracker: &'a dyn Tracker,
        mapping: StatusMapping,
        service_id: impl Into<String>,
        view_id: impl Into<String>,
        timespan_days: u32,
    ) -> Self {
        Self {
            source,
            tracker,
            mapping,
            service_id: service_id.into(),
            view_id: view_id.into(),
            timespan_days,
            options: RunOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Run once, treating `now` as the end of the lookback window.
    ///
    /// `now` also stands in for the last-modified time of events with no
    /// action history.
    ///
    /// # Errors
    /// Fails with a configuration error when the lookback window would
    /// start before the earliest representable date.
    pub fn run(&self, now: DateTime<Utc>) -> Result<RunReport, CoreError> {
        let to = now;
        let from = Duration::try_days(i64::from(self.timespan_days))
            .and_then(|span| now.checked_sub_signed(span))
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "timespan".to_string(),
                message: format!("{} days reaches past the earliest supported date", self.timespan_days),
            })?;
        let mut report = RunReport::new(from, to, self.options.dry_run);

        tracing::info!(
            service_id = %self.service_id,
            view_id = %self.view_id,
            %from,
            %to,
            dry_run = self.options.dry_run,
            "starting sync"
        );

        let events = self
            .source
            .list_events(&self.service_id, &self.view_id, from, to)?;
        report.events_fetched = events.len();

        if events.is_empty() {
            tracing::info!("found no events from the last {} days", self.timespan_days);
            return Ok(report);
        }

        for event in &events {
            let Some(issue_key) = event.issue_key() else {
                if event.tracker_url.is_some() {
                    tracing::warn!(event_id = %event.id, url = ?event.tracker_url, "unusable Jira link, skipping");
                }
                continue;
            };
            report.events_linked += 1;

            let outcome = match self.reconcile(event, issue_key, now) {
                Ok(outcome) => outcome,
                Err(err) => self.on_failure(event, issue_key, err)?,
            };
            report.outcomes.push(EventOutcome {
                event_id: event.id.clone(),
                issue_key: issue_key.to_string(),
                outcome,
            });
        }

        tracing::info!(
            fetched = report.events_fetched,
            linked = report.events_linked,
            applied = report.mutations_applied(),
            failed = report.failures(),
            "sync complete"
        );
        Ok(report)
    }

    /// The single place that decides whether one event's failure ends the run.
    fn on_failure(&self, event: &Event, issue_key: &str, err: UpstreamError) -> Result<Outcome, CoreError> {
        match self.options.failure_policy {
            FailurePolicy::Abort => Err(err.into()),
            FailurePolicy::SkipEvent => {
                tracing::warn!(event_id = %event.id, issue = issue_key, error = %err, "event failed, continuing");
                Ok(Outcome::Failed {
                    message: err.to_string(),
                })
            }
        }
    }

    fn reconcile(&self, event: &Event, issue_key: &str, now: DateTime<Utc>) -> Result<Outcome, UpstreamError> {
        let mut issue = self.tracker.get_issue(issue_key)?;
        issue.transitions = self.tracker.get_transitions(issue_key)?;

        let actions = self.source.action_history(&self.service_id, &event.id)?;
        let snapshot = event.snapshot(&actions, now);

        let decision = decide(&snapshot, &issue, &self.mapping);
        tracing::debug!(
            event_id = %event.id,
            issue = issue_key,
            event_modified = %snapshot.last_modified,
            issue_modified = %issue.last_modified,
            status = %issue.status,
            direction = %decision.direction,
            target = %decision.target,
            mutation_needed = decision.mutation_needed,
            "decided"
        );

        if !decision.mutation_needed {
            return Ok(Outcome::UpToDate {
                direction: decision.direction,
                target: decision.target,
            });
        }

        let Some(mutation) = decision.mutation() else {
            let transition_name = self.mapping.status_for(decision.target).to_string();
            tracing::warn!(
                issue = issue_key,
                transition = %transition_name,
                "no matching transition available, leaving issue unchanged"
            );
            return Ok(Outcome::MissingTransition {
                target: decision.target,
                transition_name,
            });
        };

        if self.options.dry_run {
            tracing::info!(event_id = %event.id, issue = issue_key, %mutation, "dry run, not applying");
            return Ok(Outcome::Planned {
                direction: decision.direction,
                target: decision.target,
                mutation,
            });
        }

        self.apply(&event.id, issue_key, &mutation)?;
        tracing::info!(event_id = %event.id, issue = issue_key, %mutation, "applied");

        Ok(Outcome::Applied {
            direction: decision.direction,
            target: decision.target,
            mutation,
        })
    }

    fn apply(&self, event_id: &str, issue_key: &str, mutation: &Mutation) -> Result<(), UpstreamError> {
        match mutation {
            Mutation::Source { action } => match action {
                SourceAction::Resolve => self.source.mark_resolved(&self.service_id, event_id),
                SourceAction::Hide => self.source.hide(&self.service_id, event_id),
                SourceAction::MoveToInbox => self.source.move_to_inbox(&self.service_id, event_id),
            },
            Mutation::Tracker { transition } => {
                self.tracker.execute_transition(issue_key, &transition.id)
            }
        }
    }
}
