use crate::error::UpstreamError;
use crate::triage::{Action, Event, Issue, Transition};
use chrono::{DateTime, Utc};

/// The monitoring platform whose events carry triage labels.
///
/// Every call blocks until the platform answers. Any error is an upstream
/// failure the runner decides how to handle.
pub trait EventSource {
    /// Events seen in `[from, to]` for one view of a service.
    fn list_events(
        &self,
        service_id: &str,
        view_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Event>, UpstreamError>;

    /// The event's triage history, newest first.
    fn action_history(&self, service_id: &str, event_id: &str) -> Result<Vec<Action>, UpstreamError>;

    fn mark_resolved(&self, service_id: &str, event_id: &str) -> Result<(), UpstreamError>;

    /// Hide (archive) the event.
    fn hide(&self, service_id: &str, event_id: &str) -> Result<(), UpstreamError>;

    fn move_to_inbox(&self, service_id: &str, event_id: &str) -> Result<(), UpstreamError>;
}

/// The issue tracker holding linked tickets.
pub trait Tracker {
    /// Status and last update of an issue. `transitions` is left empty.
    fn get_issue(&self, key: &str) -> Result<Issue, UpstreamError>;

    /// Workflow transitions currently available on the issue.
    fn get_transitions(&self, key: &str) -> Result<Vec<Transition>, UpstreamError>;

    fn execute_transition(&self, key: &str, transition_id: &str) -> Result<(), UpstreamError>;
}
