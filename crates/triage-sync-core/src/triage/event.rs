//! OverOps events and their action history.

use super::TriageLabels;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An event as listed by OverOps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub labels: TriageLabels,
    /// Link to the Jira issue, when one has been attached.
    pub tracker_url: Option<String>,
}

/// One entry of an event's action history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub timestamp: DateTime<Utc>,
    pub kind: Option<String>,
}

/// An event paired with its derived last-modified time.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSnapshot {
    pub id: String,
    pub labels: TriageLabels,
    pub last_modified: DateTime<Utc>,
}

impl Event {
    /// Jira issue key this event points at, if any.
    pub fn issue_key(&self) -> Option<&str> {
        self.tracker_url.as_deref().and_then(issue_key_from_url)
    }

    /// Freeze the event's state given its action history.
    pub fn snapshot(&self, actions: &[Action], now: DateTime<Utc>) -> EventSnapshot {
        EventSnapshot {
            id: self.id.clone(),
            labels: self.labels,
            last_modified: last_modified(actions, now),
        }
    }
}

/// Extract the issue key from a tracker URL: its last non-empty path segment.
///
/// Query strings, fragments and trailing slashes are ignored. Returns `None`
/// when nothing usable remains.
pub fn issue_key_from_url(url: &str) -> Option<&str> {
    let url = url.trim();
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = url[..end].trim_end_matches('/');
    let key = path.rsplit('/').next().unwrap_or(path);
    if key.is_empty() || key.ends_with(':') {
        None
    } else {
        Some(key)
    }
}

/// The most recent action's timestamp, or `now` when there is no history.
///
/// OverOps returns actions newest first, so only the head is consulted.
pub fn last_modified(actions: &[Action], now: DateTime<Utc>) -> DateTime<Utc> {
    actions.first().map(|a| a.timestamp).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn issue_key_is_last_path_segment() {
        assert_eq!(
            issue_key_from_url("https://acme.atlassian.net/browse/OPS-42"),
            Some("OPS-42")
        );
    }

    #[test]
    fn issue_key_ignores_query_fragment_and_trailing_slash() {
        assert_eq!(
            issue_key_from_url("https://acme.atlassian.net/browse/OPS-42/?focusedId=1#c"),
            Some("OPS-42")
        );
    }

    #[test]
    fn bare_key_is_accepted() {
        assert_eq!(issue_key_from_url("OPS-7"), Some("OPS-7"));
    }

    #[test]
    fn empty_references_have_no_key() {
        assert_eq!(issue_key_from_url(""), None);
        assert_eq!(issue_key_from_url("   "), None);
        assert_eq!(issue_key_from_url("https://"), None);
    }

    #[test]
    fn bare_host_yields_the_host_as_key() {
        assert_eq!(
            issue_key_from_url("https://acme.atlassian.net"),
            Some("acme.atlassian.net")
        );
    }

    #[test]
    fn event_without_reference_has_no_key() {
        let event = Event {
            id: "1".into(),
            labels: TriageLabels::default(),
            tracker_url: None,
        };
        assert_eq!(event.issue_key(), None);
    }

    #[test]
    fn last_modified_uses_first_action() {
        let actions = vec![
            Action { timestamp: at(10), kind: Some("Resolve".into()) },
            Action { timestamp: at(12), kind: None },
        ];
        assert_eq!(last_modified(&actions, at(20)), at(10));
    }

    #[test]
    fn last_modified_falls_back_to_now() {
        let now = at(9) + Duration::minutes(5);
        assert_eq!(last_modified(&[], now), now);
    }

    #[test]
    fn snapshot_keeps_labels() {
        let event = Event {
            id: "ev".into(),
            labels: TriageLabels::from_labels(["Inbox"]),
            tracker_url: Some("https://jira/browse/A-1".into()),
        };
        let snap = event.snapshot(&[], at(8));
        assert_eq!(snap.id, "ev");
        assert!(snap.labels.inbox);
        assert_eq!(snap.last_modified, at(8));
    }
}
