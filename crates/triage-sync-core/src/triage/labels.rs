//! OverOps triage labels as independent flags.

use super::TriageState;
use serde::{Deserialize, Serialize};

pub const LABEL_RESOLVED: &str = "Resolved";
pub const LABEL_ARCHIVE: &str = "Archive";
pub const LABEL_INBOX: &str = "Inbox";
pub const LABEL_RESURFACED: &str = "Resurfaced";

/// Triage labels present on an event.
///
/// OverOps does not keep these mutually exclusive, so each one is its own
/// flag and callers pick a winner with an explicit priority order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageLabels {
    pub resolved: bool,
    pub archived: bool,
    pub inbox: bool,
    pub resurfaced: bool,
}

impl TriageLabels {
    /// Build from raw OverOps label names. Unknown labels are ignored.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .fold(Self::default(), |acc, label| match label.as_ref() {
                LABEL_RESOLVED => acc.with(TriageState::Resolved),
                // Older payloads spell it out in full
                LABEL_ARCHIVE | "Archived" => acc.with(TriageState::Hidden),
                LABEL_INBOX => acc.with(TriageState::Inbox),
                LABEL_RESURFACED => acc.with(TriageState::Resurfaced),
                _ => acc,
            })
    }

    /// Whether the label corresponding to `state` is present.
    pub fn contains(&self, state: TriageState) -> bool {
        match state {
            TriageState::Resolved => self.resolved,
            TriageState::Hidden => self.archived,
            TriageState::Inbox => self.inbox,
            TriageState::Resurfaced => self.resurfaced,
        }
    }

    /// Copy with the label for `state` set.
    pub fn with(mut self, state: TriageState) -> Self {
        match state {
            TriageState::Resolved => self.resolved = true,
            TriageState::Hidden => self.archived = true,
            TriageState::Inbox => self.inbox = true,
            TriageState::Resurfaced => self.resurfaced = true,
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        !(self.resolved || self.archived || self.inbox || self.resurfaced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_labels_and_ignores_the_rest() {
        let labels = TriageLabels::from_labels(["Inbox", "Resurfaced", "Custom Label"]);
        assert!(labels.inbox);
        assert!(labels.resurfaced);
        assert!(!labels.resolved);
        assert!(!labels.archived);
    }

    #[test]
    fn archive_label_maps_to_hidden() {
        assert!(TriageLabels::from_labels(["Archive"]).contains(TriageState::Hidden));
        assert!(TriageLabels::from_labels(["Archived"]).contains(TriageState::Hidden));
    }

    #[test]
    fn labels_are_case_sensitive() {
        assert!(TriageLabels::from_labels(["resolved"]).is_empty());
    }

    #[test]
    fn multiple_labels_coexist() {
        let labels = TriageLabels::from_labels(["Resolved", "Archive", "Inbox", "Resurfaced"]);
        for state in TriageState::ALL {
            assert!(labels.contains(state), "missing {state}");
        }
    }

    #[test]
    fn with_sets_only_the_requested_flag() {
        let labels = TriageLabels::default().with(TriageState::Hidden);
        assert!(labels.archived);
        assert!(!labels.resolved && !labels.inbox && !labels.resurfaced);
    }
}
