//! Jira issues and their workflow transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A workflow transition available on an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub id: String,
    pub name: String,
}

/// A Jira issue as seen at the start of reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub key: String,
    pub status: String,
    pub last_modified: DateTime<Utc>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

impl Issue {
    /// First transition whose name matches exactly.
    pub fn find_transition(&self, name: &str) -> Option<&Transition> {
        self.transitions.iter().find(|t| t.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_transition_matches_exact_name_first_wins() {
        let issue = Issue {
            key: "OPS-1".into(),
            status: "To Do".into(),
            last_modified: Utc::now(),
            transitions: vec![
                Transition { id: "11".into(), name: "In Progress".into() },
                Transition { id: "31".into(), name: "Resolved".into() },
                Transition { id: "41".into(), name: "Resolved".into() },
            ],
        };
        assert_eq!(issue.find_transition("Resolved").map(|t| t.id.as_str()), Some("31"));
        assert!(issue.find_transition("resolved").is_none());
    }
}
