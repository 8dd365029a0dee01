//! Jira integration -- issue status and workflow transitions via the Jira
//! REST API (v2).

use crate::error::UpstreamError;
use crate::integrations::http::BlockingHttp;
use crate::integrations::parse_timestamp;
use crate::integrations::traits::Tracker;
use crate::triage::{Issue, Transition};

use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use url::Url;

const SERVICE: &str = "Jira";

/// Jira API client using basic authentication.
pub struct JiraClient {
    http: BlockingHttp,
    base_url: Url,
    username: String,
    password: String,
}

/// Jira issue response, trimmed to the fields requested.
#[derive(Debug, Deserialize)]
struct JiraIssue {
    key: String,
    fields: JiraIssueFields,
}

#[derive(Debug, Deserialize)]
struct JiraIssueFields {
    status: JiraStatus,
    #[serde(default)]
    updated: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JiraStatus {
    name: String,
}

#[derive(Debug, Deserialize)]
struct JiraTransitions {
    #[serde(default)]
    transitions: Vec<JiraTransition>,
}

#[derive(Debug, Deserialize)]
struct JiraTransition {
    id: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct TransitionRequest<'a> {
    transition: TransitionRef<'a>,
}

#[derive(Debug, Serialize)]
struct TransitionRef<'a> {
    id: &'a str,
}

impl JiraClient {
    pub fn new(base_url: &Url, username: &str, password: &str) -> Result<Self, UpstreamError> {
        Ok(Self {
            http: BlockingHttp::new(SERVICE)?,
            base_url: base_url.clone(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Build the API URL for the given path segments.
    fn api_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(["rest", "api", "2"])
                .extend(segments);
        }
        url
    }
}

impl Tracker for JiraClient {
    fn get_issue(&self, key: &str) -> Result<Issue, UpstreamError> {
        const OPERATION: &str = "fetching issue";

        let mut url = self.api_url(&["issue", key]);
        url.query_pairs_mut().append_pair("fields", "status,updated");

        let request = self
            .http
            .client()
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, "application/json");
        let issue: JiraIssue = self.http.fetch_json(OPERATION, request)?;

        let updated = issue.fields.updated.ok_or_else(|| UpstreamError::Malformed {
            service: SERVICE,
            operation: OPERATION,
            message: format!("issue {} has no 'updated' field", issue.key),
        })?;
        let last_modified = parse_timestamp(&updated).ok_or_else(|| UpstreamError::Malformed {
            service: SERVICE,
            operation: OPERATION,
            message: format!("invalid 'updated' timestamp '{updated}' on issue {}", issue.key),
        })?;

        Ok(Issue {
            key: issue.key,
            status: issue.fields.status.name,
            last_modified,
            transitions: Vec::new(),
        })
    }

    fn get_transitions(&self, key: &str) -> Result<Vec<Transition>, UpstreamError> {
        let url = self.api_url(&["issue", key, "transitions"]);
        let request = self
            .http
            .client()
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, "application/json");
        let response: JiraTransitions = self.http.fetch_json("fetching transitions", request)?;

        Ok(response
            .transitions
            .into_iter()
            .map(|t| Transition { id: t.id, name: t.name })
            .collect())
    }

    fn execute_transition(&self, key: &str, transition_id: &str) -> Result<(), UpstreamError> {
        let url = self.api_url(&["issue", key, "transitions"]);
        let body = TransitionRequest {
            transition: TransitionRef { id: transition_id },
        };
        let request = self
            .http
            .client()
            .post(url)
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, "application/json")
            .json(&body);
        self.http.execute("executing transition", request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_keeps_context_path() {
        let client = JiraClient::new(
            &Url::parse("https://intranet.example.com/jira/").unwrap(),
            "bot",
            "secret",
        )
        .unwrap();
        assert_eq!(
            client.api_url(&["issue", "OPS-1", "transitions"]).as_str(),
            "https://intranet.example.com/jira/rest/api/2/issue/OPS-1/transitions"
        );
    }

    #[test]
    fn transition_request_shape() {
        let body = TransitionRequest {
            transition: TransitionRef { id: "31" },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"transition": {"id": "31"}})
        );
    }
}
