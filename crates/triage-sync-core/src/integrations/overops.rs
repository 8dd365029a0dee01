//! OverOps integration -- events, their action history and triage operations
//! via the OverOps REST API (v1).

use crate::error::UpstreamError;
use crate::integrations::http::BlockingHttp;
use crate::integrations::parse_timestamp;
use crate::integrations::traits::EventSource;
use crate::triage::{Action, Event, TriageLabels};

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use url::Url;

const SERVICE: &str = "OverOps";

/// OverOps API client.
pub struct OverOpsClient {
    http: BlockingHttp,
    api_url: Url,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct EventsResponse {
    #[serde(default)]
    events: Option<Vec<EventPayload>>,
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    id: String,
    #[serde(default)]
    labels: Option<Vec<String>>,
    #[serde(default)]
    jira_issue_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ActionsResponse {
    #[serde(default)]
    event_actions: Option<Vec<ActionPayload>>,
}

#[derive(Debug, Deserialize)]
struct ActionPayload {
    timestamp: String,
    #[serde(default)]
    action: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ViewsResponse {
    #[serde(default)]
    views: Option<Vec<ViewPayload>>,
}

#[derive(Debug, Deserialize)]
struct ViewPayload {
    id: String,
    name: String,
}

impl From<EventPayload> for Event {
    fn from(payload: EventPayload) -> Self {
        Event {
            id: payload.id,
            labels: TriageLabels::from_labels(payload.labels.unwrap_or_default()),
            tracker_url: payload.jira_issue_url.filter(|url| !url.trim().is_empty()),
        }
    }
}

impl OverOpsClient {
    pub fn new(api_url: &Url, api_key: &str) -> Result<Self, UpstreamError> {
        Ok(Self {
            http: BlockingHttp::new(SERVICE)?,
            api_url: api_url.clone(),
            api_key: api_key.to_string(),
        })
    }

    /// `{api_url}/api/v1/services/{service_id}/{segments...}`
    fn service_url(&self, service_id: &str, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(["api", "v1", "services", service_id])
                .extend(segments);
        }
        url
    }

    fn get<T: serde::de::DeserializeOwned>(&self, operation: &'static str, url: Url) -> Result<T, UpstreamError> {
        let request = self
            .http
            .client()
            .get(url)
            .header("X-API-Key", &self.api_key)
            .header(ACCEPT, "application/json");
        self.http.fetch_json(operation, request)
    }

    fn post(&self, operation: &'static str, url: Url) -> Result<(), UpstreamError> {
        let request = self
            .http
            .client()
            .post(url)
            .header("X-API-Key", &self.api_key)
            .header(ACCEPT, "application/json");
        self.http.execute(operation, request)
    }

    /// Look up a view id by its display name (e.g. "All Events").
    pub fn find_view_by_name(&self, service_id: &str, name: &str) -> Result<Option<String>, UpstreamError> {
        let url = self.service_url(service_id, &["views"]);
        let response: ViewsResponse = self.get("listing views", url)?;
        Ok(response
            .views
            .unwrap_or_default()
            .into_iter()
            .find(|view| view.name == name)
            .map(|view| view.id))
    }
}

impl EventSource for OverOpsClient {
    fn list_events(
        &self,
        service_id: &str,
        view_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Event>, UpstreamError> {
        let mut url = self.service_url(service_id, &["views", view_id, "events"]);
        url.query_pairs_mut()
            .append_pair("from", &from.to_rfc3339_opts(SecondsFormat::Millis, true))
            .append_pair("to", &to.to_rfc3339_opts(SecondsFormat::Millis, true));

        let response: EventsResponse = self.get("listing events", url)?;
        let events: Vec<Event> = response
            .events
            .unwrap_or_default()
            .into_iter()
            .map(Event::from)
            .collect();

        tracing::debug!(service_id, view_id, count = events.len(), "fetched events");
        Ok(events)
    }

    fn action_history(&self, service_id: &str, event_id: &str) -> Result<Vec<Action>, UpstreamError> {
        const OPERATION: &str = "fetching event actions";

        let url = self.service_url(service_id, &["events", event_id, "actions"]);
        let response: ActionsResponse = self.get(OPERATION, url)?;

        response
            .event_actions
            .unwrap_or_default()
            .into_iter()
            .map(|payload| {
                let timestamp =
                    parse_timestamp(&payload.timestamp).ok_or_else(|| UpstreamError::Malformed {
                        service: SERVICE,
                        operation: OPERATION,
                        message: format!("invalid action timestamp '{}'", payload.timestamp),
                    })?;
                Ok(Action {
                    timestamp,
                    kind: payload.action,
                })
            })
            .collect()
    }

    fn mark_resolved(&self, service_id: &str, event_id: &str) -> Result<(), UpstreamError> {
        let url = self.service_url(service_id, &["events", event_id, "resolve"]);
        self.post("resolving event", url)
    }

    fn hide(&self, service_id: &str, event_id: &str) -> Result<(), UpstreamError> {
        let url = self.service_url(service_id, &["events", event_id, "delete"]);
        self.post("hiding event", url)
    }

    fn move_to_inbox(&self, service_id: &str, event_id: &str) -> Result<(), UpstreamError> {
        let url = self.service_url(service_id, &["events", event_id, "inbox"]);
        self.post("moving event to inbox", url)
    }
}
