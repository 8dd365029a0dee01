//! Blocking facade over reqwest for the sequential sync loop.
//!
//! Each client owns a current-thread runtime and waits on every request, so
//! the caller never sees a future.

use crate::error::UpstreamError;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tokio::runtime::Runtime;

const USER_AGENT: &str = concat!("triage-sync/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ERROR_BODY: usize = 200;

pub struct BlockingHttp {
    service: &'static str,
    client: Client,
    runtime: Runtime,
}

impl BlockingHttp {
    pub fn new(service: &'static str) -> Result<Self, UpstreamError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| UpstreamError::Setup {
                service,
                message: format!("failed to start runtime: {e}"),
            })?;

        let client = {
            let _guard = runtime.enter();
            Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .user_agent(USER_AGENT)
                .build()
                .map_err(|e| UpstreamError::Setup {
                    service,
                    message: format!("failed to build HTTP client: {e}"),
                })?
        };

        Ok(Self {
            service,
            client,
            runtime,
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Send `request` and decode a JSON body.
    pub fn fetch_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, UpstreamError> {
        self.runtime.block_on(async {
            let response = self.send(operation, request).await?;
            let body = response
                .bytes()
                .await
                .map_err(|source| UpstreamError::Transport {
                    service: self.service,
                    operation,
                    source,
                })?;
            serde_json::from_slice(&body).map_err(|e| UpstreamError::Malformed {
                service: self.service,
                operation,
                message: e.to_string(),
            })
        })
    }

    /// Send `request` and discard the body.
    pub fn execute(&self, operation: &'static str, request: RequestBuilder) -> Result<(), UpstreamError> {
        self.runtime
            .block_on(async { self.send(operation, request).await.map(|_| ()) })
    }

    async fn send(&self, operation: &'static str, request: RequestBuilder) -> Result<Response, UpstreamError> {
        let response = request
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                service: self.service,
                operation,
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(UpstreamError::BadResponse {
            service: self.service,
            operation,
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

/// Error body shapes used by Jira and OverOps.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default, rename = "errorMessages")]
    error_messages: Vec<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Best readable message from an error response body.
pub(crate) fn error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if !parsed.error_messages.is_empty() {
            return parsed.error_messages.join(", ");
        }
        if let Some(message) = parsed.message {
            return message;
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "empty response body".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_BODY).collect()
    }
}
