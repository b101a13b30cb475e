//! reqwest-backed HTTP GET transport.

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::DirectoryConfig;
use crate::error::{SourceError, SourceResult};
use crate::transport::{BoxFuture, GetRequest, HttpGet};

/// Sends directory requests with a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with the given request timeout and user agent.
    pub fn new(timeout: Duration, user_agent: &str) -> SourceResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                SourceError::configuration(format!("failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self { http_client })
    }

    pub fn from_config(config: &DirectoryConfig) -> SourceResult<Self> {
        Self::new(config.timeout, &config.user_agent)
    }

    /// Wraps an existing client, e.g. one with custom TLS roots.
    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    async fn execute(&self, request: GetRequest) -> SourceResult<serde_json::Value> {
        let url = request.url();

        let response = self
            .http_client
            .get(&url)
            .query(&request.query)
            .send()
            .await
            .map_err(|e| {
                // The URL carries the access token.
                let e = e.without_url();
                let message = if e.is_timeout() {
                    "request timeout".to_string()
                } else if e.is_connect() {
                    format!("connection failed: {}", e)
                } else {
                    format!("request failed: {}", e)
                };
                SourceError::network(message).with_source(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            SourceError::network(format!("failed to read response: {}", e)).with_source(e)
        })?;

        if !status.is_success() {
            warn!(status = status.as_u16(), path = %request.path, "directory API error");
            return Err(SourceError::api(status.as_u16(), body));
        }

        debug!(status = status.as_u16(), bytes = body.len(), "directory response");

        serde_json::from_str(&body).map_err(|e| {
            SourceError::invalid_response(format!("failed to parse response: {}", e))
                .with_source(e)
        })
    }
}

impl HttpGet for ReqwestTransport {
    fn get(&self, request: GetRequest) -> BoxFuture<'_, SourceResult<serde_json::Value>> {
        Box::pin(self.execute(request))
    }
}
