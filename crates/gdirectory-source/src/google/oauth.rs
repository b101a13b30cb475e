//! OAuth 2.0 refresh-token grant for Google APIs.
//!
//! The Admin SDK is reached with a long-lived refresh token issued out of
//! band. Each time the cached access token is missing or about to expire, a
//! new one is requested from the token endpoint:
//!
//! ```text
//! POST https://oauth2.googleapis.com/token
//! client_id=...&client_secret=...&refresh_token=...&grant_type=refresh_token
//! ```

use std::time::Duration;

use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::auth::AccessTokenProvider;
use crate::config::{DirectoryConfig, OAuthCredentials};
use crate::error::{SourceError, SourceResult};
use crate::transport::BoxFuture;

use super::tokens::TokenInfo;

/// Credential object backed by the refresh-token grant.
///
/// The current access token is cached in memory until shortly before it
/// expires. The lock is held across a refresh so concurrent callers wait for
/// one token request instead of issuing their own.
#[derive(Debug)]
pub struct OAuthClient {
    credentials: OAuthCredentials,
    token_url: String,
    http_client: reqwest::Client,
    cached: Mutex<Option<TokenInfo>>,
}

impl OAuthClient {
    /// Creates a new OAuth client with the given credentials.
    pub fn new(credentials: OAuthCredentials, timeout: Duration) -> SourceResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                SourceError::configuration(format!("failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self {
            credentials,
            token_url: DirectoryConfig::DEFAULT_TOKEN_URL.to_string(),
            http_client,
            cached: Mutex::new(None),
        })
    }

    pub fn from_config(config: &DirectoryConfig) -> SourceResult<Self> {
        Ok(Self::new(config.credentials.clone(), config.timeout)?.with_token_url(&config.token_url))
    }

    /// Overrides the token endpoint.
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Returns a usable access token, refreshing it when needed.
    ///
    /// `Ok(None)` when the token endpoint answered without a token. Such an
    /// answer is not cached.
    pub async fn token(&self) -> SourceResult<Option<String>> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref().filter(|t| !t.is_expired()) {
            debug!("using cached access token");
            return Ok(Some(token.access_token.clone()));
        }

        let fresh = self.refresh().await?;
        if fresh.access_token.is_empty() {
            *cached = None;
            return Ok(None);
        }

        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(Some(access_token))
    }

    /// Exchanges the refresh token for a new access token.
    ///
    /// Does not touch the cache.
    pub async fn refresh(&self) -> SourceResult<TokenInfo> {
        let params = [
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("refresh_token", self.credentials.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                SourceError::network(format!("token refresh request failed: {}", e)).with_source(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            SourceError::network(format!("failed to read response: {}", e)).with_source(e)
        })?;

        if !status.is_success() {
            return Err(SourceError::authentication(format!(
                "token refresh failed ({}): {}",
                status, body
            )));
        }

        let token_response: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            SourceError::invalid_response(format!("invalid token response: {}", e)).with_source(e)
        })?;

        info!(
            expires_in = token_response.expires_in.unwrap_or_default(),
            "refreshed access token"
        );
        Ok(TokenInfo::new(
            token_response.access_token,
            token_response.expires_in,
            token_response.scope,
        ))
    }

    /// Drops the cached token so the next call refreshes.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }
}

impl AccessTokenProvider for OAuthClient {
    fn access_token(&self) -> BoxFuture<'_, SourceResult<Option<String>>> {
        Box::pin(self.token())
    }
}

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    scope: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceErrorCode;
    use httpmock::prelude::*;

    fn test_credentials() -> OAuthCredentials {
        OAuthCredentials::new(
            "test-client.apps.googleusercontent.com",
            "test-secret",
            "test-refresh",
        )
    }

    fn client_for(server: &MockServer) -> OAuthClient {
        OAuthClient::new(test_credentials(), Duration::from_secs(5))
            .unwrap()
            .with_token_url(server.url("/token"))
    }

    #[test]
    fn default_token_url() {
        let client = OAuthClient::new(test_credentials(), Duration::from_secs(5)).unwrap();
        assert_eq!(client.token_url(), "https://oauth2.googleapis.com/token");
    }

    #[tokio::test]
    async fn refresh_posts_the_grant() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/token")
                    .body_contains("grant_type=refresh_token")
                    .body_contains("refresh_token=test-refresh")
                    .body_contains("client_secret=test-secret");
                then.status(200).json_body(serde_json::json!({
                    "access_token": "ya29.fresh",
                    "expires_in": 3599,
                    "scope": "https://www.googleapis.com/auth/admin.directory.user.readonly",
                    "token_type": "Bearer"
                }));
            })
            .await;

        let token = client_for(&server).refresh().await.unwrap();

        mock.assert_async().await;
        assert_eq!(token.access_token, "ya29.fresh");
        assert!(!token.is_expired());
        assert!(token.has_scope("https://www.googleapis.com/auth/admin.directory.user.readonly"));
    }

    #[tokio::test]
    async fn token_is_cached_until_expiry() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/token");
                then.status(200)
                    .json_body(serde_json::json!({ "access_token": "ya29.cached", "expires_in": 3600 }));
            })
            .await;

        let client = client_for(&server);
        assert_eq!(client.token().await.unwrap().as_deref(), Some("ya29.cached"));
        assert_eq!(client.token().await.unwrap().as_deref(), Some("ya29.cached"));
        mock.assert_hits_async(1).await;

        client.invalidate().await;
        client.token().await.unwrap();
        mock.assert_hits_async(2).await;
    }

    #[tokio::test]
    async fn empty_token_yields_none() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/token");
                then.status(200).json_body(serde_json::json!({ "expires_in": 3600 }));
            })
            .await;

        let client = client_for(&server);
        assert_eq!(client.token().await.unwrap(), None);
        assert_eq!(client.access_token().await.unwrap(), None);
        mock.assert_hits_async(2).await;
    }

    #[tokio::test]
    async fn rejected_refresh_is_an_authentication_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/token");
                then.status(400)
                    .json_body(serde_json::json!({ "error": "invalid_grant" }));
            })
            .await;

        let err = client_for(&server).token().await.unwrap_err();
        assert_eq!(err.code(), SourceErrorCode::AuthenticationFailed);
        assert!(err.message().contains("invalid_grant"));
    }

    #[tokio::test]
    async fn malformed_token_response() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/token");
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let err = client_for(&server).refresh().await.unwrap_err();
        assert_eq!(err.code(), SourceErrorCode::InvalidResponse);
    }
}
