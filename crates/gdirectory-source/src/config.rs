//! Directory data source configuration.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{SourceError, SourceResult};

/// Environment variable holding the OAuth client ID.
pub const ENV_CLIENT_ID: &str = "GOOGLE_CLIENT_ID";
/// Environment variable holding the OAuth client secret.
pub const ENV_CLIENT_SECRET: &str = "GOOGLE_CLIENT_SECRET";
/// Environment variable holding the long-lived refresh token.
pub const ENV_REFRESH_TOKEN: &str = "GOOGLE_REFRESH_TOKEN";

/// OAuth 2.0 client credentials plus the refresh token used to mint access
/// tokens for the Admin SDK.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthCredentials {
    /// The OAuth 2.0 client ID from Google Cloud Console.
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

/// Structure of a Google credentials JSON file.
///
/// Cloud Console downloads nest the client under `installed` or `web`;
/// `gcloud auth application-default login` writes a flat `authorized_user`
/// file that also carries the refresh token.
#[derive(Debug, Deserialize)]
struct GoogleCredentialsFile {
    installed: Option<NestedCredentials>,
    web: Option<NestedCredentials>,
    client_id: Option<String>,
    client_secret: Option<String>,
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NestedCredentials {
    client_id: String,
    client_secret: String,
}

impl OAuthCredentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Reads `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET` and
    /// `GOOGLE_REFRESH_TOKEN`.
    pub fn from_env() -> SourceResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> SourceResult<Self> {
        let get = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| {
                    SourceError::configuration(format!("environment variable {} is not set", name))
                })
        };

        Ok(Self::new(
            get(ENV_CLIENT_ID)?,
            get(ENV_CLIENT_SECRET)?,
            get(ENV_REFRESH_TOKEN)?,
        ))
    }

    /// Loads credentials from a Google credentials JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> SourceResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SourceError::configuration(format!(
                "failed to read credentials file {}: {}",
                path.display(),
                e
            ))
            .with_source(e)
        })?;
        Self::from_json(&content)
    }

    /// Parses credentials from a Google credentials JSON string.
    ///
    /// The nested Cloud Console layouts never contain a refresh token; the
    /// result then has an empty one that must be filled in with
    /// [`with_refresh_token`](Self::with_refresh_token).
    pub fn from_json(json: &str) -> SourceResult<Self> {
        let file: GoogleCredentialsFile = serde_json::from_str(json).map_err(|e| {
            SourceError::configuration(format!("failed to parse credentials JSON: {}", e))
                .with_source(e)
        })?;
        let refresh_token = file.refresh_token.unwrap_or_default();

        if let Some(creds) = file.installed.or(file.web) {
            return Ok(Self::new(creds.client_id, creds.client_secret, refresh_token));
        }

        match (file.client_id, file.client_secret) {
            (Some(client_id), Some(client_secret)) => {
                Ok(Self::new(client_id, client_secret, refresh_token))
            }
            _ => Err(SourceError::configuration(
                "credentials file must contain 'installed'/'web' section or 'client_id'/'client_secret' at root level",
            )),
        }
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = refresh_token.into();
        self
    }

    /// Checks that every field is present and the client ID looks like a
    /// Google OAuth client.
    pub fn validate(&self) -> SourceResult<()> {
        if self.client_id.is_empty() {
            return Err(SourceError::configuration("client_id is required"));
        }
        if !self.client_id.ends_with(".apps.googleusercontent.com") {
            return Err(SourceError::configuration(
                "client_id should end with .apps.googleusercontent.com",
            ));
        }
        if self.client_secret.is_empty() {
            return Err(SourceError::configuration("client_secret is required"));
        }
        if self.refresh_token.is_empty() {
            return Err(SourceError::configuration("refresh_token is required"));
        }
        Ok(())
    }
}

impl fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Everything needed to build a network-backed data source.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub credentials: OAuthCredentials,
    /// Root of the Directory API.
    pub base_url: String,
    /// OAuth token endpoint used for the refresh grant.
    pub token_url: String,
    /// Request timeout, applied to both token and API requests.
    pub timeout: Duration,
    pub user_agent: String,
}

impl DirectoryConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://www.googleapis.com/admin/directory/v1";

    pub const DEFAULT_TOKEN_URL: &'static str = "https://oauth2.googleapis.com/token";

    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn new(credentials: OAuthCredentials) -> Self {
        Self {
            credentials,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            token_url: Self::DEFAULT_TOKEN_URL.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("gdirectory/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SourceResult<()> {
        self.credentials.validate().map_err(|e| {
            SourceError::configuration(format!("invalid credentials: {}", e.message()))
        })?;

        for (name, value) in [("base_url", &self.base_url), ("token_url", &self.token_url)] {
            url::Url::parse(value).map_err(|e| {
                SourceError::configuration(format!("invalid {} '{}': {}", name, value, e))
                    .with_source(e)
            })?;
        }

        if self.timeout.is_zero() {
            return Err(SourceError::configuration("timeout must be greater than zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceErrorCode;
    use std::collections::HashMap;

    fn test_credentials() -> OAuthCredentials {
        OAuthCredentials::new(
            "test-client.apps.googleusercontent.com",
            "test-secret",
            "test-refresh",
        )
    }

    #[test]
    fn credentials_validation() {
        assert!(test_credentials().validate().is_ok());

        let empty_id = OAuthCredentials::new("", "secret", "refresh");
        assert!(empty_id.validate().is_err());

        let bad_id = OAuthCredentials::new("bad-id", "secret", "refresh");
        assert!(bad_id.validate().is_err());

        let empty_secret =
            OAuthCredentials::new("test.apps.googleusercontent.com", "", "refresh");
        assert!(empty_secret.validate().is_err());

        let no_refresh = OAuthCredentials::new("test.apps.googleusercontent.com", "secret", "");
        let err = no_refresh.validate().unwrap_err();
        assert_eq!(err.code(), SourceErrorCode::ConfigurationError);
        assert!(err.message().contains("refresh_token"));
    }

    #[test]
    fn credentials_debug_hides_secrets() {
        let debug = format!("{:?}", test_credentials());
        assert!(debug.contains("test-client.apps.googleusercontent.com"));
        assert!(!debug.contains("test-secret"));
        assert!(!debug.contains("test-refresh"));
    }

    #[test]
    fn credentials_from_lookup() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("GOOGLE_CLIENT_ID", "env-id.apps.googleusercontent.com"),
            ("GOOGLE_CLIENT_SECRET", "env-secret"),
            ("GOOGLE_REFRESH_TOKEN", "env-refresh"),
        ]);

        let creds =
            OAuthCredentials::from_lookup(|name| env.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(creds.client_id, "env-id.apps.googleusercontent.com");
        assert_eq!(creds.client_secret, "env-secret");
        assert_eq!(creds.refresh_token, "env-refresh");
    }

    #[test]
    fn credentials_from_lookup_missing_variable() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("GOOGLE_CLIENT_ID", "env-id.apps.googleusercontent.com"),
            ("GOOGLE_REFRESH_TOKEN", ""),
            ("GOOGLE_CLIENT_SECRET", "env-secret"),
        ]);

        let err = OAuthCredentials::from_lookup(|name| env.get(name).map(|v| v.to_string()))
            .unwrap_err();
        assert_eq!(err.code(), SourceErrorCode::ConfigurationError);
        assert!(err.message().contains("GOOGLE_REFRESH_TOKEN"));
    }

    #[test]
    fn credentials_from_json_installed() {
        let json = r#"{
            "installed": {
                "client_id": "test-id.apps.googleusercontent.com",
                "client_secret": "test-secret",
                "project_id": "my-project"
            }
        }"#;

        let creds = OAuthCredentials::from_json(json).unwrap();
        assert_eq!(creds.client_id, "test-id.apps.googleusercontent.com");
        assert_eq!(creds.client_secret, "test-secret");
        assert!(creds.refresh_token.is_empty());

        let creds = creds.with_refresh_token("later");
        assert!(creds.validate().is_ok());
    }

    #[test]
    fn credentials_from_json_web() {
        let json = r#"{
            "web": {
                "client_id": "web-id.apps.googleusercontent.com",
                "client_secret": "web-secret"
            }
        }"#;

        let creds = OAuthCredentials::from_json(json).unwrap();
        assert_eq!(creds.client_id, "web-id.apps.googleusercontent.com");
        assert_eq!(creds.client_secret, "web-secret");
    }

    #[test]
    fn credentials_from_json_authorized_user() {
        let json = r#"{
            "client_id": "flat-id.apps.googleusercontent.com",
            "client_secret": "flat-secret",
            "refresh_token": "flat-refresh",
            "type": "authorized_user"
        }"#;

        let creds = OAuthCredentials::from_json(json).unwrap();
        assert_eq!(creds.client_id, "flat-id.apps.googleusercontent.com");
        assert_eq!(creds.refresh_token, "flat-refresh");
        assert!(creds.validate().is_ok());
    }

    #[test]
    fn credentials_from_json_invalid() {
        let err = OAuthCredentials::from_json(r#"{ "other": {} }"#).unwrap_err();
        assert!(err.message().contains("client_id"));

        let err = OAuthCredentials::from_json("not json").unwrap_err();
        assert!(err.message().contains("parse"));
    }

    #[test]
    fn config_defaults() {
        let config = DirectoryConfig::new(test_credentials());
        assert_eq!(
            config.base_url,
            "https://www.googleapis.com/admin/directory/v1"
        );
        assert_eq!(config.token_url, "https://oauth2.googleapis.com/token");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("gdirectory/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_builder_methods() {
        let config = DirectoryConfig::new(test_credentials())
            .with_base_url("http://127.0.0.1:8080/admin/directory/v1")
            .with_token_url("http://127.0.0.1:8080/token")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("test-agent");

        assert_eq!(config.base_url, "http://127.0.0.1:8080/admin/directory/v1");
        assert_eq!(config.token_url, "http://127.0.0.1:8080/token");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn config_validation() {
        let bad_url = DirectoryConfig::new(test_credentials()).with_base_url("not a url");
        let err = bad_url.validate().unwrap_err();
        assert!(err.message().contains("base_url"));

        let zero_timeout =
            DirectoryConfig::new(test_credentials()).with_timeout(Duration::from_secs(0));
        assert!(zero_timeout.validate().is_err());

        let bad_creds =
            DirectoryConfig::new(OAuthCredentials::new("bad-id", "secret", "refresh"));
        let err = bad_creds.validate().unwrap_err();
        assert!(err.message().starts_with("invalid credentials"));
    }
}
