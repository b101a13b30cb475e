//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/gdirectory/config.toml` by default:
//!
//! ```toml
//! debug = false
//!
//! [google]
//! client_id = "1234.apps.googleusercontent.com"
//! client_secret = "pass::google/directory-secret"
//! refresh_token = "env::GOOGLE_REFRESH_TOKEN"
//!
//! [directory]
//! timeout = 30
//! ```
//!
//! Credential values support secret references (see [`crate::secret`]).
//! Without a `[google]` section the credentials are read from
//! `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET` and `GOOGLE_REFRESH_TOKEN`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use gdirectory_source::{DirectoryConfig, OAuthCredentials};

use crate::error::{ClientError, ClientResult};
use crate::secret;

/// Configuration for the gdirectory client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// OAuth credentials.
    pub google: Option<GoogleSettings>,

    /// API endpoint settings.
    pub directory: DirectorySettings,

    /// File this configuration was read from.
    #[serde(skip)]
    pub loaded_from: Option<PathBuf>,
}

/// OAuth settings; every value accepts `pass::` and `env::` references.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoogleSettings {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,

    /// Google credentials JSON supplying any of the above left unset.
    pub credentials_file: Option<PathBuf>,
}

/// Endpoint and HTTP settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorySettings {
    /// Directory API root.
    pub base_url: Option<String>,

    /// OAuth token endpoint.
    pub token_url: Option<String>,

    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            base_url: None,
            token_url: None,
            timeout: DirectoryConfig::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the default configuration.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self {
                loaded_from: Some(path),
                ..Self::default()
            })
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|e| {
            ClientError::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        config.loaded_from = Some(path.to_path_buf());
        Ok(config)
    }

    /// The file this configuration came from, or the default location.
    pub fn path(&self) -> PathBuf {
        self.loaded_from.clone().unwrap_or_else(Self::default_path)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gdirectory")
    }

    /// Resolves the OAuth credentials from `[google]` or the environment.
    pub fn resolve_credentials(&self) -> ClientResult<OAuthCredentials> {
        match self.google {
            Some(ref google) => google.resolve_credentials(&self.path()),
            None => OAuthCredentials::from_env().map_err(|e| {
                ClientError::Config(format!(
                    "{}. Set the GOOGLE_* variables or add a [google] section to {}",
                    e.message(),
                    self.path().display()
                ))
            }),
        }
    }

    /// Builds the data source configuration.
    pub fn to_directory_config(&self) -> ClientResult<DirectoryConfig> {
        let credentials = self.resolve_credentials()?;
        let mut config = DirectoryConfig::new(credentials)
            .with_timeout(Duration::from_secs(self.directory.timeout));

        if let Some(ref base_url) = self.directory.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(ref token_url) = self.directory.token_url {
            config = config.with_token_url(token_url);
        }

        config
            .validate()
            .map_err(|e| ClientError::Config(e.message().to_string()))?;
        Ok(config)
    }

    /// Returns a copy safe to print: literal secrets are replaced, references
    /// are kept.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if let Some(ref mut google) = config.google {
            for value in [&mut google.client_secret, &mut google.refresh_token]
                .into_iter()
                .flatten()
            {
                if !secret::is_reference(value) {
                    *value = "<redacted>".to_string();
                }
            }
        }
        config
    }
}

impl GoogleSettings {
    /// Resolves each field, falling back to `credentials_file` for unset
    /// ones.
    ///
    /// `config_path` names the file in error messages.
    pub fn resolve_credentials(&self, config_path: &Path) -> ClientResult<OAuthCredentials> {
        let from_file = self
            .credentials_file
            .as_ref()
            .map(|path| {
                OAuthCredentials::from_file(path)
                    .map_err(|e| ClientError::Config(e.message().to_string()))
            })
            .transpose()?;

        let field = |name: &str, inline: &Option<String>, file_value: Option<&String>| {
            match inline {
                Some(raw) => secret::resolve(raw),
                None => file_value.filter(|v| !v.is_empty()).cloned().ok_or_else(|| {
                    ClientError::Config(format!(
                        "{} is missing from [google] section in {}",
                        name,
                        config_path.display()
                    ))
                }),
            }
        };

        let credentials = OAuthCredentials::new(
            field(
                "client_id",
                &self.client_id,
                from_file.as_ref().map(|c| &c.client_id),
            )?,
            field(
                "client_secret",
                &self.client_secret,
                from_file.as_ref().map(|c| &c.client_secret),
            )?,
            field(
                "refresh_token",
                &self.refresh_token,
                from_file.as_ref().map(|c| &c.refresh_token),
            )?,
        );

        credentials
            .validate()
            .map_err(|e| ClientError::Config(format!("invalid Google credentials: {}", e.message())))?;
        Ok(credentials)
    }
}
