//! Access token bookkeeping.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Tokens are treated as expired this long before Google says they are.
const EXPIRY_BUFFER_SECS: i64 = 60;

/// An access token minted by the refresh grant.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub access_token: String,

    /// When the access token stops being usable, buffer included.
    pub expires_at: Option<DateTime<Utc>>,

    /// Space separated scopes granted with the token, when reported.
    pub scope: Option<String>,

    pub last_refresh: DateTime<Utc>,
}

impl TokenInfo {
    /// Creates token info from OAuth response data.
    pub fn new(
        access_token: impl Into<String>,
        expires_in_secs: Option<i64>,
        scope: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            access_token: access_token.into(),
            expires_at: expires_in_secs.and_then(|secs| expiry_from(now, secs)),
            scope,
            last_refresh: now,
        }
    }

    /// Returns true if the access token is expired or about to expire.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() >= expires_at,
            // No expiry reported: keep using it until the API rejects it.
            None => false,
        }
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scope
            .as_deref()
            .is_some_and(|granted| granted.split_whitespace().any(|s| s == scope))
    }

    /// Returns the time until the token expires, if known.
    pub fn time_until_expiry(&self) -> Option<Duration> {
        self.expires_at.map(|expires_at| expires_at - Utc::now())
    }
}

/// Out-of-range lifetimes yield `None`, treated as no expiry.
fn expiry_from(now: DateTime<Utc>, expires_in_secs: i64) -> Option<DateTime<Utc>> {
    let lifetime = Duration::try_seconds(expires_in_secs.checked_sub(EXPIRY_BUFFER_SECS)?)?;
    now.checked_add_signed(lifetime)
}

impl std::fmt::Debug for TokenInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenInfo")
            .field("access_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("scope", &self.scope)
            .field("last_refresh", &self.last_refresh)
            .finish()
    }
}
