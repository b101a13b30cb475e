//! Credential abstraction.

use crate::error::SourceResult;
use crate::transport::BoxFuture;

/// Something that can hand out an OAuth2 access token.
///
/// `Ok(None)` means the credential is usable but produced no token; the data
/// source turns that into an authentication error. Implementations decide
/// whether and how long to cache tokens.
///
/// ```ignore
/// struct Fixed(String);
///
/// impl AccessTokenProvider for Fixed {
///     fn access_token(&self) -> BoxFuture<'_, SourceResult<Option<String>>> {
///         let token = self.0.clone();
///         Box::pin(async move { Ok(Some(token)) })
///     }
/// }
/// ```
pub trait AccessTokenProvider: Send + Sync {
    fn access_token(&self) -> BoxFuture<'_, SourceResult<Option<String>>>;
}
