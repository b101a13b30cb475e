//! Error types for directory data source operations.

use std::fmt;
use thiserror::Error;

/// The category of a data source error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceErrorCode {
    /// No access token could be obtained.
    AuthenticationFailed,
    /// Connection failure, timeout, DNS resolution, etc.
    NetworkError,
    /// The API answered with a non-success HTTP status.
    ApiError,
    /// The response body was not the expected JSON shape.
    InvalidResponse,
    /// Request parameters could not be turned into a query string.
    InvalidParams,
    /// Missing or invalid configuration.
    ConfigurationError,
}

impl SourceErrorCode {
    /// Returns a stable snake_case name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "authentication_failed",
            Self::NetworkError => "network_error",
            Self::ApiError => "api_error",
            Self::InvalidResponse => "invalid_response",
            Self::InvalidParams => "invalid_params",
            Self::ConfigurationError => "configuration_error",
        }
    }
}

impl fmt::Display for SourceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error raised while serving a directory request.
#[derive(Debug, Error)]
pub struct SourceError {
    code: SourceErrorCode,
    message: String,
    /// HTTP status returned by the API, for [`SourceErrorCode::ApiError`].
    status: Option<u16>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SourceError {
    /// Creates a new error with the given code and message.
    pub fn new(code: SourceErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::AuthenticationFailed, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::NetworkError, message)
    }

    /// Creates an error for a non-success HTTP response.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        let mut err = Self::new(SourceErrorCode::ApiError, body);
        err.status = Some(status);
        err
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::InvalidResponse, message)
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::InvalidParams, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::ConfigurationError, message)
    }

    /// Attaches the underlying cause.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn code(&self) -> SourceErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns true if the API reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ({}): {}", self.code, status, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

/// A specialized Result type for data source operations.
pub type SourceResult<T> = Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_names() {
        assert_eq!(
            SourceErrorCode::AuthenticationFailed.as_str(),
            "authentication_failed"
        );
        assert_eq!(SourceErrorCode::ApiError.to_string(), "api_error");
    }

    #[test]
    fn authentication_error() {
        let err = SourceError::authentication("Unable to retrieve the client access token");
        assert_eq!(err.code(), SourceErrorCode::AuthenticationFailed);
        assert_eq!(err.message(), "Unable to retrieve the client access token");
        assert!(err.status().is_none());
    }

    #[test]
    fn api_error_carries_status() {
        let err = SourceError::api(404, "Resource Not Found: groupKey");
        assert_eq!(err.code(), SourceErrorCode::ApiError);
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "api_error (404): Resource Not Found: groupKey"
        );
    }

    #[test]
    fn display_without_status() {
        let err = SourceError::network("connection refused");
        assert_eq!(err.to_string(), "network_error: connection refused");
    }

    #[test]
    fn error_with_source() {
        use std::error::Error;
        let io_err = std::io::Error::other("socket closed");
        let err = SourceError::network("request failed").with_source(io_err);
        assert!(err.source().is_some());
    }
}
