//! Google Admin Directory data source.
//!
//! This crate provides read-only access to groups, group members and users
//! of a Google Workspace account:
//!
//! - [`DirectoryDataSource`] - The seven directory operations
//! - [`AccessTokenProvider`] - Credential seam yielding OAuth2 access tokens
//! - [`HttpGet`] - Transport seam performing the GET requests
//! - [`SourceError`] - Error type shared by every operation
//!
//! # Architecture
//!
//! ```text
//!  ┌────────────────────┐        ┌──────────────────┐
//!  │ AccessTokenProvider│        │     HttpGet      │
//!  │   (OAuthClient)    │        │(ReqwestTransport)│
//!  └─────────┬──────────┘        └────────┬─────────┘
//!            │ token                      │ GetRequest
//!            ▼                            ▼
//!          ┌─────────────────────────────────┐
//!          │       DirectoryDataSource       │
//!          │  path + access_token + filters  │
//!          └────────────────┬────────────────┘
//!                           ▼
//!               Group / Member / User (+ lists)
//! ```
//!
//! The `google` feature (on by default) provides the reqwest-backed
//! implementations of both seams.

pub mod auth;
pub mod config;
pub mod error;
#[cfg(feature = "google")]
pub mod google;
pub mod query;
pub mod source;
pub mod transport;

// Re-export main types at crate root
pub use auth::AccessTokenProvider;
pub use config::{DirectoryConfig, OAuthCredentials};
pub use error::{SourceError, SourceErrorCode, SourceResult};
#[cfg(feature = "google")]
pub use google::{OAuthClient, ReqwestTransport, TokenInfo};
pub use query::{ACCESS_TOKEN_PARAM, query_pairs};
pub use source::DirectoryDataSource;
pub use transport::{BoxFuture, GetRequest, HttpGet};
