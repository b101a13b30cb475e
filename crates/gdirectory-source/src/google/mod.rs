//! Network-backed implementations of the data source seams.
//!
//! - [`OAuthClient`] mints access tokens with the refresh-token grant and
//!   caches them until shortly before expiry.
//! - [`ReqwestTransport`] performs the GET requests.
//!
//! # Example
//!
//! ```ignore
//! use gdirectory_source::{DirectoryConfig, DirectoryDataSource, OAuthCredentials};
//! use gdirectory_core::GetGroupParams;
//!
//! let config = DirectoryConfig::new(OAuthCredentials::from_env()?);
//! let source = DirectoryDataSource::from_config(&config)?;
//!
//! let group = source.get_group(&GetGroupParams::new("staff@example.com")).await?;
//! ```

mod client;
mod oauth;
mod tokens;

pub use client::ReqwestTransport;
pub use oauth::OAuthClient;
pub use tokens::TokenInfo;
