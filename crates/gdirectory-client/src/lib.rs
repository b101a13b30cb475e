//! CLI, configuration and JSON output
//!
//! This crate provides the `gdirectory` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod secret;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
