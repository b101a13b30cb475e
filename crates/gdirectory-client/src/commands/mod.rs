//! Sub-command implementations.

pub mod config;
pub mod directory;
