//! Configuration commands.

use std::path::Path;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Renders the configuration as TOML with literal secrets redacted.
pub fn render(config: &ClientConfig) -> ClientResult<String> {
    toml::to_string_pretty(&config.redacted())
        .map_err(|e| ClientError::Output(format!("failed to serialize config: {}", e)))
}

/// Dump the current configuration to stdout.
pub fn dump(config: &ClientConfig, path: &Path) -> ClientResult<()> {
    println!("# config.toml ({})", path.display());
    println!("{}", render(config)?);
    Ok(())
}

/// Validate the configuration, resolving every credential reference.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    let directory = config.to_directory_config()?;
    println!("Credentials resolved for client {}.", directory.credentials.client_id);
    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path(path: &Path) -> ClientResult<()> {
    println!("config: {}", path.display());
    Ok(())
}
