//! Secret reference resolver.
//!
//! Credential values in `config.toml` may point at secrets stored elsewhere:
//!
//! - `pass::path/in/store`: first line of `pass show path/in/store`
//! - `env::VAR_NAME`: value of `$VAR_NAME`
//! - anything else: used as-is

use crate::error::{ClientError, ClientResult};

const PASS_PREFIX: &str = "pass::";
const ENV_PREFIX: &str = "env::";

/// Returns true if `value` is a `pass::` or `env::` reference rather than a
/// literal.
pub fn is_reference(value: &str) -> bool {
    value.starts_with(PASS_PREFIX) || value.starts_with(ENV_PREFIX)
}

/// Resolves a value that may contain a secret reference prefix.
pub fn resolve(value: &str) -> ClientResult<String> {
    if let Some(path) = value.strip_prefix(PASS_PREFIX) {
        resolve_pass(path)
    } else if let Some(var) = value.strip_prefix(ENV_PREFIX) {
        resolve_env(var)
    } else {
        Ok(value.to_string())
    }
}

fn resolve_pass(path: &str) -> ClientResult<String> {
    let output = std::process::Command::new("pass")
        .arg("show")
        .arg(path)
        .output()
        .map_err(|e| ClientError::Secret(format!("failed to run `pass show {}`: {}", path, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ClientError::Secret(format!(
            "`pass show {}` failed ({}): {}",
            path,
            output.status,
            stderr.trim()
        )));
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(str::to_string)
        .ok_or_else(|| ClientError::Secret(format!("`pass show {}` produced no output", path)))
}

fn resolve_env(var: &str) -> ClientResult<String> {
    std::env::var(var)
        .map_err(|_| ClientError::Secret(format!("environment variable `{}` is not set", var)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passthrough() {
        assert_eq!(resolve("hello").unwrap(), "hello");
        assert_eq!(resolve("").unwrap(), "");
        assert_eq!(
            resolve("xxx.apps.googleusercontent.com").unwrap(),
            "xxx.apps.googleusercontent.com"
        );
    }

    #[test]
    fn references_are_detected() {
        assert!(is_reference("pass::google/refresh"));
        assert!(is_reference("env::GOOGLE_REFRESH_TOKEN"));
        assert!(!is_reference("1//0g-refresh-token"));
        assert!(!is_reference("passphrase"));
    }

    #[test]
    fn env_prefix_resolves() {
        unsafe {
            std::env::set_var("_GDIRECTORY_TEST_SECRET", "my-secret-value");
        }
        assert_eq!(
            resolve("env::_GDIRECTORY_TEST_SECRET").unwrap(),
            "my-secret-value"
        );
        unsafe {
            std::env::remove_var("_GDIRECTORY_TEST_SECRET");
        }
    }

    #[test]
    fn env_prefix_missing_var_errors() {
        let err = resolve("env::_GDIRECTORY_NONEXISTENT_VAR_12345").unwrap_err();
        assert!(matches!(err, ClientError::Secret(ref msg) if msg.contains("not set")));
    }

    #[test]
    fn pass_prefix_missing_entry_errors() {
        // Fails whether or not `pass` is installed.
        assert!(resolve("pass::nonexistent/entry/that/should/not/exist/12345").is_err());
    }
}
