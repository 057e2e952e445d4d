//! Configuration loading from environment variables.

use crate::constants::{DEFAULT_MAX_CODE_ATTEMPTS, DEFAULT_NAME_MIN_LEN, DEFAULT_PORT};
use crate::AppError;
use std::env;

/// Rules a name must satisfy before it reaches the registry.
///
/// The registry itself accepts any string, including the empty one; this
/// policy is where deployments decide what a valid user name looks like.
/// The default is stricter than the registry and rejects the empty name;
/// set `NAME_MIN_LEN=0` (or use [`NamePolicy::permissive`]) to accept it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePolicy {
    /// Minimum length in chars.
    pub min_len: usize,
    /// Maximum length in chars, unbounded when `None`.
    pub max_len: Option<usize>,
    /// Whether spaces, tabs, and newlines may appear in a name.
    pub allow_whitespace: bool,
}

impl Default for NamePolicy {
    fn default() -> Self {
        Self {
            min_len: DEFAULT_NAME_MIN_LEN,
            max_len: None,
            allow_whitespace: true,
        }
    }
}

impl NamePolicy {
    /// Policy that accepts every string, including the empty one.
    pub fn permissive() -> Self {
        Self {
            min_len: 0,
            max_len: None,
            allow_whitespace: true,
        }
    }

    /// Check `name` against this policy.
    ///
    /// # Errors
    /// Returns [`AppError::BadRequest`] naming the violated rule.
    pub fn validate(&self, name: &str) -> Result<(), AppError> {
        let len = name.chars().count();
        if len < self.min_len {
            return Err(AppError::BadRequest(format!(
                "Name must be at least {} characters",
                self.min_len
            )));
        }
        if let Some(max_len) = self.max_len {
            if len > max_len {
                return Err(AppError::BadRequest(format!(
                    "Name must be at most {} characters",
                    max_len
                )));
            }
        }
        if !self.allow_whitespace && name.chars().any(char::is_whitespace) {
            return Err(AppError::BadRequest(
                "Name must not contain whitespace".to_string(),
            ));
        }
        Ok(())
    }
}

/// Runtime configuration for CodePaste.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub max_code_attempts: usize,
    pub name_policy: NamePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_code_attempts: DEFAULT_MAX_CODE_ATTEMPTS,
            name_policy: NamePolicy::default(),
        }
    }
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env_flag_or(name, false)
}

fn env_flag_or(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(default)
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = env::var(name).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}='{}'", name, value);
            None
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing
    /// or unparsable.
    pub fn from_env() -> Self {
        let defaults = NamePolicy::default();
        Self {
            port: env_parsed("PORT").unwrap_or(DEFAULT_PORT),
            max_code_attempts: env_parsed("CODE_MAX_ATTEMPTS")
                .unwrap_or(DEFAULT_MAX_CODE_ATTEMPTS)
                .max(1),
            name_policy: NamePolicy {
                min_len: env_parsed("NAME_MIN_LEN").unwrap_or(defaults.min_len),
                max_len: env_parsed("NAME_MAX_LEN"),
                allow_whitespace: env_flag_or("NAME_ALLOW_WHITESPACE", defaults.allow_whitespace),
            },
        }
    }
}
