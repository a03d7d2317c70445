//! Environment configuration with warn-level logging for invalid values.

use std::time::Duration;

use crate::constants::{DEFAULT_API_URL, DEFAULT_MODEL, HUMAN_INPUT_TIMEOUT_SECS};
use crate::error::CoreError;

pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const API_URL_VAR: &str = "RETAIL_AGENTS_API_URL";
pub const MODEL_VAR: &str = "RETAIL_AGENTS_MODEL";
pub const INPUT_TIMEOUT_VAR: &str = "RETAIL_AGENTS_INPUT_TIMEOUT_SECS";

/// Parse a raw variable value with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
fn parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    raw: Option<String>,
    default: T,
) -> T {
    match raw {
        Some(v) => match v.parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        None => default,
    }
}

/// Process configuration read once at startup.
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub input_timeout: Duration,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"***")
            .field("api_key", &"***")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("input_timeout", &self.input_timeout)
            .finish()
    }
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    /// Returns an error if `DATABASE_URL` or `OPENAI_API_KEY` is missing.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns an error if a required key is missing or blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| CoreError::InvalidInput(format!("{key} environment variable must be set")))
        };
        let database_url = required(DATABASE_URL_VAR)?;
        let api_key = required(API_KEY_VAR)?;
        let api_url = lookup(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let model = lookup(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_owned());
        let timeout_secs =
            parse_with_default(INPUT_TIMEOUT_VAR, lookup(INPUT_TIMEOUT_VAR), HUMAN_INPUT_TIMEOUT_SECS);
        Ok(Self {
            database_url,
            api_key,
            api_url,
            model,
            input_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
