//! Gate Configuration - process-wide policy switches
//!
//! Read once at startup (defaults, optional YAML file, environment) and
//! immutable afterwards. The defaults are the safe ones: destructive and
//! critical operations disabled, confirmation required.

use std::path::Path;
use std::time::Duration;

use edugate_core::{EdugateError, EdugateResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable enabling destructive and critical operations
pub const ALLOW_DESTRUCTIVE_ENV: &str = "EDUGATE_ALLOW_DESTRUCTIVE";

/// Environment variable toggling the confirmation requirement
pub const REQUIRE_CONFIRMATION_ENV: &str = "EDUGATE_REQUIRE_CONFIRMATION";

/// Environment variable setting the remote call timeout in seconds
pub const REMOTE_TIMEOUT_ENV: &str = "EDUGATE_REMOTE_TIMEOUT_SECS";

/// Process policy configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Allow operations of tier `destructive` and `critical`
    #[serde(default)]
    pub allow_destructive: bool,

    /// Require the confirmation marker for `destructive` and `critical` operations
    #[serde(default = "default_require_confirmation")]
    pub require_confirmation: bool,

    /// Timeout for a single remote call (no timeout when unset)
    #[serde(default)]
    pub remote_timeout_secs: Option<u64>,
}

fn default_require_confirmation() -> bool {
    true
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            allow_destructive: false,
            require_confirmation: true,
            remote_timeout_secs: None,
        }
    }
}

impl GateConfig {
    /// Load from the process environment on top of the defaults
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Load from a YAML file; missing keys take their defaults
    pub fn from_yaml_file(path: impl AsRef<Path>) -> EdugateResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| EdugateError::config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml_str(&content)
    }

    /// Parse from YAML text
    pub fn from_yaml_str(content: &str) -> EdugateResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Self = serde_yaml::from_str(content)
            .map_err(|e| EdugateError::config(format!("Failed to parse config: {}", e)))?;
        config.remote_timeout_secs = config.remote_timeout_secs.filter(|secs| *secs > 0);
        Ok(config)
    }

    /// Apply overrides from an environment-like lookup
    ///
    /// Unset variables keep the current value; unparsable ones are ignored
    /// with a warning.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ALLOW_DESTRUCTIVE_ENV) {
            match parse_bool(&raw) {
                Some(value) => self.allow_destructive = value,
                None => warn!(var = ALLOW_DESTRUCTIVE_ENV, value = %raw, "Ignoring invalid boolean"),
            }
        }

        if let Some(raw) = lookup(REQUIRE_CONFIRMATION_ENV) {
            match parse_bool(&raw) {
                Some(value) => self.require_confirmation = value,
                None => warn!(var = REQUIRE_CONFIRMATION_ENV, value = %raw, "Ignoring invalid boolean"),
            }
        }

        if let Some(raw) = lookup(REMOTE_TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(0) => self.remote_timeout_secs = None,
                Ok(secs) => self.remote_timeout_secs = Some(secs),
                Err(_) => warn!(var = REMOTE_TIMEOUT_ENV, value = %raw, "Ignoring invalid timeout"),
            }
        }

        self
    }

    /// Timeout for one remote call; `0` and unset both mean none
    pub fn remote_timeout(&self) -> Option<Duration> {
        self.remote_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Parse a boolean switch value
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
