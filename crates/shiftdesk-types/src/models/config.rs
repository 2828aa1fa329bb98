//! API environment and connection settings.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Deployment the client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Test,
    Production,
}

impl Environment {
    pub const ALL: [Environment; 3] =
        [Environment::Development, Environment::Test, Environment::Production];

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::UnknownEnvironment { name: s.to_string() }),
        }
    }
}

/// Headers sent with every request unless overridden per call.
pub fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Accept".to_string(), "application/json".to_string()),
        ("Accept-Language".to_string(), "tr-TR".to_string()),
    ])
}

/// Resolved connection settings for one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub environment: Environment,
    /// Base URL without trailing slash
    pub base_url: String,
    /// Hard per-request timeout in milliseconds (always > 0)
    pub timeout_ms: u64,
    pub default_headers: BTreeMap<String, String>,
}

impl ApiConfig {
    pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

    /// Build a config with the standard headers. A zero timeout falls back to the default.
    pub fn new(environment: Environment, base_url: impl Into<String>, timeout_ms: u64) -> Self {
        let base_url: String = base_url.into();
        Self {
            environment,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_ms: if timeout_ms == 0 { Self::DEFAULT_TIMEOUT_MS } else { timeout_ms },
            default_headers: default_headers(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// `base_url + path`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
