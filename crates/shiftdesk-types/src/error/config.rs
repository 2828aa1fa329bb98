//! Configuration-related errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while interpreting configuration values.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ConfigError {
    /// Environment selector is not one of development/test/production
    #[error("Unknown environment: {name}")]
    UnknownEnvironment {
        /// Value that failed to parse
        name: String,
    },
}
