//! Startup configuration errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while assembling configuration at startup.
///
/// None of these are recoverable: the process refuses to start.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ConfigError {
    /// Required credential is absent or empty
    #[error("{key} environment variable is not set.")]
    MissingCredential {
        /// Environment variable that was expected
        key: String,
    },

    /// Optional setting present but unusable
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// Environment variable holding the bad value
        key: String,
        /// Description of the problem
        message: String,
    },
}

impl ConfigError {
    pub fn missing(key: &str) -> Self {
        Self::MissingCredential { key: key.to_string() }
    }

    pub fn invalid(key: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue { key: key.to_string(), message: message.into() }
    }
}
