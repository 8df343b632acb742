//! Configuration errors
//!
//! Extraction, offset conversion and rendering never fail. The only errors
//! callers see come from building a renderer configuration.

use std::fmt;

/// Error loading or validating [`AutolinkOptions`](super::AutolinkOptions)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The options JSON could not be parsed
    InvalidJson {
        /// Parser message
        message: String,
    },
    /// A wrapper tag is not a plain element name
    InvalidTagName {
        /// The rejected tag
        tag: String,
    },
}

impl ConfigError {
    /// Create an invalid tag name error
    pub fn invalid_tag(tag: impl Into<String>) -> Self {
        ConfigError::InvalidTagName { tag: tag.into() }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidJson { message } => {
                write!(f, "Invalid autolink options JSON: {}", message)
            }
            ConfigError::InvalidTagName { tag } => {
                write!(f, "Invalid wrapper tag name: '{}'", tag)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::InvalidJson {
            message: err.to_string(),
        }
    }
}
