//! Error types and handling for the skycast pipeline

use thiserror::Error;

/// Main error type for the skycast pipeline.
///
/// Only the variants here terminate a run. Selector misses and malformed leaf
/// values are deliberately *not* errors: the extraction engine absorbs them
/// into `None` fields plus a diagnostic and keeps going.
#[derive(Error, Debug)]
pub enum SkycastError {
    /// Transport/DNS/HTTP failure during search or page fetch
    #[error("Network error: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    /// The search response exposed more than one operation key under the
    /// expected namespace; picking one silently would hide an upstream
    /// contract change
    #[error("Ambiguous search envelope: competing keys [{keys}]")]
    AmbiguousEnvelope { keys: String },

    /// The search response did not have the expected envelope shape
    #[error("Search response decode error: {message}")]
    Decode { message: String },

    /// Input validation errors (empty query, zero candidates, bad tool args)
    #[error("Invalid input: {message}")]
    UserInput { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl SkycastError {
    /// Create a new decode error
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a new user-input error
    pub fn user_input<S: Into<String>>(message: S) -> Self {
        Self::UserInput {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SkycastError::Network { .. } => {
                "Unable to reach weather.com. Please check your internet connection.".to_string()
            }
            SkycastError::AmbiguousEnvelope { keys } => format!(
                "The location search API returned an unexpected response (competing keys: {keys}). \
                 The upstream contract may have changed."
            ),
            SkycastError::Decode { message } => {
                format!("The location search API response could not be read: {message}")
            }
            SkycastError::UserInput { message } => format!("Invalid input: {message}"),
            SkycastError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file.")
            }
        }
    }
}
