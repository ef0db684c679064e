//! Error types for the DDNS update endpoint
//!
//! Only genuine faults live here. Missing parameters and password
//! mismatches are ordinary responses, produced directly by the HTTP
//! layer, and never pass through this enum.

use thiserror::Error;

/// Result type alias for DDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DDNS update endpoint
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-success status from the DNS provider
    #[error("DNS provider returned status {status}: {message}")]
    Provider {
        /// HTTP status the provider answered with
        status: u16,
        /// Provider's error body, verbatim
        message: String,
    },

    /// Provider response body did not decode into the expected shape
    #[error("Failed to decode provider response: {0}")]
    Parse(String),

    /// Transport-level HTTP failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a provider error carrying the provider's HTTP status
    pub fn provider(status: u16, message: impl Into<String>) -> Self {
        Self::Provider {
            status,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an HTTP transport error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }
}
