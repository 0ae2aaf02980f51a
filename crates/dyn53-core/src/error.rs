//! Error types for dyn53
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for dyn53 operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for dyn53
#[derive(Error, Debug)]
pub enum Error {
    /// External address lookup errors
    #[error("IP source error: {0}")]
    IpSource(String),

    /// DNS resolution errors (looking up the published address)
    #[error("DNS resolution error: {0}")]
    Resolver(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A value that should have been a dotted-quad IPv4 address was not
    #[error("{0}")]
    InvalidAddress(String),

    /// Matching record not found in any hosted zone
    #[error("{0}")]
    NotFound(String),

    /// Provider-specific error
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create an IP source error
    pub fn ip_source(msg: impl Into<String>) -> Self {
        Self::IpSource(msg.into())
    }

    /// Create a resolver error
    pub fn resolver(msg: impl Into<String>) -> Self {
        Self::Resolver(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid address error
    pub fn invalid_address(msg: impl Into<String>) -> Self {
        Self::InvalidAddress(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = Error::provider("route53", "throttled");
        assert_eq!(err.to_string(), "Provider error (route53): throttled");
    }

    #[test]
    fn test_not_found_is_verbatim() {
        let err = Error::not_found("A matching record for a.example.com was not found.");
        assert_eq!(
            err.to_string(),
            "A matching record for a.example.com was not found."
        );
        assert!(matches!(err, Error::NotFound(_)));
    }
}
