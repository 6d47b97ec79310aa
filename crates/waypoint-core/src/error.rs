use core::result::Result as CoreResult;
use std::io::Error as IoError;

use reqwest::Error as ReqwestError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;
use toml::de::Error as TomlError;

/// Result type for core operations.
pub type Result<T> = CoreResult<T, Error>;

/// Errors that can occur across the Waypoint service core.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// An HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] ReqwestError),

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] SerdeJsonError),

    /// TOML deserialization failed.
    #[error("TOML deserialization error: {0}")]
    Toml(#[from] TomlError),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A model provider encountered an error.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Required API key was not found.
    #[error("API key not found: {0}")]
    MissingApiKey(String),

    /// Model provider returned an invalid response.
    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),

    /// The requested provider is not registered.
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// The requested provider is registered but not usable right now.
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Embedding generation failed.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Index build or load failed.
    #[error("Index error: {0}")]
    Index(String),

    /// The daily token budget has been spent.
    #[error("Daily token budget exhausted: {used} of {budget} tokens used")]
    BudgetExhausted {
        /// Tokens consumed so far today.
        used: u64,
        /// Configured daily budget.
        budget: u64,
    },

    /// The caller exceeded the per-client request rate.
    #[error("Rate limit exceeded, retry in {retry_after_secs}s")]
    RateLimited {
        /// Seconds until the oldest window entry expires.
        retry_after_secs: u64,
    },

    /// A general error not covered by other variants.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Determines whether this error may succeed if retried.
    ///
    /// Returns `true` for transient errors like network failures or provider
    /// errors.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Provider(_))
    }

    /// Whether this error is a throttle signal the caller should surface as
    /// "try later" rather than a failure.
    pub fn is_throttle(&self) -> bool {
        matches!(
            self,
            Self::BudgetExhausted { .. } | Self::RateLimited { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let error = Error::Config("invalid config".to_owned());
        assert_eq!(error.to_string(), "Configuration error: invalid config");

        let error = Error::UnknownProvider("mistral".to_owned());
        assert_eq!(error.to_string(), "Unknown provider: mistral");

        let error = Error::BudgetExhausted {
            used: 600_000,
            budget: 500_000,
        };
        assert_eq!(
            error.to_string(),
            "Daily token budget exhausted: 600000 of 500000 tokens used"
        );
    }

    #[test]
    fn error_is_retryable() {
        assert!(Error::Provider("timeout".to_owned()).is_retryable());
        assert!(!Error::Config("bad config".to_owned()).is_retryable());
        assert!(!Error::MissingApiKey("KEY".to_owned()).is_retryable());
    }

    #[test]
    fn throttle_errors_are_distinguishable() {
        assert!(Error::RateLimited { retry_after_secs: 30 }.is_throttle());
        assert!(
            Error::BudgetExhausted {
                used: 1,
                budget: 1
            }
            .is_throttle()
        );
        assert!(!Error::Provider("boom".to_owned()).is_throttle());
    }

    #[test]
    fn error_from_io() {
        let io_error = IoError::new(std::io::ErrorKind::NotFound, "file not found");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
    }
}
