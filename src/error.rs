//! Error types for radarr-autograb
//!
//! Every workflow failure is reported once through the event channel before
//! the corresponding error is returned; the returned error is the
//! authoritative termination signal.

use thiserror::Error;

/// Result type alias for radarr-autograb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for radarr-autograb
#[derive(Debug, Error)]
pub enum Error {
    /// Release listing failed or stayed empty after the retry budget
    #[error("error fetching releases: {message}")]
    Fetch {
        /// The underlying cause's message
        message: String,
    },

    /// Selection yielded no release; the grab stage was never invoked
    #[error("no suitable release found")]
    NoSuitableRelease,

    /// The grab command was rejected by Radarr
    #[error("failed to grab release: {title}")]
    GrabRejected {
        /// Title of the release that was rejected
        title: String,
    },

    /// The grab command failed outright
    #[error("error during grabbing release: {message}")]
    Grab {
        /// The underlying cause's message
        message: String,
    },

    /// Network error from the HTTP client
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "radarr.api_key")
        key: Option<String>,
    },
}
