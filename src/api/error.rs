//! Error types exposed by the movie API layer.

use thiserror::Error;

/// Errors surfaced while configuring or communicating with the movie API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The API base URL could not be parsed.
    #[error("API base URL is invalid: {0}")]
    InvalidUrl(String),

    /// Networking failed while calling the API.
    #[error("network error talking to the movie API: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The API returned a non-success status.
    #[error("movie API error: {message}")]
    Api {
        /// Response detail describing the failure.
        message: String,
    },

    /// The API responded with a body that could not be decoded.
    #[error("movie API response could not be decoded: {message}")]
    Decode {
        /// Decoding error detail.
        message: String,
    },

    /// Configuration could not be loaded or applied.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}
