//! Error types for netbox-core.

use thiserror::Error;

/// Result type alias for netbox-core operations.
pub type Result<T> = std::result::Result<T, NetBoxError>;

/// Errors that can occur while talking to NetBox.
#[derive(Debug, Error)]
pub enum NetBoxError {
    /// The configured base URL could not be parsed.
    #[error("invalid NetBox URL: {0}")]
    InvalidUrl(String),

    /// Transport-level HTTP failure (connection refused, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// NetBox answered with a non-success status.
    #[error("NetBox API returned {status}: {message}")]
    Api {
        /// HTTP status code from NetBox.
        status: u16,
        /// Response body, usually a JSON error detail.
        message: String,
    },
}
