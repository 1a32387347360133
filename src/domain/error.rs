//! Error types for the dexplorer plugin.
//!
//! This module defines the centralized error type [`DexError`] and a type alias
//! [`Result`] used throughout the plugin. User-facing failures are eventually
//! collapsed into strings by the repository layer; `DexError` is what flows
//! through the code until that boundary.

use thiserror::Error;

/// The main error type for dexplorer operations.
///
/// Variants cover the remote API (transport status, JSON decoding, resource
/// URLs), the plugin plumbing (request correlation context) and local
/// concerns like themes and configuration.
///
/// # Examples
///
/// ```
/// use dexplorer::DexError;
///
/// let err = DexError::Http { status: 404, message: "Not Found".to_string() };
/// assert_eq!(err.to_string(), "HTTP 404: Not Found");
/// ```
#[derive(Debug, Error)]
pub enum DexError {
    /// The remote API answered with a non-success status.
    ///
    /// Zellij also reports transport failures (DNS, TLS, refused connections)
    /// as a non-success status with the failure text as body.
    #[error("HTTP {status}: {message}")]
    Http {
        /// Status code returned for the request.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The response body was not the JSON shape we expected.
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A catalog entry URL did not end with a numeric id.
    #[error("malformed resource url: {0}")]
    ResourceUrl(String),

    /// A web request context could not be mapped back to the request that
    /// produced it.
    #[error("malformed request context: {0}")]
    Context(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for dexplorer operations.
pub type Result<T> = std::result::Result<T, DexError>;
