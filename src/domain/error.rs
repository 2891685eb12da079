//! Error types for the Green Atlas client.
//!
//! This module defines the centralized error type [`AtlasError`] and a type alias
//! [`Result`] used throughout the crate. Every fetch site converts its failure into
//! one of these variants and stores the rendered message in view-local state, so
//! the `Display` output of the network-facing variants is exactly what the user sees.

use thiserror::Error;

/// The main error type for Green Atlas operations.
///
/// The two network-facing variants follow the API error taxonomy:
///
/// - [`AtlasError::Transport`]: the server was unreachable, or it answered with a
///   non-success status and a body we could not interpret. Carries the status text.
/// - [`AtlasError::Api`]: a non-success status with a structured `{message|error}` body.
///
/// An empty result set is not an error; it is represented by an empty
/// [`ListPage`](crate::domain::ListPage).
///
/// # Examples
///
/// ```
/// use green_atlas::AtlasError;
///
/// let err = AtlasError::Api { status: 404, message: "not found".to_string() };
/// assert_eq!(err.to_string(), "not found");
/// ```
#[derive(Debug, Error)]
pub enum AtlasError {
    /// Network failure or an unparseable error response.
    ///
    /// The string is the transport-level message, usually the HTTP status text.
    #[error("{0}")]
    Transport(String),

    /// The API rejected the request with a structured error body.
    #[error("{message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Message extracted from the `message` or `error` field of the body.
        message: String,
    },

    /// A successful response carried a body that is not valid JSON.
    #[error("Malformed response: {0}")]
    Decode(String),

    /// A map layer download is not a readable zip archive.
    #[error("Invalid KMZ archive: {0}")]
    Archive(String),

    /// The KML document inside a map layer is not well-formed.
    #[error("Invalid KML: {0}")]
    Kml(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    ///
    /// Occurs when the base URL cannot be parsed or the HTTP client cannot be built.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AtlasError {
    /// Returns the HTTP status associated with the error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A specialized `Result` type for Green Atlas operations.
pub type Result<T> = std::result::Result<T, AtlasError>;
