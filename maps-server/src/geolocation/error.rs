//! Geolocation error types.

use crate::domain::InvalidCoordinates;

/// Errors that can occur when looking up the user's position.
#[derive(Debug, thiserror::Error)]
pub enum GeolocationError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Service answered without a usable position
    #[error("lookup failed: {reason}")]
    NoPosition { reason: String },

    /// Service returned coordinates out of range
    #[error(transparent)]
    Coordinates(#[from] InvalidCoordinates),
}
