//! Routing client error types.

/// Errors from the routing service client.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Service returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Service answered but reported a routing failure
    #[error("routing service returned {code}: {message}")]
    Service { code: String, message: String },

    /// Rate limited by the service
    #[error("rate limited by routing service")]
    RateLimited,

    /// Client not usable (bad configuration, missing mock data)
    #[error("not configured: {0}")]
    NotConfigured(String),
}
