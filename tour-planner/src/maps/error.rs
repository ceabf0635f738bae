//! Mapping service error types.

/// Errors from a mapping service.
#[derive(Debug, thiserror::Error)]
pub enum MapsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", .body.as_deref().map(|b| format!(" (body: {b})")).unwrap_or_default())]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by mapping API")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid or missing API key)")]
    Unauthorized,

    /// Feature not configured or not available
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl MapsError {
    /// Whether retrying the same request may succeed.
    ///
    /// Network failures, rate limiting and server-side errors are transient;
    /// authorization and malformed requests are not.
    pub fn is_transient(&self) -> bool {
        match self {
            MapsError::Http(e) => !e.is_builder() && !e.is_decode(),
            MapsError::RateLimited => true,
            MapsError::Api { status, .. } => *status >= 500,
            MapsError::Json { .. } | MapsError::Unauthorized | MapsError::NotConfigured(_) => {
                false
            }
        }
    }
}
