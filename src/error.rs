//! Error types for catalog and playback operations.

use thiserror::Error;

/// Main error type for all player operations.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// HTTP request failed.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The transport could not be built or could not reach the host.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// JSON parsing failed.
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The response body carried an `error` field.
    #[error("API error: {0}")]
    ApiError(String),

    /// An expected field was missing from the response.
    #[error("No data from API: {0}")]
    NoDataApi(String),

    /// No bearer token has been fetched yet.
    #[error("No access token available")]
    MissingToken,
}

/// Result type alias for player operations.
pub type Result<T> = std::result::Result<T, PlayerError>;
