//! Endpoint and timing configuration.

use std::time::Duration;

/// Token-issuing endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://spotify.jenovs.com";

/// Versioned catalog API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Page size requested from list endpoints.
pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// How long the "no preview" indicator stays up.
pub const DEFAULT_NO_PREVIEW_RESET: Duration = Duration::from_secs(2);

const DEFAULT_USER_AGENT: &str = concat!("playstate/", env!("CARGO_PKG_VERSION"));

/// Settings shared by the API client and the playback orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    /// URL of the token-issuing endpoint.
    pub token_url: String,
    /// Catalog API root, without a trailing slash.
    pub api_base_url: String,
    /// `limit` query parameter for category and new-release listings.
    pub list_limit: u32,
    /// Delay before a pending "no preview" indicator is cleared.
    pub no_preview_reset: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            list_limit: DEFAULT_LIST_LIMIT,
            no_preview_reset: DEFAULT_NO_PREVIEW_RESET,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl PlayerConfig {
    /// Build a catalog URL from a path relative to the API root.
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
