//! Bearer credential issued by the token endpoint.

use serde::{Deserialize, Serialize};

/// Access token used to authorize catalog requests.
///
/// Replaced wholesale whenever a new token is fetched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Token {
    /// Opaque credential sent as `Authorization: Bearer <access_token>`.
    pub access_token: String,

    /// Token type, normally `"Bearer"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    /// Lifetime in seconds at the time of issue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

impl Token {
    /// Create a token with only the credential string.
    pub fn new<S: Into<String>>(access_token: S) -> Self {
        Self {
            access_token: access_token.into(),
            ..Default::default()
        }
    }
}
