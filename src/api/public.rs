//! Catalog API client.
//!
//! Wraps the token endpoint and the browse/album/playlist endpoints of the
//! catalog API. Every method returns a typed [`Result`]; deciding what to do
//! with a failure is left to the caller (see [`Player`](crate::Player)).

use serde_json::Value;
use tracing::{debug, error};

use super::transport::Transport;
use crate::config::PlayerConfig;
use crate::converters;
use crate::error::{PlayerError, Result};
use crate::models::{
    Category, ContextInfo, ContextKind, FeaturedPlaylists, NewReleases, PlaylistSummary, Token,
    TrackEntry,
};

/// Header and tracklist of a freshly fetched playlist or album.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedContext {
    /// Flat header for the state tree.
    pub info: ContextInfo,
    /// Tracks in playlist shape.
    pub tracks: Vec<TrackEntry>,
}

/// Catalog API client.
///
/// # Example
///
/// ```rust,no_run
/// use playstate::{api::HttpTransport, CatalogApi, PlayerConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = PlayerConfig::default();
///     let api = CatalogApi::new(HttpTransport::new(&config.user_agent)?, config);
///     let token = api.get_token().await?;
///     let genres = api.get_categories(&token).await?;
///     println!("{} genres", genres.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CatalogApi<T> {
    transport: T,
    config: PlayerConfig,
}

/// Turn an in-body `error` field into an [`PlayerError::ApiError`].
///
/// The catalog nests the text under `error.message`; the token endpoint
/// sends `error` as a plain string.
fn check_api_error(data: &Value) -> Result<()> {
    let Some(error) = data.get("error") else {
        return Ok(());
    };

    let message = error
        .get("message")
        .and_then(|m| m.as_str())
        .or_else(|| error.as_str())
        .unwrap_or("Unknown error");
    error!("Catalog API error: {}", message);
    Err(PlayerError::ApiError(message.to_string()))
}

impl<T: Transport> CatalogApi<T> {
    /// Create a client over `transport`.
    pub fn new(transport: T, config: PlayerConfig) -> Self {
        Self { transport, config }
    }

    /// Settings this client was built with.
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Make an authorized GET request and reject in-body errors.
    async fn get_api(&self, url: &str, token: &Token) -> Result<Value> {
        let data = self
            .transport
            .get_json(url, Some(&token.access_token))
            .await?;
        check_api_error(&data)?;
        Ok(data)
    }

    /// Fetch a fresh bearer token from the token endpoint.
    pub async fn get_token(&self) -> Result<Token> {
        let data = self.transport.get_json(&self.config.token_url, None).await?;
        check_api_error(&data)?;
        converters::parse_token(&data)
    }

    /// Get the featured playlists.
    pub async fn get_featured(&self, token: &Token) -> Result<FeaturedPlaylists> {
        let url = self.config.api_url("browse/featured-playlists");
        let data = self.get_api(&url, token).await?;
        converters::parse_featured(&data)
    }

    /// Get the browse categories (genres).
    pub async fn get_categories(&self, token: &Token) -> Result<Vec<Category>> {
        let url = self
            .config
            .api_url(&format!("browse/categories?limit={}", self.config.list_limit));
        let data = self.get_api(&url, token).await?;
        converters::parse_categories(&data)
    }

    /// Get the playlists of one category.
    pub async fn get_category_playlists(
        &self,
        token: &Token,
        category_id: &str,
    ) -> Result<Vec<PlaylistSummary>> {
        let url = self.config.api_url(&format!(
            "browse/categories/{}/playlists?limit={}",
            category_id, self.config.list_limit
        ));
        let data = self.get_api(&url, token).await?;
        converters::parse_category_playlists(&data)
    }

    /// Get the new album releases.
    pub async fn get_new_releases(&self, token: &Token) -> Result<NewReleases> {
        let url = self
            .config
            .api_url(&format!("browse/new-releases?limit={}", self.config.list_limit));
        let data = self.get_api(&url, token).await?;
        converters::parse_new_releases(&data)
    }

    /// Get an album by its API URL, with tracks normalized to playlist shape.
    pub async fn get_album(&self, token: &Token, href: &str) -> Result<LoadedContext> {
        self.get_context_as(token, href, ContextKind::Album).await
    }

    /// Get a playlist by its API URL, with tracks as received.
    pub async fn get_playlist(&self, token: &Token, href: &str) -> Result<LoadedContext> {
        self.get_context_as(token, href, ContextKind::Playlist).await
    }

    /// Get a playlist or album, deciding by the body's `type` field.
    pub async fn get_context(&self, token: &Token, href: &str) -> Result<LoadedContext> {
        let data = self.get_api(href, token).await?;
        let info = converters::parse_context(href, &data, ContextKind::Playlist)?;
        let tracks = converters::parse_context_tracks(&data, info.kind)?;
        debug!("Fetched {} tracks for {} {}", tracks.len(), info.kind.as_str(), href);
        Ok(LoadedContext { info, tracks })
    }

    async fn get_context_as(
        &self,
        token: &Token,
        href: &str,
        kind: ContextKind,
    ) -> Result<LoadedContext> {
        let data = self.get_api(href, token).await?;
        let mut info = converters::parse_context(href, &data, kind)?;
        info.kind = kind;
        let tracks = converters::parse_context_tracks(&data, kind)?;
        debug!("Fetched {} tracks for {} {}", tracks.len(), kind.as_str(), href);
        Ok(LoadedContext { info, tracks })
    }
}
