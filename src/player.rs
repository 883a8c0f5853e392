//! High-level player interface.
//!
//! [`Player`] is what a UI talks to: it owns the [`CatalogApi`] and a
//! [`Store`], exposes one method per user action, and turns API results into
//! events.
//!
//! Failures never reach the caller as errors. Each action logs the failure
//! with its operation name and parameter and leaves the state as it was; the
//! returned [`FetchOutcome`] says what happened for callers that care.

use std::future::Future;
use std::sync::Mutex;

use futures_util::future::join3;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::api::{CatalogApi, HttpTransport, LoadedContext, Transport};
use crate::config::PlayerConfig;
use crate::error::{PlayerError, Result};
use crate::models::Token;
use crate::state::{Event, RequestSlot, RequestTicket, Store};

/// What a fetch action did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was committed.
    Applied,
    /// The resource was already loaded; no request was made.
    AlreadyCurrent,
    /// A newer request for the same data started first; the response was
    /// dropped.
    Superseded,
    /// The request failed and was logged; state is unchanged.
    Failed,
}

impl FetchOutcome {
    /// Whether the requested data is now in the state.
    pub fn is_loaded(&self) -> bool {
        matches!(self, FetchOutcome::Applied | FetchOutcome::AlreadyCurrent)
    }
}

/// Client-side music player.
///
/// # Example
///
/// ```rust,no_run
/// use playstate::{Player, PlayerConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let player = Player::new(PlayerConfig::default())?;
///     player.fetch_token().await;
///     player.refresh_catalog().await;
///
///     let featured = player.store().read(|s| s.featured.clone());
///     if let Some(first) = featured.and_then(|f| f.playlists.items.into_iter().next()) {
///         player.start_playlist(&first.href).await;
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Player<T = HttpTransport> {
    pub(crate) api: CatalogApi<T>,
    pub(crate) store: Store,
    /// Timer that will clear the "no preview" indicator.
    pub(crate) pending_reset: Mutex<Option<JoinHandle<()>>>,
}

impl Player<HttpTransport> {
    /// Create a player that talks to the real endpoints.
    pub fn new(config: PlayerConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config.user_agent)?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> Player<T> {
    /// Create a player over a custom transport with a fresh store.
    pub fn with_transport(transport: T, config: PlayerConfig) -> Self {
        Self::with_store(transport, config, Store::new())
    }

    /// Create a player that writes into an existing store.
    pub fn with_store(transport: T, config: PlayerConfig, store: Store) -> Self {
        Self {
            api: CatalogApi::new(transport, config),
            store,
            pending_reset: Mutex::new(None),
        }
    }

    /// The state store; subscribe to it to render.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The underlying API client.
    pub fn api(&self) -> &CatalogApi<T> {
        &self.api
    }

    /// Settings this player was built with.
    pub fn config(&self) -> &PlayerConfig {
        self.api.config()
    }

    fn token(&self) -> Result<Token> {
        self.store
            .read(|s| s.token.clone())
            .ok_or(PlayerError::MissingToken)
    }

    fn commit(&self, ticket: RequestTicket, event: Event) -> FetchOutcome {
        if self.store.dispatch_if_latest(ticket, event) {
            FetchOutcome::Applied
        } else {
            FetchOutcome::Superseded
        }
    }

    /// Run an authorized fetch and commit its result.
    ///
    /// The ticket is taken before the request goes out, so a later call in
    /// the same slot always wins even if it resolves first.
    async fn load<V, Fut>(
        &self,
        operation: &'static str,
        param: &str,
        slot: RequestSlot,
        fetch: impl FnOnce(Token) -> Fut,
        into_event: impl FnOnce(V) -> Event,
    ) -> FetchOutcome
    where
        Fut: Future<Output = Result<V>>,
    {
        let token = match self.token() {
            Ok(token) => token,
            Err(e) => {
                error!(operation, param, error = %e, "Fetch skipped");
                return FetchOutcome::Failed;
            }
        };

        let ticket = self.store.begin_request(slot);
        match fetch(token).await {
            Ok(value) => self.commit(ticket, into_event(value)),
            Err(e) => {
                error!(operation, param, error = %e, "Fetch failed");
                FetchOutcome::Failed
            }
        }
    }

    // ==================
    // TOKEN
    // ==================

    /// Fetch a bearer token and store it.
    pub async fn fetch_token(&self) -> FetchOutcome {
        let ticket = self.store.begin_request(RequestSlot::Token);
        match self.api.get_token().await {
            Ok(token) => {
                info!("Fetched access token");
                self.commit(ticket, Event::TokenSet { token })
            }
            Err(e) => {
                error!(operation = "fetch_token", error = %e, "Error fetching token");
                FetchOutcome::Failed
            }
        }
    }

    // ==================
    // CATALOG
    // ==================

    /// Fetch the featured playlists.
    pub async fn fetch_featured(&self) -> FetchOutcome {
        self.load(
            "fetch_featured",
            "",
            RequestSlot::Featured,
            |token| async move { self.api.get_featured(&token).await },
            |featured| Event::FeaturedSet { featured },
        )
        .await
    }

    /// Fetch the browse categories.
    pub async fn fetch_genres(&self) -> FetchOutcome {
        self.load(
            "fetch_genres",
            "",
            RequestSlot::Genres,
            |token| async move { self.api.get_categories(&token).await },
            |genres| Event::GenresSet { genres },
        )
        .await
    }

    /// Fetch the playlists of one category.
    pub async fn fetch_category_playlist(&self, category_id: &str) -> FetchOutcome {
        self.load(
            "fetch_category_playlist",
            category_id,
            RequestSlot::CategoryPlaylist,
            |token| async move { self.api.get_category_playlists(&token, category_id).await },
            |category_playlist| Event::CategoryPlaylistSet { category_playlist },
        )
        .await
    }

    /// Forget the category playlists, including any still being fetched.
    pub fn clear_category_playlist(&self) {
        self.store.cancel_requests(RequestSlot::CategoryPlaylist);
        self.store.dispatch(Event::CategoryPlaylistClear);
    }

    /// Fetch the new releases.
    pub async fn fetch_new_releases(&self) -> FetchOutcome {
        self.load(
            "fetch_new_releases",
            "",
            RequestSlot::NewReleases,
            |token| async move { self.api.get_new_releases(&token).await },
            |albums| Event::NewReleasesSet { albums },
        )
        .await
    }

    /// Fetch featured playlists, genres and new releases concurrently.
    pub async fn refresh_catalog(&self) -> (FetchOutcome, FetchOutcome, FetchOutcome) {
        join3(
            self.fetch_featured(),
            self.fetch_genres(),
            self.fetch_new_releases(),
        )
        .await
    }

    // ==================
    // CONTEXTS
    // ==================

    /// Load an album as the playing context.
    ///
    /// Does nothing, not even a request, when `href` is already loaded.
    pub async fn fetch_album(&self, href: &str) -> FetchOutcome {
        if self.store.read(|s| s.is_current(href)) {
            debug!(href, "Album already loaded");
            return FetchOutcome::AlreadyCurrent;
        }

        self.load(
            "fetch_album",
            href,
            RequestSlot::Playing,
            |token| async move { self.api.get_album(&token, href).await },
            |loaded: LoadedContext| {
                info!(href, tracks = loaded.tracks.len(), "Loaded album");
                Event::AlbumUpdate {
                    playlist: loaded.info,
                    tracks: loaded.tracks,
                }
            },
        )
        .await
    }

    /// Load a playlist as the playing context.
    pub async fn fetch_playlist(&self, href: &str) -> FetchOutcome {
        self.load(
            "fetch_playlist",
            href,
            RequestSlot::Playing,
            |token| async move { self.api.get_playlist(&token, href).await },
            |loaded: LoadedContext| {
                info!(href, tracks = loaded.tracks.len(), "Loaded playlist");
                Event::PlaylistSet {
                    playlist: loaded.info,
                    tracks: loaded.tracks,
                }
            },
        )
        .await
    }

    /// Load a playlist or album for preview without touching playback.
    ///
    /// When `href` is the playing context it is copied into the view
    /// instead of being fetched again.
    pub async fn fetch_playlist_view(&self, href: &str) -> FetchOutcome {
        if self.store.read(|s| s.is_current(href)) {
            self.store.cancel_requests(RequestSlot::View);
            self.store.dispatch(Event::CopyToView);
            return FetchOutcome::AlreadyCurrent;
        }

        self.load(
            "fetch_playlist_view",
            href,
            RequestSlot::View,
            |token| async move { self.api.get_context(&token, href).await },
            |loaded: LoadedContext| Event::PlaylistViewSet {
                playlist: loaded.info,
                tracks: loaded.tracks,
            },
        )
        .await
    }

    /// Close the preview, including any still being fetched.
    pub fn clear_playlist_view(&self) {
        self.store.cancel_requests(RequestSlot::View);
        self.store.dispatch(Event::ClearPlaylistView);
    }
}
