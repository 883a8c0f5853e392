//! # playstate
//!
//! Client-side state machine for a music player backed by a streaming
//! catalog API.
//!
//! ## Quick Start
//!
//! The easiest way to use this library is through the [`Player`] struct:
//!
//! ```rust,no_run
//! use playstate::{Player, PlayerConfig, StartOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let player = Player::new(PlayerConfig::default())?;
//!
//!     // Every catalog request needs a token first
//!     player.fetch_token().await;
//!
//!     // Play the first playable track of a playlist
//!     let href = "https://api.spotify.com/v1/playlists/37i9dQZF1DXcBWIGoYBM5M";
//!     if let StartOutcome::Started { index } = player.start_playlist(href).await {
//!         let state = player.store().snapshot();
//!         println!("Playing {}", state.tracklist[index].name());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## How state changes
//!
//! Actions on [`Player`] talk to the API and then dispatch one [`Event`].
//! The [`Store`] folds each event into a [`PlayerState`] with the pure
//! [`reduce`] function and notifies subscribers. A UI only ever reads state
//! and calls actions.
//!
//! ## Low-Level APIs
//!
//! - [`CatalogApi`] - typed access to the catalog endpoints
//! - [`converters`] - JSON to model conversion, including [`normalize_tracks`]

pub mod api;
pub mod config;
pub mod converters;
pub mod error;
pub mod models;
mod playback;
mod player;
pub mod state;

// Main interface (recommended)
pub use player::{FetchOutcome, Player};
pub use playback::{previous_playable_track, skip_unavailable_tracks, StartOutcome};

pub use api::CatalogApi;
pub use config::PlayerConfig;
pub use converters::normalize_tracks;
pub use error::{PlayerError, Result};
pub use models::{ContextInfo, ContextKind, Token, TrackEntry, TrackItem};
pub use state::{reduce, Event, PlaybackStatus, PlayerState, Store};
