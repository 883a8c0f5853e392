//! Playlist-related models.
//!
//! [`ContextInfo`] is the flat header describing whatever playlist or album
//! is loaded into the player; the remaining types mirror catalog listings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{ArtistRef, Image, Owner, Page};

/// Kind of resource a context was loaded from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    /// An album; its tracks were normalized on load.
    Album,
    /// A playlist; its tracks were kept as received.
    #[default]
    Playlist,
}

impl ContextKind {
    /// Map the API's `type` string; anything but `"album"` is a playlist.
    pub fn from_api(value: &str) -> Self {
        if value == "album" {
            ContextKind::Album
        } else {
            ContextKind::Playlist
        }
    }

    /// Get the API's `type` string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextKind::Album => "album",
            ContextKind::Playlist => "playlist",
        }
    }
}

/// Header of a loaded playlist or album.
///
/// `href` is the cache key: loading a context whose href is already current
/// is skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContextInfo {
    /// API URL the context was loaded from.
    pub href: String,

    /// First (largest) cover image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Display name.
    pub name: String,

    /// Owner display name (playlists only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Free-text description (playlists only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Resource kind.
    #[serde(rename = "type")]
    pub kind: ContextKind,

    /// Album artists (albums only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artists: Vec<ArtistRef>,

    /// Release date as reported, e.g. `"2019-05-03"` (albums only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

impl ContextInfo {
    /// Whether this context was loaded from `href`.
    pub fn is(&self, href: &str) -> bool {
        self.href == href
    }
}

/// Reference to a playlist's track listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TracksRef {
    /// API URL of the track listing.
    #[serde(default)]
    pub href: Option<String>,

    /// Number of tracks.
    #[serde(default)]
    pub total: u32,
}

/// Playlist as it appears in browse listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlaylistSummary {
    /// Catalog ID.
    #[serde(default)]
    pub id: String,

    /// Playlist name.
    #[serde(default)]
    pub name: String,

    /// API URL; pass to [`Player::start_playlist`](crate::Player::start_playlist).
    #[serde(default)]
    pub href: String,

    /// Playlist description.
    #[serde(default)]
    pub description: Option<String>,

    /// Cover images.
    #[serde(default)]
    pub images: Vec<Image>,

    /// Playlist owner.
    #[serde(default)]
    pub owner: Option<Owner>,

    /// Track listing reference.
    #[serde(default)]
    pub tracks: Option<TracksRef>,

    /// Fields this crate does not model, kept as received.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of the featured playlists endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeaturedPlaylists {
    /// Editorial headline, e.g. "Monday morning music".
    #[serde(default)]
    pub message: Option<String>,

    /// The featured playlists.
    #[serde(default)]
    pub playlists: Page<PlaylistSummary>,
}
