//! Album-related models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{ArtistRef, Image, Page};

/// Album as it appears in browse listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AlbumSummary {
    /// Catalog ID.
    #[serde(default)]
    pub id: String,

    /// Album title.
    #[serde(default)]
    pub name: String,

    /// API URL; pass to [`Player::start_album`](crate::Player::start_album).
    #[serde(default)]
    pub href: String,

    /// Album type: "album", "single", or "compilation".
    #[serde(default)]
    pub album_type: Option<String>,

    /// Release date as reported.
    #[serde(default)]
    pub release_date: Option<String>,

    /// Cover images in various sizes.
    #[serde(default)]
    pub images: Vec<Image>,

    /// Album artists.
    #[serde(default)]
    pub artists: Vec<ArtistRef>,

    /// Fields this crate does not model, kept as received.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AlbumSummary {
    /// Get all artist names joined by a separator.
    pub fn artists_string(&self, separator: &str) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Response of the new releases endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewReleases {
    /// Newly released albums.
    #[serde(default)]
    pub albums: Page<AlbumSummary>,
}
