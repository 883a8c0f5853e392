//! Track-related models.
//!
//! Playlists return their tracks wrapped as `{ track: {...} }` with the
//! album artwork nested inside; albums return bare tracks. Both end up as
//! [`TrackEntry`] in the state tree (see
//! [`normalize_tracks`](crate::converters::normalize_tracks)).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{ArtistRef, Image};

/// Album data nested inside a track.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrackAlbum {
    /// Cover images in various sizes.
    #[serde(default)]
    pub images: Vec<Image>,

    /// Fields this crate does not model, kept as received.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TrackAlbum {
    /// Album carrying only its images.
    pub fn with_images(images: Vec<Image>) -> Self {
        Self {
            images,
            extra: Map::new(),
        }
    }
}

/// Serde glue for fields where an explicit `null` differs from absence.
///
/// Absent deserializes to `None`, `null` to `Some(None)`; paired with
/// `skip_serializing_if = "Option::is_none"` both come back out as received.
mod nullable {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

/// A single track.
///
/// Only the fields the player reads are modeled. Each is optional and
/// skipped when absent, so a row serializes back to what the API sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrackItem {
    /// Catalog ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Track title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// URL of the 30 second preview clip; `Some(None)` for an explicit `null`.
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub preview_url: Option<Option<String>>,

    /// Duration in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,

    /// Performing artists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artists: Option<Vec<ArtistRef>>,

    /// Market availability, present only when the API was asked for it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_playable: Option<bool>,

    /// Album the track belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<TrackAlbum>,

    /// Fields this crate does not model, kept as received.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TrackItem {
    /// Track title, or an empty string when the API sent none.
    pub fn title(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Preview clip URL, if the track has one.
    pub fn preview(&self) -> Option<&str> {
        self.preview_url.as_ref().and_then(Option::as_deref)
    }

    /// Whether the track can be played in the browser.
    ///
    /// Requires a preview clip and no explicit `is_playable: false`.
    pub fn is_playable(&self) -> bool {
        self.preview().is_some() && self.is_playable != Some(false)
    }

    /// Get all artist names joined by a separator.
    pub fn artists_string(&self, separator: &str) -> String {
        self.artists
            .iter()
            .flatten()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Get duration formatted as MM:SS.
    pub fn duration_formatted(&self) -> String {
        let total_seconds = self.duration_ms.unwrap_or(0) / 1000;
        format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
    }
}

/// One row of a tracklist.
///
/// `track` is `None` for entries the API reports as removed or local-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrackEntry {
    /// The track itself.
    #[serde(default)]
    pub track: Option<TrackItem>,

    /// Wrapper fields such as `added_at`, kept as received.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TrackEntry {
    /// Wrap a track with no wrapper fields.
    pub fn new(track: TrackItem) -> Self {
        Self {
            track: Some(track),
            extra: Map::new(),
        }
    }

    /// Whether this row holds a playable track.
    pub fn is_playable(&self) -> bool {
        self.track.as_ref().is_some_and(TrackItem::is_playable)
    }

    /// Track title, or an empty string for removed entries.
    pub fn name(&self) -> &str {
        self.track.as_ref().map(TrackItem::title).unwrap_or("")
    }
}
