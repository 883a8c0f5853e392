//! Events folded into the state tree.

use serde::{Deserialize, Serialize};

use crate::models::{
    Category, ContextInfo, FeaturedPlaylists, NewReleases, PlaylistSummary, Token, TrackEntry,
};

/// Something that happened, described as data.
///
/// Serialized with a `type` tag (`{"type": "PLAY_TRACK", "index": 2}`) so
/// a UI can dispatch events as JSON. Any tag this crate does not know
/// deserializes to [`Event::Unknown`], which leaves state untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Event {
    TokenSet {
        token: Token,
    },
    FeaturedSet {
        featured: FeaturedPlaylists,
    },
    GenresSet {
        genres: Vec<Category>,
    },
    CategoryPlaylistSet {
        #[serde(rename = "categoryPlaylist")]
        category_playlist: Vec<PlaylistSummary>,
    },
    CategoryPlaylistClear,
    NewReleasesSet {
        albums: NewReleases,
    },
    /// A playlist became the playing context.
    PlaylistSet {
        playlist: ContextInfo,
        tracks: Vec<TrackEntry>,
    },
    /// An album became the playing context.
    AlbumUpdate {
        playlist: ContextInfo,
        tracks: Vec<TrackEntry>,
    },
    /// A playlist or album was loaded for preview.
    #[serde(rename = "SET_PLAYLIST_VIEW")]
    PlaylistViewSet {
        playlist: ContextInfo,
        tracks: Vec<TrackEntry>,
    },
    /// Preview the playing context.
    CopyToView,
    /// Make the previewed context the playing one.
    CopyFromView,
    ClearPlaylistView,
    PlayTrack {
        index: usize,
    },
    /// No playable track was found; shows the "no preview" indicator.
    StopPlay,
    ResetNoPreview,
    SetPause,
    Unpause,
    TrackTimeUpdate {
        time: f64,
    },
    #[serde(other)]
    Unknown,
}

impl Event {
    /// The event's wire tag, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Event::TokenSet { .. } => "TOKEN_SET",
            Event::FeaturedSet { .. } => "FEATURED_SET",
            Event::GenresSet { .. } => "GENRES_SET",
            Event::CategoryPlaylistSet { .. } => "CATEGORY_PLAYLIST_SET",
            Event::CategoryPlaylistClear => "CATEGORY_PLAYLIST_CLEAR",
            Event::NewReleasesSet { .. } => "NEW_RELEASES_SET",
            Event::PlaylistSet { .. } => "PLAYLIST_SET",
            Event::AlbumUpdate { .. } => "ALBUM_UPDATE",
            Event::PlaylistViewSet { .. } => "SET_PLAYLIST_VIEW",
            Event::CopyToView => "COPY_TO_VIEW",
            Event::CopyFromView => "COPY_FROM_VIEW",
            Event::ClearPlaylistView => "CLEAR_PLAYLIST_VIEW",
            Event::PlayTrack { .. } => "PLAY_TRACK",
            Event::StopPlay => "STOP_PLAY",
            Event::ResetNoPreview => "RESET_NO_PREVIEW",
            Event::SetPause => "SET_PAUSE",
            Event::Unpause => "UNPAUSE",
            Event::TrackTimeUpdate { .. } => "TRACK_TIME_UPDATE",
            Event::Unknown => "UNKNOWN",
        }
    }

    /// Whether the reducer handles this event.
    pub fn is_known(&self) -> bool {
        !matches!(self, Event::Unknown)
    }
}
