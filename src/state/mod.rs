//! The player state tree and the machinery that updates it.
//!
//! - [`PlayerState`]: everything the UI renders
//! - [`Event`]: the only way state changes
//! - [`reduce`]: pure `(state, event) -> state`
//! - [`Store`]: shared handle committing events and notifying subscribers

mod event;
mod reducer;
mod store;

use serde::Serialize;

use crate::models::{
    Category, ContextInfo, FeaturedPlaylists, NewReleases, PlaylistSummary, Token, TrackEntry,
};

pub use event::Event;
pub use reducer::reduce;
pub use store::{RequestSlot, RequestTicket, Store};

/// Coarse playback state derived from the position flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// Nothing is playing.
    Stopped,
    /// A track is playing.
    Playing,
    /// A track is loaded but paused.
    Paused,
    /// A start found no playable track; the indicator clears shortly.
    NoPreviewPending,
}

/// Session state consumed by the UI.
///
/// Serializes with camelCase keys (`playlistShow`, `songInd`, ...).
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    /// Current bearer credential.
    pub token: Option<Token>,
    /// Featured playlists listing.
    pub featured: Option<FeaturedPlaylists>,
    /// Browse categories.
    pub genres: Vec<Category>,
    /// Playlists of the category being browsed.
    pub category_playlist: Option<Vec<PlaylistSummary>>,
    /// New album releases listing.
    pub new_releases: Option<NewReleases>,
    /// Header of the playing context.
    pub playlist_show: Option<ContextInfo>,
    /// Tracks of the playing context.
    pub tracklist: Vec<TrackEntry>,
    /// Header of the context being previewed.
    pub playlist_view: Option<ContextInfo>,
    /// Tracks of the context being previewed.
    pub tracklist_view: Vec<TrackEntry>,
    /// Index of the current track in `tracklist`.
    pub song_ind: usize,
    /// Position inside the current track, in seconds.
    pub curr_song_pos: f64,
    /// Whether a track has been started.
    pub is_playing: bool,
    /// Whether playback is paused.
    pub paused: bool,
    /// Whether the "no preview available" indicator is showing.
    pub no_preview: bool,
}

impl PlayerState {
    /// Href of the playing context, if one is loaded.
    pub fn current_href(&self) -> Option<&str> {
        self.playlist_show.as_ref().map(|p| p.href.as_str())
    }

    /// Whether `href` is the playing context.
    pub fn is_current(&self, href: &str) -> bool {
        self.current_href() == Some(href)
    }

    /// The track at `song_ind`, if any.
    pub fn current_track(&self) -> Option<&TrackEntry> {
        self.tracklist.get(self.song_ind)
    }

    /// Collapse the playback flags into one status for display.
    pub fn playback_status(&self) -> PlaybackStatus {
        if self.no_preview {
            PlaybackStatus::NoPreviewPending
        } else if !self.is_playing {
            PlaybackStatus::Stopped
        } else if self.paused {
            PlaybackStatus::Paused
        } else {
            PlaybackStatus::Playing
        }
    }
}
