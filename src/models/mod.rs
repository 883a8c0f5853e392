//! Data models for catalog API responses and the player state tree.
//!
//! This module contains the data structures used to represent tokens,
//! catalog listings, loaded contexts, and tracks.

pub mod album;
pub mod category;
pub mod common;
pub mod playlist;
pub mod token;
pub mod track;

// Re-exports for convenience
pub use album::{AlbumSummary, NewReleases};
pub use category::Category;
pub use common::{ArtistRef, Image, Owner, Page};
pub use playlist::{ContextInfo, ContextKind, FeaturedPlaylists, PlaylistSummary, TracksRef};
pub use token::Token;
pub use track::{TrackAlbum, TrackEntry, TrackItem};
