use super::{Event, PlayerState};

/// Apply `event` to `state`.
///
/// Pure and deterministic. Each event writes only its own fields; every
/// other field is carried over from `state`. [`Event::Unknown`] returns
/// `state` unchanged.
pub fn reduce(state: PlayerState, event: Event) -> PlayerState {
    match event {
        Event::TokenSet { token } => PlayerState {
            token: Some(token),
            ..state
        },
        Event::FeaturedSet { featured } => PlayerState {
            featured: Some(featured),
            ..state
        },
        Event::GenresSet { genres } => PlayerState { genres, ..state },
        Event::CategoryPlaylistSet { category_playlist } => PlayerState {
            category_playlist: Some(category_playlist),
            ..state
        },
        Event::CategoryPlaylistClear => PlayerState {
            category_playlist: None,
            ..state
        },
        Event::NewReleasesSet { albums } => PlayerState {
            new_releases: Some(albums),
            ..state
        },
        Event::PlaylistSet { playlist, tracks } | Event::AlbumUpdate { playlist, tracks } => {
            PlayerState {
                playlist_show: Some(playlist),
                tracklist: tracks,
                ..state
            }
        }
        Event::PlaylistViewSet { playlist, tracks } => PlayerState {
            playlist_view: Some(playlist),
            tracklist_view: tracks,
            ..state
        },
        Event::CopyToView => PlayerState {
            playlist_view: state.playlist_show.clone(),
            tracklist_view: state.tracklist.clone(),
            ..state
        },
        Event::CopyFromView => PlayerState {
            playlist_show: state.playlist_view.clone(),
            tracklist: state.tracklist_view.clone(),
            ..state
        },
        Event::ClearPlaylistView => PlayerState {
            playlist_view: None,
            tracklist_view: Vec::new(),
            ..state
        },
        Event::PlayTrack { index } => PlayerState {
            song_ind: index,
            curr_song_pos: 0.0,
            is_playing: true,
            paused: false,
            no_preview: false,
            ..state
        },
        Event::StopPlay => PlayerState {
            is_playing: false,
            no_preview: true,
            ..state
        },
        Event::ResetNoPreview => PlayerState {
            no_preview: false,
            ..state
        },
        Event::SetPause => PlayerState {
            paused: true,
            ..state
        },
        Event::Unpause => PlayerState {
            paused: false,
            ..state
        },
        Event::TrackTimeUpdate { time } => PlayerState {
            curr_song_pos: time,
            ..state
        },
        Event::Unknown => state,
    }
}
