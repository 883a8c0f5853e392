//! Playback orchestration.
//!
//! Starting playback always goes the same way: make sure the right context
//! is loaded, find the first playable track from some index, then either
//! play it or flash the "no preview" indicator.

use std::sync::{MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::api::Transport;
use crate::models::{ContextKind, TrackEntry};
use crate::player::{FetchOutcome, Player};
use crate::state::{Event, RequestSlot};

/// Result of a start/skip action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The track at `index` is now playing.
    Started { index: usize },
    /// Nothing playable was found; the "no preview" indicator is showing.
    NoPlayableTrack,
    /// The context could not be loaded, so nothing was played.
    NotLoaded(FetchOutcome),
}

/// Index of the first playable track at or after `start`.
///
/// Returns `None` when no playable track exists before the end of the list.
pub fn skip_unavailable_tracks(tracklist: &[TrackEntry], start: usize) -> Option<usize> {
    tracklist
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, entry)| entry.is_playable())
        .map(|(i, _)| i)
}

/// Index of the last playable track before `end`.
pub fn previous_playable_track(tracklist: &[TrackEntry], end: usize) -> Option<usize> {
    tracklist
        .get(..end.min(tracklist.len()))?
        .iter()
        .rposition(TrackEntry::is_playable)
}

impl<T: Transport> Player<T> {
    fn lock_pending_reset(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending_reset
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn cancel_no_preview_reset(&self) {
        if let Some(handle) = self.lock_pending_reset().take() {
            handle.abort();
        }
    }

    fn schedule_no_preview_reset(&self) {
        let store = self.store.clone();
        let delay = self.config().no_preview_reset;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            store.dispatch(Event::ResetNoPreview);
        });

        if let Some(previous) = self.lock_pending_reset().replace(handle) {
            previous.abort();
        }
    }

    /// Play the resolved track, or show "no preview" when there is none.
    ///
    /// Any reset still pending from an earlier "no preview" is cancelled
    /// first, so it cannot clear a newer indicator.
    fn play(&self, index: Option<usize>) -> StartOutcome {
        self.cancel_no_preview_reset();

        match index {
            Some(index) => {
                self.store.dispatch(Event::PlayTrack { index });
                StartOutcome::Started { index }
            }
            None => {
                info!("No playable track found");
                self.store.dispatch(Event::StopPlay);
                self.schedule_no_preview_reset();
                StartOutcome::NoPlayableTrack
            }
        }
    }

    fn play_from(&self, start: usize) -> StartOutcome {
        let index = self
            .store
            .read(|s| skip_unavailable_tracks(&s.tracklist, start));
        self.play(index)
    }

    async fn start_context(&self, href: &str, kind: ContextKind) -> StartOutcome {
        if !self.store.read(|s| s.is_current(href)) {
            let outcome = match kind {
                ContextKind::Album => self.fetch_album(href).await,
                ContextKind::Playlist => self.fetch_playlist(href).await,
            };
            if !outcome.is_loaded() {
                warn!(href, ?outcome, "Not starting {}", kind.as_str());
                return StartOutcome::NotLoaded(outcome);
            }
        }

        self.play_from(0)
    }

    /// Load the playlist if needed and play its first playable track.
    pub async fn start_playlist(&self, href: &str) -> StartOutcome {
        self.start_context(href, ContextKind::Playlist).await
    }

    /// Load the album if needed and play its first playable track.
    pub async fn start_album(&self, href: &str) -> StartOutcome {
        self.start_context(href, ContextKind::Album).await
    }

    /// Make the previewed context the playing one and play from `index`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start_play_from_tracklist(&self, index: usize) -> StartOutcome {
        self.store.cancel_requests(RequestSlot::Playing);
        self.store.dispatch(Event::CopyFromView);
        self.play_from(index)
    }

    /// Play the next playable track after the current one.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn next_track(&self) -> StartOutcome {
        let start = self.store.read(|s| s.song_ind.saturating_add(1));
        self.play_from(start)
    }

    /// Play the nearest playable track before the current one.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn previous_track(&self) -> StartOutcome {
        let index = self
            .store
            .read(|s| previous_playable_track(&s.tracklist, s.song_ind));
        self.play(index)
    }

    /// Mark the current track as paused; the playing flag is left alone.
    pub fn pause(&self) {
        self.store.dispatch(Event::SetPause);
    }

    /// Resume the current track.
    pub fn unpause(&self) {
        self.store.dispatch(Event::Unpause);
    }

    /// Record the playback position reported by the audio element.
    pub fn update_track_time(&self, seconds: f64) {
        self.store.dispatch(Event::TrackTimeUpdate { time: seconds });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::mock::MockTransport;
    use crate::config::PlayerConfig;
    use crate::models::{ContextInfo, Token, TrackItem};
    use crate::state::{PlaybackStatus, PlayerState, Store};
    use serde_json::json;
    use std::time::Duration;

    const BASE: &str = "https://api.spotify.com/v1";

    fn entry(playable: bool) -> TrackEntry {
        TrackEntry::new(TrackItem {
            preview_url: Some(playable.then(|| "https://p.scdn.co/mp3-preview/x".to_string())),
            ..Default::default()
        })
    }

    fn entries(flags: &[bool]) -> Vec<TrackEntry> {
        flags.iter().map(|&f| entry(f)).collect()
    }

    fn player_with(state: PlayerState) -> (MockTransport, Player<MockTransport>) {
        let transport = MockTransport::new();
        let player = Player::with_store(
            transport.clone(),
            PlayerConfig::default(),
            Store::with_state(PlayerState {
                token: Some(Token::new("abc")),
                ..state
            }),
        );
        (transport, player)
    }

    fn viewing(flags: &[bool]) -> PlayerState {
        PlayerState {
            playlist_view: Some(ContextInfo {
                href: "view".to_string(),
                ..Default::default()
            }),
            tracklist_view: entries(flags),
            ..Default::default()
        }
    }

    #[test]
    fn test_skip_unavailable_tracks() {
        let list = entries(&[false, false, true, false, true]);
        assert_eq!(skip_unavailable_tracks(&list, 0), Some(2));
        assert_eq!(skip_unavailable_tracks(&list, 2), Some(2));
        assert_eq!(skip_unavailable_tracks(&list, 3), Some(4));
        assert_eq!(skip_unavailable_tracks(&list, 5), None);
        assert_eq!(skip_unavailable_tracks(&entries(&[false, false]), 0), None);
        assert_eq!(skip_unavailable_tracks(&[], 0), None);
    }

    #[test]
    fn test_previous_playable_track() {
        let list = entries(&[true, false, false, true]);
        assert_eq!(previous_playable_track(&list, 3), Some(0));
        assert_eq!(previous_playable_track(&list, 0), None);
        assert_eq!(previous_playable_track(&list, 10), Some(3));
    }

    #[tokio::test]
    async fn test_start_from_tracklist_skips_unavailable() {
        let (_, player) = player_with(viewing(&[false, false, true]));

        assert_eq!(
            player.start_play_from_tracklist(0),
            StartOutcome::Started { index: 2 }
        );

        let state = player.store().snapshot();
        assert_eq!(state.song_ind, 2);
        assert_eq!(state.playback_status(), PlaybackStatus::Playing);
        assert_eq!(state.tracklist, state.tracklist_view);
        assert_eq!(state.current_href(), Some("view"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_playable_track_stops_then_resets() {
        let (_, player) = player_with(viewing(&[false, false]));
        let mut rx = player.store().subscribe();

        assert_eq!(
            player.start_play_from_tracklist(0),
            StartOutcome::NoPlayableTrack
        );
        let state = rx.borrow_and_update().clone();
        assert!(state.no_preview);
        assert!(!state.is_playing);
        assert_eq!(state.playback_status(), PlaybackStatus::NoPreviewPending);

        tokio::time::sleep(Duration::from_millis(1900)).await;
        assert!(player.store().snapshot().no_preview);

        tokio::time::sleep(Duration::from_millis(200)).await;
        let state = player.store().snapshot();
        assert!(!state.no_preview);
        assert_eq!(state.playback_status(), PlaybackStatus::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_no_preview_cancels_stale_reset() {
        let (_, player) = player_with(viewing(&[false]));

        player.start_play_from_tracklist(0);
        tokio::time::sleep(Duration::from_millis(1500)).await;
        player.start_play_from_tracklist(0);

        // The first timer would have fired at 2000ms.
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(player.store().snapshot().no_preview);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(!player.store().snapshot().no_preview);
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_cancels_pending_reset() {
        let (_, player) = player_with(viewing(&[true, false, true]));

        assert_eq!(
            player.start_play_from_tracklist(0),
            StartOutcome::Started { index: 0 }
        );
        assert_eq!(player.next_track(), StartOutcome::Started { index: 2 });

        assert_eq!(player.next_track(), StartOutcome::NoPlayableTrack);
        assert!(player.lock_pending_reset().is_some());
        assert!(player.store().snapshot().no_preview);

        assert_eq!(player.previous_track(), StartOutcome::Started { index: 0 });
        assert!(player.lock_pending_reset().is_none());
        assert!(!player.store().snapshot().no_preview);

        let rx = player.store().subscribe();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_start_playlist_fetches_only_when_not_current() {
        let href = format!("{}/playlists/p1", BASE);
        let (transport, player) = player_with(PlayerState::default());
        transport.respond(
            &href,
            json!({
                "type": "playlist",
                "name": "Mix",
                "images": [],
                "tracks": {"items": [
                    {"track": {"name": "gone", "preview_url": null}},
                    {"track": {"name": "here", "preview_url": "p"}}
                ]}
            }),
        );

        assert_eq!(
            player.start_playlist(&href).await,
            StartOutcome::Started { index: 1 }
        );
        assert_eq!(transport.call_count(), 1);
        assert_eq!(
            player.store().read(|s| s.current_track().map(|t| t.name().to_string())),
            Some("here".to_string())
        );

        player.update_track_time(42.0);
        assert_eq!(
            player.start_playlist(&href).await,
            StartOutcome::Started { index: 1 }
        );
        assert_eq!(transport.call_count(), 1);
        assert_eq!(player.store().snapshot().curr_song_pos, 0.0);
    }

    #[tokio::test]
    async fn test_start_playlist_skips_malformed_row() {
        let href = format!("{}/playlists/p2", BASE);
        let (transport, player) = player_with(PlayerState::default());
        transport.respond(
            &href,
            json!({
                "type": "playlist",
                "name": "Mix",
                "images": [],
                "tracks": {"items": [
                    {"track": {"name": "odd", "preview_url": "p", "artists": "nobody"}},
                    {"track": {"name": "fine", "preview_url": "p"}}
                ]}
            }),
        );

        assert_eq!(
            player.start_playlist(&href).await,
            StartOutcome::Started { index: 1 }
        );
        assert_eq!(player.store().read(|s| s.tracklist.len()), 2);
    }

    #[tokio::test]
    async fn test_next_track_at_max_index_stops() {
        let (_transport, player) = player_with(PlayerState {
            tracklist: entries(&[true]),
            ..Default::default()
        });
        player.store().dispatch(Event::PlayTrack { index: usize::MAX });

        assert_eq!(player.next_track(), StartOutcome::NoPlayableTrack);
        assert!(player.store().snapshot().no_preview);
    }

    #[tokio::test]
    async fn test_start_album_failure_plays_nothing() {
        let href = format!("{}/albums/missing", BASE);
        let (transport, player) = player_with(PlayerState::default());
        transport.respond(&href, json!({"error": {"status": 404, "message": "non existing id"}}));

        assert_eq!(
            player.start_album(&href).await,
            StartOutcome::NotLoaded(FetchOutcome::Failed)
        );
        let state = player.store().snapshot();
        assert_eq!(state.playback_status(), PlaybackStatus::Stopped);
        assert!(state.playlist_show.is_none());
    }

    #[tokio::test]
    async fn test_start_album_loads_and_plays() {
        let href = format!("{}/albums/a1", BASE);
        let (transport, player) = player_with(PlayerState::default());
        transport.respond(
            &href,
            json!({
                "type": "album",
                "name": "Record",
                "images": [{"url": "cover"}],
                "tracks": {"items": [{"name": "One", "preview_url": "p"}]}
            }),
        );

        assert_eq!(
            player.start_album(&href).await,
            StartOutcome::Started { index: 0 }
        );
        assert_eq!(player.store().snapshot().current_href(), Some(href.as_str()));
    }

    #[tokio::test]
    async fn test_pause_and_unpause() {
        let (_, player) = player_with(viewing(&[true]));
        player.start_play_from_tracklist(0);

        player.pause();
        assert_eq!(
            player.store().snapshot().playback_status(),
            PlaybackStatus::Paused
        );

        player.unpause();
        assert_eq!(
            player.store().snapshot().playback_status(),
            PlaybackStatus::Playing
        );
    }
}
