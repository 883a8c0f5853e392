//! JSON to model converters.
//!
//! This module turns raw catalog API JSON into the flat shapes stored in the
//! player state. Albums and playlists return their tracks in different
//! shapes; [`normalize_tracks`] reconciles them.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::{PlayerError, Result};
use crate::models::{
    common::first_image_url, ArtistRef, Category, ContextInfo, ContextKind, FeaturedPlaylists,
    Image, NewReleases, PlaylistSummary, Token, TrackAlbum, TrackEntry, TrackItem,
};

/// Get string from JSON, returning `None` if absent or not a string.
fn get_opt_str(json: &Value, key: &str) -> Option<String> {
    json.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
}

/// Get a required string from JSON.
fn require_str(json: &Value, key: &str) -> Result<String> {
    get_opt_str(json, key).ok_or_else(|| PlayerError::NoDataApi(format!("missing `{}`", key)))
}

/// Follow a dotted path such as `"tracks.items"` to an array.
fn get_array<'a>(json: &'a Value, path: &str) -> Result<&'a Vec<Value>> {
    path.split('.')
        .try_fold(json, |node, key| node.get(key))
        .and_then(|v| v.as_array())
        .ok_or_else(|| PlayerError::NoDataApi(format!("missing `{}`", path)))
}

/// Deserialize every non-null element of an array, skipping ones that fail.
fn parse_items<T: DeserializeOwned>(items: &[Value], what: &str) -> Vec<T> {
    items
        .iter()
        .filter(|item| !item.is_null())
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Skipping malformed {} entry: {}", what, e);
                None
            }
        })
        .collect()
}

/// Parse one playlist row, keeping it in place even when its track does not
/// fit [`TrackItem`]; such a row stays in the list without a track.
fn parse_playlist_row(position: usize, row: &Value) -> TrackEntry {
    match serde_json::from_value(row.clone()) {
        Ok(entry) => entry,
        Err(e) => {
            warn!(position, "Dropping malformed track from playlist row: {}", e);
            let mut extra = row.as_object().cloned().unwrap_or_default();
            extra.remove("track");
            TrackEntry { track: None, extra }
        }
    }
}

/// Extract the `images` array.
pub fn extract_images(json: &Value) -> Vec<Image> {
    json.get("images")
        .and_then(|v| v.as_array())
        .map(|arr| parse_items(arr, "image"))
        .unwrap_or_default()
}

/// Parse the token endpoint response.
pub fn parse_token(json: &Value) -> Result<Token> {
    Ok(serde_json::from_value(json.clone())?)
}

/// Parse the featured playlists response; stored as a whole.
pub fn parse_featured(json: &Value) -> Result<FeaturedPlaylists> {
    if json.get("playlists").is_none() {
        return Err(PlayerError::NoDataApi("missing `playlists`".to_string()));
    }
    Ok(serde_json::from_value(json.clone())?)
}

/// Parse `categories.items` from the categories response.
pub fn parse_categories(json: &Value) -> Result<Vec<Category>> {
    Ok(parse_items(get_array(json, "categories.items")?, "category"))
}

/// Parse `playlists.items` from a category playlists response.
///
/// The API returns `null` in place of playlists that are no longer
/// available; those are dropped.
pub fn parse_category_playlists(json: &Value) -> Result<Vec<PlaylistSummary>> {
    Ok(parse_items(get_array(json, "playlists.items")?, "playlist"))
}

/// Parse the new releases response; stored as a whole.
pub fn parse_new_releases(json: &Value) -> Result<NewReleases> {
    if json.get("albums").is_none() {
        return Err(PlayerError::NoDataApi("missing `albums`".to_string()));
    }
    Ok(serde_json::from_value(json.clone())?)
}

/// Build the context header for a playlist or album response.
///
/// The kind is taken from the body's `type` field, falling back to
/// `fallback` when absent.
pub fn parse_context(href: &str, json: &Value, fallback: ContextKind) -> Result<ContextInfo> {
    let kind = get_opt_str(json, "type")
        .map(|t| ContextKind::from_api(&t))
        .unwrap_or(fallback);
    let images = extract_images(json);

    let artists: Vec<ArtistRef> = json
        .get("artists")
        .and_then(|a| a.as_array())
        .map(|arr| parse_items(arr, "artist"))
        .unwrap_or_default();

    Ok(ContextInfo {
        href: href.to_string(),
        image_url: first_image_url(&images).map(str::to_string),
        name: require_str(json, "name")?,
        owner: json
            .get("owner")
            .and_then(|o| o.get("display_name"))
            .and_then(|n| n.as_str())
            .map(|s| s.to_string()),
        description: get_opt_str(json, "description"),
        kind,
        artists,
        release_date: get_opt_str(json, "release_date"),
    })
}

/// Reshape album tracks into the playlist per-track shape.
///
/// Each track is wrapped as `{ track: { ...track, album: { images } } }` and
/// gets its own copy of `images`. Neither input is modified.
pub fn normalize_tracks(tracks: &[TrackItem], images: &[Image]) -> Vec<TrackEntry> {
    tracks
        .iter()
        .map(|track| {
            TrackEntry::new(TrackItem {
                album: Some(TrackAlbum::with_images(images.to_vec())),
                ..track.clone()
            })
        })
        .collect()
}

/// Parse `tracks.items` of a playlist or album response into a tracklist.
///
/// Album tracks go through [`normalize_tracks`]; playlist rows are kept as
/// received, one entry per row so indices match the API.
pub fn parse_context_tracks(json: &Value, kind: ContextKind) -> Result<Vec<TrackEntry>> {
    let items = get_array(json, "tracks.items")?;
    match kind {
        ContextKind::Album => {
            let tracks: Vec<TrackItem> = parse_items(items, "album track");
            Ok(normalize_tracks(&tracks, &extract_images(json)))
        }
        ContextKind::Playlist => Ok(items
            .iter()
            .enumerate()
            .map(|(position, row)| parse_playlist_row(position, row))
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn album_json() -> Value {
        json!({
            "type": "album",
            "name": "Record",
            "release_date": "2019-05-03",
            "artists": [{"id": "a1", "name": "Band"}],
            "images": [{"url": "big", "height": 640, "width": 640}, {"url": "small"}],
            "tracks": {"items": [
                {"id": "t1", "name": "One", "preview_url": "p1", "track_number": 1},
                {"id": "t2", "name": "Two", "preview_url": null, "track_number": 2}
            ]}
        })
    }

    #[test]
    fn test_normalize_tracks_wraps_every_track() {
        let tracks = vec![
            TrackItem {
                name: Some("One".to_string()),
                ..Default::default()
            },
            TrackItem {
                name: Some("Two".to_string()),
                ..Default::default()
            },
        ];
        let images = vec![Image::new("cover")];

        let normalized = normalize_tracks(&tracks, &images);

        assert_eq!(normalized.len(), tracks.len());
        for (entry, original) in normalized.iter().zip(&tracks) {
            let track = entry.track.as_ref().unwrap();
            assert_eq!(track.name, original.name);
            assert_eq!(track.album.as_ref().unwrap().images, images);
        }
        assert!(tracks.iter().all(|t| t.album.is_none()));
    }

    #[test]
    fn test_normalize_tracks_copies_images() {
        let tracks = vec![TrackItem::default(), TrackItem::default()];
        let mut images = vec![Image::new("cover")];

        let mut normalized = normalize_tracks(&tracks, &images);

        normalized[0].track.as_mut().unwrap().album.as_mut().unwrap().images[0].url =
            "changed".to_string();
        images.push(Image::new("extra"));

        assert_eq!(
            normalized[1].track.as_ref().unwrap().album.as_ref().unwrap().images,
            vec![Image::new("cover")]
        );
        assert_eq!(images[0].url, "cover");
    }

    #[test]
    fn test_normalize_tracks_empty() {
        assert!(normalize_tracks(&[], &[Image::new("x")]).is_empty());
    }

    #[test]
    fn test_parse_context_album() {
        let href = "https://api.spotify.com/v1/albums/x";
        let info = parse_context(href, &album_json(), ContextKind::Playlist).unwrap();

        assert_eq!(info.href, href);
        assert_eq!(info.kind, ContextKind::Album);
        assert_eq!(info.image_url.as_deref(), Some("big"));
        assert_eq!(info.artists[0].name, "Band");
        assert_eq!(info.release_date.as_deref(), Some("2019-05-03"));
        assert_eq!(info.owner, None);
    }

    #[test]
    fn test_parse_context_requires_name() {
        let err = parse_context("h", &json!({"images": []}), ContextKind::Playlist).unwrap_err();
        assert!(matches!(err, PlayerError::NoDataApi(_)));
    }

    #[test]
    fn test_parse_context_tracks_album_is_normalized() {
        let tracks = parse_context_tracks(&album_json(), ContextKind::Album).unwrap();
        assert_eq!(tracks.len(), 2);

        let first = tracks[0].track.as_ref().unwrap();
        assert_eq!(first.extra["track_number"], 1);
        assert_eq!(first.album.as_ref().unwrap().images.len(), 2);
        assert!(tracks[0].is_playable());
        assert!(!tracks[1].is_playable());
    }

    #[test]
    fn test_parse_context_tracks_playlist_passthrough() {
        let json = json!({"tracks": {"items": [
            {"added_at": "a", "track": {"name": "x", "album": {"images": [{"url": "c"}]}}},
            {"added_at": "b", "track": null}
        ]}});
        let tracks = parse_context_tracks(&json, ContextKind::Playlist).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].extra["added_at"], "a");
        assert!(tracks[1].track.is_none());
    }

    #[test]
    fn test_parse_context_tracks_playlist_rows_unchanged() {
        let rows = json!([
            {"added_at": "a", "track": {"name": "one", "preview_url": "p1"}},
            {"added_at": "b", "track": {"name": "two", "preview_url": null}}
        ]);
        let json = json!({"tracks": {"items": rows.clone()}});

        let tracks = parse_context_tracks(&json, ContextKind::Playlist).unwrap();

        assert_eq!(serde_json::to_value(&tracks).unwrap(), rows);
    }

    #[test]
    fn test_parse_context_tracks_keeps_malformed_row() {
        let json = json!({"tracks": {"items": [
            {"track": {"name": "ok", "preview_url": "p"}},
            {"added_at": "b", "track": {"name": "x", "preview_url": "p", "duration_ms": "long"}},
            {"track": {"name": "bad cover", "preview_url": "p", "album": {"images": null}}},
            {"track": {"name": null, "preview_url": "p"}},
            null
        ]}});

        let tracks = parse_context_tracks(&json, ContextKind::Playlist).unwrap();

        assert_eq!(tracks.len(), 5);
        assert!(tracks[0].is_playable());
        assert!(tracks[1].track.is_none());
        assert_eq!(tracks[1].extra["added_at"], "b");
        assert!(tracks[2].track.is_none());
        assert!(tracks[3].is_playable());
        assert_eq!(tracks[3].name(), "");
        assert!(tracks[4].track.is_none());
    }

    #[test]
    fn test_parse_category_playlists_skips_nulls() {
        let json = json!({"playlists": {"items": [
            {"id": "p1", "name": "One", "href": "h1"},
            null,
            {"id": "p2", "name": "Two", "href": "h2"}
        ]}});
        let playlists = parse_category_playlists(&json).unwrap();
        assert_eq!(playlists.len(), 2);
        assert_eq!(playlists[1].id, "p2");
    }

    #[test]
    fn test_parse_categories_missing_items() {
        assert!(matches!(
            parse_categories(&json!({"categories": {}})),
            Err(PlayerError::NoDataApi(_))
        ));
    }
}
