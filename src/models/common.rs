//! Common types shared across all models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Image with URL and optional dimensions.
///
/// The catalog reports `null` dimensions for user-uploaded artwork, so both
/// are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Image {
    /// URL to the image.
    pub url: String,

    /// Height in pixels.
    #[serde(default)]
    pub height: Option<u32>,

    /// Width in pixels.
    #[serde(default)]
    pub width: Option<u32>,
}

impl Image {
    /// Create a new image without dimensions.
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            height: None,
            width: None,
        }
    }
}

/// Artist reference as nested in tracks and albums.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ArtistRef {
    /// Catalog ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Artist name.
    #[serde(default)]
    pub name: String,

    /// API URL of the artist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Fields this crate does not model, kept as received.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ArtistRef {
    /// Create an artist reference with just a name.
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Playlist owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Owner {
    /// Catalog user ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Name shown in the UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,

    /// Total number of items across all pages.
    #[serde(default)]
    pub total: u32,

    /// Page size that was requested.
    #[serde(default)]
    pub limit: u32,

    /// Offset of the first item.
    #[serde(default)]
    pub offset: u32,

    /// URL of the next page, if any.
    #[serde(default)]
    pub next: Option<String>,

    /// URL of the previous page, if any.
    #[serde(default)]
    pub previous: Option<String>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            limit: 0,
            offset: 0,
            next: None,
            previous: None,
        }
    }
}

impl<T> Page<T> {
    /// Whether more items are available after this page.
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }
}

/// Get the URL of the first image, the one shown as cover art.
pub fn first_image_url(images: &[Image]) -> Option<&str> {
    images.first().map(|img| img.url.as_str())
}
