//! Browse categories (genres).

use serde::{Deserialize, Serialize};

use super::common::Image;

/// A browse category such as "Hip-Hop" or "Chill".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Category ID used in the category playlists URL.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// API URL of the category.
    #[serde(default)]
    pub href: Option<String>,

    /// Category artwork.
    #[serde(default)]
    pub icons: Vec<Image>,
}
