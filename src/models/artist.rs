//! Artist model

use serde::{Deserialize, Serialize};

/// An artist as returned by the catalog service
///
/// Immutable once fetched; owned by whichever store last fetched it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    /// Opaque catalog identifier
    pub id: String,
    /// Artist name
    pub name: String,
    /// Genres, possibly empty
    #[serde(default)]
    pub genres: Vec<String>,
    /// Artist image URL
    #[serde(default)]
    pub image_url: Option<String>,
    /// Country of origin
    #[serde(default)]
    pub country: Option<String>,
}

impl Artist {
    /// Genres joined for display, "N/A" when none are known
    pub fn genre_line(&self) -> String {
        if self.genres.is_empty() {
            "N/A".to_string()
        } else {
            self.genres.join(", ")
        }
    }
}

impl PartialEq for Artist {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Artist {}

/// A search suggestion; the service sends full artist rows here but only
/// the id and name are kept for the panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub name: String,
}
