//! Detail loader - one-shot artist fetch for the detail view
//!
//! A single navigational trigger, not a keystroke stream, so no debouncing
//! or sequence tagging is needed here.

use std::sync::Arc;

use tracing::warn;

use crate::client::CatalogClient;
use crate::errors::ClientError;
use crate::models::Artist;

/// Lifecycle of a single detail fetch
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Artist),
    Failed(String),
}

/// Fetches one artist by identifier; re-fetches whenever the identifier
/// changes and a failure replaces the whole view.
pub struct DetailLoader {
    client: Arc<dyn CatalogClient>,
    artist_id: Option<String>,
    state: DetailState,
}

impl DetailLoader {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self {
            client,
            artist_id: None,
            state: DetailState::Loading,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Show the artist with `id`, fetching unless it is already displayed
    pub async fn show(&mut self, id: &str) -> &DetailState {
        if self.artist_id.as_deref() == Some(id) && matches!(self.state, DetailState::Loaded(_)) {
            return &self.state;
        }

        self.artist_id = Some(id.to_string());
        self.state = DetailState::Loading;
        self.state = match self.client.get_artist(id).await {
            Ok(artist) => DetailState::Loaded(artist),
            Err(ClientError::NotFound) => DetailState::Failed("Artist not found".to_string()),
            Err(err) => {
                warn!("artist detail fetch failed: {}", err);
                DetailState::Failed("Failed to fetch artist details".to_string())
            }
        };
        &self.state
    }
}
