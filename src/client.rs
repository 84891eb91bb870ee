//! Remote catalog client - typed wrapper over the three catalog endpoints
//!
//! The client holds no state beyond the connection pool; staleness of
//! overlapping calls is the caller's concern.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::errors::ClientError;
use crate::models::{Artist, Suggestion};

/// One page of the artist catalog
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistPage {
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub total: u64,
}

/// Search response: ranked results plus suggestion rows
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPayload {
    #[serde(default)]
    pub results: Vec<Artist>,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

/// The three calls the catalog service exposes
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// `GET /artists?page&per_page`
    async fn list_artists(&self, page: u32, per_page: u32) -> Result<ArtistPage, ClientError>;

    /// `GET /search?q&limit`
    async fn search(&self, query: &str, limit: u32) -> Result<SearchPayload, ClientError>;

    /// `GET /artists/{id}`
    async fn get_artist(&self, id: &str) -> Result<Artist, ClientError>;
}

/// HTTP implementation backed by a shared reqwest client
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn list_artists(&self, page: u32, per_page: u32) -> Result<ArtistPage, ClientError> {
        debug!("GET /artists page={} per_page={}", page, per_page);
        let resp = self
            .client
            .get(format!("{}/artists", self.base_url))
            .query(&[("page", page), ("per_page", per_page)])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status()));
        }
        Ok(resp.json().await?)
    }

    async fn search(&self, query: &str, limit: u32) -> Result<SearchPayload, ClientError> {
        debug!("GET /search q={:?} limit={}", query, limit);
        let resp = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", query), ("limit", &limit.to_string())])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status()));
        }
        Ok(resp.json().await?)
    }

    async fn get_artist(&self, id: &str) -> Result<Artist, ClientError> {
        debug!("GET /artists/{}", id);
        let resp = self
            .client
            .get(format!("{}/artists/{}", self.base_url, id))
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound);
        }
        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status()));
        }
        Ok(resp.json().await?)
    }
}

/// Scripted catalog client for tests: programmable payloads, per-query
/// latency, and a log of every issued request.
#[cfg(test)]
pub(crate) mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use reqwest::StatusCode;
    use tokio::time::sleep;

    use super::{ArtistPage, CatalogClient, SearchPayload};
    use crate::errors::ClientError;
    use crate::models::{Artist, Suggestion};

    /// Build a test artist with the given id and name
    pub fn artist(id: &str, name: &str) -> Artist {
        Artist {
            id: id.to_string(),
            name: name.to_string(),
            genres: vec!["synthwave".to_string()],
            image_url: None,
            country: None,
        }
    }

    /// Build a test suggestion
    pub fn suggestion(id: &str, name: &str) -> Suggestion {
        Suggestion {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    /// A request the mock has served, in issue order
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        List { page: u32, per_page: u32 },
        Search { query: String, limit: u32 },
        Get { id: String },
    }

    #[derive(Default)]
    struct Inner {
        pages: HashMap<u32, (Vec<Artist>, u64)>,
        searches: HashMap<String, SearchPayload>,
        search_delays: HashMap<String, Duration>,
        artists: HashMap<String, Artist>,
        fail_next_list: bool,
        fail_next_search: bool,
        fail_next_get: bool,
        calls: Vec<Call>,
    }

    #[derive(Default)]
    pub struct MockCatalog {
        inner: Mutex<Inner>,
    }

    impl MockCatalog {
        pub fn with_page(self, page: u32, artists: Vec<Artist>, total: u64) -> Self {
            self.inner.lock().unwrap().pages.insert(page, (artists, total));
            self
        }

        pub fn with_search(self, query: &str, payload: SearchPayload) -> Self {
            self.inner
                .lock()
                .unwrap()
                .searches
                .insert(query.to_string(), payload);
            self
        }

        /// Delay responses for `query` to simulate a slow network
        pub fn with_search_delay(self, query: &str, delay: Duration) -> Self {
            self.inner
                .lock()
                .unwrap()
                .search_delays
                .insert(query.to_string(), delay);
            self
        }

        pub fn with_artist(self, artist: Artist) -> Self {
            self.inner
                .lock()
                .unwrap()
                .artists
                .insert(artist.id.clone(), artist);
            self
        }

        pub fn fail_next_list(self) -> Self {
            self.inner.lock().unwrap().fail_next_list = true;
            self
        }

        pub fn fail_next_search(self) -> Self {
            self.inner.lock().unwrap().fail_next_search = true;
            self
        }

        pub fn fail_next_get(self) -> Self {
            self.inner.lock().unwrap().fail_next_get = true;
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.inner.lock().unwrap().calls.clone()
        }

        /// Queries issued through `search`, in order
        pub fn search_queries(&self) -> Vec<String> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    Call::Search { query, .. } => Some(query),
                    _ => None,
                })
                .collect()
        }

        /// Pages requested through `list_artists`, in order
        pub fn listed_pages(&self) -> Vec<u32> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    Call::List { page, .. } => Some(page),
                    _ => None,
                })
                .collect()
        }
    }

    #[async_trait]
    impl CatalogClient for MockCatalog {
        async fn list_artists(&self, page: u32, per_page: u32) -> Result<ArtistPage, ClientError> {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.push(Call::List { page, per_page });
            if inner.fail_next_list {
                inner.fail_next_list = false;
                return Err(ClientError::Status(StatusCode::INTERNAL_SERVER_ERROR));
            }
            let (artists, total) = inner.pages.get(&page).cloned().unwrap_or((Vec::new(), 0));
            Ok(ArtistPage { artists, total })
        }

        async fn search(&self, query: &str, limit: u32) -> Result<SearchPayload, ClientError> {
            let (delay, outcome) = {
                let mut inner = self.inner.lock().unwrap();
                inner.calls.push(Call::Search {
                    query: query.to_string(),
                    limit,
                });
                let delay = inner.search_delays.get(query).copied();
                if inner.fail_next_search {
                    inner.fail_next_search = false;
                    (
                        delay,
                        Err(ClientError::Status(StatusCode::INTERNAL_SERVER_ERROR)),
                    )
                } else {
                    (
                        delay,
                        Ok(inner.searches.get(query).cloned().unwrap_or_default()),
                    )
                }
            };
            if let Some(delay) = delay {
                sleep(delay).await;
            }
            outcome
        }

        async fn get_artist(&self, id: &str) -> Result<Artist, ClientError> {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.push(Call::Get { id: id.to_string() });
            if inner.fail_next_get {
                inner.fail_next_get = false;
                return Err(ClientError::Status(StatusCode::INTERNAL_SERVER_ERROR));
            }
            inner.artists.get(id).cloned().ok_or(ClientError::NotFound)
        }
    }
}
