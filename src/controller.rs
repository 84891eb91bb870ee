//! Catalog controller - coordinates the debounced search path against the
//! paginated browse path
//!
//! All state lives in a single task: UI events, debounce-timer expiry, and
//! network completions are processed strictly in arrival order through one
//! `tokio::select!` loop, so every mutation is atomic with respect to other
//! events and no locks are needed. Fetches run as spawned tasks that report
//! back over a channel, tagged so stale responses can be recognized and
//! discarded at arrival; the transport itself is never aborted. The debounce
//! timer is the one thing with true cancellation: re-arming or dropping the
//! handle destroys the pending timer.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures::future::OptionFuture;
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep, Sleep};
use tracing::{debug, warn};

use crate::client::{ArtistPage, CatalogClient, SearchPayload};
use crate::config::Settings;
use crate::errors::{ClientError, FetchError};
use crate::models::{Artist, Suggestion};
use crate::stores::{PaginationStore, RequestSeq, SearchState};

/// Events the view layer feeds into the controller
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// The search input changed (fired on every keystroke)
    QueryChanged(String),
    /// A suggestion was picked from the panel
    SuggestionChosen(String),
    /// The affirmative key was pressed on the search input
    SubmitSearch,
    /// The search input regained focus
    SearchFocused,
    /// A pagination control asked for this page
    PageRequested(u32),
    /// Something outside the search surface was interacted with
    DismissSuggestions,
}

/// Completion message from a spawned fetch task
enum FetchDone {
    Browse {
        page: u32,
        outcome: Result<ArtistPage, ClientError>,
    },
    Search {
        seq: RequestSeq,
        outcome: Result<SearchPayload, ClientError>,
    },
}

/// Immutable snapshot of everything the view needs to render
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Browse-mode artist list (current page)
    pub artists: Vec<Artist>,
    /// Search-mode result list
    pub results: Vec<Artist>,
    /// Suggestion panel contents
    pub suggestions: Vec<Suggestion>,
    /// Current query text
    pub query: String,
    /// Whether the suggestion panel is shown
    pub suggestions_visible: bool,
    pub page: u32,
    pub total_pages: u32,
    /// Shared between the browse and search paths; owned by whichever
    /// matches the current intent
    pub loading: bool,
    pub error: Option<String>,
}

/// Cloneable handle for feeding events into a running controller and
/// observing its snapshots
#[derive(Clone)]
pub struct ControllerHandle {
    events: mpsc::UnboundedSender<UiEvent>,
    view: watch::Receiver<ViewState>,
}

impl ControllerHandle {
    pub fn send(&self, event: UiEvent) {
        // a closed channel means the controller task is gone (view torn down)
        let _ = self.events.send(event);
    }

    pub fn set_query(&self, query: impl Into<String>) {
        self.send(UiEvent::QueryChanged(query.into()));
    }

    pub fn choose_suggestion(&self, name: impl Into<String>) {
        self.send(UiEvent::SuggestionChosen(name.into()));
    }

    pub fn submit(&self) {
        self.send(UiEvent::SubmitSearch);
    }

    pub fn focus_search(&self) {
        self.send(UiEvent::SearchFocused);
    }

    pub fn set_page(&self, page: u32) {
        self.send(UiEvent::PageRequested(page));
    }

    pub fn dismiss_suggestions(&self) {
        self.send(UiEvent::DismissSuggestions);
    }

    /// Subscribe to view snapshots
    pub fn view(&self) -> watch::Receiver<ViewState> {
        self.view.clone()
    }

    /// The most recently published snapshot
    pub fn snapshot(&self) -> ViewState {
        self.view.borrow().clone()
    }
}

/// The controller itself; built with [`CatalogController::new`] and driven
/// by awaiting [`CatalogController::run`]
pub struct CatalogController {
    client: Arc<dyn CatalogClient>,
    pagination: PaginationStore,
    search: SearchState,
    search_limit: u32,
    debounce_window: Duration,
    /// Pending quiet-period timer; `None` means nothing is scheduled.
    /// Replacing or clearing this handle destroys the pending timer.
    debounce: Option<Pin<Box<Sleep>>>,
    loading: bool,
    error: Option<String>,
    events: mpsc::UnboundedReceiver<UiEvent>,
    done_tx: mpsc::UnboundedSender<FetchDone>,
    done_rx: mpsc::UnboundedReceiver<FetchDone>,
    view_tx: watch::Sender<ViewState>,
}

impl CatalogController {
    pub fn new(client: Arc<dyn CatalogClient>, settings: &Settings) -> (Self, ControllerHandle) {
        let (event_tx, events) = mpsc::unbounded_channel();
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(ViewState {
            page: 1,
            loading: true,
            ..ViewState::default()
        });

        let controller = Self {
            client,
            pagination: PaginationStore::new(settings.per_page),
            search: SearchState::default(),
            search_limit: settings.search_limit,
            debounce_window: Duration::from_millis(settings.debounce_ms),
            debounce: None,
            loading: true,
            error: None,
            events,
            done_tx,
            done_rx,
            view_tx,
        };
        let handle = ControllerHandle {
            events: event_tx,
            view: view_rx,
        };
        (controller, handle)
    }

    /// Drive the controller until every handle is dropped. Fetches the first
    /// browse page on entry (view mount); any pending debounce timer dies
    /// with the task (view unmount).
    pub async fn run(mut self) {
        self.fetch_current_page();
        self.publish();

        loop {
            let debounce: OptionFuture<_> = self.debounce.as_mut().into();
            tokio::select! {
                event = self.events.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => break,
                },
                Some(()) = debounce => {
                    self.debounce = None;
                    self.settle();
                }
                Some(done) = self.done_rx.recv() => self.apply(done),
            }
            self.publish();
        }
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::QueryChanged(text) => {
                // echo the keystroke immediately, then restart the quiet
                // period; the previous timer handle is destroyed
                self.search.set_query(text);
                self.debounce = Some(Box::pin(sleep(self.debounce_window)));
            }
            UiEvent::SuggestionChosen(name) => {
                // already disambiguated: skip the quiet period entirely
                self.search.set_query(name);
                self.search.hide();
                self.debounce = None;
                self.settle();
            }
            UiEvent::SubmitSearch => {
                self.search.hide();
                self.debounce = None;
                self.settle();
            }
            UiEvent::SearchFocused => self.search.reveal(),
            UiEvent::PageRequested(page) => self.request_page(page),
            UiEvent::DismissSuggestions => self.search.hide(),
        }
    }

    /// The quiet period elapsed or was bypassed: act on the current query
    fn settle(&mut self) {
        if self.search.is_active() {
            let seq = self.search.begin_request();
            let query = self.search.query().to_string();
            let limit = self.search_limit;
            let client = Arc::clone(&self.client);
            let done = self.done_tx.clone();
            // previous suggestions/results stay visible until this lands
            tokio::spawn(async move {
                let outcome = client.search(&query, limit).await;
                let _ = done.send(FetchDone::Search { seq, outcome });
            });
        } else {
            // the box was cleared: control returns to browse mode
            self.search.clear();
            self.fetch_current_page();
        }
    }

    fn request_page(&mut self, page: u32) {
        if self.search.is_active() {
            debug!("ignoring page request {} while a search is active", page);
            return;
        }
        if self.pagination.set_page(page) {
            self.fetch_current_page();
        } else {
            debug!("ignoring out-of-range page request {}", page);
        }
    }

    fn fetch_current_page(&mut self) {
        // browse and search are mutually exclusive display modes
        if self.search.is_active() {
            return;
        }
        self.loading = true;
        let page = self.pagination.page();
        let per_page = self.pagination.per_page();
        let client = Arc::clone(&self.client);
        let done = self.done_tx.clone();
        tokio::spawn(async move {
            let outcome = client.list_artists(page, per_page).await;
            let _ = done.send(FetchDone::Browse { page, outcome });
        });
    }

    /// Commit a network completion, unless it is stale for the user's
    /// current intent
    fn apply(&mut self, done: FetchDone) {
        match done {
            FetchDone::Browse { page, outcome } => {
                if self.search.is_active() || page != self.pagination.page() {
                    debug!("discarding stale browse response for page {}", page);
                    return;
                }
                self.loading = false;
                match outcome {
                    Ok(fetched) => {
                        self.pagination.commit(fetched.artists, fetched.total);
                        self.error = None;
                    }
                    Err(err) => {
                        warn!("browse fetch failed: {}", err);
                        self.error = Some(FetchError::List.to_string());
                    }
                }
            }
            FetchDone::Search { seq, outcome } => {
                if !self.search.is_current(seq) {
                    debug!("discarding stale search response (seq {})", seq);
                    return;
                }
                self.loading = false;
                match outcome {
                    Ok(payload) => {
                        self.search.commit(seq, payload.results, payload.suggestions);
                        self.error = None;
                    }
                    Err(err) => {
                        warn!("search fetch failed: {}", err);
                        self.error = Some(FetchError::Search.to_string());
                    }
                }
            }
        }
    }

    fn publish(&self) {
        self.view_tx.send_replace(ViewState {
            artists: self.pagination.artists().to_vec(),
            results: self.search.results().to_vec(),
            suggestions: self.search.suggestions().to_vec(),
            query: self.search.query().to_string(),
            suggestions_visible: self.search.visible(),
            page: self.pagination.page(),
            total_pages: self.pagination.total_pages(),
            loading: self.loading,
            error: self.error.clone(),
        });
    }
}
