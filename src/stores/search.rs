//! Search state with a monotonic request-sequence stale guard
//!
//! Every outgoing search request is tagged with a sequence number; a
//! response is applied only if its tag still equals the latest issued
//! sequence at arrival time. Out-of-order arrivals of superseded requests
//! are discarded, never applied. This resolves the out-of-order-arrival
//! hazard of overlapping network calls without aborting the transport.

use tracing::debug;

use crate::models::{Artist, Suggestion};

/// Tag carried by a search request and compared at response arrival
pub type RequestSeq = u64;

/// Live-search state: query text, suggestion panel, result list, and the
/// freshest request sequence.
///
/// Invariant: `visible` is true only while both the query and the
/// suggestion list are non-empty.
#[derive(Debug, Default)]
pub struct SearchState {
    query: String,
    suggestions: Vec<Suggestion>,
    results: Vec<Artist>,
    visible: bool,
    latest_seq: RequestSeq,
}

impl SearchState {
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether a non-empty query owns the display (search mode)
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn results(&self) -> &[Artist] {
        &self.results
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Update the query text. This is the zero-latency echo of a keystroke;
    /// no request is issued here. Previous suggestions stay visible while
    /// the user keeps typing, but clearing the text hides the panel at once.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        if self.query.is_empty() || self.suggestions.is_empty() {
            self.visible = false;
        }
    }

    /// Allocate the tag for a new request, superseding everything in flight
    pub fn begin_request(&mut self) -> RequestSeq {
        self.latest_seq += 1;
        self.latest_seq
    }

    /// Whether a response tagged `seq` would still be accepted
    pub fn is_current(&self, seq: RequestSeq) -> bool {
        seq == self.latest_seq
    }

    /// Commit a response if it is still the freshest; stale payloads are
    /// discarded. Returns whether the payload was applied.
    pub fn commit(
        &mut self,
        seq: RequestSeq,
        results: Vec<Artist>,
        suggestions: Vec<Suggestion>,
    ) -> bool {
        if !self.is_current(seq) {
            debug!(
                "discarding stale search response (seq {} superseded by {})",
                seq, self.latest_seq
            );
            return false;
        }
        self.results = results;
        self.suggestions = suggestions;
        self.visible = !self.suggestions.is_empty() && !self.query.is_empty();
        true
    }

    /// Drop suggestions and results and hide the panel. Bumps the sequence
    /// so responses still in flight cannot resurrect the cleared state.
    pub fn clear(&mut self) {
        self.suggestions.clear();
        self.results.clear();
        self.visible = false;
        self.latest_seq += 1;
    }

    /// Hide the panel without touching its contents
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Re-show the panel (input focus) when there is something to show
    pub fn reveal(&mut self) {
        if !self.query.is_empty() && !self.suggestions.is_empty() {
            self.visible = true;
        }
    }
}
