//! Search screen state machine.
//!
//! ```text
//! Idle ──search──▶ Loading ──ok──▶ Loaded { results, page }
//!                     │
//!                     └──err──▶ Failed { message }
//! ```
//!
//! Any state may start a new search, which passes through `Loading` again.
//! Filter setters only touch pending state; nothing is fetched until a search
//! is started.
//!
//! Every search is issued as a [`SearchTicket`] with a sequence number. Only
//! the outcome for the most recently issued ticket is applied; an older one
//! that resolves late is dropped, so a slow early request can never overwrite
//! a newer result.

use caselaw_client::{ApiError, CaseApi};
use caselaw_core::{SearchParams, SearchResult};
use tracing::debug;

/// Fixed page size for search results.
pub const RESULTS_PER_PAGE: u32 = 10;

/// Highest zero-based page index whose offset fits in a `u32`.
pub const MAX_PAGE_INDEX: u32 = u32::MAX / RESULTS_PER_PAGE;

/// Pending filter inputs, applied on the next search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub query: String,
    pub topic: Option<i64>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
}

impl Filters {
    /// Compose request parameters for `page`.
    ///
    /// Blank query text is left unset; the server treats a missing `q` as
    /// "match all". Pages past [`MAX_PAGE_INDEX`] are clamped to it.
    pub fn to_params(&self, page: u32) -> SearchParams {
        let q = self.query.trim();
        SearchParams {
            q: (!q.is_empty()).then(|| q.to_string()),
            topic_ids: self.topic.into_iter().collect(),
            year_from: self.year_from,
            year_to: self.year_to,
            limit: Some(RESULTS_PER_PAGE),
            offset: Some(page_offset(page)),
        }
    }
}

fn page_offset(page: u32) -> u32 {
    page.min(MAX_PAGE_INDEX) * RESULTS_PER_PAGE
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchState {
    /// Never searched.
    #[default]
    Idle,
    Loading {
        page: u32,
    },
    Loaded {
        results: Vec<SearchResult>,
        page: u32,
    },
    /// The previous result list is gone; only the message remains.
    Failed {
        message: String,
    },
}

/// One issued search. Hand it back to [`SearchController::complete`] with
/// the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    page: u32,
    params: SearchParams,
}

impl SearchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }
}

/// What happened to a completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer search was issued after this one; the outcome was dropped.
    Stale,
}

pub struct SearchController<A> {
    api: A,
    filters: Filters,
    state: SearchState,
    latest_seq: u64,
    /// Page of the most recently issued search, used by `retry`.
    requested_page: u32,
}

impl<A: CaseApi> SearchController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            filters: Filters::default(),
            state: SearchState::Idle,
            latest_seq: 0,
            requested_page: 0,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.filters.query = text.into();
    }

    pub fn set_topic(&mut self, topic: Option<i64>) {
        self.filters.topic = topic;
    }

    pub fn set_year_from(&mut self, year: Option<i32>) {
        self.filters.year_from = year;
    }

    pub fn set_year_to(&mut self, year: Option<i32>) {
        self.filters.year_to = year;
    }

    /// Reset topic and year range. Query text, results and state are kept.
    pub fn clear_filters(&mut self) {
        self.filters.topic = None;
        self.filters.year_from = None;
        self.filters.year_to = None;
    }

    /// Current page index, if results are loaded.
    pub fn page(&self) -> Option<u32> {
        match self.state {
            SearchState::Loaded { page, .. } => Some(page),
            _ => None,
        }
    }

    /// Whether another page may exist.
    ///
    /// This is a guess: a full page is taken to mean more results follow. The
    /// server does not report a total.
    pub fn has_more(&self) -> bool {
        match &self.state {
            SearchState::Loaded { results, .. } => results.len() == RESULTS_PER_PAGE as usize,
            _ => false,
        }
    }

    /// Page to load for `next_page`, or `None` when it would be a no-op.
    ///
    /// There is no page after [`MAX_PAGE_INDEX`].
    pub fn next_page_index(&self) -> Option<u32> {
        match self.page() {
            Some(page) if self.has_more() => page
                .checked_add(1)
                .filter(|&next| next <= MAX_PAGE_INDEX),
            _ => None,
        }
    }

    /// Page to load for `prev_page`, or `None` when it would be a no-op.
    pub fn prev_page_index(&self) -> Option<u32> {
        self.page().and_then(|page| page.checked_sub(1))
    }

    /// Issue a search for `page` from the current filters and enter `Loading`.
    pub fn begin_search(&mut self, page: u32) -> SearchTicket {
        self.latest_seq += 1;
        self.requested_page = page;
        self.state = SearchState::Loading { page };
        let ticket = SearchTicket {
            seq: self.latest_seq,
            page,
            params: self.filters.to_params(page),
        };
        debug!(seq = ticket.seq, page, "search issued");
        ticket
    }

    /// Apply the outcome of `ticket` if it is still the latest search.
    pub fn complete(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<Vec<SearchResult>, ApiError>,
    ) -> Completion {
        if ticket.seq != self.latest_seq {
            debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "discarding stale search outcome"
            );
            return Completion::Stale;
        }
        self.state = match outcome {
            Ok(results) => {
                debug!(seq = ticket.seq, count = results.len(), "search loaded");
                SearchState::Loaded {
                    results,
                    page: ticket.page,
                }
            }
            Err(err) => {
                debug!(seq = ticket.seq, error = %err, "search failed");
                SearchState::Failed {
                    message: err.to_string(),
                }
            }
        };
        Completion::Applied
    }

    /// Search `page` with the current filters and wait for the result.
    pub async fn search(&mut self, page: u32) -> Completion {
        let ticket = self.begin_search(page);
        let outcome = self.api.search(ticket.params()).await;
        self.complete(ticket, outcome)
    }

    /// Load the next page. Returns `false` without fetching when not loaded
    /// or when the last page was short.
    pub async fn next_page(&mut self) -> bool {
        match self.next_page_index() {
            Some(page) => {
                self.search(page).await;
                true
            }
            None => false,
        }
    }

    /// Load the previous page. Returns `false` without fetching on page 0 or
    /// when not loaded.
    pub async fn prev_page(&mut self) -> bool {
        match self.prev_page_index() {
            Some(page) => {
                self.search(page).await;
                true
            }
            None => false,
        }
    }

    /// Re-run the current page. Only valid once results are loaded.
    pub async fn refresh(&mut self) -> bool {
        match self.page() {
            Some(page) => {
                self.search(page).await;
                true
            }
            None => false,
        }
    }

    /// Re-run the page that failed. Only valid from `Failed`.
    pub async fn retry(&mut self) -> bool {
        if !matches!(self.state, SearchState::Failed { .. }) {
            return false;
        }
        self.search(self.requested_page).await;
        true
    }
}
