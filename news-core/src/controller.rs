//! Search session state machine.
//!
//! A [`NewsController`] owns one accumulated result list and sequences the
//! fetches that fill it. Fresh searches replace the list, pagination appends
//! to it, and every fetch carries a generation number so that a response
//! superseded by a newer fetch (or by [`NewsController::clear_news`]) is
//! dropped instead of overwriting newer state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::client::NewsApi;
use crate::models::{NewsFilters, NewsItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Fresh search: the page replaces the accumulated list.
    Replace,
    /// Pagination: the page is appended after the existing items.
    Append,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { received: usize },
    Failed,
    /// A newer fetch or a clear started before this one resolved.
    Discarded,
    /// `load_more` with no cursor or with a fetch already in flight.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// What the results area should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsView {
    NotSearched,
    Loading,
    Failed,
    Empty,
    Results,
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub news: Vec<NewsItem>,
    pub next_page: Option<String>,
    /// Total reported by the last fetched page, not `news.len()`.
    pub total_results: u64,
    pub loading: bool,
    pub error: Option<String>,
    pub has_searched: bool,
}

impl SearchState {
    pub fn has_next_page(&self) -> bool {
        self.next_page.is_some()
    }

    pub fn phase(&self) -> SearchPhase {
        if self.loading {
            SearchPhase::Loading
        } else if self.error.is_some() {
            SearchPhase::Failed
        } else if !self.has_searched && self.news.is_empty() {
            SearchPhase::Idle
        } else {
            SearchPhase::Ready
        }
    }

    pub fn view(&self) -> ResultsView {
        if !self.news.is_empty() {
            ResultsView::Results
        } else if self.loading {
            ResultsView::Loading
        } else if self.error.is_some() {
            ResultsView::Failed
        } else if self.has_searched {
            ResultsView::Empty
        } else {
            ResultsView::NotSearched
        }
    }
}

/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct NewsController {
    api: Arc<dyn NewsApi>,
    state: Arc<watch::Sender<SearchState>>,
    /// Bumped only inside `state` modifications, so reads and bumps are
    /// serialized by the channel lock.
    generation: Arc<AtomicU64>,
    max_retained: Option<usize>,
}

impl NewsController {
    pub fn new(api: Arc<dyn NewsApi>) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            api,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            max_retained: None,
        }
    }

    /// Caps the accumulated list; the oldest items are dropped first.
    #[must_use]
    pub fn with_max_retained(mut self, limit: Option<usize>) -> Self {
        self.max_retained = limit;
        self
    }

    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Receives a new value after every state change.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn has_next_page(&self) -> bool {
        self.state.borrow().has_next_page()
    }

    pub async fn fetch_news(&self, filters: &NewsFilters, mode: FetchMode) -> FetchOutcome {
        let mut generation = 0;
        self.state.send_modify(|state| generation = self.begin_fetch(state));
        self.run(filters, mode, generation).await
    }

    /// Fetches the page after the stored cursor and appends it.
    ///
    /// The cursor and loading checks happen under the same lock that marks the
    /// fetch as in flight, so two calls racing each other issue one request.
    pub async fn load_more(&self, filters: &NewsFilters) -> FetchOutcome {
        let mut claimed = None;
        self.state.send_if_modified(|state| {
            if state.loading {
                return false;
            }
            let Some(cursor) = state.next_page.clone() else {
                return false;
            };
            claimed = Some((cursor, self.begin_fetch(state)));
            true
        });

        let Some((cursor, generation)) = claimed else {
            debug!("load_more skipped: no cursor or a fetch is in flight");
            return FetchOutcome::Skipped;
        };
        let filters = filters.clone().with_page(cursor);
        self.run(&filters, FetchMode::Append, generation).await
    }

    /// Resets the session. A fetch still in flight is orphaned and its
    /// response will be discarded.
    pub fn clear_news(&self) {
        self.state.send_modify(|state| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            *state = SearchState::default();
        });
        debug!("search session cleared");
    }

    /// Claims the state for a new fetch and returns its generation.
    fn begin_fetch(&self, state: &mut SearchState) -> u64 {
        state.loading = true;
        state.error = None;
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn run(&self, filters: &NewsFilters, mode: FetchMode, generation: u64) -> FetchOutcome {
        let result = self.api.fetch_page(filters).await;

        let mut outcome = FetchOutcome::Discarded;
        let mut failure = None;
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            outcome = match result {
                Ok(page) => {
                    let received = page.results.len();
                    match mode {
                        FetchMode::Replace => {
                            state.news = page.results;
                            state.has_searched = true;
                        }
                        FetchMode::Append => state.news.extend(page.results),
                    }
                    if let Some(limit) = self.max_retained {
                        let excess = state.news.len().saturating_sub(limit);
                        state.news.drain(..excess);
                    }
                    state.next_page = page.next_page;
                    state.total_results = page.total_results;
                    FetchOutcome::Applied { received }
                }
                Err(e) => {
                    let message = e.to_string();
                    state.error = Some(message.clone());
                    failure = Some(message);
                    FetchOutcome::Failed
                }
            };
            state.loading = false;
            true
        });

        match (outcome, failure) {
            (FetchOutcome::Applied { received }, _) => {
                info!(query = %filters.query, ?mode, received, "news page applied")
            }
            (FetchOutcome::Failed, Some(error)) => {
                warn!(query = %filters.query, ?mode, %error, "failed to fetch news")
            }
            _ => debug!(query = %filters.query, ?mode, "stale news response discarded"),
        }
        outcome
    }
}
