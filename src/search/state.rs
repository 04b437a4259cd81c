//! Search box state
//!
//! Pure state: no timers, no I/O. The controller in [`super::SearchBox`]
//! decides when a value has settled and feeds lookup outcomes back in.

use tracing::warn;

use crate::config::SEARCH_RESULT_LIMIT;
use crate::models::{Route, ShowSummary};

/// A lookup the box wants performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Sequence number; only the latest one is applied
    pub seq: u64,
    /// Trimmed query text
    pub query: String,
}

/// Result of a finished lookup
pub type LookupOutcome = Result<Vec<ShowSummary>, String>;

/// What the results panel should show
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchView<'a> {
    Closed,
    Loading,
    Prompt,
    NoResults(&'a str),
    Results(&'a [ShowSummary]),
}

#[derive(Debug, Clone)]
pub struct SearchState {
    /// Text as typed
    pub query: String,
    /// Cursor position in characters
    pub cursor: usize,
    /// Results for the last applied lookup
    pub results: Vec<ShowSummary>,
    /// Explicitly highlighted result, if the user moved onto one
    pub highlighted: Option<usize>,
    /// A lookup is in flight
    pub loading: bool,
    /// Results panel visible
    pub open: bool,
    limit: usize,
    last_settled: Option<String>,
    latest_seq: u64,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(SEARCH_RESULT_LIMIT)
    }
}

impl SearchState {
    pub fn new(limit: usize) -> Self {
        Self {
            query: String::new(),
            cursor: 0,
            results: Vec::new(),
            highlighted: None,
            loading: false,
            open: false,
            limit,
            last_settled: None,
            latest_seq: 0,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    fn byte_index(&self, cursor: usize) -> usize {
        self.query
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    fn char_len(&self) -> usize {
        self.query.chars().count()
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.query.insert(at, c);
        self.cursor += 1;
        self.open = true;
    }

    /// Delete character before cursor; returns whether the query changed
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.query.remove(at);
        self.open = true;
        true
    }

    /// Delete character at cursor; returns whether the query changed
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.query.remove(at);
        true
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    // -------------------------------------------------------------------------
    // Lookup lifecycle
    // -------------------------------------------------------------------------

    /// The quiet period elapsed for the current query
    ///
    /// Returns a request only for a non-blank value that differs from the
    /// previously settled one. A blank value clears results without a request.
    pub fn settle(&mut self) -> Option<SearchRequest> {
        let trimmed = self.query.trim();

        if trimmed.is_empty() {
            self.results.clear();
            self.highlighted = None;
            self.loading = false;
            self.last_settled = None;
            // Anything still in flight is now stale
            self.latest_seq += 1;
            return None;
        }

        if self.last_settled.as_deref() == Some(trimmed) {
            return None;
        }

        let query = trimmed.to_string();
        self.last_settled = Some(query.clone());
        self.latest_seq += 1;
        self.loading = true;

        Some(SearchRequest {
            seq: self.latest_seq,
            query,
        })
    }

    /// Apply a finished lookup; stale outcomes are dropped
    pub fn apply(&mut self, seq: u64, outcome: LookupOutcome) -> bool {
        if seq != self.latest_seq {
            return false;
        }

        self.loading = false;
        self.highlighted = None;
        match outcome {
            Ok(mut results) => {
                results.truncate(self.limit);
                self.results = results;
            }
            Err(e) => {
                warn!(error = %e, "search lookup failed");
                self.results.clear();
            }
        }
        true
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn highlight_next(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) if i + 1 < self.results.len() => i + 1,
            Some(i) => i,
            None => 0,
        });
    }

    pub fn highlight_prev(&mut self) {
        self.highlighted = match self.highlighted {
            Some(0) | None => None,
            Some(i) => Some(i - 1),
        };
    }

    /// Pick a result: clears the box and yields the show route
    pub fn select(&mut self, index: usize) -> Option<Route> {
        let id = self.results.get(index)?.id;
        self.reset();
        Some(Route::Show(id))
    }

    /// Form submit: the highlighted result, otherwise the first
    pub fn submit(&mut self) -> Option<Route> {
        self.select(self.highlighted.unwrap_or(0))
    }

    /// Clear button: empty query and results, close the panel
    pub fn reset(&mut self) {
        self.query.clear();
        self.cursor = 0;
        self.results.clear();
        self.highlighted = None;
        self.loading = false;
        self.open = false;
        self.last_settled = None;
        self.latest_seq += 1;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn view(&self) -> SearchView<'_> {
        if !self.open {
            SearchView::Closed
        } else if self.loading {
            SearchView::Loading
        } else if self.query.trim().is_empty() {
            SearchView::Prompt
        } else if self.results.is_empty() {
            SearchView::NoResults(self.query.trim())
        } else {
            SearchView::Results(&self.results)
        }
    }
}
