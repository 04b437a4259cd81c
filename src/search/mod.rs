//! Search box: debounced lookups with last-issued-wins results
//!
//! Keystrokes reschedule a settle event through a [`Debouncer`]. When the
//! event fires for the current generation, [`SearchState::settle`] decides
//! whether a lookup is needed; lookups run as Tokio tasks and report back
//! through the same channel. Starting a new lookup aborts the previous one.

pub mod debounce;
pub mod source;
pub mod state;

pub use debounce::Debouncer;
pub use source::{EndpointSearch, SearchSource, TmdbSearch};
pub use state::{LookupOutcome, SearchRequest, SearchState, SearchView};

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::config::SEARCH_RESULT_LIMIT;
use crate::models::Route;

/// Messages delivered to the search box
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// Quiet period elapsed for the given edit generation
    Settled { generation: u64 },
    /// A lookup finished
    Finished { seq: u64, outcome: LookupOutcome },
}

pub struct SearchBox {
    pub state: SearchState,
    source: Arc<dyn SearchSource>,
    debouncer: Debouncer<SearchEvent>,
    tx: UnboundedSender<SearchEvent>,
    rx: UnboundedReceiver<SearchEvent>,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for SearchBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchBox")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("in_flight", &self.in_flight.is_some())
            .finish()
    }
}

impl SearchBox {
    pub fn new(source: Arc<dyn SearchSource>, delay: Duration) -> Self {
        Self::with_limit(source, delay, SEARCH_RESULT_LIMIT)
    }

    pub fn with_limit(source: Arc<dyn SearchSource>, delay: Duration, limit: usize) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: SearchState::new(limit),
            source,
            debouncer: Debouncer::new(delay, tx.clone()),
            tx,
            rx,
            generation: 0,
            in_flight: None,
        }
    }

    // -------------------------------------------------------------------------
    // Editing (each change restarts the quiet period)
    // -------------------------------------------------------------------------

    pub fn insert(&mut self, c: char) {
        self.state.insert(c);
        self.query_changed();
    }

    pub fn backspace(&mut self) {
        if self.state.backspace() {
            self.query_changed();
        }
    }

    pub fn delete(&mut self) {
        if self.state.delete() {
            self.query_changed();
        }
    }

    /// Restart the debounce for the current query
    pub fn query_changed(&mut self) {
        self.generation += 1;
        self.debouncer.schedule(SearchEvent::Settled {
            generation: self.generation,
        });
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Apply one event; returns whether visible state changed
    pub fn handle(&mut self, event: SearchEvent) -> bool {
        match event {
            SearchEvent::Settled { generation } => {
                if generation != self.generation {
                    return false;
                }
                match self.state.settle() {
                    Some(request) => {
                        self.spawn_lookup(request);
                        true
                    }
                    // Blank query: results were cleared, nothing may land afterwards
                    None if self.state.query.trim().is_empty() => {
                        self.abort_lookup();
                        true
                    }
                    None => false,
                }
            }
            SearchEvent::Finished { seq, outcome } => {
                let applied = self.state.apply(seq, outcome);
                if applied {
                    self.in_flight = None;
                }
                applied
            }
        }
    }

    /// Handle everything already queued without waiting
    pub fn drain(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.rx.try_recv() {
            changed |= self.handle(event);
        }
        changed
    }

    /// Wait for the next event, handle it and return it
    pub async fn step(&mut self) -> Option<SearchEvent> {
        let event = self.rx.recv().await?;
        self.handle(event.clone());
        Some(event)
    }

    fn spawn_lookup(&mut self, request: SearchRequest) {
        self.abort_lookup();

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = source
                .search(&request.query)
                .await
                .map_err(|e| format!("{:#}", e));
            let _ = tx.send(SearchEvent::Finished {
                seq: request.seq,
                outcome,
            });
        }));
    }

    fn abort_lookup(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Pick result `index`, clearing the box
    pub fn select(&mut self, index: usize) -> Option<Route> {
        let route = self.state.select(index)?;
        self.cancel();
        Some(route)
    }

    /// Submit: highlighted result, otherwise the first
    pub fn submit(&mut self) -> Option<Route> {
        let route = self.state.submit()?;
        self.cancel();
        Some(route)
    }

    /// Clear button
    pub fn clear(&mut self) {
        self.state.reset();
        self.cancel();
    }

    /// Drop any pending settle and in-flight lookup
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.debouncer.cancel();
        self.abort_lookup();
    }

    pub fn is_settling(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn is_searching(&self) -> bool {
        self.in_flight
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for SearchBox {
    fn drop(&mut self) {
        self.cancel();
    }
}
