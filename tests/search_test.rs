//! Search box tests
//!
//! Debounce timing runs on Tokio's paused clock; the endpoint source is
//! checked against a mock server on the real clock.

use async_trait::async_trait;
use mockito::{Matcher, Server};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{sleep, timeout};
use vertica::models::{Route, ShowSummary};
use vertica::search::{
    EndpointSearch, SearchBox, SearchEvent, SearchSource, SearchView,
};

const DEBOUNCE: Duration = Duration::from_millis(500);

fn show(id: u64, name: &str) -> ShowSummary {
    ShowSummary {
        id,
        name: name.to_string(),
        poster_path: None,
        backdrop_path: None,
        overview: String::new(),
        vote_average: 7.5,
        first_air_date: Some("2016-11-04".to_string()),
    }
}

/// Counts lookups; optional per-query latency and failure
#[derive(Default)]
struct Catalogue {
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
    latency: Mutex<Vec<(String, Duration)>>,
    fail: bool,
    size: usize,
}

impl Catalogue {
    fn with_size(size: usize) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn slow(self, query: &str, delay: Duration) -> Self {
        self.latency.lock().unwrap().push((query.to_string(), delay));
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchSource for Catalogue {
    async fn search(&self, query: &str) -> anyhow::Result<Vec<ShowSummary>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());

        let delay = self
            .latency
            .lock()
            .unwrap()
            .iter()
            .find(|(q, _)| q == query)
            .map(|(_, d)| *d);
        if let Some(delay) = delay {
            sleep(delay).await;
        }

        if self.fail {
            anyhow::bail!("upstream unavailable");
        }
        Ok((1..=self.size.max(1) as u64)
            .map(|id| show(id, &format!("{} {}", query, id)))
            .collect())
    }
}

fn type_str(sb: &mut SearchBox, text: &str) {
    for c in text.chars() {
        sb.insert(c);
    }
}

/// Let pending timers and lookups run, then handle what they sent
async fn idle(sb: &mut SearchBox, rounds: usize) {
    for _ in 0..rounds {
        sleep(Duration::from_secs(1)).await;
        sb.drain();
    }
}

// =============================================================================
// Debounce
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_typing_burst_issues_one_request() {
    let source = Arc::new(Catalogue::with_size(3));
    let mut sb = SearchBox::new(source.clone(), DEBOUNCE);

    for c in "the cr".chars() {
        sb.insert(c);
        sleep(Duration::from_millis(200)).await;
        assert!(!sb.drain());
    }
    assert_eq!(source.calls(), 0);

    idle(&mut sb, 2).await;

    assert_eq!(source.queries(), vec!["the cr".to_string()]);
    assert_eq!(sb.state.results.len(), 3);
    assert!(!sb.state.loading);
}

#[tokio::test(start_paused = true)]
async fn test_settles_after_quiet_period() {
    let source = Arc::new(Catalogue::with_size(1));
    let mut sb = SearchBox::new(source.clone(), DEBOUNCE);

    type_str(&mut sb, "lost");

    sleep(Duration::from_millis(499)).await;
    assert!(!sb.drain());
    assert!(sb.is_settling());

    sleep(Duration::from_millis(2)).await;
    assert!(sb.drain());
    assert!(sb.state.loading);
    assert_eq!(sb.state.view(), SearchView::Loading);
}

#[tokio::test(start_paused = true)]
async fn test_same_trimmed_value_not_requested_twice() {
    let source = Arc::new(Catalogue::with_size(2));
    let mut sb = SearchBox::new(source.clone(), DEBOUNCE);

    type_str(&mut sb, "lost");
    idle(&mut sb, 2).await;

    // Trailing space then back: the settled value is unchanged
    sb.insert(' ');
    idle(&mut sb, 2).await;
    sb.backspace();
    idle(&mut sb, 2).await;

    assert_eq!(source.calls(), 1);
    assert_eq!(sb.state.results.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_blank_value_clears_without_request() {
    let source = Arc::new(Catalogue::with_size(2));
    let mut sb = SearchBox::new(source.clone(), DEBOUNCE);

    type_str(&mut sb, "oz");
    idle(&mut sb, 2).await;
    assert_eq!(sb.state.results.len(), 2);

    sb.backspace();
    sb.backspace();
    type_str(&mut sb, "   ");
    idle(&mut sb, 2).await;

    assert_eq!(source.calls(), 1);
    assert!(sb.state.results.is_empty());
    assert_eq!(sb.state.view(), SearchView::Prompt);

    // Re-entering the earlier value counts as distinct again
    sb.clear();
    type_str(&mut sb, "oz");
    idle(&mut sb, 2).await;
    assert_eq!(source.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_clear_before_settle_makes_no_request() {
    let source = Arc::new(Catalogue::with_size(1));
    let mut sb = SearchBox::new(source.clone(), DEBOUNCE);

    type_str(&mut sb, "dark");
    sleep(Duration::from_millis(300)).await;
    sb.clear();
    idle(&mut sb, 3).await;

    assert_eq!(source.calls(), 0);
    assert_eq!(sb.state.view(), SearchView::Closed);
}

// =============================================================================
// Results
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_results_capped_at_eight() {
    let source = Arc::new(Catalogue::with_size(20));
    let mut sb = SearchBox::new(source.clone(), DEBOUNCE);

    type_str(&mut sb, "star");
    idle(&mut sb, 2).await;

    assert_eq!(sb.state.limit(), 8);
    assert_eq!(sb.state.results.len(), 8);
    assert_eq!(sb.state.results[0].name, "star 1");
    assert_eq!(sb.state.results[7].name, "star 8");
}

#[tokio::test(start_paused = true)]
async fn test_custom_limit() {
    let source = Arc::new(Catalogue::with_size(20));
    let mut sb = SearchBox::with_limit(source, DEBOUNCE, 3);

    type_str(&mut sb, "star");
    idle(&mut sb, 2).await;

    assert_eq!(sb.state.results.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_failure_clears_results_silently() {
    let source = Arc::new(Catalogue::failing());
    let mut sb = SearchBox::new(source.clone(), DEBOUNCE);

    type_str(&mut sb, "the");
    idle(&mut sb, 2).await;

    assert_eq!(source.calls(), 1);
    assert!(sb.state.results.is_empty());
    assert!(!sb.state.loading);
    assert_eq!(sb.state.view(), SearchView::NoResults("the"));
}

#[tokio::test(start_paused = true)]
async fn test_latest_request_wins() {
    let source = Arc::new(
        Catalogue::with_size(1)
            .slow("the", Duration::from_secs(5))
            .slow("the office", Duration::from_millis(10)),
    );
    let mut sb = SearchBox::new(source.clone(), DEBOUNCE);

    type_str(&mut sb, "the");
    // Settle and start the slow lookup
    sleep(Duration::from_millis(600)).await;
    assert!(sb.drain());
    assert!(sb.is_searching());

    type_str(&mut sb, " office");
    idle(&mut sb, 10).await;

    assert_eq!(
        source.queries(),
        vec!["the".to_string(), "the office".to_string()]
    );
    assert_eq!(sb.state.results.len(), 1);
    assert_eq!(sb.state.results[0].name, "the office 1");
}

#[tokio::test(start_paused = true)]
async fn test_submit_picks_highlight_or_first() {
    let source = Arc::new(Catalogue::with_size(4));
    let mut sb = SearchBox::new(source, DEBOUNCE);

    type_str(&mut sb, "dr");
    idle(&mut sb, 2).await;
    assert_eq!(sb.submit(), Some(Route::Show(1)));
    assert_eq!(sb.state.view(), SearchView::Closed);
    assert!(sb.state.query.is_empty());

    type_str(&mut sb, "dr");
    idle(&mut sb, 2).await;
    sb.state.highlight_next();
    sb.state.highlight_next();
    assert_eq!(sb.submit(), Some(Route::Show(2)));
}

#[tokio::test(start_paused = true)]
async fn test_submit_with_no_results_does_nothing() {
    let source = Arc::new(Catalogue::failing());
    let mut sb = SearchBox::new(source, DEBOUNCE);

    type_str(&mut sb, "zzz");
    idle(&mut sb, 2).await;

    assert_eq!(sb.submit(), None);
    assert_eq!(sb.state.query, "zzz");
}

// =============================================================================
// Endpoint Source
// =============================================================================

#[tokio::test]
async fn test_endpoint_source_requests_encoded_query() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/api/search")
        .match_query(Matcher::UrlEncoded("q".into(), "the cr".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"results": [
                {"id": 65494, "name": "The Crown", "first_air_date": "2016-11-04", "vote_average": 8.2},
                {"id": 1, "name": "The Crew"}
            ]}"#,
        )
        .create_async()
        .await;

    let source = EndpointSearch::new(server.url());
    let shows = source.search("the cr").await.unwrap();

    mock.assert_async().await;
    assert_eq!(shows.len(), 2);
    assert_eq!(shows[0].name, "The Crown");
    assert_eq!(shows[0].year(), Some(2016));
}

#[tokio::test]
async fn test_endpoint_source_error_status_is_error() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/api/search")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body(r#"{"error": "Failed to search shows"}"#)
        .create_async()
        .await;

    let source = EndpointSearch::new(server.url());
    assert!(source.search("lost").await.is_err());
}

#[tokio::test]
async fn test_search_box_through_endpoint() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/api/search")
        .match_query(Matcher::UrlEncoded("q".into(), "crown".into()))
        .with_status(200)
        .with_body(r#"{"results": [{"id": 65494, "name": "The Crown"}]}"#)
        .expect(1)
        .create_async()
        .await;

    let source = Arc::new(EndpointSearch::new(server.url()));
    let mut sb = SearchBox::new(source, Duration::from_millis(20));
    type_str(&mut sb, "crown");

    let settled = timeout(Duration::from_secs(5), sb.step()).await.unwrap();
    assert!(matches!(settled, Some(SearchEvent::Settled { .. })));
    let finished = timeout(Duration::from_secs(5), sb.step()).await.unwrap();
    assert!(matches!(finished, Some(SearchEvent::Finished { .. })));

    mock.assert_async().await;
    assert_eq!(sb.state.results.len(), 1);
    assert_eq!(sb.submit(), Some(Route::Show(65494)));
}
