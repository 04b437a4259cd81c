//! TMDB API client tests
//!
//! Tests authentication, caching, list/detail parsing and error handling.

use futures::future::join_all;
use mockito::{Matcher, Server};
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};
use vertica::api::{Credentials, TmdbClient, TmdbError};

fn list_body() -> &'static str {
    r#"{
        "page": 1,
        "results": [
            {
                "id": 1396,
                "name": "Breaking Bad",
                "first_air_date": "2008-01-20",
                "overview": "A chemistry teacher diagnosed with lung cancer.",
                "poster_path": "/ggFHVNu6YYI5L9pCfOacjizRGt.jpg",
                "backdrop_path": "/tsRy63Mu5cu8etL1X7ZLyf7UP1M.jpg",
                "vote_average": 8.9
            },
            {
                "id": 65494,
                "original_name": "The Crown",
                "first_air_date": "",
                "vote_average": 0
            }
        ],
        "total_pages": 1
    }"#
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_bearer_token_sent_as_header() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/trending/tv/week")
        .match_header("authorization", "Bearer v4-token")
        .match_query(Matcher::UrlEncoded("language".into(), "en-US".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(list_body())
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(Credentials::access_token("v4-token"), server.url());
    let shows = assert_ok!(client.trending_shows().await);

    mock.assert_async().await;
    assert_eq!(shows.len(), 2);
}

#[tokio::test]
async fn test_api_key_sent_as_query_param() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/tv/top_rated")
        .match_header("authorization", Matcher::Missing)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("api_key".into(), "v3-key".into()),
            Matcher::UrlEncoded("language".into(), "en-US".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(list_body())
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(Credentials::api_key("v3-key"), server.url());
    assert_ok!(client.top_rated_shows().await);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_bearer_preferred_when_both_set() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/tv/airing_today")
        .match_header("authorization", "Bearer v4-token")
        .match_query(Matcher::UrlEncoded("language".into(), "en-US".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(list_body())
        .create_async()
        .await;

    let credentials = Credentials::new(Some("v3-key".into()), Some("v4-token".into()));
    let client = TmdbClient::with_base_url(credentials, server.url());
    assert_ok!(client.airing_today_shows().await);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_credential_fails_before_request() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    // Blank values count as unset
    let credentials = Credentials::new(Some("   ".into()), None);
    assert!(!credentials.is_configured());

    let client = TmdbClient::with_base_url(credentials, server.url());
    let err = assert_err!(client.trending_shows().await);

    assert!(matches!(err, TmdbError::MissingCredential));
    mock.assert_async().await;
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn test_error_carries_status() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/tv/999")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"status_code": 34, "status_message": "not found"}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(Credentials::api_key("k"), server.url());
    let err = assert_err!(client.show_details(999).await);

    assert_eq!(err.status(), Some(404));
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "TMDB 404");
}

#[tokio::test]
async fn test_unauthorized_is_not_retried() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/trending/tv/week")
        .match_query(Matcher::Any)
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(Credentials::api_key("wrong"), server.url());
    let err = assert_err!(client.trending_shows().await);

    assert_eq!(err.status(), Some(401));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/trending/tv/week")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(Credentials::api_key("k"), server.url());
    let err = assert_err!(client.trending_shows().await);

    assert!(matches!(err, TmdbError::InvalidResponse(_)));
}

// =============================================================================
// Caching
// =============================================================================

#[tokio::test]
async fn test_repeat_request_served_from_cache() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/trending/tv/week")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(list_body())
        .expect(1)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(Credentials::api_key("k"), server.url());
    let first = assert_ok!(client.trending_shows().await);
    let second = assert_ok!(client.trending_shows().await);

    mock.assert_async().await;
    assert_eq!(first, second);
    assert_eq!(client.cache().len(), 1);
}

#[tokio::test]
async fn test_errors_are_not_cached() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/tv/top_rated")
        .match_query(Matcher::Any)
        .with_status(503)
        .expect(2)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(Credentials::api_key("k"), server.url());
    assert_err!(client.top_rated_shows().await);
    assert_err!(client.top_rated_shows().await);

    mock.assert_async().await;
    assert!(client.cache().is_empty());
}

// =============================================================================
// Parsing
// =============================================================================

#[tokio::test]
async fn test_list_falls_back_to_original_name() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/trending/tv/week")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(list_body())
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(Credentials::api_key("k"), server.url());
    let shows = assert_ok!(client.trending_shows().await);

    assert_eq!(shows[0].name, "Breaking Bad");
    assert_eq!(shows[0].year(), Some(2008));
    assert_eq!(shows[1].name, "The Crown");
    assert_eq!(shows[1].first_air_date, None);
    assert_eq!(shows[1].rating_label(), None);
}

#[tokio::test]
async fn test_show_and_season_details() {
    let mut server = Server::new_async().await;

    let _details = server
        .mock("GET", "/tv/1396")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{
                "id": 1396,
                "name": "Breaking Bad",
                "overview": "A chemistry teacher.",
                "vote_average": 8.9,
                "first_air_date": "2008-01-20",
                "genres": [{"id": 18, "name": "Drama"}, {"id": 80, "name": "Crime"}],
                "number_of_seasons": 5,
                "number_of_episodes": 62,
                "episode_run_time": [47],
                "status": "Ended"
            }"#,
        )
        .create_async()
        .await;

    let _season = server
        .mock("GET", "/tv/1396/season/1")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{
                "season_number": 1,
                "episodes": [
                    {"id": 62085, "name": "Pilot", "episode_number": 1, "runtime": 58, "overview": ""},
                    {"id": 62086, "name": "Cat's in the Bag...", "episode_number": 2, "air_date": "2008-01-27"}
                ]
            }"#,
        )
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(Credentials::api_key("k"), server.url());

    let show = assert_ok!(client.show_details(1396).await);
    assert_eq!(show.genres_str(), "Drama, Crime");
    assert_eq!(show.runtime(), Some(47));
    assert_eq!(show.seasons_label(), "5 Seasons • 62 Episodes");

    let season = assert_ok!(client.season_details(1396, 1).await);
    assert_eq!(season.season_number, 1);
    assert_eq!(season.episodes.len(), 2);
    assert_eq!(season.episodes[0].season_number, 1);
    assert_eq!(season.episodes[0].runtime_label().as_deref(), Some("58m"));
    assert_eq!(
        season.episodes[0].overview_or_placeholder(),
        "No description available for this episode."
    );
    assert_eq!(season.episodes[1].to_string(), "S01E02 - Cat's in the Bag...");
}

#[tokio::test]
async fn test_concurrent_show_lookups() {
    let mut server = Server::new_async().await;

    let mut mocks = Vec::new();
    for id in [1u64, 2, 3] {
        let mock = server
            .mock("GET", format!("/tv/{}", id).as_str())
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(format!(r#"{{"id": {}, "name": "Show {}"}}"#, id, id))
            .expect(1)
            .create_async()
            .await;
        mocks.push(mock);
    }

    let client = Arc::new(TmdbClient::with_base_url(Credentials::api_key("k"), server.url()));
    let results = join_all([1u64, 2, 3].map(|id| {
        let client = Arc::clone(&client);
        async move { client.show_details(id).await }
    }))
    .await;

    for (i, result) in results.into_iter().enumerate() {
        let show = assert_ok!(result);
        assert_eq!(show.name, format!("Show {}", i + 1));
    }
    for mock in mocks {
        mock.assert_async().await;
    }
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_search_encodes_query() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/search/tv")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "law & order".into()),
            Matcher::UrlEncoded("language".into(), "en-US".into()),
        ]))
        .with_status(200)
        .with_body(list_body())
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(Credentials::api_key("k"), server.url());
    let shows = assert_ok!(client.search_shows("  law & order ").await);

    mock.assert_async().await;
    assert_eq!(shows[0].id, 1396);
}

#[tokio::test]
async fn test_blank_search_skips_upstream() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(Credentials::api_key("k"), server.url());
    let body = assert_ok!(client.search_shows_raw("   ").await);

    assert_eq!(body, serde_json::json!({ "results": [] }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_raw_search_keeps_upstream_body() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/search/tv")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(list_body())
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(Credentials::api_key("k"), server.url());
    let body = assert_ok!(client.search_shows_raw("breaking").await);

    assert_eq!(body["page"], 1);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(body["results"][0]["backdrop_path"], "/tsRy63Mu5cu8etL1X7ZLyf7UP1M.jpg");
}
