//! TMDB API client tests
//!
//! Tests trending, discovery, search, genres, trailer resolution and the
//! gateway's error folding against a mock server.

use heisflix::api::{CatalogGateway, TmdbClient, TmdbError};
use heisflix::models::{BrowseQuery, Fetch, MediaKind};
use mockito::{Matcher, Server};

fn mixed_page() -> &'static str {
    r#"{
        "page": 2,
        "results": [
            {
                "id": 414906,
                "media_type": "movie",
                "title": "The Batman",
                "release_date": "2022-03-01",
                "overview": "Batman ventures into Gotham",
                "poster_path": "/74xTEgt7R36Fpooo50r9T25onhq.jpg",
                "vote_average": 7.8
            },
            {
                "id": 31,
                "media_type": "person",
                "name": "Tom Hanks"
            },
            {
                "id": 1396,
                "media_type": "tv",
                "name": "Breaking Bad",
                "first_air_date": "2008-01-20",
                "overview": "A chemistry teacher",
                "vote_average": 9.5
            }
        ],
        "total_results": 97,
        "total_pages": 5
    }"#
}

// =============================================================================
// Browse Tests
// =============================================================================

#[tokio::test]
async fn test_trending_sends_key_and_page() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/trending/all/week")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("api_key".into(), "test_key".into()),
            Matcher::UrlEncoded("language".into(), "en-US".into()),
            Matcher::UrlEncoded("page".into(), "2".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(mixed_page())
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let page = client.trending(2).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages, 5);

    // The person entry is dropped
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].title, "The Batman");
    assert_eq!(page.items[0].media_type, MediaKind::Movie);
    assert_eq!(page.items[1].title, "Breaking Bad");
    assert_eq!(page.items[1].media_type, MediaKind::Series);
    assert_eq!(page.items[1].year(), Some(2008));
}

#[tokio::test]
async fn test_genre_discovery_filters_by_genre() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/discover/movie")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("with_genres".into(), "28".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"page": 1, "total_pages": 3, "results": [
                {"id": 603, "title": "The Matrix", "release_date": "1999-03-30"}
            ]}"#,
        )
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("k", server.url());
    let page = client.by_genre(28, 1).await.unwrap();

    mock.assert_async().await;
    // Discovery results carry no media_type; a title means movie
    assert_eq!(page.items[0].media_type, MediaKind::Movie);
    assert_eq!(page.items[0].year(), Some(1999));
    assert_eq!(page.total_pages, 3);
}

#[tokio::test]
async fn test_search_encodes_query_and_excludes_adult() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search/multi")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "blade runner".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("include_adult".into(), "false".into()),
        ]))
        .with_status(200)
        .with_body(mixed_page())
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("k", server.url());
    let page = client.search("blade runner", 1).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.items.len(), 2);
}

#[tokio::test]
async fn test_blank_search_makes_no_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("k", server.url());
    let page = client.search("   ", 1).await.unwrap();

    mock.assert_async().await;
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_empty_search_has_one_page() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search/multi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"page": 1, "results": [], "total_pages": 0, "total_results": 0}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("k", server.url());
    let page = client.search("zzzzzz", 1).await.unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total_pages, 1);
}

// =============================================================================
// Genres and Details
// =============================================================================

#[tokio::test]
async fn test_genres() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/genre/movie/list")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"genres": [{"id": 28, "name": "Action"}, {"id": 35, "name": "Comedy"}]}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("k", server.url());
    let genres = client.genres().await.unwrap();
    assert_eq!(genres.len(), 2);
    assert_eq!(genres[1].name, "Comedy");
}

#[tokio::test]
async fn test_details_forces_kind() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/tv/1396")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"id": 1396, "name": "Breaking Bad", "first_air_date": "2008-01-20"}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("k", server.url());
    let item = client.details(MediaKind::Series, 1396).await.unwrap();
    assert_eq!(item.media_type, MediaKind::Series);
    assert_eq!(item.title, "Breaking Bad");
}

#[tokio::test]
async fn test_details_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/movie/1")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"status_message": "The resource you requested could not be found."}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("k", server.url());
    let err = client.details(MediaKind::Movie, 1).await.unwrap_err();
    assert!(matches!(err, TmdbError::NotFound));
}

// =============================================================================
// Trailer Resolution
// =============================================================================

#[tokio::test]
async fn test_trailer_resolution_uses_kind_path() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/tv/1396/videos")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"id": 1396, "results": [
                {"key": "behind", "site": "YouTube", "type": "Behind the Scenes"},
                {"key": "HhesaQXLuRY", "site": "YouTube", "type": "Trailer"}
            ]}"#,
        )
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("k", server.url());
    let url = client.resolve_trailer(MediaKind::Series, 1396).await.unwrap();

    mock.assert_async().await;
    assert_eq!(url.as_deref(), Some("https://www.youtube.com/embed/HhesaQXLuRY"));
}

#[tokio::test]
async fn test_no_matching_video_is_none() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/movie/10378/videos")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"id": 10378, "results": [{"key": "c", "site": "YouTube", "type": "Clip"}]}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("k", server.url());
    assert_eq!(client.resolve_trailer(MediaKind::Movie, 10378).await.unwrap(), None);
}

// =============================================================================
// Gateway Error Folding
// =============================================================================

#[tokio::test]
async fn test_unauthorized_is_failed_not_empty() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/trending/all/week")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"status_message": "Invalid API key"}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("bad", server.url());
    let outcome = CatalogGateway::browse(&client, &BrowseQuery::Trending, 1).await;
    assert!(outcome.is_failed());
}

#[tokio::test]
async fn test_server_error_is_failed() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/genre/movie/list")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("k", server.url());
    match CatalogGateway::genres(&client).await {
        Fetch::Failed(msg) => assert!(msg.contains("500"), "unexpected message: {}", msg),
        other => panic!("Expected Failed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_failed() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/discover/movie")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("k", server.url());
    let outcome = CatalogGateway::browse(&client, &BrowseQuery::Genre(28), 1).await;
    assert!(outcome.is_failed());
}

#[tokio::test]
async fn test_empty_page_is_empty_outcome() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search/multi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"page": 1, "results": [{"id": 31, "media_type": "person", "name": "Tom Hanks"}], "total_pages": 1}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("k", server.url());
    let outcome = CatalogGateway::browse(&client, &BrowseQuery::Search("hanks".into()), 1).await;
    assert_eq!(outcome, Fetch::Empty);
}

#[tokio::test]
async fn test_people_only_page_keeps_total_pages() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search/multi")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_body(r#"{"page": 1, "results": [{"id": 31, "media_type": "person", "name": "Tom Hanks"}], "total_pages": 3}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("k", server.url());
    match CatalogGateway::browse(&client, &BrowseQuery::Search("hanks".into()), 1).await {
        Fetch::Loaded(result) => {
            assert!(result.items.is_empty());
            assert_eq!(result.page, 1);
            assert_eq!(result.total_pages, 3);
        }
        other => panic!("Expected a loaded page, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failed_trailer_lookup_folds_to_none() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/movie/5/videos")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("k", server.url());
    assert_eq!(
        CatalogGateway::resolve_trailer(&client, MediaKind::Movie, 5).await,
        None
    );
}
