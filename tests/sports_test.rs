//! ScoreBat highlight feed tests

use heisflix::api::{ScoreBatClient, ScoreBatError, SportsGateway};
use heisflix::models::Fetch;
use mockito::{Matcher, Server};

fn feed() -> &'static str {
    r#"{
        "response": [
            {
                "title": "Arsenal - Chelsea",
                "competition": "ENGLAND: Premier League",
                "matchviewUrl": "https://www.scorebat.com/embed/matchview/1/",
                "thumbnail": "https://www.scorebat.com/og/m/og1.jpeg",
                "date": "2024-04-23T19:00:00+0000",
                "videos": [
                    {"id": "v1", "title": "Highlights", "embed": "<div>embed1</div>"},
                    {"id": "v2", "title": "Goal 1-0", "embed": "<div>embed2</div>"}
                ]
            },
            {
                "title": "Roma - Lazio",
                "competition": "ITALY: Serie A",
                "matchviewUrl": "https://www.scorebat.com/embed/matchview/2/",
                "videos": []
            }
        ]
    }"#
}

#[tokio::test]
async fn test_feed_parses_in_order() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/feed/")
        .match_query(Matcher::UrlEncoded("token".into(), "tok".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(feed())
        .create_async()
        .await;

    let client = ScoreBatClient::with_base_url("tok", server.url());
    let list = client.fetch_highlights().await.unwrap();

    mock.assert_async().await;
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].title, "Arsenal - Chelsea");
    assert_eq!(list[0].videos.len(), 2);
    assert_eq!(list[0].videos[1].title, "Goal 1-0");
    assert_eq!(list[1].competition.as_deref(), Some("ITALY: Serie A"));
    assert_eq!(list[1].matchview_url, "https://www.scorebat.com/embed/matchview/2/");
}

#[tokio::test]
async fn test_empty_feed_is_empty_outcome() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/feed/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"response": []}"#)
        .create_async()
        .await;

    let client = ScoreBatClient::with_base_url("tok", server.url());
    assert_eq!(client.highlights().await, Fetch::Empty);
}

#[tokio::test]
async fn test_http_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/feed/")
        .match_query(Matcher::Any)
        .with_status(403)
        .create_async()
        .await;

    let client = ScoreBatClient::with_base_url("tok", server.url());
    let err = client.fetch_highlights().await.unwrap_err();
    assert!(matches!(err, ScoreBatError::Status(403)));
    assert!(client.highlights().await.is_failed());
}

#[tokio::test]
async fn test_garbage_body_is_failed() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/feed/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = ScoreBatClient::with_base_url("tok", server.url());
    assert!(matches!(
        client.fetch_highlights().await,
        Err(ScoreBatError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_partial_entries_still_render() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/feed/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"response": [
                {"competition": "SPAIN: La Liga", "matchviewUrl": "u1", "videos": [{"title": "Highlights"}]},
                {"title": "Roma - Lazio", "matchviewUrl": "u2", "videos": [
                    {"title": "Broken"},
                    {"title": "Goal 1-0", "embed": "<div>embed</div>"}
                ]}
            ]}"#,
        )
        .create_async()
        .await;

    let client = ScoreBatClient::with_base_url("tok", server.url());
    let list = client.fetch_highlights().await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].title, "Untitled match");
    assert!(list[0].videos.is_empty());
    assert_eq!(list[1].videos.len(), 1);
    assert_eq!(list[1].videos[0].title, "Goal 1-0");
}
