//! iTunes Search API client tests
//!
//! Tests request shape, result decoding and error handling.

use mockito::{Matcher, Server};
use mediafind::api::{ItunesClient, SearchError, DEFAULT_LIMIT};

const SEARCH_RESPONSE: &str = r#"{
    "resultCount": 3,
    "results": [
        {
            "wrapperType": "track",
            "kind": "song",
            "artistName": "Jack Johnson",
            "collectionName": "In Between Dreams",
            "trackName": "Better Together",
            "trackViewUrl": "https://music.apple.com/us/album/better-together/1469577723?i=1469577741",
            "releaseDate": "2005-03-01T08:00:00Z",
            "trackTimeMillis": 207679,
            "primaryGenreName": "Rock"
        },
        {
            "wrapperType": "track",
            "kind": "feature-movie",
            "artistName": "Jack Johnson",
            "trackName": "A Weekend at the Greek",
            "releaseDate": "2005-01-01T08:00:00Z",
            "trackTimeMillis": 5418000,
            "contentAdvisoryRating": "Unrated"
        },
        {
            "wrapperType": "collection",
            "collectionType": "Album",
            "artistName": "Jack Johnson",
            "collectionName": "Sing-A-Longs & Lullabies"
        }
    ]
}"#;

#[tokio::test]
async fn test_search_sends_term_and_limit() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("term".into(), "jack johnson".into()),
            Matcher::UrlEncoded("limit".into(), "20".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "text/javascript; charset=utf-8")
        .with_body(SEARCH_RESPONSE)
        .create_async()
        .await;

    let client = ItunesClient::with_base_url(server.url());
    let results = client.search("jack johnson", DEFAULT_LIMIT).await.unwrap();

    mock.assert_async().await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["kind"], "song");
    assert_eq!(results[1]["kind"], "feature-movie");
    assert!(results[2].get("kind").is_none());
}

#[tokio::test]
async fn test_search_encodes_special_characters() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("term".into(), "simon & garfunkel".into()),
            Matcher::UrlEncoded("limit".into(), "5".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"resultCount": 0, "results": []}"#)
        .create_async()
        .await;

    let client = ItunesClient::with_base_url(server.url());
    let results = client.search("simon & garfunkel", 5).await.unwrap();

    mock.assert_async().await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_search_server_error() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let client = ItunesClient::with_base_url(server.url());
    let err = client.search("anything", 20).await.unwrap_err();

    assert!(matches!(err, SearchError::Status(503)));
    assert!(err.is_network());
}

#[tokio::test]
async fn test_search_not_found_is_network_error() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let client = ItunesClient::with_base_url(server.url());
    let err = client.search("anything", 20).await.unwrap_err();
    assert!(matches!(err, SearchError::Status(404)));
}

#[tokio::test]
async fn test_search_malformed_body() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let client = ItunesClient::with_base_url(server.url());
    let err = client.search("anything", 20).await.unwrap_err();

    assert!(matches!(err, SearchError::MalformedResponse(_)));
    assert!(!err.is_network());
}

#[tokio::test]
async fn test_search_missing_results_field() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"errorMessage": "Invalid value(s) for key(s): [limit]"}"#)
        .create_async()
        .await;

    let client = ItunesClient::with_base_url(server.url());
    let err = client.search("anything", 20).await.unwrap_err();
    assert!(matches!(err, SearchError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_search_connection_refused() {
    // Port 9 (discard) is essentially never listening on test machines
    let client = ItunesClient::with_base_url("http://127.0.0.1:9");
    let err = client.search("anything", 20).await.unwrap_err();
    assert!(matches!(err, SearchError::Network(_)));
}
