//! Catalog tests
//!
//! Classification, rendering and preview selection over realistic search hits.

use mediafind::catalog::{classify, render, render_bucket, select_preview, BucketName, SelectionError};
use mediafind::models::{Entity, MediaItem, RawRecord};
use serde_json::{json, Value};

fn records(value: Value) -> Vec<RawRecord> {
    value
        .as_array()
        .expect("fixture must be an array")
        .iter()
        .filter_map(|v| v.as_object().cloned())
        .collect()
}

fn mixed_results() -> Vec<RawRecord> {
    records(json!([
        {
            "wrapperType": "track",
            "kind": "song",
            "artistName": "The Beatles",
            "collectionName": "1 (2015 Version)",
            "trackName": "Hey Jude",
            "collectionViewUrl": "https://music.apple.com/us/album/1440833098",
            "trackViewUrl": "https://music.apple.com/us/album/hey-jude/1440833098?i=1440833498",
            "releaseDate": "1968-08-26T12:00:00Z",
            "trackTimeMillis": 425653,
            "primaryGenreName": "Rock"
        },
        {
            "wrapperType": "track",
            "kind": "feature-movie",
            "artistName": "Ridley Scott",
            "trackName": "Blade Runner: The Final Cut",
            "trackViewUrl": "https://itunes.apple.com/us/movie/blade-runner/id594481902",
            "releaseDate": "1982-06-25T07:00:00Z",
            "trackTimeMillis": 7056000,
            "contentAdvisoryRating": "R",
            "primaryGenreName": "Sci-Fi & Fantasy"
        },
        {
            "wrapperType": "audiobook",
            "artistName": "Philip K. Dick",
            "collectionName": "Do Androids Dream of Electric Sheep?",
            "collectionViewUrl": "https://books.apple.com/us/audiobook/id1",
            "releaseDate": "2007-01-01T08:00:00Z"
        },
        {
            "wrapperType": "track",
            "kind": "podcast",
            "artistName": "Some Network",
            "trackName": "Weekly Show"
        },
        {
            "wrapperType": "track",
            "kind": "song",
            "artistName": "The Beatles",
            "collectionName": "Abbey Road",
            "trackName": "Come Together",
            "releaseDate": "1969-09-26T12:00:00Z",
            "trackTimeMillis": 259947,
            "primaryGenreName": "Rock"
        }
    ]))
}

// =============================================================================
// Classification
// =============================================================================

#[test]
fn test_routing_by_kind() {
    let buckets = classify(&mixed_results());

    assert_eq!(buckets.song.len(), 2);
    assert_eq!(buckets.movie.len(), 1);
    assert_eq!(buckets.other.len(), 2);

    assert_eq!(buckets.song[0].media.title, "Hey Jude");
    assert_eq!(buckets.song[1].media.title, "Come Together");
    assert_eq!(buckets.movie[0].content_rating, "R");
    assert_eq!(buckets.other[0].title, "Do Androids Dream of Electric Sheep?");
    assert_eq!(buckets.other[1].title, "Weekly Show");
}

#[test]
fn test_every_record_lands_in_exactly_one_bucket() {
    let input = mixed_results();
    let buckets = classify(&input);
    assert_eq!(buckets.len(), input.len());

    for record in &input {
        let entity = Entity::from_raw(record);
        let kind = record.get("kind").and_then(Value::as_str);
        match (kind, entity) {
            (Some("song"), Entity::Song(_)) => {}
            (Some("feature-movie"), Entity::Movie(_)) => {}
            (k, Entity::Other(_)) if k != Some("song") && k != Some("feature-movie") => {}
            (k, e) => panic!("kind {:?} routed to {:?}", k, e),
        }
    }
}

#[test]
fn test_defaults_and_year() {
    let input = records(json!([
        {"kind": "song", "releaseDate": "2001-05-12"}
    ]));
    let buckets = classify(&input);
    let song = &buckets.song[0];
    assert_eq!(song.media.title, "No Title");
    assert_eq!(song.media.release_year, "2001");
    assert_eq!(song.media.preview_url, "No URL");
}

#[test]
fn test_durations() {
    let input = records(json!([
        {"kind": "song", "trackTimeMillis": 215000},
        {"kind": "feature-movie", "trackTimeMillis": 7260000}
    ]));
    let buckets = classify(&input);
    assert_eq!(buckets.song[0].duration(), 215);
    assert_eq!(buckets.movie[0].duration(), 121);
    assert_eq!(buckets.movie[0].runtime_millis, 7_260_000);
}

#[test]
fn test_movie_uses_collection_fallbacks() {
    let input = records(json!([
        {
            "kind": "feature-movie",
            "collectionName": "Trilogy Box",
            "collectionViewUrl": "https://itunes.apple.com/box"
        }
    ]));
    let movie = &classify(&input).movie[0];
    assert_eq!(movie.media.title, "Trilogy Box");
    assert_eq!(movie.preview_url(), "https://itunes.apple.com/box");
    assert_eq!(movie.content_rating, "No Rating");
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_end_to_end_single_song() {
    let input = records(json!([{
        "kind": "song",
        "trackName": "A",
        "artistName": "B",
        "releaseDate": "1999-01-01",
        "primaryGenreName": "Rock",
        "trackTimeMillis": 180000,
        "trackViewUrl": "http://x"
    }]));
    let buckets = classify(&input);

    assert!(buckets.movie.is_empty());
    assert!(buckets.other.is_empty());
    let song = &buckets.song[0];
    assert_eq!(song.media.title, "A");
    assert_eq!(song.media.author, "B");
    assert_eq!(song.media.release_year, "1999");
    assert_eq!(song.genre, "Rock");
    assert_eq!(song.duration(), 180);

    assert_eq!(render(&buckets), vec!["SONG", "0. A by B (1999) [Rock]"]);
}

#[test]
fn test_render_mixed() {
    let lines = render(&classify(&mixed_results()));
    assert_eq!(
        lines,
        vec![
            "MOVIE",
            "0. Blade Runner: The Final Cut by Ridley Scott (1982) [R]",
            "SONG",
            "0. Hey Jude by The Beatles (1968) [Rock]",
            "1. Come Together by The Beatles (1969) [Rock]",
            "OTHER",
            "0. Do Androids Dream of Electric Sheep? by Philip K. Dick (2007)",
            "1. Weekly Show by Some Network (No Release Year)",
        ]
    );
}

#[test]
fn test_render_single_bucket() {
    let buckets = classify(&mixed_results());
    assert_eq!(
        render_bucket(&buckets, BucketName::Song),
        vec![
            "0. Hey Jude by The Beatles (1968) [Rock]",
            "1. Come Together by The Beatles (1969) [Rock]",
        ]
    );
}

// =============================================================================
// Preview Selection
// =============================================================================

#[test]
fn test_select_preview_success() {
    let buckets = classify(&mixed_results());
    assert_eq!(
        select_preview(&buckets, "song", 0),
        Ok("https://music.apple.com/us/album/hey-jude/1440833098?i=1440833498")
    );
    assert_eq!(
        select_preview(&buckets, "Other", 0),
        Ok("https://books.apple.com/us/audiobook/id1")
    );
    // No URL at all on the second song
    assert_eq!(select_preview(&buckets, "song", 1), Ok("No URL"));
}

#[test]
fn test_select_preview_empty_movie_bucket() {
    let input = records(json!([{"kind": "song"}]));
    let buckets = classify(&input);
    assert_eq!(
        select_preview(&buckets, "movie", 0),
        Err(SelectionError::IndexOutOfRange { index: 0, len: 0 })
    );
}

#[test]
fn test_select_preview_unknown_bucket() {
    let buckets = classify(&mixed_results());
    assert_eq!(
        select_preview(&buckets, "podcast", 0),
        Err(SelectionError::InvalidBucket("podcast".into()))
    );
}
