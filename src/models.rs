//! Data structures and types for mediafind
//!
//! Every search hit comes back from the API as a loose JSON object. This module
//! turns those objects into typed entities:
//! - **Media**: anything the catalog returns (podcasts, ebooks, albums, ...)
//! - **Song**: a track with album, genre and length
//! - **Movie**: a feature film with rating and runtime
//!
//! Missing fields never fail; they fall back to documented placeholders.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// One undecoded search hit, exactly as the API returned it
pub type RawRecord = Map<String, Value>;

pub const NO_TITLE: &str = "No Title";
pub const NO_AUTHOR: &str = "No Author";
pub const NO_RELEASE_YEAR: &str = "No Release Year";
pub const NO_URL: &str = "No URL";
pub const NO_ALBUM: &str = "No Album";
pub const NO_GENRE: &str = "No Genre";
pub const NO_RATING: &str = "No Rating";

// =============================================================================
// Raw Field Access
// =============================================================================

/// Read a field as text. `null`, arrays and objects count as absent.
fn text(record: &RawRecord, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// First present field among `keys`, or the placeholder
fn text_or(record: &RawRecord, keys: &[&str], default: &str) -> String {
    keys.iter()
        .find_map(|key| text(record, key))
        .unwrap_or_else(|| default.to_string())
}

/// Read a millisecond count, accepting numbers and numeric strings
fn millis(record: &RawRecord, key: &str) -> u64 {
    match record.get(key) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u64>()
            .ok()
            .or_else(|| {
                s.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && *f > 0.0)
                    .map(|f| f as u64)
            })
            .unwrap_or(0),
        _ => 0,
    }
}

/// Extract the year from a date string like "2001-05-12T07:00:00Z"
fn release_year(record: &RawRecord) -> String {
    text(record, "releaseDate")
        .and_then(|date| date.split('-').next().map(str::to_string))
        .unwrap_or_else(|| NO_RELEASE_YEAR.to_string())
}

/// Divide and round half away from zero
fn rounded_div(value: u64, divisor: u64) -> u64 {
    (value as f64 / divisor as f64).round() as u64
}

// =============================================================================
// Shared Capability
// =============================================================================

/// What every catalog entity can do
pub trait MediaItem {
    /// The generic fields shared by all variants
    fn media(&self) -> &Media;

    /// One-line human summary, e.g. "Hey Jude by The Beatles (1968) [Rock]"
    fn summary(&self) -> String;

    /// Length in the variant's natural unit: seconds for songs, minutes for
    /// movies, 0 for everything else
    fn duration(&self) -> u64;

    fn preview_url(&self) -> &str {
        &self.media().preview_url
    }
}

// =============================================================================
// Generic Media
// =============================================================================

/// A catalog entry of any kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Media {
    pub title: String,
    pub author: String,
    pub release_year: String,
    pub preview_url: String,
}

impl Media {
    /// Build from explicit values
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        release_year: impl Into<String>,
        preview_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            release_year: release_year.into(),
            preview_url: preview_url.into(),
        }
    }

    /// Decode the generic fields of a raw record.
    ///
    /// Track-level names and URLs win over collection-level ones.
    pub fn from_raw(record: &RawRecord) -> Self {
        Self {
            title: text_or(record, &["trackName", "collectionName"], NO_TITLE),
            author: text_or(record, &["artistName"], NO_AUTHOR),
            release_year: release_year(record),
            preview_url: text_or(record, &["trackViewUrl", "collectionViewUrl"], NO_URL),
        }
    }

    /// True when the entry carries a real link rather than the placeholder
    pub fn has_preview(&self) -> bool {
        is_preview_url(&self.preview_url)
    }
}

/// Whether `url` is something a browser can open
pub fn is_preview_url(url: &str) -> bool {
    !url.trim().is_empty() && url != NO_URL
}

impl Default for Media {
    fn default() -> Self {
        Self::new(NO_TITLE, NO_AUTHOR, NO_RELEASE_YEAR, NO_URL)
    }
}

impl MediaItem for Media {
    fn media(&self) -> &Media {
        self
    }

    fn summary(&self) -> String {
        format!("{} by {} ({})", self.title, self.author, self.release_year)
    }

    fn duration(&self) -> u64 {
        0
    }
}

impl fmt::Display for Media {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

// =============================================================================
// Song
// =============================================================================

/// A music track
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Song {
    #[serde(flatten)]
    pub media: Media,
    pub album: String,
    pub genre: String,
    pub track_length_millis: u64,
}

impl Song {
    pub fn new(
        media: Media,
        album: impl Into<String>,
        genre: impl Into<String>,
        track_length_millis: u64,
    ) -> Self {
        Self {
            media,
            album: album.into(),
            genre: genre.into(),
            track_length_millis,
        }
    }

    pub fn from_raw(record: &RawRecord) -> Self {
        Self {
            media: Media::from_raw(record),
            album: text_or(record, &["collectionName"], NO_ALBUM),
            genre: text_or(record, &["primaryGenreName"], NO_GENRE),
            track_length_millis: millis(record, "trackTimeMillis"),
        }
    }
}

impl Default for Song {
    fn default() -> Self {
        Self::new(Media::default(), NO_ALBUM, NO_GENRE, 0)
    }
}

impl MediaItem for Song {
    fn media(&self) -> &Media {
        &self.media
    }

    fn summary(&self) -> String {
        format!("{} [{}]", self.media.summary(), self.genre)
    }

    /// Track length in seconds
    fn duration(&self) -> u64 {
        rounded_div(self.track_length_millis, 1_000)
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

// =============================================================================
// Movie
// =============================================================================

/// A feature film
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    #[serde(flatten)]
    pub media: Media,
    pub content_rating: String,
    pub runtime_millis: u64,
}

impl Movie {
    pub fn new(media: Media, content_rating: impl Into<String>, runtime_millis: u64) -> Self {
        Self {
            media,
            content_rating: content_rating.into(),
            runtime_millis,
        }
    }

    pub fn from_raw(record: &RawRecord) -> Self {
        Self {
            media: Media::from_raw(record),
            content_rating: text_or(record, &["contentAdvisoryRating"], NO_RATING),
            runtime_millis: millis(record, "trackTimeMillis"),
        }
    }
}

impl Default for Movie {
    fn default() -> Self {
        Self::new(Media::default(), NO_RATING, 0)
    }
}

impl MediaItem for Movie {
    fn media(&self) -> &Media {
        &self.media
    }

    fn summary(&self) -> String {
        format!("{} [{}]", self.media.summary(), self.content_rating)
    }

    /// Runtime in minutes
    fn duration(&self) -> u64 {
        rounded_div(self.runtime_millis, 60_000)
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

// =============================================================================
// Entity (per-record dispatch)
// =============================================================================

/// Discriminant values of the `kind` field
pub const KIND_MOVIE: &str = "feature-movie";
pub const KIND_SONG: &str = "song";

/// A decoded search hit of any variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Movie(Movie),
    Song(Song),
    Other(Media),
}

impl Entity {
    /// Pick the variant from the record's `kind` and decode it.
    /// Records without a recognised `kind` become generic media.
    pub fn from_raw(record: &RawRecord) -> Self {
        match record.get("kind").and_then(Value::as_str) {
            Some(KIND_MOVIE) => Entity::Movie(Movie::from_raw(record)),
            Some(KIND_SONG) => Entity::Song(Song::from_raw(record)),
            _ => Entity::Other(Media::from_raw(record)),
        }
    }

    fn item(&self) -> &dyn MediaItem {
        match self {
            Entity::Movie(m) => m,
            Entity::Song(s) => s,
            Entity::Other(o) => o,
        }
    }
}

impl MediaItem for Entity {
    fn media(&self) -> &Media {
        self.item().media()
    }

    fn summary(&self) -> String {
        self.item().summary()
    }

    fn duration(&self) -> u64 {
        self.item().duration()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}
