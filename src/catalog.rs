//! Classification, rendering and preview selection
//!
//! A search produces a flat list of raw records. [`classify`] sorts them into
//! three buckets, [`render`] turns the buckets into numbered display lines and
//! [`select_preview`] resolves a bucket name plus index back to a URL.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::models::{Entity, Media, MediaItem, Movie, RawRecord, Song};

// =============================================================================
// Errors
// =============================================================================

/// Why a preview could not be resolved
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Invalid media type '{0}' (expected movie, song or other)")]
    InvalidBucket(String),

    #[error("Invalid number {index} ({len} entries available)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid number {0}: numbering starts at 0")]
    NegativeIndex(i64),

    #[error("'{0}' is not a number")]
    InvalidIndex(String),
}

// =============================================================================
// Bucket Names
// =============================================================================

/// The three groupings produced by classification, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketName {
    Movie,
    Song,
    Other,
}

impl BucketName {
    pub const ALL: [BucketName; 3] = [BucketName::Movie, BucketName::Song, BucketName::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            BucketName::Movie => "movie",
            BucketName::Song => "song",
            BucketName::Other => "other",
        }
    }

    /// Header line shown above the bucket's entries
    pub fn header(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BucketName {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(BucketName::Movie),
            "song" => Ok(BucketName::Song),
            "other" | "other_media" => Ok(BucketName::Other),
            _ => Err(SelectionError::InvalidBucket(s.trim().to_string())),
        }
    }
}

// =============================================================================
// Buckets
// =============================================================================

/// Classified search results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Buckets {
    pub movie: Vec<Movie>,
    pub song: Vec<Song>,
    pub other: Vec<Media>,
}

impl Buckets {
    /// Entries of one bucket, in input order
    pub fn items(&self, name: BucketName) -> Vec<&dyn MediaItem> {
        match name {
            BucketName::Movie => self.movie.iter().map(|m| m as &dyn MediaItem).collect(),
            BucketName::Song => self.song.iter().map(|s| s as &dyn MediaItem).collect(),
            BucketName::Other => self.other.iter().map(|o| o as &dyn MediaItem).collect(),
        }
    }

    /// Number of entries in one bucket
    pub fn bucket_len(&self, name: BucketName) -> usize {
        match name {
            BucketName::Movie => self.movie.len(),
            BucketName::Song => self.song.len(),
            BucketName::Other => self.other.len(),
        }
    }

    /// Total entries across all buckets
    pub fn len(&self) -> usize {
        self.movie.len() + self.song.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, entity: Entity) {
        match entity {
            Entity::Movie(m) => self.movie.push(m),
            Entity::Song(s) => self.song.push(s),
            Entity::Other(o) => self.other.push(o),
        }
    }
}

/// Sort raw records into movie, song and other buckets.
///
/// Order within each bucket follows the input.
pub fn classify<'a, I>(records: I) -> Buckets
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    let mut buckets = Buckets::default();
    for record in records {
        buckets.push(Entity::from_raw(record));
    }
    buckets
}

// =============================================================================
// Rendering
// =============================================================================

/// Numbered lines for one bucket, zero-based
pub fn render_bucket(buckets: &Buckets, name: BucketName) -> Vec<String> {
    buckets
        .items(name)
        .into_iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i, item.summary()))
        .collect()
}

/// Display lines for all non-empty buckets: a header, then numbered entries
pub fn render(buckets: &Buckets) -> Vec<String> {
    let mut lines = Vec::with_capacity(buckets.len() + BucketName::ALL.len());
    for name in BucketName::ALL {
        if buckets.bucket_len(name) == 0 {
            continue;
        }
        lines.push(name.header());
        lines.extend(render_bucket(buckets, name));
    }
    lines
}

// =============================================================================
// Preview Selection
// =============================================================================

/// Resolve a bucket name and index to the entry's preview URL
pub fn select_preview<'a>(
    buckets: &'a Buckets,
    bucket_name: &str,
    index: usize,
) -> Result<&'a str, SelectionError> {
    let name: BucketName = bucket_name.parse()?;
    let len = buckets.bucket_len(name);
    let url = match name {
        BucketName::Movie => buckets.movie.get(index).map(|m| m.preview_url()),
        BucketName::Song => buckets.song.get(index).map(|s| s.preview_url()),
        BucketName::Other => buckets.other.get(index).map(|o| o.preview_url()),
    };
    url.ok_or(SelectionError::IndexOutOfRange { index, len })
}

/// Parse a user-typed index. Anything that isn't a non-negative integer
/// is rejected.
pub fn parse_index(input: &str) -> Result<usize, SelectionError> {
    let trimmed = input.trim();
    if let Ok(index) = trimmed.parse::<usize>() {
        return Ok(index);
    }
    match trimmed.parse::<i64>() {
        Ok(n) if n < 0 => Err(SelectionError::NegativeIndex(n)),
        _ => Err(SelectionError::InvalidIndex(trimmed.to_string())),
    }
}
