//! mediafind - search the iTunes catalog from your terminal
//!
//! Fetches search hits, sorts them into movies, songs and everything else,
//! prints numbered summaries and opens previews in the browser.
//!
//! # Modules
//!
//! - `models` - Typed entities decoded from raw search hits
//! - `catalog` - Classification, rendering and preview selection
//! - `api` - iTunes Search API client
//! - `preview` - Browser launcher
//! - `shell` - Interactive prompt
//! - `cli` / `commands` - One-shot subcommands
//! - `config` - Optional config file and environment overrides

pub mod api;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod preview;
pub mod shell;

// Re-export commonly used types
pub use api::{ItunesClient, SearchError};
pub use catalog::{
    classify, parse_index, render, render_bucket, select_preview, BucketName, Buckets,
    SelectionError,
};
pub use config::Config;
pub use models::{Entity, Media, MediaItem, Movie, RawRecord, Song};
pub use preview::{BrowserOpener, PreviewError, PreviewOpener};
pub use shell::Shell;
