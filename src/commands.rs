//! CLI Command Handlers
//!
//! Implements the one-shot commands on top of the API client and catalog.
//! Each handler takes CLI args and Output, returns ExitCode.

use serde::Serialize;
use tracing::{debug, warn};

use crate::api::ItunesClient;
use crate::catalog::{classify, render, select_preview, Buckets};
use crate::cli::{ExitCode, Output, PreviewCmd, PreviewResponse, SearchCmd};
use crate::config::Config;
use crate::models::{Media, MediaItem, Movie, Song};
use crate::preview::{BrowserOpener, PreviewError, PreviewOpener};

// =============================================================================
// JSON Views
// =============================================================================

/// An entity plus its derived summary and duration
#[derive(Debug, Serialize)]
pub struct ItemView<'a, T: Serialize> {
    #[serde(flatten)]
    pub item: &'a T,
    pub summary: String,
    pub duration: u64,
}

impl<'a, T: Serialize + MediaItem> ItemView<'a, T> {
    fn of(item: &'a T) -> Self {
        Self {
            item,
            summary: item.summary(),
            duration: item.duration(),
        }
    }
}

/// JSON shape of a search
#[derive(Debug, Serialize)]
pub struct SearchView<'a> {
    pub term: &'a str,
    pub count: usize,
    pub movie: Vec<ItemView<'a, Movie>>,
    pub song: Vec<ItemView<'a, Song>>,
    pub other: Vec<ItemView<'a, Media>>,
}

impl<'a> SearchView<'a> {
    pub fn new(term: &'a str, buckets: &'a Buckets) -> Self {
        Self {
            term,
            count: buckets.len(),
            movie: buckets.movie.iter().map(ItemView::of).collect(),
            song: buckets.song.iter().map(ItemView::of).collect(),
            other: buckets.other.iter().map(ItemView::of).collect(),
        }
    }
}

// =============================================================================
// Shared
// =============================================================================

fn client_for(config: &Config) -> ItunesClient {
    ItunesClient::with_base_url(config.base_url())
}

async fn fetch(
    client: &ItunesClient,
    term: &str,
    limit: u32,
    output: &Output,
) -> Result<Buckets, ExitCode> {
    output.info(format!("Searching for: {}", term));
    match client.search(term, limit).await {
        Ok(records) => {
            let buckets = classify(&records);
            debug!(
                movies = buckets.movie.len(),
                songs = buckets.song.len(),
                other = buckets.other.len(),
                "classified"
            );
            Ok(buckets)
        }
        Err(e) => {
            warn!("search failed: {}", e);
            let code = if e.is_network() {
                ExitCode::NetworkError
            } else {
                ExitCode::Error
            };
            Err(output.error(format!("Search failed: {}", e), code))
        }
    }
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, config: &Config, output: &Output) -> ExitCode {
    let client = client_for(config);
    let limit = config.limit(cmd.limit);

    let buckets = match fetch(&client, &cmd.term, limit, output).await {
        Ok(buckets) => buckets,
        Err(code) => return code,
    };

    if output.json {
        if let Err(e) = output.print(SearchView::new(&cmd.term, &buckets)) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else if buckets.is_empty() {
        output.info("No results found.");
    } else {
        output.lines(render(&buckets));
    }

    if buckets.is_empty() {
        ExitCode::NoResults
    } else {
        ExitCode::Success
    }
}

// =============================================================================
// Preview Command
// =============================================================================

pub async fn preview_cmd(cmd: PreviewCmd, config: &Config, output: &Output) -> ExitCode {
    let opener = match config.browser {
        Some(ref browser) => BrowserOpener::with_command(browser),
        None => BrowserOpener::new(),
    };
    preview_with(cmd, config, output, &opener).await
}

/// Preview flow with an injectable opener
pub async fn preview_with(
    cmd: PreviewCmd,
    config: &Config,
    output: &Output,
    opener: &dyn PreviewOpener,
) -> ExitCode {
    let client = client_for(config);
    let limit = config.limit(cmd.limit);

    let buckets = match fetch(&client, &cmd.term, limit, output).await {
        Ok(buckets) => buckets,
        Err(code) => return code,
    };
    if buckets.is_empty() {
        return output.error(format!("No results for '{}'", cmd.term), ExitCode::NoResults);
    }

    let url = match select_preview(&buckets, &cmd.bucket, cmd.index) {
        Ok(url) => url.to_string(),
        Err(e) => return output.error(e.to_string(), ExitCode::SelectionFailed),
    };

    let opened = if cmd.print_only {
        false
    } else {
        match opener.open(&url) {
            Ok(()) => true,
            Err(PreviewError::NoUrl) => {
                return output.error(PreviewError::NoUrl.to_string(), ExitCode::SelectionFailed)
            }
            Err(e) => return output.error(e.to_string(), ExitCode::LaunchFailed),
        }
    };

    if output.json {
        let response = PreviewResponse {
            bucket: cmd.bucket.trim().to_lowercase(),
            index: cmd.index,
            url,
            opened,
        };
        if let Err(e) = output.print(response) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        output.lines([url]);
    }
    ExitCode::Success
}
