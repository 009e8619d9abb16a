//! Interactive shell
//!
//! The question-and-answer loop users get when running `mediafind` with no
//! subcommand: search, list results, optionally open a preview, repeat.
//! Generic over its input, output and browser so tests can drive a whole
//! conversation from memory.

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

use crate::api::ItunesClient;
use crate::catalog::{classify, parse_index, render, render_bucket, select_preview, BucketName, Buckets};
use crate::preview::PreviewOpener;

pub const SEARCH_PROMPT: &str = "\nEnter a search term or type 'exit' to quit: ";
pub const PREVIEW_PROMPT: &str = "\nDo you want to preview any media? (yes/no/exit): ";
pub const BUCKET_PROMPT: &str = "\nWhich media type do you want to preview? (movie/song/other): ";
pub const INDEX_PROMPT: &str = "\nEnter the number of the media you want to preview: ";

/// What the outer loop should do after a search session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive search session
pub struct Shell<R, W, O> {
    input: R,
    output: W,
    opener: O,
    client: ItunesClient,
    limit: u32,
}

impl<R, W, O> Shell<R, W, O>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    O: PreviewOpener,
{
    pub fn new(input: R, output: W, opener: O, client: ItunesClient, limit: u32) -> Self {
        Self {
            input,
            output,
            opener,
            client,
            limit,
        }
    }

    /// Hand back the writer and opener (for inspecting a finished session)
    pub fn into_parts(self) -> (W, O) {
        (self.output, self.opener)
    }

    /// Run until the user types `exit` or input ends
    pub async fn run(&mut self) -> Result<()> {
        while let Some(line) = self.prompt(SEARCH_PROMPT).await? {
            let term = line.trim();
            if term.is_empty() {
                continue;
            }
            if term.eq_ignore_ascii_case("exit") {
                break;
            }
            if self.session(term.to_string()).await? == Flow::Exit {
                break;
            }
        }
        info!("shell finished");
        Ok(())
    }

    /// One search followed by the preview question, which may chain into
    /// further searches
    async fn session(&mut self, term: String) -> Result<Flow> {
        let Some(mut buckets) = self.search(&term).await? else {
            return Ok(Flow::Continue);
        };

        loop {
            let Some(line) = self.prompt(PREVIEW_PROMPT).await? else {
                return Ok(Flow::Exit);
            };
            let answer = line.trim();
            match answer.to_lowercase().as_str() {
                "" => continue,
                "yes" => {
                    self.preview(&buckets).await?;
                    return Ok(Flow::Continue);
                }
                "no" => {
                    self.write_line("Have a good day!").await?;
                    return Ok(Flow::Continue);
                }
                // Back to the search prompt, like "no" without the farewell
                "exit" => return Ok(Flow::Continue),
                _ => match self.search(answer).await? {
                    Some(next) => buckets = next,
                    None => return Ok(Flow::Continue),
                },
            }
        }
    }

    /// Fetch, classify and print. `None` when there is nothing to preview,
    /// either because the search failed or came back empty.
    async fn search(&mut self, term: &str) -> Result<Option<Buckets>> {
        info!(term, limit = self.limit, "search");
        let records = match self.client.search(term, self.limit).await {
            Ok(records) => records,
            Err(e) => {
                warn!("search failed: {}", e);
                self.write_line(&format!("An error occurred: {}", e)).await?;
                return Ok(None);
            }
        };

        let buckets = classify(&records);
        if buckets.is_empty() {
            self.write_line("No results found.").await?;
            return Ok(None);
        }

        for line in render(&buckets) {
            if BucketName::ALL.iter().any(|name| name.header() == line) {
                self.write_line("").await?;
            }
            self.write_line(&line).await?;
        }
        Ok(Some(buckets))
    }

    /// Ask for a bucket and index, then open the chosen entry
    async fn preview(&mut self, buckets: &Buckets) -> Result<()> {
        let Some(answer) = self.prompt(BUCKET_PROMPT).await? else {
            return Ok(());
        };
        let name = match answer.parse::<BucketName>() {
            Ok(name) => name,
            Err(e) => return self.report(&e).await,
        };

        for line in render_bucket(buckets, name) {
            self.write_line(&line).await?;
        }

        let Some(answer) = self.prompt(INDEX_PROMPT).await? else {
            return Ok(());
        };
        let url = match parse_index(&answer).and_then(|i| select_preview(buckets, name.as_str(), i)) {
            Ok(url) => url.to_string(),
            Err(e) => return self.report(&e).await,
        };

        self.write_line(&url).await?;
        if let Err(e) = self.opener.open(&url) {
            warn!("preview failed: {}", e);
            self.report(&e).await?;
        }
        Ok(())
    }

    async fn report(&mut self, error: &dyn std::error::Error) -> Result<()> {
        self.write_line(&format!("Error: {}", error)).await
    }

    /// Print `text`, then read one line. `None` on end of input.
    async fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    async fn write_line(&mut self, line: &str) -> Result<()> {
        self.output.write_all(line.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        Ok(())
    }
}
