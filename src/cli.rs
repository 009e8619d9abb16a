//! CLI - Command Line Interface for mediafind
//!
//! With no subcommand the interactive shell starts. Subcommands run a single
//! search or preview and exit, with optional JSON output for scripting.
//!
//! # Examples
//!
//! ```bash
//! # Interactive mode
//! mediafind
//!
//! # One-shot search
//! mediafind search "abbey road" --limit 5
//! mediafind search "blade runner" --json
//!
//! # Open the first movie hit
//! mediafind preview "blade runner" movie 0
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error (including an undecodable API response)
    Error = 1,
    /// Invalid arguments or config
    InvalidArgs = 2,
    /// Network error or bad HTTP status
    NetworkError = 3,
    /// Search returned nothing
    NoResults = 4,
    /// Bucket or index did not resolve
    SelectionFailed = 5,
    /// Browser could not be started
    LaunchFailed = 6,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// mediafind - search the iTunes catalog from your terminal
///
/// Run without arguments for the interactive prompt.
/// Use subcommands for one-shot searches.
#[derive(Parser, Debug)]
#[command(
    name = "mediafind",
    version,
    about = "Search the iTunes catalog and preview what you find",
    long_about = "Searches the iTunes catalog, groups hits into movies, songs \
                  and everything else, and opens previews in your browser.\n\n\
                  Run without arguments for the interactive prompt.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  mediafind                              Interactive prompt\n\
                  mediafind search \"abbey road\"          Search and list results\n\
                  mediafind search beatles --json        JSON output\n\
                  mediafind preview \"blade runner\" movie 0   Open a preview"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (omit for interactive mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running a one-shot command (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }

    /// Default log filter for this invocation
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "mediafind=debug"
        } else {
            "mediafind=warn"
        }
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search the catalog and list grouped results
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Search, pick one result and open its preview
    #[command(visible_alias = "p")]
    Preview(PreviewCmd),
}

/// Search the catalog by term
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search term (artist, title, keywords)
    #[arg(required = true)]
    pub term: String,

    /// Maximum number of results (default 20)
    #[arg(long, short = 'l')]
    pub limit: Option<u32>,
}

/// Open the preview of one search result
#[derive(Args, Debug)]
pub struct PreviewCmd {
    /// Search term (artist, title, keywords)
    pub term: String,

    /// Result group: movie, song or other
    pub bucket: String,

    /// Zero-based position within the group
    pub index: usize,

    /// Maximum number of results (default 20)
    #[arg(long, short = 'l')]
    pub limit: Option<u32>,

    /// Print the URL without opening a browser
    #[arg(long)]
    pub print_only: bool,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Preview response
#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub bucket: String,
    pub index: usize,
    pub url: String,
    pub opened: bool,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as JSON
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        let output = JsonOutput::success(data);
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    /// Print plain text lines
    pub fn lines<I, S>(&self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            println!("{}", line.as_ref());
        }
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
