//! Browser launcher - opens preview links
//!
//! Hands a URL to the platform's default opener (or a configured browser
//! command) and returns without waiting for it.

use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::is_preview_url;

/// Errors from opening a preview
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Browser command '{0}' not found")]
    NotFound(String),
    #[error("Failed to start browser: {0}")]
    StartFailed(#[from] std::io::Error),
    #[error("This entry has no preview link")]
    NoUrl,
}

/// Something that can show a URL to the user
pub trait PreviewOpener {
    fn open(&self, url: &str) -> Result<(), PreviewError>;
}

/// Opens URLs with the system browser
#[derive(Debug, Clone, Default)]
pub struct BrowserOpener {
    /// Overrides the platform opener when set
    command: Option<String>,
}

impl BrowserOpener {
    /// Use the platform default opener
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific browser command, e.g. "firefox"
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
        }
    }

    /// Program name that will be launched
    pub fn program(&self) -> &str {
        if let Some(ref cmd) = self.command {
            return cmd;
        }
        if cfg!(target_os = "macos") {
            "open"
        } else if cfg!(target_os = "windows") {
            "cmd"
        } else {
            "xdg-open"
        }
    }

    /// Full command line for `url`
    fn command_for(&self, url: &str) -> Command {
        let mut cmd = Command::new(self.program());
        if self.command.is_none() && cfg!(target_os = "windows") {
            // `start` treats the first quoted argument as a window title
            cmd.args(["/C", "start", ""]);
            cmd.arg(escape_for_cmd(url));
        } else {
            cmd.arg(url);
        }
        cmd
    }
}

/// Caret-escape the characters `cmd.exe` would otherwise treat as operators,
/// so a query string like `?i=1&uo=4` reaches `start` in one piece
fn escape_for_cmd(url: &str) -> String {
    let mut escaped = String::with_capacity(url.len());
    for c in url.chars() {
        if matches!(c, '^' | '&' | '|' | '<' | '>' | '(' | ')' | '%' | '!') {
            escaped.push('^');
        }
        escaped.push(c);
    }
    escaped
}

impl PreviewOpener for BrowserOpener {
    fn open(&self, url: &str) -> Result<(), PreviewError> {
        if !is_preview_url(url) {
            return Err(PreviewError::NoUrl);
        }

        let mut cmd = self.command_for(url);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());

        debug!(program = self.program(), %url, "launching browser");
        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PreviewError::NotFound(self.program().to_string())
            } else {
                PreviewError::StartFailed(e)
            }
        })?;
        info!(%url, "opened preview");

        // Reap the launcher in the background so it doesn't linger as a zombie
        std::thread::spawn(move || match child.wait() {
            Ok(status) => debug!(%status, "browser launcher exited"),
            Err(e) => debug!("failed to wait for browser launcher: {}", e),
        });
        Ok(())
    }
}
