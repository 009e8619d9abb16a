//! mediafind - search the iTunes catalog from your terminal
//!
//! # Usage
//!
//! ```bash
//! # Interactive prompt
//! mediafind
//!
//! # CLI mode (for automation)
//! mediafind search "abbey road"
//! mediafind preview "blade runner" movie 0
//! ```

use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mediafind::cli::{Cli, Command, ExitCode, Output};
use mediafind::{commands, BrowserOpener, Config, ItunesClient, Shell};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let output = Output::new(&cli);
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let code = output.error(format!("{:#}", e), ExitCode::InvalidArgs);
            std::process::exit(code.into());
        }
    };

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        let exit_code = run_cli(cli, &config, &output).await;
        std::process::exit(exit_code.into());
    } else {
        run_shell(&config).await
    }
}

/// Log to stderr so results on stdout stay clean; RUST_LOG wins over flags
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: &Config, output: &Output) -> ExitCode {
    match cli.command {
        Some(Command::Search(cmd)) => commands::search_cmd(cmd, config, output).await,
        Some(Command::Preview(cmd)) => commands::preview_cmd(cmd, config, output).await,
        None => ExitCode::Success,
    }
}

/// Run the interactive prompt on stdin/stdout
async fn run_shell(config: &Config) -> Result<()> {
    let opener = match config.browser {
        Some(ref browser) => BrowserOpener::with_command(browser),
        None => BrowserOpener::new(),
    };
    let client = ItunesClient::with_base_url(config.base_url());

    let mut shell = Shell::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        opener,
        client,
        config.limit(None),
    );
    shell.run().await
}
