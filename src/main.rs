use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod api;
mod app;
mod config;
mod controller;
mod events;
mod markup;
mod reveal;
mod ui;

use config::Config;

#[derive(Parser)]
#[command(name = "schemer")]
#[command(version = "0.1.0")]
#[command(about = "Terminal chat client for the scheme advisor", long_about = None)]
struct Cli {
    /// Override the response service endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Override the typewriter delay in milliseconds
    #[arg(long)]
    typing_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one question and print the reply without the TUI
    Ask {
        /// The question to send
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(ms) = cli.typing_ms {
        config.typing_interval_ms = ms;
    }

    init_logging()?;

    match cli.command {
        Some(Commands::Ask { text }) => ask(&config, &text.join(" ")).await,
        None => app::run(config).await,
    }
}

/// Diagnostics go to a file; the TUI owns stdout.
fn init_logging() -> Result<()> {
    let path = Config::log_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("schemer=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// One-shot mode: same request and typewriter pacing as the TUI, printed to
/// stdout.
async fn ask(config: &Config, text: &str) -> Result<()> {
    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!("nothing to ask");
    }

    let client = api::ResponseClient::new(config.endpoint.clone(), config.request_timeout())?;
    match client.fetch_response(text).await {
        Ok(reply) => {
            let reply = markup::flatten_markup(&reply);
            let mut stdout = io::stdout();
            for ch in reply.chars() {
                write!(stdout, "{ch}")?;
                stdout.flush()?;
                tokio::time::sleep(config.typing_interval()).await;
            }
            writeln!(stdout)?;
        }
        Err(err) => {
            tracing::warn!(error = %err, "response request failed");
            println!("{}", controller::ERROR_REPLY);
        }
    }

    Ok(())
}
