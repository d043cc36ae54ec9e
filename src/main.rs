//! Feedrelay main entry point
//!
//! This is the command-line interface for the Feedrelay RSS relay.

use clap::{Parser, Subcommand};
use feedrelay::config::{compute_config_hash, load_effective_config, Config};
use feedrelay::FeedService;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Feedrelay: a tolerant RSS relay
///
/// Feedrelay fetches one configured RSS feed, normalizes its items into a
/// stable schema and serves them newest first as a JSON envelope that always
/// carries `items` and `total`, plus `error` when something went wrong.
#[derive(Parser, Debug)]
#[command(name = "feedrelay")]
#[command(version)]
#[command(about = "A tolerant RSS relay", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the feed envelope over HTTP
    Serve {
        /// Address to listen on, overriding the configured one
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Fetch the feed once and print the envelope as JSON
    Fetch {
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Validate configuration and show the effective settings
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    let config = match load_effective_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Some(path) = &cli.config {
        let hash = compute_config_hash(path)?;
        tracing::info!(
            "Configuration loaded from {} (hash: {})",
            path.display(),
            hash
        );
    }

    match cli.command {
        Command::Serve { bind } => handle_serve(config, bind).await,
        Command::Fetch { pretty } => handle_fetch(&config, pretty).await,
        Command::Check => handle_check(&config),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// `RUST_LOG` wins over the flags when set. Logs go to stderr so `fetch`
/// output stays clean JSON.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            // Only show errors
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("feedrelay=info,warn"),
                1 => EnvFilter::new("feedrelay=debug,info"),
                2 => EnvFilter::new("feedrelay=trace,debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles `serve`: runs the HTTP surface until Ctrl-C
async fn handle_serve(mut config: Config, bind: Option<String>) -> anyhow::Result<()> {
    if let Some(bind) = bind {
        config.server.bind = bind;
        feedrelay::config::validate(&config)?;
    }

    if config.source.url().is_none() {
        tracing::warn!("No feed URL configured; every request will report it");
    }

    let service = Arc::new(FeedService::from_config(&config)?);
    feedrelay::server::serve(service, &config.server).await?;
    Ok(())
}

/// Handles `fetch`: one pass through the pipeline, envelope on stdout
///
/// In-band failures still exit 0; the envelope's `error` field carries them.
async fn handle_fetch(config: &Config, pretty: bool) -> anyhow::Result<()> {
    let service = FeedService::from_config(config)?;
    let result = service.load().await;

    let json = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", json);

    Ok(())
}

/// Handles `check`: prints the effective settings without touching the network
fn handle_check(config: &Config) -> anyhow::Result<()> {
    println!("=== Feedrelay Configuration ===\n");

    println!("Source:");
    match config.source.url() {
        Some(url) => println!("  URL: {}", url),
        None => println!("  URL: (not set, requests will report a configuration error)"),
    }

    println!("\nFetch:");
    println!("  Timeout: {}ms", config.fetch.timeout_ms);
    println!("  Retries: {}", config.fetch.retries);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nServer:");
    println!("  Bind: {}", config.server.bind);
    println!("  Route: {}", config.server.route);

    println!("\n✓ Configuration is valid");

    Ok(())
}
