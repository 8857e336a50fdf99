//! Ripple-Spider main entry point
//!
//! This is the command-line interface for the Ripple-Spider crawler.

use anyhow::Context;
use clap::{CommandFactory, Parser};
use ripple_spider::config::{load_config_with_hash, CrawlConfig, CrawlOverrides};
use ripple_spider::crawler::crawl;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Ripple-Spider: a bounded, concurrent web crawler
///
/// Starting from one seed URL, fetches pages and follows their absolute
/// http(s) links until the crawl limit is reached. Send SIGHUP for a status
/// line.
#[derive(Parser, Debug)]
#[command(name = "ripple-spider")]
#[command(version)]
#[command(about = "A bounded, concurrent web crawler", long_about = None)]
struct Cli {
    /// This is the 'seed' URL for the crawler
    #[arg(long = "starting-url", value_name = "URL")]
    starting_url: Option<String>,

    /// The amount of links that the crawler should crawl [default: 100]
    #[arg(long = "crawl-limit", value_name = "N")]
    crawl_limit: Option<u64>,

    /// The number of fetch workers, and of parse workers [default: 1]
    #[arg(long = "num-threads", value_name = "N")]
    num_threads: Option<u32>,

    /// Seconds each fetch worker waits between URLs [default: 1]
    #[arg(long = "crawl-delay", value_name = "SECONDS")]
    crawl_delay: Option<u64>,

    /// Optional TOML configuration file; flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> CrawlOverrides {
        CrawlOverrides {
            starting_url: self.starting_url.clone(),
            crawl_limit: self.crawl_limit,
            num_threads: self.num_threads,
            crawl_delay: self.crawl_delay,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_configuration(&cli)?;

    if !config.has_seed() {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    let triggers = status_triggers().context("Failed to register status signal")?;

    let summary = crawl(config, triggers)
        .await
        .context("Unable to start crawl")?;

    tracing::info!(
        "Crawl completed: {} pages in {}s",
        summary.pages_crawled,
        summary.elapsed().num_seconds()
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ripple_spider=info,warn"),
            1 => EnvFilter::new("ripple_spider=debug,info"),
            2 => EnvFilter::new("ripple_spider=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the optional config file and applies command-line overrides
fn load_configuration(cli: &Cli) -> anyhow::Result<CrawlConfig> {
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => CrawlConfig::default(),
    };

    Ok(config.with_overrides(cli.overrides()))
}

/// Forwards every SIGHUP to the status reporter
#[cfg(unix)]
fn status_triggers() -> std::io::Result<mpsc::Receiver<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangups = signal(SignalKind::hangup())?;
    let (tx, rx) = mpsc::channel(1);

    tokio::spawn(async move {
        while hangups.recv().await.is_some() {
            // The reporter has stopped listening once the crawl shuts down.
            if tx.send(()).await.is_err() {
                break;
            }
        }
    });

    Ok(rx)
}

/// No status signal is available off unix
#[cfg(not(unix))]
fn status_triggers() -> std::io::Result<mpsc::Receiver<()>> {
    let (_tx, rx) = mpsc::channel(1);
    Ok(rx)
}
