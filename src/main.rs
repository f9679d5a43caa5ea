//! Presswatch CLI
//!
//! Renders the release list and the new-release banner in the terminal.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use presswatch::{
    error::{AppError, Result},
    models::{Config, FetchResult},
    pipeline::{CachedFetcher, CycleReport, run_cycle},
    source::ReleaseFetcher,
    storage::LastSeenStore,
    utils::looks_like_email,
};

/// Presswatch - Investor Relations Press-Release Monitor
#[derive(Parser, Debug)]
#[command(
    name = "presswatch",
    version,
    about = "Watches a company's investor-relations feed for new press releases"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "presswatch.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch once, report releases and whether the newest is new
    Check,

    /// Fetch repeatedly on the configured refresh interval
    Watch,

    /// Show the persisted last-seen release
    Status,

    /// Sign up for email alerts (stub: validates, stores nothing)
    Subscribe {
        /// Email address to register
        email: String,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    config.validate()?;

    let config = Arc::new(config);
    let store = LastSeenStore::new(&config.monitor.storage_file);

    match cli.command {
        Command::Check => {
            let mut fetcher = cached_fetcher(&config)?;
            let report = run_cycle(&mut fetcher, &store).await?;
            render_report(&report, &config.monitor.ticker);
        }

        Command::Watch => {
            let interval = Duration::from_secs(config.monitor.refresh_secs);
            let mut fetcher = cached_fetcher(&config)?;

            log::info!(
                "Watching {} every {}s (Ctrl-C to stop)",
                config.monitor.ticker,
                interval.as_secs()
            );

            loop {
                // Each pass lands past the TTL, so this is a real fetch.
                let report = run_cycle(&mut fetcher, &store).await?;
                render_report(&report, &config.monitor.ticker);

                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = tokio::signal::ctrl_c() => {
                        log::info!("Stopping watch");
                        break;
                    }
                }
            }
        }

        Command::Status => match store.load().await? {
            Some(record) => {
                println!("Last seen release for {}:", config.monitor.ticker);
                println!("  {}", record.title);
                println!("  {}", record.date);
                if !record.link.is_empty() {
                    println!("  {}", record.link);
                }
            }
            None => println!("No release seen yet."),
        },

        Command::Subscribe { email } => {
            if !looks_like_email(&email) {
                return Err(AppError::validation("Please enter a valid email"));
            }
            // TODO: store the address once a delivery service exists
            println!("Subscribed! You'll get alerts for new releases.");
        }

        Command::Validate => {
            // Strict load: a missing or malformed file must fail here,
            // unlike check/watch which fall back to defaults.
            let loaded = Config::load(&cli.config)?;
            loaded.validate()?;
            log::info!("Configuration OK: {}", cli.config.display());
        }
    }

    Ok(())
}

fn cached_fetcher(config: &Arc<Config>) -> Result<CachedFetcher> {
    let fetcher = ReleaseFetcher::new(Arc::clone(config))?;
    let ttl = Duration::from_secs(config.monitor.refresh_secs);
    Ok(CachedFetcher::new(fetcher, ttl))
}

/// Render one cycle's outcome.
fn render_report(report: &CycleReport, ticker: &str) {
    match &report.result {
        FetchResult::Error(message) => {
            println!("Error fetching data: {message}");
        }
        FetchResult::Releases(releases) if releases.is_empty() => {
            println!("No press releases found");
        }
        FetchResult::Releases(releases) => {
            if report.is_new {
                println!("NEW PRESS RELEASE DETECTED!");
                println!();
            }

            println!("Latest {} press releases for {}:", releases.len(), ticker);
            for (i, release) in releases.iter().enumerate() {
                println!("{}. {}", i + 1, release.title);
                println!("   {}", release.date);
                if !release.link.is_empty() {
                    println!("   {}", release.link);
                }
            }
        }
    }
}
