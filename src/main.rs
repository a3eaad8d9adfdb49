//! Immo-Harvest main entry point
//!
//! This is the command-line interface for the Immo-Harvest listing harvester.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use immo_harvest::catalog::seed_queries;
use immo_harvest::clean::clean_dataset;
use immo_harvest::config::{load_config_with_hash, validate, Config};
use immo_harvest::crawler::run_discovery;
use immo_harvest::harvest::run_harvest;
use immo_harvest::output::{
    harvested_urls, load_statistics, load_urls, print_statistics, save_urls,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Immo-Harvest: a concurrent real-estate listing harvester
///
/// Immo-Harvest discovers listing URLs across every partition of the
/// catalog, then fetches and extracts each listing into a CSV dataset.
#[derive(Parser, Debug)]
#[command(name = "immo-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A concurrent real-estate listing harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
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
    /// Discover listing URLs and save them to the URL file
    Crawl,

    /// Harvest every listing of the URL file into the records file
    Scrape {
        /// Skip URLs already present in the records file
        #[arg(long)]
        resume: bool,
    },

    /// Rewrite the records file into the cleaned dataset
    Clean,

    /// Crawl, then scrape the discovered URLs
    Run {
        /// Skip URLs already present in the records file
        #[arg(long)]
        resume: bool,
    },

    /// Validate config and show the seed URLs without fetching anything
    Check,

    /// Show statistics of the records file
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load(cli.config.as_deref())?;

    match cli.command {
        Command::Crawl => {
            stage("CRAWLING", handle_crawl(&config)).await?;
        }
        Command::Scrape { resume } => {
            stage("SCRAPING", handle_scrape(&config, resume)).await?;
        }
        Command::Clean => {
            stage("CLEANING", async { handle_clean(&config) }).await?;
        }
        Command::Run { resume } => {
            stage("CRAWLING", handle_crawl(&config)).await?;
            stage("SCRAPING", handle_scrape(&config, resume)).await?;
        }
        Command::Check => handle_check(&config),
        Command::Stats => handle_stats(&config)?,
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("immo_harvest=info,warn"),
            1 => EnvFilter::new("immo_harvest=debug,info"),
            2 => EnvFilter::new("immo_harvest=trace,debug"),
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

/// Loads the config file, or validated defaults when none is given
fn load(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        None => {
            let config = Config::default();
            validate(&config).context("Built-in configuration is invalid")?;
            tracing::info!("Using built-in configuration");
            Ok(config)
        }
    }
}

/// Runs one stage, logging its duration and item count
async fn stage<F>(name: &str, task: F) -> Result<usize>
where
    F: std::future::Future<Output = Result<usize>>,
{
    tracing::info!("{} started", name);
    let started = Instant::now();

    let count = task.await.with_context(|| format!("{} failed", name))?;

    tracing::info!(
        "{} finished in {:.1} min: {} items processed",
        name,
        started.elapsed().as_secs_f64() / 60.0,
        count
    );
    Ok(count)
}

async fn handle_crawl(config: &Config) -> Result<usize> {
    let urls = run_discovery(config).await?;
    save_urls(Path::new(&config.output.urls_path), &urls)
        .context("Failed to save discovered URLs")?;
    Ok(urls.len())
}

async fn handle_scrape(config: &Config, resume: bool) -> Result<usize> {
    let urls_path = Path::new(&config.output.urls_path);
    let mut urls = load_urls(urls_path)
        .with_context(|| format!("Failed to read URL file {}", urls_path.display()))?;

    if resume {
        let done = harvested_urls(Path::new(&config.output.records_path))
            .context("Failed to read existing records")?;
        let before = urls.len();
        urls.retain(|url| !done.contains(url));
        tracing::info!(
            "Resuming: {} of {} URLs already harvested",
            before - urls.len(),
            before
        );
    }

    Ok(run_harvest(config, &urls).await?)
}

fn handle_clean(config: &Config) -> Result<usize> {
    let written = clean_dataset(
        Path::new(&config.output.records_path),
        Path::new(&config.output.cleaned_path),
    )?;
    Ok(written)
}

/// Handles `check`: shows the resolved config and the seed URLs
fn handle_check(config: &Config) {
    println!("=== Immo-Harvest Check ===\n");

    println!("Harvester Configuration:");
    println!("  Crawl workers: {}", config.harvester.crawl_concurrency);
    println!("  Extract workers: {}", config.harvester.extract_concurrency);
    println!("  Batch size: {}", config.harvester.batch_size);
    println!("  Page margin: {}", config.harvester.page_margin);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Accept-Language: {}", config.http.accept_language);
    println!("  Request timeout: {}s", config.http.request_timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);

    println!("\nOutput:");
    println!("  URLs: {}", config.output.urls_path);
    println!("  Records: {}", config.output.records_path);
    println!("  Cleaned: {}", config.output.cleaned_path);

    println!(
        "\nExcluded link patterns ({}):",
        config.catalog.exclude_patterns.len()
    );
    for pattern in &config.catalog.exclude_patterns {
        println!("  - {}", pattern);
    }

    let seeds = seed_queries(&config.catalog);
    println!("\nSeed URLs ({}):", seeds.len());
    for seed in &seeds {
        println!("  - {}: {}", seed.partition(), seed.url());
    }

    println!("\n✓ Configuration is valid");
}

/// Handles `stats`: summarizes the records file
fn handle_stats(config: &Config) -> Result<()> {
    let path = Path::new(&config.output.records_path);
    println!("Records: {}\n", path.display());

    let stats = load_statistics(path)
        .with_context(|| format!("Failed to read records {}", path.display()))?;
    print_statistics(&stats);

    Ok(())
}
