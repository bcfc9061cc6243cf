//! index-sentinel main entry point
//!
//! This is the command-line interface for the index-sentinel indexation checker.

use anyhow::Context;
use clap::Parser;
use index_sentinel::config::{
    hash_settings, load_config_with_hash, read_url_list, save_config, Config,
};
use index_sentinel::output::{
    export_batch, load_statistics, print_statistics, print_table, HistorySink, MarkdownReport,
    ResultSink,
};
use index_sentinel::storage::open_storage;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// index-sentinel: search engine indexation checker
///
/// Queries the search engine for `site:<url>` for every URL in the settings
/// file, rotating through the configured proxies when one stops connecting,
/// and writes a results report and run history.
#[derive(Parser, Debug)]
#[command(name = "index-sentinel")]
#[command(version = "1.0.0")]
#[command(about = "Checks whether URLs are indexed by a search engine", long_about = None)]
struct Cli {
    /// Path to TOML settings file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the User-Agent header
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// URL to check; repeat to check several (replaces the URL list)
    #[arg(long = "url", value_name = "URL", conflicts_with = "urls_file")]
    urls: Vec<String>,

    /// File with one URL per line (replaces the URL list)
    #[arg(long, value_name = "PATH")]
    urls_file: Option<PathBuf>,

    /// Save the settings, including overrides, back to CONFIG before checking
    #[arg(long)]
    save: bool,

    /// Validate settings and show what would be checked without sending requests
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics of the latest stored run and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,

    /// Do not record the run in the history database
    #[arg(long)]
    no_history: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading settings from: {}", cli.config.display());
    let (config, file_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load settings from {}", cli.config.display()))?;

    let config = apply_overrides(config, &cli)?;
    let config_hash = run_config_hash(&config, file_hash, &cli)?;

    if cli.save {
        save_config(&config, &cli.config)
            .with_context(|| format!("Failed to save settings to {}", cli.config.display()))?;
        tracing::info!("Settings saved to {}", cli.config.display());
    }

    if cli.stats {
        handle_stats(&config)
    } else if cli.dry_run {
        handle_dry_run(&config)
    } else {
        handle_check(&config, &config_hash, cli.no_history, cli.quiet).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("index_sentinel=info,warn"),
            1 => EnvFilter::new("index_sentinel=debug,info"),
            2 => EnvFilter::new("index_sentinel=trace,debug"),
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

/// Merges command-line overrides into the loaded settings
fn apply_overrides(mut config: Config, cli: &Cli) -> anyhow::Result<Config> {
    if let Some(user_agent) = &cli.user_agent {
        config.checker.user_agent = user_agent.clone();
    }

    if !cli.urls.is_empty() {
        config.targets.urls = cli.urls.clone();
    } else if let Some(path) = &cli.urls_file {
        config.targets.urls = read_url_list(path)
            .with_context(|| format!("Failed to read URL list from {}", path.display()))?;
    }

    Ok(config.normalized())
}

impl Cli {
    fn has_overrides(&self) -> bool {
        self.user_agent.is_some() || !self.urls.is_empty() || self.urls_file.is_some()
    }
}

/// Hash stored with the run: the file's own hash unless the settings used
/// differ from (or are about to replace) what is on disk
fn run_config_hash(config: &Config, file_hash: String, cli: &Cli) -> anyhow::Result<String> {
    if cli.save || cli.has_overrides() {
        Ok(hash_settings(config)?)
    } else {
        Ok(file_hash)
    }
}

/// Handles the --dry-run mode: validates settings and shows what would be checked
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let pool = config.proxy_pool().context("Invalid proxy settings")?;

    println!("=== index-sentinel Dry Run ===\n");

    println!("Checker:");
    println!("  Search engine: {}", config.checker.search_base_url);
    println!("  Timeout: {}s", config.checker.timeout_secs);
    println!("  Marker: {}", config.checker.marker_selector);
    if config.checker.user_agent.is_empty() {
        println!("  User agent: (empty)");
    } else {
        println!("  User agent: {}", config.checker.user_agent);
    }

    println!("\nProxies ({}):", pool.len());
    for (position, proxy) in pool.iter().enumerate() {
        let login = if proxy.login().is_empty() {
            "no login"
        } else {
            proxy.login()
        };
        println!("  #{} {} ({})", position + 1, proxy.ip(), login);
    }

    println!("\nURLs ({}):", config.targets.urls.len());
    for url in &config.targets.urls {
        println!("  - {}", url);
    }

    println!("\nOutput:");
    println!("  Report: {}", config.output.summary_path);
    println!("  History: {}", config.output.database_path);

    println!("\n✓ Settings are valid");
    Ok(())
}

/// Handles the --stats mode: shows statistics of the latest stored run
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let storage = open_storage(Path::new(&config.output.database_path))?;

    match load_statistics(&storage)? {
        Some(stats) => print_statistics(&stats),
        None => println!("No runs recorded in {}", config.output.database_path),
    }

    Ok(())
}

/// Handles the main check: runs the batch, prints and exports the results
async fn handle_check(
    config: &Config,
    config_hash: &str,
    no_history: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    if config.targets.urls.is_empty() {
        tracing::warn!("No URLs to check");
    }

    let batch = index_sentinel::check_indexation(config).await?;

    if !quiet {
        print_table(&batch);
    }

    let mut sinks: Vec<Box<dyn ResultSink>> =
        vec![Box::new(MarkdownReport::new(&config.output.summary_path))];

    if !no_history {
        let storage = open_storage(Path::new(&config.output.database_path))?;
        sinks.push(Box::new(HistorySink::new(
            storage,
            config_hash,
            config.proxies.len(),
        )));
    }

    export_batch(&batch, &mut sinks)?;

    Ok(())
}
