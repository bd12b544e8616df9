use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use threat_detector_rs::config::ConfigLoader;
use threat_detector_rs::enrichment::EnrichmentEngine;
use threat_detector_rs::localtime::DisplayClock;
use threat_detector_rs::logging::{init_logging, LogConfig};
use threat_detector_rs::{feeds, pipeline};
use tracing::info;

/// IOC enrichment pipeline: classify, match, score and source raw indicators
#[derive(Debug, Parser)]
#[command(name = "threat-detector-rs", version, about)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, env = "TD_CONFIG")]
    config: Option<String>,

    /// Input IOC list (overrides configuration)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (overrides configuration)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose logging (debug level)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::new()
        .load_from_file(cli.config.as_deref())
        .load_from_env()
        .build()
        .context("Failed to load configuration")?;

    if let Some(input) = cli.input {
        config.input_file = input;
    }
    if let Some(output) = cli.output {
        config.output_file = output;
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }

    let log_config = LogConfig::default()
        .with_level(config.logging.level.clone())
        .with_log_dir(config.logging.dir.clone())
        .with_console(config.logging.console)
        .with_file(config.logging.file);
    let _log_guard = init_logging(&log_config).context("Failed to initialize logging")?;

    let clock = DisplayClock::select(&config.display);

    // Feed or rule loading failures abort the run before any enrichment
    let store = feeds::load_feed_store(
        &config.feeds.internal,
        &config.feeds.misp,
        &config.feeds.osint,
    )
    .context("Failed to load feed store")?;

    let rules = feeds::load_threat_rules(&config.rules_file)
        .context("Failed to load threat rules")?;
    info!("Loaded {} threat rules from {}", rules.len(), config.rules_file.display());

    let engine = EnrichmentEngine::new(rules, store).context("Failed to build engine")?;

    pipeline::run(
        &engine,
        &config.input_file,
        &config.output_file,
        config.start_id,
        &clock,
    )
    .context("Enrichment run failed")?;

    Ok(())
}
