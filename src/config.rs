//! Configuration for the enrichment pipeline.
//!
//! デフォルト値 → 設定ファイル → 環境変数（`TD_` プレフィックス）の
//! 順にレイヤリングする。不正な設定は起動時の致命的エラー。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Feed file locations
    pub feeds: FeedsConfig,

    /// Threat rule file location
    pub rules_file: PathBuf,

    /// Input IOC list location
    pub input_file: PathBuf,

    /// Enriched output location
    pub output_file: PathBuf,

    /// First record id handed to the engine
    pub start_id: u64,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Local-time display configuration
    pub display: DisplayTimeConfig,
}

/// Feed file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedsConfig {
    /// Line-delimited internal feed
    pub internal: PathBuf,

    /// JSON MISP feed
    pub misp: PathBuf,

    /// CSV OSINT feed
    pub osint: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log directory
    pub dir: PathBuf,

    /// Console output
    pub console: bool,

    /// File output
    pub file: bool,
}

/// Local-time display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayTimeConfig {
    /// IANA timezone name for log display times
    pub timezone: String,

    /// Fallback offset in minutes when the timezone name does not resolve
    pub fallback_offset_minutes: i32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            feeds: FeedsConfig {
                internal: PathBuf::from("feeds/internal.txt"),
                misp: PathBuf::from("feeds/misp_feed.json"),
                osint: PathBuf::from("feeds/osint.csv"),
            },
            rules_file: PathBuf::from("rules/threat_rules.json"),
            input_file: PathBuf::from("inputs/iocs.json"),
            output_file: PathBuf::from("outputs/enriched_iocs.json"),
            start_id: 1001,
            logging: LoggingConfig {
                level: "info".to_string(),
                dir: PathBuf::from("logs"),
                console: true,
                file: true,
            },
            display: DisplayTimeConfig {
                timezone: "Asia/Kolkata".to_string(),
                fallback_offset_minutes: 330,
            },
        }
    }
}

/// Configuration loader with builder pattern
pub struct ConfigLoader {
    config_file: Option<String>,
    load_env: bool,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            config_file: None,
            load_env: false,
        }
    }

    /// Load configuration from file
    pub fn load_from_file(mut self, path: Option<&str>) -> Self {
        self.config_file = path.map(String::from);
        self
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<DetectorConfig> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&DetectorConfig::default())?);

        if let Some(config_path) = &self.config_file {
            builder = builder.add_source(config::File::with_name(config_path));
        } else {
            // Standard locations, all optional
            builder = builder
                .add_source(config::File::with_name("threat-detector").required(false))
                .add_source(config::File::with_name("config/threat-detector").required(false));
        }

        if self.load_env {
            builder = builder.add_source(
                config::Environment::with_prefix("TD")
                    .prefix_separator("_")
                    .separator("__"),
            );
        }

        let config: DetectorConfig = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
