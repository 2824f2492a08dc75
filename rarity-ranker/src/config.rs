//! Configuration resolution for rarity-ranker
//!
//! **Priority:** command line → environment → TOML config file → built-in default
//!
//! `clap` covers the first two tiers (every argument has an `env` fallback);
//! the TOML tier comes from `rarity_common::config`.

use crate::services::batch_runner::Schedule;
use crate::services::top_k::DEFAULT_TOP_K;
use clap::Parser;
use rarity_common::config::{load_bootstrap_config, LoggingConfig, TomlConfig};
use rarity_common::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_COLLECTION_NAME: &str = "azuki1";
pub const DEFAULT_BASE_URL: &str = "https://go-challenge.skip.money";
pub const DEFAULT_ITEM_COUNT: usize = 10_000;
pub const DEFAULT_MAX_TASKS: i64 = 50;

/// Command-line arguments for rarity-ranker
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "rarity-ranker")]
#[command(about = "Load a collection's item metadata and report its rarest items")]
#[command(version)]
pub struct Args {
    /// Name of the collection
    #[arg(short = 'n', long, env = "RARITY_COLLECTION_NAME")]
    pub collection_name: Option<String>,

    /// Source URL of the collection
    #[arg(short = 'u', long, env = "RARITY_BASE_URL")]
    pub base_url: Option<String>,

    /// Number of items in the collection
    #[arg(short = 'c', long = "collection-nft-count", env = "RARITY_ITEM_COUNT")]
    pub item_count: Option<usize>,

    /// Maximum number of concurrent tasks per phase
    #[arg(
        short = 't',
        long = "max-process-threads",
        env = "RARITY_MAX_TASKS",
        allow_negative_numbers = true
    )]
    pub max_tasks: Option<i64>,

    /// Task schedule
    #[arg(long, env = "RARITY_SCHEDULE", value_enum)]
    pub schedule: Option<Schedule>,

    /// Number of rarest items to report
    #[arg(short = 'k', long, env = "RARITY_TOP")]
    pub top: Option<usize>,

    /// Per-request timeout in seconds (default: wait indefinitely)
    #[arg(long, env = "RARITY_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Path to TOML config file
    #[arg(long, env = "RARITY_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct RankerConfig {
    pub collection_name: String,
    pub base_url: String,
    pub item_count: usize,
    /// Requested width; non-positive values are corrected by the runner
    pub max_tasks: i64,
    pub schedule: Schedule,
    pub top: usize,
    pub timeout: Option<Duration>,
    pub logging: LoggingConfig,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            item_count: DEFAULT_ITEM_COUNT,
            max_tasks: DEFAULT_MAX_TASKS,
            schedule: Schedule::default(),
            top: DEFAULT_TOP_K,
            timeout: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl RankerConfig {
    /// Resolve settings from arguments and the bootstrap config file
    pub fn resolve(args: &Args) -> Result<Self> {
        let toml_config = load_bootstrap_config(args.config.as_deref())?;
        Self::from_sources(args, toml_config)
    }

    /// Merge already-loaded sources, highest priority first
    pub fn from_sources(args: &Args, toml_config: TomlConfig) -> Result<Self> {
        let defaults = Self::default();

        let schedule = match (args.schedule, toml_config.schedule.as_deref()) {
            (Some(schedule), _) => schedule,
            (None, Some(raw)) => raw.parse().map_err(Error::Config)?,
            (None, None) => defaults.schedule,
        };

        let config = Self {
            collection_name: args
                .collection_name
                .clone()
                .or(toml_config.collection_name)
                .unwrap_or(defaults.collection_name),
            base_url: args
                .base_url
                .clone()
                .or(toml_config.base_url)
                .unwrap_or(defaults.base_url),
            item_count: args
                .item_count
                .or(toml_config.item_count)
                .unwrap_or(defaults.item_count),
            max_tasks: args
                .max_tasks
                .or(toml_config.max_tasks)
                .unwrap_or(defaults.max_tasks),
            schedule,
            top: args.top.or(toml_config.top).unwrap_or(defaults.top),
            timeout: args
                .timeout_secs
                .or(toml_config.timeout_secs)
                .map(Duration::from_secs),
            logging: toml_config.logging,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.collection_name.trim().is_empty() {
            return Err(Error::Config("collection name must not be empty".to_string()));
        }
        if self.base_url.trim().is_empty() {
            return Err(Error::Config("base URL must not be empty".to_string()));
        }
        if self.item_count == 0 {
            return Err(Error::Config("item count must be positive".to_string()));
        }
        if self.top == 0 {
            return Err(Error::Config("top must be positive".to_string()));
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(Error::Config("timeout must be positive".to_string()));
        }
        Ok(())
    }
}
