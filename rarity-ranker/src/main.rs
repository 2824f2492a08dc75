//! rarity-ranker - Main entry point
//!
//! Loads every item of a collection, scores item rarity from trait-value
//! frequency and prints the rarest items as a JSON report on stdout.
//! Logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use rarity_ranker::config::{Args, RankerConfig};
use rarity_ranker::pipeline::rank_collection;
use rarity_ranker::report::render_report;
use rarity_ranker::services::item_source::HttpItemSource;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments (malformed values exit here)
    let args = Args::parse();

    let config = RankerConfig::resolve(&args).context("Failed to resolve configuration")?;

    // Initialize tracing; RUST_LOG overrides the configured level
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting rarity-ranker v{}", env!("CARGO_PKG_VERSION"));
    info!(
        collection = %config.collection_name,
        base_url = %config.base_url,
        items = config.item_count,
        max_tasks = config.max_tasks,
        schedule = %config.schedule,
        top = config.top,
        "Configuration resolved"
    );

    let source = HttpItemSource::new(&config.base_url, &config.collection_name, config.timeout)
        .context("Failed to initialize HTTP client")?;

    let outcome = rank_collection(&config, &source)
        .await
        .context("Failed to rank collection")?;

    if !outcome.load.failed_ids.is_empty() {
        warn!(
            failed = outcome.load.failed_ids.len(),
            ids = ?outcome.load.failed_ids,
            "Some items could not be fetched and were scored as empty placeholders"
        );
    }

    let report = render_report(&outcome.top).context("Failed to render report")?;

    info!(
        "Top {} rarest items from collection {}",
        outcome.top.len(),
        config.collection_name
    );
    println!("{}", report);

    Ok(())
}
