//! End-to-end ranking pipeline
//!
//! Load → score → select, driven by one resolved [`RankerConfig`].

use crate::collection::{Collection, LoadSummary};
use crate::config::RankerConfig;
use crate::error::Result;
use crate::models::RarityScorecard;
use crate::services::batch_runner::BatchRunner;
use crate::services::item_source::ItemSource;

/// Result of a full pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct RankingOutcome {
    /// Rarest items, descending by rarity
    pub top: Vec<RarityScorecard>,
    /// Load phase summary, including identifiers scored as placeholders
    pub load: LoadSummary,
}

/// Run the full pipeline against `source`
pub async fn rank_collection<S: ItemSource>(
    config: &RankerConfig,
    source: &S,
) -> Result<RankingOutcome> {
    let runner = BatchRunner::new(config.max_tasks, config.schedule);
    let mut collection = Collection::new(&config.collection_name, config.item_count);

    let load = collection.load(source, &runner).await?;
    collection.score(&runner).await?;
    let top = collection.select_top(config.top)?;

    Ok(RankingOutcome { top, load })
}
