//! Collection state and pipeline phases
//!
//! ```text
//! Initialized → Loading → Loaded → Scoring → Scored → Selected
//! ```
//!
//! Phases run strictly in order with no re-entry. Loading and scoring are
//! internally concurrent (see `BatchRunner`), but scoring only starts after
//! every load task has completed.
//!
//! All mutation happens on the task driving the runner: fetch and scoring
//! tasks hand their results back with their index, and the collection
//! folds them into the item slots, trait registry and score slots. Tasks
//! never touch shared mutable state.

use crate::error::{RankerError, Result};
use crate::models::{Item, ItemId, RarityScorecard};
use crate::services::batch_runner::BatchRunner;
use crate::services::item_source::{FetchError, ItemSource};
use crate::services::rarity_scorer::RarityScorer;
use crate::services::top_k::select_top_k;
use crate::services::trait_registry::TraitRegistry;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Pipeline phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initialized,
    Loading,
    Loaded,
    Scoring,
    Scored,
    Selected,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Initialized => "initialized",
            Phase::Loading => "loading",
            Phase::Loaded => "loaded",
            Phase::Scoring => "scoring",
            Phase::Scored => "scored",
            Phase::Selected => "selected",
        };
        f.write_str(name)
    }
}

/// Outcome of the load phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    /// Items requested
    pub requested: usize,
    /// Items fetched successfully
    pub loaded: usize,
    /// Identifiers stored as placeholders, ascending
    pub failed_ids: Vec<ItemId>,
}

/// A collection moving through the load/score/select pipeline
#[derive(Debug)]
pub struct Collection {
    name: String,
    count: usize,
    phase: Phase,
    items: Arc<Vec<Item>>,
    registry: Arc<TraitRegistry>,
    scores: Vec<RarityScorecard>,
    failures: Vec<FetchError>,
}

impl Collection {
    /// Create an empty collection of `count` items
    pub fn new(name: impl Into<String>, count: usize) -> Self {
        Self {
            name: name.into(),
            count,
            phase: Phase::Initialized,
            items: Arc::new(Vec::with_capacity(count)),
            registry: Arc::new(TraitRegistry::new()),
            scores: Vec::with_capacity(count),
            failures: Vec::new(),
        }
    }

    /// Build an already-loaded collection from a fixed item set
    ///
    /// Items are taken as given (identifiers are not renumbered) and their
    /// traits registered. The collection starts in [`Phase::Loaded`].
    pub fn from_items(name: impl Into<String>, items: Vec<Item>) -> Self {
        let mut registry = TraitRegistry::new();
        for item in &items {
            registry.register_traits(&item.attributes);
        }

        let count = items.len();
        Self {
            name: name.into(),
            count,
            phase: Phase::Loaded,
            items: Arc::new(items),
            registry: Arc::new(registry),
            scores: Vec::with_capacity(count),
            failures: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Items by position (empty until loaded)
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn registry(&self) -> &TraitRegistry {
        &self.registry
    }

    /// Scores by position (empty until scored)
    pub fn scores(&self) -> &[RarityScorecard] {
        &self.scores
    }

    /// Fetch failures recorded while loading, ascending by identifier
    pub fn failures(&self) -> &[FetchError] {
        &self.failures
    }

    fn expect_phase(&self, expected: Phase) -> Result<()> {
        if self.phase != expected {
            return Err(RankerError::Phase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    /// Load every item in `[0, count)` from `source`
    ///
    /// A failed fetch never aborts the load: the slot receives
    /// [`Item::placeholder`] with the failed identifier and the failure is
    /// recorded.
    pub async fn load<S: ItemSource>(
        &mut self,
        source: &S,
        runner: &BatchRunner,
    ) -> Result<LoadSummary> {
        self.expect_phase(Phase::Initialized)?;
        self.phase = Phase::Loading;

        info!(
            collection = %self.name,
            count = self.count,
            width = runner.width(),
            schedule = %runner.schedule(),
            "Loading collection"
        );

        let mut items: Vec<Item> = (0..self.count).map(Item::placeholder).collect();
        let mut registry = TraitRegistry::new();
        let mut failures = Vec::new();

        runner
            .run(
                self.count,
                move |id| source.fetch(id),
                |idx, outcome| match outcome {
                    Ok(item) => {
                        if item.id != idx {
                            warn!(
                                item_id = idx,
                                returned_id = item.id,
                                "Source returned mismatched identifier, keeping position"
                            );
                        }
                        registry.register_traits(&item.attributes);
                        items[idx] = Item::new(idx, item.attributes);
                    }
                    Err(error) => {
                        warn!(item_id = idx, error = %error, "Item fetch failed, storing placeholder");
                        failures.push(error);
                    }
                },
            )
            .await;

        failures.sort_by_key(FetchError::item_id);
        let summary = LoadSummary {
            requested: self.count,
            loaded: self.count - failures.len(),
            failed_ids: failures.iter().map(FetchError::item_id).collect(),
        };

        self.items = Arc::new(items);
        self.registry = Arc::new(registry);
        self.failures = failures;
        self.phase = Phase::Loaded;

        info!(
            collection = %self.name,
            loaded = summary.loaded,
            failed = summary.failed_ids.len(),
            traits = self.registry.trait_count(),
            "Collection loaded"
        );

        Ok(summary)
    }

    /// Score every item
    ///
    /// Each item is scored on a blocking worker thread; at most
    /// `runner.width()` items are scored at once.
    pub async fn score(&mut self, runner: &BatchRunner) -> Result<()> {
        self.expect_phase(Phase::Loaded)?;
        self.phase = Phase::Scoring;

        let n = self.items.len();
        info!(
            collection = %self.name,
            count = n,
            width = runner.width(),
            "Calculating collection rarity"
        );

        let scorer = Arc::new(RarityScorer::new(
            Arc::clone(&self.items),
            Arc::clone(&self.registry),
        ));

        let mut slots: Vec<Option<RarityScorecard>> = vec![None; n];
        let mut task_error = None;

        runner
            .run(
                n,
                |idx| {
                    let scorer = Arc::clone(&scorer);
                    tokio::task::spawn_blocking(move || scorer.score_at(idx))
                },
                |idx, joined| match joined {
                    Ok(card) => slots[idx] = Some(card),
                    Err(e) => {
                        task_error.get_or_insert_with(|| e.to_string());
                    }
                },
            )
            .await;

        if let Some(message) = task_error {
            return Err(RankerError::ScoringTask(message));
        }

        self.scores = slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| RankerError::ScoringTask("score slot left empty".to_string()))?;
        self.phase = Phase::Scored;

        info!(collection = %self.name, scored = self.scores.len(), "Collection rarity calculated");

        Ok(())
    }

    /// Select the `k` rarest items
    ///
    /// The collection stays in [`Phase::Scored`] if selection fails.
    pub fn select_top(&mut self, k: usize) -> Result<Vec<RarityScorecard>> {
        self.expect_phase(Phase::Scored)?;

        let top = select_top_k(&self.scores, k)?;
        self.phase = Phase::Selected;

        Ok(top)
    }
}
