//! Rarity scorer
//!
//! ```text
//! rarity(item) = Σ over (trait, value) in item.attributes of
//!                   1 / (other_holders(trait, value) * distinct_values(trait))
//! ```
//!
//! - `distinct_values(trait)`: number of distinct values of the trait in the
//!   trait registry
//! - `other_holders(trait, value)`: 1, plus one for every item whose
//!   identifier differs from the scored item's identifier and that carries
//!   the same value for the trait
//!
//! Rare values and traits with few distinct values contribute more. Each
//! contribution lies in `(0, 1]`.
//!
//! Self-exclusion compares identifiers, not positions: items sharing an
//! identifier exclude each other from their holder counts.
//!
//! Holder counts are indexed once at construction, so scoring one item is
//! O(traits of the item) instead of a scan over the whole collection.

use crate::models::{Item, ItemId, RarityScorecard};
use crate::services::trait_registry::TraitRegistry;
use std::collections::HashMap;
use std::sync::Arc;

/// Scores items against a frozen collection
pub struct RarityScorer {
    items: Arc<Vec<Item>>,
    registry: Arc<TraitRegistry>,
    /// trait name → value → number of items carrying it
    holders: HashMap<String, HashMap<String, usize>>,
    /// identifier → positions of items with that identifier
    positions_by_id: HashMap<ItemId, Vec<usize>>,
}

impl RarityScorer {
    pub fn new(items: Arc<Vec<Item>>, registry: Arc<TraitRegistry>) -> Self {
        let mut holders: HashMap<String, HashMap<String, usize>> = HashMap::new();
        let mut positions_by_id: HashMap<ItemId, Vec<usize>> = HashMap::with_capacity(items.len());

        for (position, item) in items.iter().enumerate() {
            positions_by_id.entry(item.id).or_default().push(position);
            for (trait_name, value) in &item.attributes {
                *holders
                    .entry(trait_name.clone())
                    .or_default()
                    .entry(value.clone())
                    .or_insert(0) += 1;
            }
        }

        Self {
            items,
            registry,
            holders,
            positions_by_id,
        }
    }

    /// Number of items in the scored collection
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Score the item at `position`
    ///
    /// # Panics
    /// If `position` is out of range
    pub fn score_at(&self, position: usize) -> RarityScorecard {
        self.score_item(&self.items[position])
    }

    /// Score an item against the collection
    pub fn score_item(&self, item: &Item) -> RarityScorecard {
        let rarity = item
            .attributes
            .iter()
            .map(|(trait_name, value)| self.contribution(item.id, trait_name, value))
            .sum();

        RarityScorecard::new(item.id, rarity)
    }

    /// `1 / (other_holders * distinct_values)` for one trait of one item
    fn contribution(&self, id: ItemId, trait_name: &str, value: &str) -> f64 {
        // A trait missing from the registry counts as a single distinct value
        let distinct_values = self.registry.distinct_value_count(trait_name).max(1);
        let other_holders = 1 + self.other_holders(id, trait_name, value);

        1.0 / (other_holders as f64 * distinct_values as f64)
    }

    /// Items carrying `trait_name = value` whose identifier differs from `id`
    pub fn other_holders(&self, id: ItemId, trait_name: &str, value: &str) -> usize {
        let total = self
            .holders
            .get(trait_name)
            .and_then(|values| values.get(value))
            .copied()
            .unwrap_or(0);

        let same_id = self.positions_by_id.get(&id).map_or(0, |positions| {
            positions
                .iter()
                .filter(|&&p| self.items[p].trait_value(trait_name) == Some(value))
                .count()
        });

        total - same_id
    }
}
