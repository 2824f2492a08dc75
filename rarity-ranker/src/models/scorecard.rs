//! Per-item rarity score

use super::item::ItemId;
use serde::{Deserialize, Serialize};

/// Rarity score of one item
///
/// Serialized as `{ "ID": .., "Rarity": .. }` in the report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RarityScorecard {
    /// Item identifier
    #[serde(rename = "ID")]
    pub id: ItemId,
    /// Rarity score (higher is rarer)
    #[serde(rename = "Rarity")]
    pub rarity: f64,
}

impl RarityScorecard {
    pub fn new(id: ItemId, rarity: f64) -> Self {
        Self { id, rarity }
    }
}
