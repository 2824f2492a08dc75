//! Data models for collection items and rarity scores

pub mod item;
pub mod scorecard;

pub use item::{Attributes, Item, ItemId};
pub use scorecard::RarityScorecard;
