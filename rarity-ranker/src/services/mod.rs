//! Pipeline services
//!
//! - `batch_runner`: bounded-concurrency task execution
//! - `item_source`: remote item retrieval
//! - `trait_registry`: distinct trait values across the collection
//! - `rarity_scorer`: per-item rarity scoring
//! - `top_k`: rarest-item selection

pub mod batch_runner;
pub mod item_source;
pub mod rarity_scorer;
pub mod top_k;
pub mod trait_registry;

pub use batch_runner::{BatchRunner, Schedule};
pub use item_source::{FetchError, HttpItemSource, ItemSource};
pub use rarity_scorer::RarityScorer;
pub use top_k::{select_top_k, DEFAULT_TOP_K};
pub use trait_registry::TraitRegistry;
