//! rarity-ranker library interface
//!
//! Loads per-item metadata for a collection, aggregates the distinct values
//! of every trait, scores each item's rarity from trait-value frequency and
//! selects the rarest items.

pub mod collection;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod services;

pub use crate::error::{RankerError, Result};
