//! # Rarity Common Library
//!
//! Shared code for the rarity workspace:
//! - Error types
//! - Bootstrap configuration loading (TOML)

pub mod config;
pub mod error;

pub use error::{Error, Result};
