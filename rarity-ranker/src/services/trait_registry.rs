//! Trait registry
//!
//! Maps each trait name to the distinct values observed across the
//! collection. Grows monotonically while items load and is read-only once
//! scoring starts.
//!
//! Value lists keep first-seen order, which depends on fetch completion
//! order; only membership and counts are stable across runs.

use crate::models::Attributes;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraitRegistry {
    traits: HashMap<String, Vec<String>>,
}

impl TraitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every `(trait, value)` pair of one item
    ///
    /// Unseen trait: create its value list. Seen trait with an unseen value:
    /// append the value. Membership is a linear scan of the trait's values.
    pub fn register_traits(&mut self, attributes: &Attributes) {
        for (trait_name, value) in attributes {
            match self.traits.get_mut(trait_name) {
                Some(values) => {
                    if !values.iter().any(|v| v == value) {
                        values.push(value.clone());
                    }
                }
                None => {
                    self.traits.insert(trait_name.clone(), vec![value.clone()]);
                }
            }
        }
    }

    /// Number of distinct values of `trait_name` (0 if never seen)
    pub fn distinct_value_count(&self, trait_name: &str) -> usize {
        self.traits.get(trait_name).map_or(0, Vec::len)
    }

    /// Distinct values of `trait_name` in first-seen order
    pub fn values(&self, trait_name: &str) -> Option<&[String]> {
        self.traits.get(trait_name).map(Vec::as_slice)
    }

    pub fn contains(&self, trait_name: &str, value: &str) -> bool {
        self.values(trait_name)
            .is_some_and(|values| values.iter().any(|v| v == value))
    }

    /// Number of distinct trait names
    pub fn trait_count(&self) -> usize {
        self.traits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }

    /// Iterate `(trait name, distinct values)` in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.traits
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}
