//! Collection item model

use std::collections::BTreeMap;

/// Item identifier, equal to the item's position in the collection
pub type ItemId = usize;

/// Trait name → trait value
///
/// Ordered so that iteration (and therefore floating-point summation in
/// the scorer) is identical across runs.
pub type Attributes = BTreeMap<String, String>;

/// One collection member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Identifier (position in the collection)
    pub id: ItemId,
    /// Trait values carried by this item
    pub attributes: Attributes,
}

impl Item {
    /// Create item from identifier and attributes
    pub fn new(id: ItemId, attributes: Attributes) -> Self {
        Self { id, attributes }
    }

    /// Empty item standing in for an identifier whose fetch failed
    ///
    /// Keeps the identifier so the placeholder never aliases another item.
    pub fn placeholder(id: ItemId) -> Self {
        Self {
            id,
            attributes: Attributes::new(),
        }
    }

    /// True when the item carries no traits
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Value of one trait, if present
    pub fn trait_value(&self, trait_name: &str) -> Option<&str> {
        self.attributes.get(trait_name).map(String::as_str)
    }
}
