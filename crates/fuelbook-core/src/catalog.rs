//! Item catalog: static per-item data such as cargo volume.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lookup of per-unit cargo volume by item name.
///
/// Unknown items have volume zero; they are not an error.
pub trait ItemCatalog {
    /// Volume of one unit of `item`, zero if the item is unknown.
    fn volume(&self, item: &str) -> Decimal;

    /// Check if the catalog knows `item`.
    fn contains(&self, item: &str) -> bool;
}

/// One row of the item catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Item name.
    pub name: String,
    /// Market type id, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_id: Option<u64>,
    /// Cargo volume of one unit in cubic metres.
    pub volume: Decimal,
}

impl CatalogItem {
    /// Create a catalog item without a type id.
    #[must_use]
    pub fn new(name: impl Into<String>, volume: Decimal) -> Self {
        Self {
            name: name.into(),
            type_id: None,
            volume,
        }
    }

    /// Attach a market type id.
    #[must_use]
    pub const fn with_type_id(mut self, type_id: u64) -> Self {
        self.type_id = Some(type_id);
        self
    }
}

/// Map-backed item catalog.
///
/// # Examples
///
/// ```
/// use fuelbook_core::{Catalog, CatalogItem, ItemCatalog};
/// use rust_decimal_macros::dec;
///
/// let catalog: Catalog = vec![CatalogItem::new("Heavy Water", dec!(0.4))].into_iter().collect();
/// assert_eq!(catalog.volume("Heavy Water"), dec!(0.4));
/// assert_eq!(catalog.volume("Unobtainium"), dec!(0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: HashMap<String, CatalogItem>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an item.
    pub fn insert(&mut self, item: CatalogItem) {
        self.items.insert(item.name.clone(), item);
    }

    /// Get an item by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CatalogItem> {
        self.items.get(name)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the items in arbitrary order.
    pub fn items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.values()
    }
}

impl ItemCatalog for Catalog {
    fn volume(&self, item: &str) -> Decimal {
        self.items.get(item).map_or(Decimal::ZERO, |i| i.volume)
    }

    fn contains(&self, item: &str) -> bool {
        self.items.contains_key(item)
    }
}

impl FromIterator<CatalogItem> for Catalog {
    fn from_iter<I: IntoIterator<Item = CatalogItem>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for item in iter {
            catalog.insert(item);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_lookup() {
        let catalog: Catalog = vec![
            CatalogItem::new("Oxygen", dec!(0.38)).with_type_id(3683),
            CatalogItem::new("Coolant", dec!(0.75)),
        ]
        .into_iter()
        .collect();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("Oxygen"));
        assert_eq!(catalog.volume("Coolant"), dec!(0.75));
        assert_eq!(catalog.get("Oxygen").and_then(|i| i.type_id), Some(3683));
    }

    #[test]
    fn test_unknown_item_has_zero_volume() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert!(!catalog.contains("Oxygen"));
        assert_eq!(catalog.volume("Oxygen"), dec!(0));
    }

    #[test]
    fn test_insert_replaces() {
        let mut catalog = Catalog::new();
        catalog.insert(CatalogItem::new("Oxygen", dec!(1)));
        catalog.insert(CatalogItem::new("Oxygen", dec!(0.38)));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.volume("Oxygen"), dec!(0.38));
    }
}
