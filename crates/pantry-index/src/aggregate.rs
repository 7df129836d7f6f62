//! The persisted pantry aggregate.
//!
//! The item table and both search indexes travel together as one value:
//! every mutation loads the whole aggregate, updates it, and writes it
//! back in a single storage call. There is no partial load or save.

use crate::index::SearchIndexes;
use pantry_core::PantryItem;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Current aggregate schema version.
///
/// Version 0 aggregates predate the word index; loading one rebuilds both
/// indexes from the item table.
pub const SCHEMA_VERSION: u32 = 1;

/// The unit of persistence: item table plus search indexes.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PantryAggregate {
    /// Schema version stamped at save time. Missing in pre-versioning
    /// data, which serde defaults to 0.
    #[serde(default)]
    pub schema_version: u32,

    /// Item table keyed by product id.
    #[serde(default)]
    pub items: BTreeMap<String, PantryItem>,

    /// Exact-name and word indexes, kept consistent with `items`.
    #[serde(flatten)]
    pub indexes: SearchIndexes,
}

impl PantryAggregate {
    /// Creates an empty aggregate at the current schema version.
    pub fn new() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            ..Self::default()
        }
    }

    /// Decodes a persisted aggregate and migrates it to the current
    /// schema.
    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let aggregate: Self = serde_json::from_slice(bytes)?;
        Ok(aggregate.migrate())
    }

    /// Encodes the aggregate for persistence.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Upgrades an old-schema aggregate.
    ///
    /// Anything below the current version gets its indexes rebuilt from
    /// the item table, which subsumes the historical "missing word index"
    /// repair.
    fn migrate(mut self) -> Self {
        if self.schema_version >= SCHEMA_VERSION {
            return self;
        }

        debug!(
            from = self.schema_version,
            to = SCHEMA_VERSION,
            items = self.items.len(),
            "migrating pantry aggregate, rebuilding indexes"
        );

        self.indexes = SearchIndexes::new();
        for item in self.items.values() {
            self.indexes.insert(&item.normalized_name, &item.product_id);
        }
        self.schema_version = SCHEMA_VERSION;
        self
    }

    /// Returns all items in the table.
    pub fn all_items(&self) -> Vec<PantryItem> {
        self.items.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty_and_current() {
        let aggregate = PantryAggregate::new();
        assert_eq!(aggregate.schema_version, SCHEMA_VERSION);
        assert!(aggregate.items.is_empty());
        assert!(aggregate.indexes.is_empty());
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let mut aggregate = PantryAggregate::new();
        let item = PantryItem::new("A", "Whole Milk", 2);
        aggregate.indexes.insert(&item.normalized_name, &item.product_id);
        aggregate.items.insert(item.product_id.clone(), item);

        let bytes = aggregate.encode().unwrap();
        let decoded = PantryAggregate::decode(&bytes).unwrap();

        assert_eq!(decoded.schema_version, SCHEMA_VERSION);
        assert_eq!(decoded.items.len(), 1);
        assert!(decoded.indexes.contains("Whole Milk", "A"));
    }

    #[test]
    fn test_decode_unversioned_data_rebuilds_indexes() {
        // Pre-versioning persisted shape: items only, no indexes.
        let legacy = serde_json::json!({
            "items": {
                "A": {
                    "product_id": "A",
                    "display_name": "Whole Milk",
                    "normalized_name": "whole milk",
                    "quantity": 1
                }
            }
        });
        let bytes = serde_json::to_vec(&legacy).unwrap();

        let aggregate = PantryAggregate::decode(&bytes).unwrap();

        assert_eq!(aggregate.schema_version, SCHEMA_VERSION);
        assert!(aggregate.indexes.contains("Whole Milk", "A"));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(PantryAggregate::decode(b"not json").is_err());
    }
}
