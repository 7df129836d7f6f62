//! Item types for the pantry.
//!
//! A `PantryItem` is one row per distinct product. The product id (usually
//! a barcode) is the primary key; the normalized name is cached so index
//! maintenance and exact-name lookups never re-lowercase on the fly.

use serde::{Deserialize, Serialize};

/// A product held in the pantry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PantryItem {
    /// Stable identifier, typically a barcode. Unique within the pantry.
    pub product_id: String,

    /// Human-readable name shown in the UI. Mutable.
    pub display_name: String,

    /// Cached `display_name.to_lowercase()`. Must always stay in sync;
    /// mutate the name only through `set_display_name`.
    pub normalized_name: String,

    /// Count on hand. Items never persist with a zero quantity; the store
    /// deletes them instead.
    pub quantity: u32,

    /// Optional opaque image reference (e.g. a data URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl PantryItem {
    /// Creates an item, deriving the normalized name.
    pub fn new(product_id: impl Into<String>, display_name: impl Into<String>, quantity: u32) -> Self {
        let display_name = display_name.into();
        let normalized_name = display_name.to_lowercase();
        Self {
            product_id: product_id.into(),
            display_name,
            normalized_name,
            quantity,
            image: None,
        }
    }

    /// Attaches an image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Renames the item, keeping the normalized name in sync.
    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.display_name = display_name.into();
        self.normalized_name = self.display_name.to_lowercase();
    }
}

/// One line of a completed shopping trip, fed to the pantry as an upsert.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripItem {
    pub product_id: String,

    /// Name reported by the trip. Falls back to the product id when the
    /// scanner could not resolve one.
    #[serde(default)]
    pub display_name: Option<String>,

    /// Units purchased. Missing means one.
    #[serde(default)]
    pub quantity: Option<u32>,

    #[serde(default)]
    pub image: Option<String>,
}

impl TripItem {
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// A partial update applied to an existing item. Fields left as `None`
/// are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub quantity: Option<u32>,

    #[serde(default)]
    pub image: Option<String>,
}

impl ItemPatch {
    pub fn rename(display_name: impl Into<String>) -> Self {
        Self {
            display_name: Some(display_name.into()),
            ..Self::default()
        }
    }

    pub fn quantity(quantity: u32) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_normalized_name() {
        let item = PantryItem::new("A", "Whole Milk", 1);
        assert_eq!(item.normalized_name, "whole milk");
        assert_eq!(item.display_name, "Whole Milk");
    }

    #[test]
    fn test_set_display_name_keeps_normalized_in_sync() {
        let mut item = PantryItem::new("A", "Whole Milk", 1);
        item.set_display_name("Oat Milk");
        assert_eq!(item.display_name, "Oat Milk");
        assert_eq!(item.normalized_name, "oat milk");
    }

    #[test]
    fn test_trip_item_builder() {
        let trip = TripItem::new("A").with_name("Eggs").with_quantity(12);
        assert_eq!(trip.product_id, "A");
        assert_eq!(trip.display_name.as_deref(), Some("Eggs"));
        assert_eq!(trip.quantity, Some(12));
        assert!(trip.image.is_none());
    }
}
