//! Pantry Index - Indexed pantry store with fuzzy name search
//!
//! This crate owns the pantry item table and two search indexes (exact
//! normalized name and inverted word index), kept consistent on every
//! mutation and persisted as one aggregate through an injected key-value
//! store. Search tokenizes the query, scores every indexed word with an
//! edit-distance similarity (substring fast path), and merges multi-word
//! queries by intersection with pairwise score averaging.
//!
//! # Example
//!
//! ```
//! use pantry_core::TripItem;
//! use pantry_index::{MemoryStore, PantryStore};
//!
//! let store = PantryStore::new(MemoryStore::new(), "pantry");
//!
//! store.add_items_from_trip(&[
//!     TripItem::new("012345").with_name("Whole Milk"),
//! ]);
//!
//! // Typos still match: levenshtein("mlik", "milk") = 2, similarity 0.5
//! let hits = store.search("mlik");
//! assert_eq!(hits[0].product_id, "012345");
//! ```

mod aggregate;
mod capability;
mod index;
mod kv;
mod similarity;
mod store;

pub use aggregate::PantryAggregate;
pub use capability::RelatedProductSearch;
pub use index::SearchIndexes;
pub use kv::{KeyValueStore, MemoryStore, SledStore, StoreError};
pub use similarity::{is_similar, levenshtein, similarity};
pub use store::PantryStore;
