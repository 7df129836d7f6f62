//! The pantry store: CRUD and ranked fuzzy search over one aggregate.
//!
//! Every operation is a full load → mutate → persist cycle against the
//! injected key-value store. Mutations write the aggregate back exactly
//! once per call (once per batch for trips) and return the resulting item
//! list, since callers poll rather than subscribe. Storage failures never
//! escape: reads fall back to an empty aggregate, writes are logged and
//! the in-memory result is still returned.
//!
//! The store is single-threaded by design. A port to a concurrent caller
//! must wrap each operation in a per-key mutex, or two writers will
//! silently lose one aggregate-sized write.

use crate::aggregate::PantryAggregate;
use crate::kv::KeyValueStore;
use crate::similarity::is_similar;
use pantry_core::{tokenize, ItemPatch, PantryItem, TripItem};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

/// Minimum similarity for a query word to match an indexed word.
const SIMILARITY_THRESHOLD: f64 = 0.3;

/// Pantry item table with exact-name lookup and fuzzy word search.
pub struct PantryStore<S: KeyValueStore> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> PantryStore<S> {
    /// Creates a store reading and writing the aggregate under `key`.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Returns all items. Order follows the item table, not insertion.
    pub fn all_items(&self) -> Vec<PantryItem> {
        self.load().all_items()
    }

    /// Looks up a single item by product id.
    pub fn item_by_id(&self, product_id: &str) -> Option<PantryItem> {
        self.load().items.get(product_id).cloned()
    }

    /// Finds items whose name matches exactly, case-insensitively.
    pub fn items_by_name(&self, display_name: &str) -> Vec<PantryItem> {
        let aggregate = self.load();
        aggregate
            .indexes
            .ids_for_name(&display_name.to_lowercase())
            .iter()
            .filter_map(|id| aggregate.items.get(id).cloned())
            .collect()
    }

    /// Searches the pantry by (possibly misspelled, possibly partial)
    /// name, ranked best match first.
    ///
    /// Each query word is scored against every indexed word: substring
    /// containment is 1.0, otherwise edit-distance similarity above the
    /// threshold. A product reachable through several indexed words keeps
    /// its best score. Multi-word queries intersect (every word must
    /// match) and fold scores pairwise: `acc = (acc + next) / 2`. An
    /// empty or tokenless query returns the whole pantry.
    pub fn search(&self, query: &str) -> Vec<PantryItem> {
        let aggregate = self.load();

        let search_words = tokenize(query);
        if search_words.is_empty() {
            return aggregate.all_items();
        }

        let mut combined: Option<BTreeMap<String, f64>> = None;
        for word in &search_words {
            let matches = Self::match_word(&aggregate, word);
            // AND semantics: one word without matches empties the result.
            if matches.is_empty() {
                return Vec::new();
            }

            combined = Some(match combined.take() {
                None => matches,
                Some(mut acc) => {
                    acc.retain(|id, _| matches.contains_key(id));
                    for (id, score) in acc.iter_mut() {
                        *score = (*score + matches[id]) / 2.0;
                    }
                    acc
                }
            });

            if combined.as_ref().is_some_and(|acc| acc.is_empty()) {
                return Vec::new();
            }
        }

        let mut ranked: Vec<(String, f64)> = combined.unwrap_or_default().into_iter().collect();
        // Stable sort: ties keep ascending product-id order from the map.
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        ranked
            .into_iter()
            .filter_map(|(id, _)| aggregate.items.get(&id).cloned())
            .collect()
    }

    /// Scores one query word against the whole word index.
    ///
    /// Returns product id → best score across the indexed words that
    /// matched. Absence from the map means "no match", which is distinct
    /// from a low score.
    fn match_word(aggregate: &PantryAggregate, word: &str) -> BTreeMap<String, f64> {
        let mut matches: BTreeMap<String, f64> = BTreeMap::new();
        for (token, ids) in aggregate.indexes.words() {
            let score = if token.contains(word) {
                Some(1.0)
            } else {
                is_similar(word, token, SIMILARITY_THRESHOLD)
            };
            if let Some(score) = score {
                for id in ids {
                    let best = matches.entry(id.clone()).or_insert(score);
                    if score > *best {
                        *best = score;
                    }
                }
            }
        }
        matches
    }

    /// Merges a completed shopping trip into the pantry.
    ///
    /// Existing products get their quantity incremented (one unit when the
    /// trip does not say) and their image backfilled only when missing. A
    /// trip name differing from the stored one re-indexes the item. New
    /// products are inserted and indexed. The aggregate is persisted once
    /// for the whole batch.
    pub fn add_items_from_trip(&self, trip_items: &[TripItem]) -> Vec<PantryItem> {
        let mut aggregate = self.load();

        for trip in trip_items {
            let quantity = trip.quantity.unwrap_or(1);

            if let Some(existing) = aggregate.items.get(&trip.product_id).cloned() {
                let mut updated = existing.clone();
                updated.quantity = updated.quantity.saturating_add(quantity);
                if updated.image.is_none() {
                    updated.image = trip.image.clone();
                }
                if let Some(name) = trip.display_name.as_deref() {
                    if name.to_lowercase() != existing.normalized_name {
                        aggregate.indexes.rename(
                            &existing.normalized_name,
                            name,
                            &trip.product_id,
                        );
                        updated.set_display_name(name);
                    }
                }
                aggregate.items.insert(trip.product_id.clone(), updated);
            } else {
                if quantity == 0 {
                    debug!(product_id = %trip.product_id, "skipping zero-quantity trip item");
                    continue;
                }
                let display_name = trip
                    .display_name
                    .clone()
                    .unwrap_or_else(|| trip.product_id.clone());
                let mut item = PantryItem::new(&trip.product_id, display_name, quantity);
                item.image = trip.image.clone();
                aggregate.indexes.insert(&item.normalized_name, &item.product_id);
                aggregate.items.insert(item.product_id.clone(), item);
            }
        }

        self.persist(&aggregate);
        aggregate.all_items()
    }

    /// Applies a partial update to an item.
    ///
    /// No-op when the id is unknown. A blank display name is rejected
    /// outright. A zero quantity in the patch deletes the item, the same
    /// floor `update_item_quantity` enforces. A changed display name
    /// re-indexes under the new name.
    pub fn update_item(&self, product_id: &str, patch: &ItemPatch) -> Vec<PantryItem> {
        let mut aggregate = self.load();

        let Some(existing) = aggregate.items.get(product_id).cloned() else {
            debug!(product_id, "update for unknown item ignored");
            return aggregate.all_items();
        };

        if let Some(name) = patch.display_name.as_deref() {
            if name.trim().is_empty() {
                warn!(product_id, "rejecting update with blank display name");
                return aggregate.all_items();
            }
        }

        if patch.quantity == Some(0) {
            Self::delete_item(&mut aggregate, product_id);
            self.persist(&aggregate);
            return aggregate.all_items();
        }

        let mut updated = existing.clone();
        if let Some(quantity) = patch.quantity {
            updated.quantity = quantity;
        }
        if let Some(image) = &patch.image {
            updated.image = Some(image.clone());
        }
        if let Some(name) = patch.display_name.as_deref() {
            if name.to_lowercase() != existing.normalized_name {
                aggregate
                    .indexes
                    .rename(&existing.normalized_name, name, product_id);
            }
            updated.set_display_name(name);
        }
        aggregate.items.insert(product_id.to_string(), updated);

        self.persist(&aggregate);
        aggregate.all_items()
    }

    /// Sets an item's quantity. Anything at or below zero deletes the
    /// item instead; the pantry never holds zero-quantity rows.
    pub fn update_item_quantity(&self, product_id: &str, new_quantity: i64) -> Vec<PantryItem> {
        let mut aggregate = self.load();

        if !aggregate.items.contains_key(product_id) {
            debug!(product_id, "quantity update for unknown item ignored");
            return aggregate.all_items();
        }

        if new_quantity <= 0 {
            Self::delete_item(&mut aggregate, product_id);
        } else if let Some(item) = aggregate.items.get_mut(product_id) {
            item.quantity = new_quantity as u32;
        }

        self.persist(&aggregate);
        aggregate.all_items()
    }

    /// Removes an item and all its index entries. No-op when absent.
    pub fn remove_item(&self, product_id: &str) -> Vec<PantryItem> {
        let mut aggregate = self.load();

        if !aggregate.items.contains_key(product_id) {
            return aggregate.all_items();
        }

        Self::delete_item(&mut aggregate, product_id);
        self.persist(&aggregate);
        aggregate.all_items()
    }

    /// Deletes the persisted aggregate itself, not merely its contents.
    /// Returns false when storage refuses.
    pub fn clear_pantry(&self) -> bool {
        match self.storage.delete(&self.key) {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, key = %self.key, "failed to clear pantry");
                false
            }
        }
    }

    fn delete_item(aggregate: &mut PantryAggregate, product_id: &str) {
        if let Some(item) = aggregate.items.remove(product_id) {
            aggregate.indexes.remove(&item.normalized_name, product_id);
        }
    }

    /// Loads the current aggregate, degrading to empty on missing,
    /// unreadable, or corrupt data.
    fn load(&self) -> PantryAggregate {
        match self.storage.get(&self.key) {
            Ok(Some(bytes)) => match PantryAggregate::decode(&bytes) {
                Ok(aggregate) => aggregate,
                Err(e) => {
                    warn!(error = %e, key = %self.key, "corrupt pantry aggregate, starting empty");
                    PantryAggregate::new()
                }
            },
            Ok(None) => PantryAggregate::new(),
            Err(e) => {
                warn!(error = %e, key = %self.key, "failed to read pantry aggregate, starting empty");
                PantryAggregate::new()
            }
        }
    }

    /// Writes the aggregate back. Failures are logged, not raised: the
    /// caller already holds the mutated in-memory state.
    fn persist(&self, aggregate: &PantryAggregate) {
        let bytes = match aggregate.encode() {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(error = %e, key = %self.key, "failed to encode pantry aggregate");
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.key, &bytes) {
            error!(error = %e, key = %self.key, "failed to persist pantry aggregate");
        }
    }
}
