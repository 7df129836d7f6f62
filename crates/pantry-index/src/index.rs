//! Search indexes for the pantry item table.
//!
//! Two indexes are maintained side by side: an exact index keyed by the
//! full normalized name, and an inverted word index keyed by each token of
//! the name. Both map to the product ids carrying that name, so lookups
//! avoid scanning the item table.
//!
//! BTreeMap keeps iteration order deterministic, which makes search
//! ranking stable across repeated calls on unchanged data.

use pantry_core::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Exact-name and inverted word indexes over the item table.
///
/// Distinct products may share a display name, so every bucket is a list
/// of product ids. Buckets never go empty: the last removal deletes the
/// key, keeping the word scan in search proportional to the number of
/// live tokens.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndexes {
    /// Maps normalized full names to product ids for exact lookup.
    #[serde(default)]
    name_index: BTreeMap<String, Vec<String>>,
    /// Maps normalized word tokens to product ids for fuzzy search.
    #[serde(default)]
    word_index: BTreeMap<String, Vec<String>>,
}

impl SearchIndexes {
    /// Creates empty indexes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes a name under a product id.
    ///
    /// Adds the id to the exact bucket for the normalized name and to the
    /// word bucket of each unique token. Idempotent: re-inserting an
    /// already-indexed pair changes nothing.
    pub fn insert(&mut self, name: &str, product_id: &str) {
        let normalized = name.to_lowercase();

        let bucket = self.name_index.entry(normalized.clone()).or_default();
        if !bucket.iter().any(|id| id == product_id) {
            bucket.push(product_id.to_string());
        }

        for token in tokenize(&normalized) {
            let bucket = self.word_index.entry(token).or_default();
            if !bucket.iter().any(|id| id == product_id) {
                bucket.push(product_id.to_string());
            }
        }
    }

    /// Removes a name's entries for a product id from both indexes.
    ///
    /// Must be called with the same name the id was indexed under. Buckets
    /// left empty are deleted outright.
    pub fn remove(&mut self, name: &str, product_id: &str) {
        let normalized = name.to_lowercase();

        if let Some(bucket) = self.name_index.get_mut(&normalized) {
            bucket.retain(|id| id != product_id);
            if bucket.is_empty() {
                self.name_index.remove(&normalized);
            }
        }

        for token in tokenize(&normalized) {
            if let Some(bucket) = self.word_index.get_mut(&token) {
                bucket.retain(|id| id != product_id);
                if bucket.is_empty() {
                    self.word_index.remove(&token);
                }
            }
        }
    }

    /// Re-indexes a product under a new name.
    ///
    /// Removal runs first and targets the old name: removing after
    /// computing the new entries would strip tokens the two names share.
    pub fn rename(&mut self, old_name: &str, new_name: &str, product_id: &str) {
        self.remove(old_name, product_id);
        self.insert(new_name, product_id);
    }

    /// Product ids indexed under an exact normalized name.
    pub fn ids_for_name(&self, normalized_name: &str) -> &[String] {
        self.name_index
            .get(normalized_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterates over every indexed word token and its product ids.
    pub fn words(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.word_index
            .iter()
            .map(|(token, ids)| (token.as_str(), ids.as_slice()))
    }

    /// Returns the number of distinct indexed word tokens.
    pub fn word_count(&self) -> usize {
        self.word_index.len()
    }

    /// Returns true if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.name_index.is_empty() && self.word_index.is_empty()
    }

    /// Checks a single item's entries, used to assert index consistency.
    #[cfg(test)]
    pub fn contains(&self, name: &str, product_id: &str) -> bool {
        let normalized = name.to_lowercase();
        let in_names = self
            .name_index
            .get(&normalized)
            .is_some_and(|ids| ids.iter().any(|id| id == product_id));
        let in_words = tokenize(&normalized).into_iter().all(|token| {
            self.word_index
                .get(&token)
                .is_some_and(|ids| ids.iter().any(|id| id == product_id))
        });
        in_names && in_words
    }
}
