//! Optional semantic-search capability.
//!
//! The text search in [`PantryStore`](crate::PantryStore) works on its
//! own. Callers that also have an embedding model can implement this
//! trait and present its output as a second, independent "related
//! products" list next to the exact matches. The core never calls it.

use pantry_core::PantryItem;

/// Nearest-neighbour product search backed by some external model.
pub trait RelatedProductSearch {
    /// Prepares the backing model. Returns false when the capability is
    /// unavailable; callers then show text-search results alone.
    fn initialize(&mut self) -> bool;

    /// Returns up to `k` items semantically related to `query`, best
    /// first, dropping anything scoring below `threshold`.
    fn search_knn(
        &self,
        query: &str,
        items: &[PantryItem],
        k: usize,
        threshold: f64,
    ) -> Vec<PantryItem>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, PantryStore};
    use pantry_core::TripItem;

    /// Stand-in capability that "relates" items sharing a first letter.
    struct FirstLetterSearch {
        ready: bool,
    }

    impl RelatedProductSearch for FirstLetterSearch {
        fn initialize(&mut self) -> bool {
            self.ready = true;
            self.ready
        }

        fn search_knn(
            &self,
            query: &str,
            items: &[PantryItem],
            k: usize,
            _threshold: f64,
        ) -> Vec<PantryItem> {
            let Some(first) = query.chars().next() else {
                return Vec::new();
            };
            items
                .iter()
                .filter(|item| item.normalized_name.starts_with(first))
                .take(k)
                .cloned()
                .collect()
        }
    }

    #[test]
    fn test_caller_composes_exact_and_related_lists() {
        let store = PantryStore::new(MemoryStore::new(), "pantry");
        store.add_items_from_trip(&[
            TripItem::new("A").with_name("Milk"),
            TripItem::new("B").with_name("Mustard"),
        ]);

        let mut related = FirstLetterSearch { ready: false };
        assert!(related.initialize());

        // Two independent ranked lists, composed by the caller.
        let exact = store.search("milk");
        let similar = related.search_knn("milk", &store.all_items(), 5, 0.5);

        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].product_id, "A");
        assert_eq!(similar.len(), 2);
    }
}
