//! Property-Based Tests for the Store Module
//!
//! Uses proptest against the pure collection transforms.

use proptest::prelude::*;

use crate::models::ItemPatch;
use crate::store::{collection, Item};

// == Strategies ==
fn word_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 ]{0,15}".prop_map(|s| s)
}

fn item_strategy() -> impl Strategy<Value = Item> {
    (
        0i64..1_000_000_000_000_000,
        word_strategy(),
        word_strategy(),
        0.0f64..10_000.0,
        proptest::option::of(word_strategy()),
    )
        .prop_map(|(id, name, category, price, description)| Item {
            description,
            ..Item::new(id, name, category, price)
        })
}

fn collection_strategy() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(item_strategy(), 0..30)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Searching with an empty term is the identity.
    #[test]
    fn prop_empty_search_returns_all(items in collection_strategy()) {
        prop_assert_eq!(collection::search(items.clone(), Some("")), items.clone());
        prop_assert_eq!(collection::search(items.clone(), None), items);
    }

    // Search ignores the case of the term.
    #[test]
    fn prop_search_is_case_insensitive(items in collection_strategy(), term in "[a-zA-Z]{1,4}") {
        let lower = collection::search(items.clone(), Some(&term.to_lowercase()));
        let upper = collection::search(items, Some(&term.to_uppercase()));
        prop_assert_eq!(lower, upper);
    }

    // Every hit matches on name or category; every miss matches neither.
    #[test]
    fn prop_search_partitions_on_name_or_category(items in collection_strategy(), term in "[a-z]{1,3}") {
        let hits = collection::search(items.clone(), Some(&term));
        for item in &items {
            let expected = [&item.name, &item.category]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&term));
            prop_assert_eq!(hits.contains(item), expected);
        }
    }

    // Search keeps document order.
    #[test]
    fn prop_search_preserves_order(items in collection_strategy(), term in "[a-z]{1}") {
        let hits = collection::search(items.clone(), Some(&term));
        let mut cursor = items.iter();
        for hit in &hits {
            prop_assert!(cursor.any(|item| item == hit));
        }
    }

    // A category patch leaves every other field alone.
    #[test]
    fn prop_category_patch_is_shallow(mut item in item_strategy(), category in word_strategy()) {
        let before = item.clone();
        item.apply_patch(&ItemPatch::category(category.clone()));
        prop_assert_eq!(item.category.as_deref(), Some(category.as_str()));
        prop_assert_eq!(item.id, before.id);
        prop_assert_eq!(&item.name, &before.name);
        prop_assert_eq!(item.price, before.price);
        prop_assert_eq!(&item.description, &before.description);
    }

    // Assigned ids never collide with existing ones.
    #[test]
    fn prop_next_id_is_fresh(items in collection_strategy(), now_ms in 0i64..i64::MAX / 2) {
        let id = collection::next_id(&items, now_ms).unwrap();
        prop_assert!(items.iter().all(|item| item.id != id));
        prop_assert!(id >= now_ms);
    }

    // Pages tile the collection without gaps or overlap.
    #[test]
    fn prop_pages_cover_collection(items in collection_strategy(), limit in 1usize..8) {
        let pages = items.len().div_ceil(limit).max(1);
        let mut rebuilt = Vec::new();
        for page in 1..=pages {
            rebuilt.extend(collection::paginate(items.clone(), page, limit));
        }
        prop_assert_eq!(rebuilt, items);
    }
}
