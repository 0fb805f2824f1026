//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify the store's ordering and trimming invariants.

use bytes::Bytes;
use proptest::prelude::*;

use crate::cache::{CacheStore, StoredResponse};

// == Test Configuration ==
const TEST_BOUND: usize = 8;

// == Strategies ==
/// Generates asset-like URL paths from a small alphabet so collisions occur
fn url_strategy() -> impl Strategy<Value = String> {
    "[a-d]{1,2}".prop_map(|s| format!("/assets/{s}.png"))
}

fn url_batch_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(url_strategy(), 1..40)
}

fn response() -> StoredResponse {
    StoredResponse::new(200, Vec::new(), Bytes::from_static(b"img"))
}

/// First-occurrence order of a put sequence, the expected keys() listing
fn distinct_in_order(urls: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    for url in urls {
        if !seen.contains(url) {
            seen.push(url.clone());
        }
    }
    seen
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of puts, the listing is insertion order with
    // overwrites keeping their original slot.
    #[test]
    fn prop_keys_follow_first_insertion_order(urls in url_batch_strategy()) {
        let mut store = CacheStore::new();
        for url in &urls {
            store.put(url, response());
        }

        prop_assert_eq!(store.keys(), distinct_in_order(&urls));
    }

    // For any sequence of puts followed by a trim, the store never exceeds
    // the bound.
    #[test]
    fn prop_trim_enforces_bound(urls in url_batch_strategy()) {
        let mut store = CacheStore::new();
        for url in &urls {
            store.put(url, response());
        }
        store.trim_to(TEST_BOUND);

        prop_assert!(store.len() <= TEST_BOUND);
    }

    // When trimming removes entries, the survivors are exactly the newest
    // `bound` by insertion order and the evicted ones are the oldest.
    #[test]
    fn prop_trim_keeps_newest_inserted(urls in url_batch_strategy()) {
        let mut store = CacheStore::new();
        for url in &urls {
            store.put(url, response());
        }

        let inserted = distinct_in_order(&urls);
        let removed = store.trim_to(TEST_BOUND);

        let split = inserted.len().saturating_sub(TEST_BOUND);
        prop_assert_eq!(removed, split);
        for evicted in &inserted[..split] {
            prop_assert!(!store.contains(evicted), "oldest entry {} survived", evicted);
        }
        for survivor in &inserted[split..] {
            prop_assert!(store.contains(survivor), "newest entry {} evicted", survivor);
        }
    }

    // Entry count equals the number of distinct URLs put, regardless of
    // duplicates in the sequence.
    #[test]
    fn prop_len_counts_distinct_urls(urls in url_batch_strategy()) {
        let mut store = CacheStore::new();
        for url in &urls {
            store.put(url, response());
        }

        prop_assert_eq!(store.len(), distinct_in_order(&urls).len());
        prop_assert_eq!(store.stats().total_entries, store.len());
    }
}
