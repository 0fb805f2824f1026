//! Cache Store Module
//!
//! URL-keyed response store for one cache generation, combining HashMap
//! storage with insertion-order tracking and FIFO trimming.

use std::collections::HashMap;

use crate::cache::{CacheStats, InsertionOrder, StoredResponse};

// == Cache Store ==
/// Response storage for a single generation, trimmed FIFO against a bound.
///
/// Key listing follows insertion order; that order is the only input to
/// eviction. Overwriting an existing URL keeps its original insertion slot.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// URL-keyed response storage
    entries: HashMap<String, StoredResponse>,
    /// Insertion-order tracker
    order: InsertionOrder,
    /// Performance statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new empty CacheStore.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
        }
    }

    // == Lookup ==
    /// Retrieves a stored response by URL, recording a hit or miss.
    ///
    /// Used on the interception path; existence probes that should not touch
    /// the stats go through [`peek`](Self::peek) or
    /// [`contains`](Self::contains) instead.
    pub fn lookup(&mut self, url: &str) -> Option<StoredResponse> {
        match self.entries.get(url) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Peek ==
    /// Retrieves a stored response without touching the statistics.
    pub fn peek(&self, url: &str) -> Option<&StoredResponse> {
        self.entries.get(url)
    }

    // == Contains ==
    /// Whether a response is stored for the URL.
    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    // == Put ==
    /// Stores a response under a URL.
    ///
    /// A new URL is appended to the insertion order; overwriting keeps the
    /// original position. Last completed write for a URL wins.
    pub fn put(&mut self, url: &str, response: StoredResponse) {
        self.entries.insert(url.to_string(), response);
        self.order.record(url);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Delete ==
    /// Removes an entry by URL. Returns whether an entry was removed.
    pub fn delete(&mut self, url: &str) -> bool {
        if self.entries.remove(url).is_some() {
            self.order.remove(url);
            self.stats.set_total_entries(self.entries.len());
            true
        } else {
            false
        }
    }

    // == Keys ==
    /// Lists all stored URLs in insertion order, oldest first.
    pub fn keys(&self) -> Vec<String> {
        self.order.keys().cloned().collect()
    }

    // == Trim ==
    /// Deletes oldest-inserted entries until the store holds at most `bound`.
    ///
    /// Returns the number of entries evicted. Runs after every precache
    /// batch, so it also heals growth from interception-path inserts.
    pub fn trim_to(&mut self, bound: usize) -> usize {
        let mut removed = 0;
        while self.entries.len() > bound {
            let Some(oldest) = self.order.pop_oldest() else {
                break;
            };
            self.entries.remove(&oldest);
            self.stats.record_eviction();
            removed += 1;
        }
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current store statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
