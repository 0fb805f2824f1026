//! Cache Registry Module
//!
//! Holds every cache store generation by tag and owns generational turnover.

use std::collections::HashMap;

use crate::cache::CacheStore;

// == Cache Registry ==
/// Registry of generation-tagged cache stores.
///
/// At most one generation is active at a time; activation purges every other
/// tag so no request is ever served from two live generations.
#[derive(Debug, Default)]
pub struct CacheRegistry {
    /// Stores keyed by generation tag
    stores: HashMap<String, CacheStore>,
}

impl CacheRegistry {
    // == Constructor ==
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            stores: HashMap::new(),
        }
    }

    // == Open ==
    /// Returns the store for a generation tag, creating it if absent.
    pub fn open(&mut self, tag: &str) -> &mut CacheStore {
        self.stores.entry(tag.to_string()).or_default()
    }

    // == Get ==
    /// Returns the store for a tag if it exists.
    pub fn get(&self, tag: &str) -> Option<&CacheStore> {
        self.stores.get(tag)
    }

    /// Returns the store for a tag mutably if it exists.
    pub fn get_mut(&mut self, tag: &str) -> Option<&mut CacheStore> {
        self.stores.get_mut(tag)
    }

    // == Tags ==
    /// Lists all known generation tags.
    pub fn tags(&self) -> Vec<String> {
        self.stores.keys().cloned().collect()
    }

    // == Delete ==
    /// Deletes a generation wholesale. Returns whether it existed.
    pub fn delete(&mut self, tag: &str) -> bool {
        self.stores.remove(tag).is_some()
    }

    // == Purge Stale ==
    /// Deletes every generation except the current one.
    ///
    /// Returns the purged tags. The current generation is kept even if it has
    /// not been opened yet.
    pub fn purge_stale(&mut self, current: &str) -> Vec<String> {
        let stale: Vec<String> = self
            .stores
            .keys()
            .filter(|tag| tag.as_str() != current)
            .cloned()
            .collect();

        for tag in &stale {
            self.stores.remove(tag);
        }

        stale
    }

    // == Length ==
    /// Returns the number of known generations.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}
