//! Cache Module
//!
//! Provides the generation-tagged, insertion-ordered response store with
//! FIFO trimming.

mod entry;
mod order;
mod registry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{current_timestamp_ms, StoredResponse, OFFLINE_STATUS};
pub use order::InsertionOrder;
pub use registry::CacheRegistry;
pub use stats::CacheStats;
pub use store::CacheStore;
