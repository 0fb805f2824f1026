//! Request and Response models for the cache controller API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies, and the
//! parsing of client messages on the precache channel.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{AssetRequest, CacheUrlsCommand, CACHE_URLS_TYPE};
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
