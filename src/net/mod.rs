//! Network Module
//!
//! Upstream fetch seam between the controller and the origin. The controller
//! only sees the [`Network`] trait; production uses the reqwest-backed
//! [`HttpNetwork`], tests inject scripted implementations.

mod client;

#[cfg(test)]
pub(crate) mod fake;

pub use client::HttpNetwork;

use async_trait::async_trait;
use thiserror::Error;

use crate::cache::StoredResponse;

// == Network Error ==
/// Errors surfaced by the upstream fetch layer.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The URL could not be parsed or resolved against the origin
    #[error("Invalid url '{0}'")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    /// The request failed at the transport level (offline, DNS, refused)
    #[error("Request for '{url}' failed: {reason}")]
    Unreachable { url: String, reason: String },
}

// == Network Trait ==
/// Fetches a URL from the upstream origin.
///
/// Implementations return a response for any completed exchange, including
/// non-2xx statuses; `Err` means the exchange itself failed.
#[async_trait]
pub trait Network: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<StoredResponse, NetworkError>;
}
