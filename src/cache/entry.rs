//! Stored Response Module
//!
//! Defines the structure for individual cached responses.

use std::time::{SystemTime, UNIX_EPOCH};

use bytes::Bytes;

/// HTTP status served when an image cannot be fetched and no offline
/// placeholder is cached.
pub const OFFLINE_STATUS: u16 = 504;

// == Stored Response ==
/// A single cached response: status, headers, body and storage metadata.
///
/// Responses for the same URL are treated as interchangeable; the last
/// completed write for a key wins.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers as name/value pairs
    pub headers: Vec<(String, String)>,
    /// Response body
    pub body: Bytes,
    /// Storage timestamp (Unix milliseconds)
    pub stored_at: u64,
}

impl StoredResponse {
    // == Constructor ==
    /// Creates a new stored response stamped with the current time.
    pub fn new(status: u16, headers: Vec<(String, String)>, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
            stored_at: current_timestamp_ms(),
        }
    }

    // == Offline Fallback ==
    /// Synthetic response returned when an image fetch fails offline and the
    /// placeholder itself is missing: status 504, no body.
    pub fn offline() -> Self {
        Self::new(OFFLINE_STATUS, Vec::new(), Bytes::new())
    }

    // == Is Ok ==
    /// Whether the status is in the successful (2xx) range.
    ///
    /// Only ok responses are eligible for storage; non-ok responses pass
    /// through to the caller uncached.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    // == Content Type ==
    /// Returns the content-type header value, if present.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.as_str())
    }

    /// Body size in bytes.
    pub fn byte_len(&self) -> usize {
        self.body.len()
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
