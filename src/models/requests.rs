//! Request DTOs for the cache controller API
//!
//! Defines the intercepted-request parameters and the client message
//! parsing for the precache channel.

use serde::Deserialize;
use serde_json::Value;

/// Message tag identifying a precache command.
pub const CACHE_URLS_TYPE: &str = "CACHE_URLS";

// == Cache Urls Command ==
/// A recognized `CACHE_URLS` message: a batch of nullable URL strings.
///
/// The message channel is a permissive boundary: anything that is not an
/// object tagged `CACHE_URLS` with an array payload parses to `None` and is
/// ignored without error, since the channel may carry unrelated message
/// types. Non-string array elements are kept as `None` and dropped during
/// ingestion alongside empty strings.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheUrlsCommand {
    /// Raw batch entries; `None` marks a null or non-string element
    pub urls: Vec<Option<String>>,
}

impl CacheUrlsCommand {
    /// Parses a raw message into a command, or `None` if the shape does not
    /// match.
    pub fn from_value(message: &Value) -> Option<Self> {
        let object = message.as_object()?;
        if object.get("type")?.as_str()? != CACHE_URLS_TYPE {
            return None;
        }

        let urls = object
            .get("urls")?
            .as_array()?
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect();

        Some(Self { urls })
    }
}

// == Asset Request ==
/// Parameters of an intercepted request (GET /fetch)
///
/// # Fields
/// - `url`: the requested asset URL, absolute or origin-relative
/// - `destination`: the declared destination type, when the caller knows it
///   (cross-origin requests may not carry one)
#[derive(Debug, Clone, Deserialize)]
pub struct AssetRequest {
    /// The requested URL
    pub url: String,
    /// Declared destination type, e.g. "image"
    #[serde(default)]
    pub destination: Option<String>,
}

impl AssetRequest {
    /// Creates a request with no declared destination.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            destination: None,
        }
    }

    /// Sets the declared destination type.
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.url.is_empty() {
            return Some("Url cannot be empty".to_string());
        }
        None
    }
}
