//! Request Interceptor
//!
//! Classifies intercepted requests and chooses a serving strategy:
//! cache-first for image assets, network-first for everything else.

use tracing::{debug, warn};
use url::Url;

use crate::cache::StoredResponse;
use crate::controller::CacheController;
use crate::error::{CacheError, Result};
use crate::models::AssetRequest;

/// Destination type declared by image requests.
const IMAGE_DESTINATION: &str = "image";

impl CacheController {
    // == Fetch ==
    /// Handles an intercepted request.
    ///
    /// A pure per-request decision: image requests go cache-first with an
    /// offline fallback chain, everything else goes network-first with the
    /// store as fallback.
    pub async fn handle_fetch(&self, request: AssetRequest) -> Result<StoredResponse> {
        if let Some(error_msg) = request.validate() {
            return Err(CacheError::InvalidRequest(error_msg));
        }

        if self.is_image_request(&request) {
            Ok(self.serve_cache_first(&request.url).await)
        } else {
            self.serve_network_first(&request.url).await
        }
    }

    // == Classification ==
    /// Whether a request is an image/3D-asset request.
    ///
    /// True when the declared destination is `image`, or when the URL path
    /// carries one of the configured asset extensions. The extension check
    /// covers requests whose destination metadata is unavailable
    /// cross-origin.
    fn is_image_request(&self, request: &AssetRequest) -> bool {
        if request.destination.as_deref() == Some(IMAGE_DESTINATION) {
            return true;
        }

        match path_extension(&request.url) {
            Some(ext) => self
                .config
                .image_extensions
                .iter()
                .any(|known| known.eq_ignore_ascii_case(&ext)),
            None => false,
        }
    }

    // == Cache-First ==
    /// Serves an image request: store hit, else network (storing ok
    /// responses), else offline placeholder, else synthetic 504.
    ///
    /// Always produces a response; an image never surfaces as a rejected
    /// request.
    async fn serve_cache_first(&self, url: &str) -> StoredResponse {
        let tag = &self.config.generation_tag;

        if let Some(cached) = self.registry.write().await.open(tag).lookup(url) {
            debug!("Serving '{}' from cache", url);
            return cached;
        }

        match self.network.fetch(url).await {
            Ok(response) => {
                if response.is_ok() {
                    self.registry
                        .write()
                        .await
                        .open(tag)
                        .put(url, response.clone());
                }
                response
            }
            Err(e) => {
                warn!("Image fetch for '{}' failed, falling back: {}", url, e);
                let placeholder = self
                    .registry
                    .read()
                    .await
                    .get(tag)
                    .and_then(|store| store.peek(&self.config.offline_placeholder).cloned());
                placeholder.unwrap_or_else(StoredResponse::offline)
            }
        }
    }

    // == Network-First ==
    /// Serves a non-image request: the network response is returned as-is,
    /// ok or not; the store is consulted only after a transport failure.
    /// With no cached fallback the failure propagates to the caller.
    async fn serve_network_first(&self, url: &str) -> Result<StoredResponse> {
        let tag = &self.config.generation_tag;

        match self.network.fetch(url).await {
            Ok(response) => Ok(response),
            Err(e) => {
                let fallback = self.registry.write().await.open(tag).lookup(url);
                fallback.ok_or_else(|| CacheError::Unreachable(e.to_string()))
            }
        }
    }
}

// == Path Extension ==
/// Extracts the lowercase file extension from a URL path, ignoring query
/// string and fragment.
fn path_extension(url: &str) -> Option<String> {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        // Origin-relative URL; strip query and fragment by hand
        Err(_) => url.split(['?', '#']).next().unwrap_or(url).to_string(),
    };

    let file = path.rsplit('/').next().unwrap_or(path.as_str());
    let (_, ext) = file.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
