//! Precache Ingester
//!
//! Handles `CACHE_URLS` commands: warms the store with caller-specified
//! URLs best-effort, then enforces the eviction bound.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::controller::CacheController;
use crate::models::CacheUrlsCommand;

impl CacheController {
    // == Message ==
    /// Handles a raw client message.
    ///
    /// Only recognized `CACHE_URLS` commands have any effect; every other
    /// shape is dropped without error. Nothing is ever sent back.
    pub async fn handle_message(&self, message: &Value) {
        let Some(command) = CacheUrlsCommand::from_value(message) else {
            debug!("Ignoring unrecognized client message");
            return;
        };
        self.ingest(command).await;
    }

    // == Ingest ==
    /// Processes one precache batch.
    ///
    /// URLs are deduplicated (first occurrence wins) and empties dropped.
    /// Each URL is fetched and stored independently: one failure is logged
    /// and skipped, the batch continues. The trim afterwards runs
    /// unconditionally, so a store grown past the bound by interception
    /// inserts is healed even by an empty batch.
    pub(crate) async fn ingest(&self, command: CacheUrlsCommand) {
        let tag = &self.config.generation_tag;
        let urls = dedupe(command.urls);

        let mut added = 0;
        for url in &urls {
            let already_cached = self.registry.write().await.open(tag).contains(url);
            if already_cached {
                continue;
            }

            // Check-then-add can race a concurrent batch; a duplicate fetch
            // for the same URL is harmless, last write wins.
            match self.network.fetch(url).await {
                Ok(response) if response.is_ok() => {
                    self.registry.write().await.open(tag).put(url, response);
                    added += 1;
                }
                Ok(response) => {
                    warn!(
                        "Failed to precache '{}': upstream returned status {}",
                        url, response.status
                    );
                }
                Err(e) => {
                    warn!("Failed to precache '{}': {}", url, e);
                }
            }
        }

        let evicted = self
            .registry
            .write()
            .await
            .open(tag)
            .trim_to(self.config.max_entries);

        if evicted > 0 {
            info!(
                "Precache batch done: {} added, {} evicted to hold the {}-entry bound",
                added, evicted, self.config.max_entries
            );
        } else if added > 0 {
            debug!("Precache batch done: {} added", added);
        }
    }
}

// == Deduplication ==
/// Coalesces a raw batch: drops nulls and empty strings, keeps the first
/// occurrence of each URL in order.
fn dedupe(urls: Vec<Option<String>>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter()
        .flatten()
        .filter(|url| !url.is_empty())
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::dedupe;
    use crate::cache::StoredResponse;
    use crate::config::Config;
    use crate::controller::CacheController;
    use crate::net::fake::FakeNetwork;
    use bytes::Bytes;

    fn controller_with(network: FakeNetwork, max_entries: usize) -> (CacheController, Arc<FakeNetwork>) {
        let network = Arc::new(network);
        let config = Config {
            generation_tag: "goolaxy-cache-v1".to_string(),
            max_entries,
            ..Config::default()
        };
        (CacheController::new(config, network.clone()), network)
    }

    #[test]
    fn test_dedupe_preserves_first_occurrence_order() {
        let urls = vec![
            Some("b.jpg".to_string()),
            Some("a.png".to_string()),
            Some("b.jpg".to_string()),
        ];
        assert_eq!(dedupe(urls), vec!["b.jpg", "a.png"]);
    }

    #[test]
    fn test_dedupe_drops_nulls_and_empties() {
        let urls = vec![
            Some("a.png".to_string()),
            Some(String::new()),
            None,
            Some("b.jpg".to_string()),
        ];
        assert_eq!(dedupe(urls), vec!["a.png", "b.jpg"]);
    }

    #[tokio::test]
    async fn test_batch_with_duplicates_fetches_each_url_once() {
        let network = FakeNetwork::new();
        network.serve("a.png", "image/png", b"a");
        network.serve("b.jpg", "image/jpeg", b"b");
        let (controller, network) = controller_with(network, 200);

        let message = json!({
            "type": "CACHE_URLS",
            "urls": ["a.png", "a.png", "", null, "b.jpg"],
        });
        controller.handle_message(&message).await;

        assert_eq!(network.fetched(), vec!["a.png", "b.jpg"]);
        assert_eq!(controller.store_len().await, 2);
    }

    #[tokio::test]
    async fn test_already_cached_urls_are_not_refetched() {
        let network = FakeNetwork::new();
        network.serve("a.png", "image/png", b"a");
        let (controller, network) = controller_with(network, 200);

        controller
            .handle_message(&json!({"type": "CACHE_URLS", "urls": ["a.png"]}))
            .await;
        controller
            .handle_message(&json!({"type": "CACHE_URLS", "urls": ["a.png"]}))
            .await;

        assert_eq!(network.fetch_count_for("a.png"), 1);
    }

    #[tokio::test]
    async fn test_one_failure_does_not_abort_the_batch() {
        // b.png is unrouted and answers 404, a and c succeed
        let network = FakeNetwork::new();
        network.serve("a.png", "image/png", b"a");
        network.serve("c.png", "image/png", b"c");
        let (controller, network) = controller_with(network, 200);

        controller
            .handle_message(&json!({"type": "CACHE_URLS", "urls": ["a.png", "b.png", "c.png"]}))
            .await;

        assert_eq!(network.fetch_count(), 3);
        assert_eq!(controller.store_len().await, 2);

        let registry = controller.registry.read().await;
        let store = registry.get("goolaxy-cache-v1").unwrap();
        assert!(store.contains("a.png"));
        assert!(!store.contains("b.png"));
        assert!(store.contains("c.png"));
    }

    #[tokio::test]
    async fn test_transport_failures_are_skipped() {
        let (controller, network) = controller_with(FakeNetwork::failing(), 200);

        controller
            .handle_message(&json!({"type": "CACHE_URLS", "urls": ["a.png", "b.png"]}))
            .await;

        assert_eq!(network.fetch_count(), 2);
        assert_eq!(controller.store_len().await, 0);
    }

    #[tokio::test]
    async fn test_bound_is_enforced_after_batch() {
        let network = FakeNetwork::new();
        for i in 0..5 {
            network.serve(&format!("img-{i}.png"), "image/png", b"x");
        }
        let (controller, _) = controller_with(network, 3);

        let urls: Vec<String> = (0..5).map(|i| format!("img-{i}.png")).collect();
        controller
            .handle_message(&json!({"type": "CACHE_URLS", "urls": urls}))
            .await;

        assert_eq!(controller.store_len().await, 3);

        // The oldest-inserted entries were evicted, the newest three survive
        let registry = controller.registry.read().await;
        let store = registry.get("goolaxy-cache-v1").unwrap();
        assert!(!store.contains("img-0.png"));
        assert!(!store.contains("img-1.png"));
        assert!(store.contains("img-2.png"));
        assert!(store.contains("img-3.png"));
        assert!(store.contains("img-4.png"));
    }

    #[tokio::test]
    async fn test_empty_batch_still_heals_over_bound_store() {
        let (controller, _) = controller_with(FakeNetwork::new(), 2);

        // Grow the store past the bound the way the interception path does
        {
            let mut registry = controller.registry.write().await;
            let store = registry.open("goolaxy-cache-v1");
            for i in 0..4 {
                store.put(
                    &format!("img-{i}.png"),
                    StoredResponse::new(200, Vec::new(), Bytes::from_static(b"x")),
                );
            }
        }

        controller
            .handle_message(&json!({"type": "CACHE_URLS", "urls": []}))
            .await;

        assert_eq!(controller.store_len().await, 2);
    }

    #[tokio::test]
    async fn test_unrecognized_messages_have_no_effect() {
        let (controller, network) = controller_with(FakeNetwork::new(), 200);

        controller.handle_message(&json!(null)).await;
        controller.handle_message(&json!({"urls": ["a.png"]})).await;
        controller
            .handle_message(&json!({"type": "PURGE", "urls": ["a.png"]}))
            .await;
        controller
            .handle_message(&json!({"type": "CACHE_URLS", "urls": "a.png"}))
            .await;

        assert_eq!(network.fetch_count(), 0);
        assert_eq!(controller.store_len().await, 0);
    }
}
