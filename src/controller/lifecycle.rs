//! Lifecycle Manager
//!
//! Install/activate transitions for the cache generation.

use tracing::info;

use crate::controller::{CacheController, Phase};
use crate::error::{CacheError, Result};

impl CacheController {
    // == Install ==
    /// Handles the install event: opens the current generation store and
    /// fills it with the fixed precache list.
    ///
    /// The bulk-add is atomic: every URL is fetched first, and nothing is
    /// stored unless all of them came back ok. Any failure, including a
    /// non-2xx status, fails the install so a broken offline mode never
    /// activates. Contrast with the best-effort dynamic batch path.
    pub async fn handle_install(&self) -> Result<()> {
        let tag = &self.config.generation_tag;
        info!("Installing cache generation '{}'", tag);

        self.registry.write().await.open(tag);

        let mut fetched = Vec::with_capacity(self.config.precache_urls.len());
        for url in &self.config.precache_urls {
            let response = self
                .network
                .fetch(url)
                .await
                .map_err(|e| CacheError::InstallFailed(e.to_string()))?;

            if !response.is_ok() {
                return Err(CacheError::InstallFailed(format!(
                    "Fetching '{}' returned status {}",
                    url, response.status
                )));
            }

            fetched.push((url.clone(), response));
        }

        {
            let mut registry = self.registry.write().await;
            let store = registry.open(tag);
            for (url, response) in fetched {
                store.put(&url, response);
            }
        }

        self.set_phase(Phase::Installed).await;
        info!(
            "Install complete for '{}' ({} urls precached), skipping waiting phase",
            tag,
            self.config.precache_urls.len()
        );
        Ok(())
    }

    // == Activate ==
    /// Handles the activate event: deletes every generation except the
    /// current one, then claims open clients so they use the new generation
    /// without a reload.
    pub async fn handle_activate(&self) -> Result<()> {
        let tag = &self.config.generation_tag;

        let purged = self.registry.write().await.purge_stale(tag);
        for stale in &purged {
            info!("Deleted stale cache generation '{}'", stale);
        }

        self.set_phase(Phase::Active).await;
        info!("Activation complete for '{}', claiming clients", tag);
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::config::Config;
    use crate::controller::{CacheController, Phase};
    use crate::error::CacheError;
    use crate::net::fake::FakeNetwork;

    fn test_config() -> Config {
        Config {
            generation_tag: "goolaxy-cache-v1".to_string(),
            ..Config::default()
        }
    }

    fn routed_network() -> FakeNetwork {
        let network = FakeNetwork::new();
        network.serve("/", "text/html", b"root");
        network.serve("/index.html", "text/html", b"entry");
        network.serve("/offline.png", "image/png", b"placeholder");
        network
    }

    #[tokio::test]
    async fn test_install_precaches_fixed_list() {
        let network = Arc::new(routed_network());
        let controller = CacheController::new(test_config(), network.clone());

        controller.handle_install().await.unwrap();

        assert_eq!(controller.phase().await, Phase::Installed);
        assert_eq!(controller.store_len().await, 3);
        assert_eq!(
            network.fetched(),
            vec!["/", "/index.html", "/offline.png"]
        );

        let registry = controller.registry.read().await;
        let store = registry.get("goolaxy-cache-v1").unwrap();
        assert!(store.contains("/"));
        assert!(store.contains("/index.html"));
        assert!(store.contains("/offline.png"));
    }

    #[tokio::test]
    async fn test_install_fetch_failure_is_fatal() {
        let network = Arc::new(FakeNetwork::failing());
        let controller = CacheController::new(test_config(), network);

        let result = controller.handle_install().await;

        assert!(matches!(result, Err(CacheError::InstallFailed(_))));
        assert_eq!(controller.phase().await, Phase::New);
    }

    #[tokio::test]
    async fn test_install_non_ok_status_is_fatal() {
        // Unrouted URLs answer 404; route only two of the three fixed URLs
        let network = FakeNetwork::new();
        network.serve("/", "text/html", b"root");
        network.serve("/index.html", "text/html", b"entry");
        let controller = CacheController::new(test_config(), Arc::new(network));

        let result = controller.handle_install().await;
        assert!(matches!(result, Err(CacheError::InstallFailed(_))));
    }

    #[tokio::test]
    async fn test_install_failure_stores_nothing() {
        // The last fixed URL fails, so the earlier successful fetches must
        // not be left behind in the store
        let network = FakeNetwork::new();
        network.serve("/", "text/html", b"root");
        network.serve("/index.html", "text/html", b"entry");
        let controller = CacheController::new(test_config(), Arc::new(network));

        let _ = controller.handle_install().await;

        assert_eq!(controller.store_len().await, 0);
    }

    #[tokio::test]
    async fn test_activate_purges_stale_generations() {
        let network = Arc::new(routed_network());
        let controller = CacheController::new(test_config(), network);

        // A previous generation left behind from the last deploy
        controller.registry.write().await.open("goolaxy-cache-v0");

        controller.handle_install().await.unwrap();
        controller.handle_activate().await.unwrap();

        let registry = controller.registry.read().await;
        assert_eq!(registry.tags(), vec!["goolaxy-cache-v1"]);
        assert_eq!(controller.phase().await, Phase::Active);
    }

    #[tokio::test]
    async fn test_activate_keeps_current_generation_entries() {
        let network = Arc::new(routed_network());
        let controller = CacheController::new(test_config(), network);

        controller.handle_install().await.unwrap();
        controller.handle_activate().await.unwrap();

        assert_eq!(controller.store_len().await, 3);
    }
}
