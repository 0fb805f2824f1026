//! Controller Module
//!
//! The cache controller owns the generation registry, the upstream network
//! handle and the lifecycle phase, and reacts to the closed set of host
//! events: install, activate, message, fetch.
//!
//! # Event handlers
//! - install: open the current generation and precache the fixed URL list
//! - activate: purge stale generations and claim clients
//! - message: ingest a `CACHE_URLS` precache batch (fire-and-forget)
//! - fetch: serve an intercepted request cache-first or network-first

mod intercept;
mod lifecycle;
mod precache;

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::cache::{CacheRegistry, CacheStats, StoredResponse};
use crate::config::Config;
use crate::error::Result;
use crate::models::AssetRequest;
use crate::net::Network;

// == Lifecycle Phase ==
/// Lifecycle phase of the controller.
///
/// Client pages poll this through the health endpoint and hold their
/// precache messages until the controller is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created, install not yet run
    New,
    /// Fixed precache list stored, waiting phase skipped
    Installed,
    /// Stale generations purged, clients claimed
    Active,
}

impl Phase {
    /// Phase name as reported by the health endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::New => "new",
            Phase::Installed => "installed",
            Phase::Active => "active",
        }
    }
}

// == Event ==
/// A host-delivered event.
#[derive(Debug)]
pub enum Event {
    /// Install the current cache generation
    Install,
    /// Activate the current generation and purge the rest
    Activate,
    /// Raw message from a client page
    Message(Value),
    /// Intercepted outgoing request
    Fetch(AssetRequest),
}

// == Outcome ==
/// Result of dispatching an event.
#[derive(Debug)]
pub enum Outcome {
    /// Install completed and the waiting phase was skipped
    Installed,
    /// Activation completed, clients claimed
    Activated,
    /// Message consumed (processed or ignored); nothing is sent back
    Accepted,
    /// Response chosen for an intercepted request
    Served(StoredResponse),
}

// == Cache Controller ==
/// The process-wide cache controller.
///
/// Cheap to clone; all clones share the registry and phase. The registry is
/// the single shared mutable resource: locks are held only around store
/// operations, never across an upstream fetch, so independent events may
/// interleave freely (per-key writes are idempotent, last write wins).
#[derive(Clone)]
pub struct CacheController {
    config: Arc<Config>,
    registry: Arc<RwLock<CacheRegistry>>,
    network: Arc<dyn Network>,
    phase: Arc<RwLock<Phase>>,
}

impl CacheController {
    // == Constructor ==
    /// Creates a controller for the configured generation.
    pub fn new(config: Config, network: Arc<dyn Network>) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(RwLock::new(CacheRegistry::new())),
            network,
            phase: Arc::new(RwLock::new(Phase::New)),
        }
    }

    // == Dispatch ==
    /// Dispatches one host event to its handler.
    pub async fn dispatch(&self, event: Event) -> Result<Outcome> {
        match event {
            Event::Install => {
                self.handle_install().await?;
                Ok(Outcome::Installed)
            }
            Event::Activate => {
                self.handle_activate().await?;
                Ok(Outcome::Activated)
            }
            Event::Message(message) => {
                self.handle_message(&message).await;
                Ok(Outcome::Accepted)
            }
            Event::Fetch(request) => Ok(Outcome::Served(self.handle_fetch(request).await?)),
        }
    }

    // == Accessors ==
    /// Controller configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current lifecycle phase.
    pub async fn phase(&self) -> Phase {
        *self.phase.read().await
    }

    pub(crate) async fn set_phase(&self, phase: Phase) {
        *self.phase.write().await = phase;
    }

    /// Statistics of the current generation's store.
    pub async fn stats(&self) -> CacheStats {
        self.registry
            .read()
            .await
            .get(&self.config.generation_tag)
            .map(|store| store.stats())
            .unwrap_or_default()
    }

    /// Entry count of the current generation's store.
    pub async fn store_len(&self) -> usize {
        self.registry
            .read()
            .await
            .get(&self.config.generation_tag)
            .map(|store| store.len())
            .unwrap_or(0)
    }
}
