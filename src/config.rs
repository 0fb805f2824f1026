//! Configuration Module
//!
//! Handles loading and managing controller configuration from environment variables.

use std::env;

/// Controller configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// The defaults reproduce the reference deployment: a 200-entry store named
/// `offline-cache-v1` fronting an origin on port 8080.
#[derive(Debug, Clone)]
pub struct Config {
    /// Generation tag naming the current cache store
    pub generation_tag: String,
    /// Origin used to resolve relative asset URLs
    pub upstream_origin: String,
    /// Maximum number of entries the store may hold after a precache batch
    pub max_entries: usize,
    /// Fixed URL list fetched atomically at install time
    pub precache_urls: Vec<String>,
    /// URL of the offline placeholder image served when an image fetch fails
    pub offline_placeholder: String,
    /// File extensions classified as image/3D assets when no destination is declared
    pub image_extensions: Vec<String>,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_GENERATION` - Generation tag (default: "offline-cache-v1")
    /// - `UPSTREAM_ORIGIN` - Origin for relative URLs (default: "http://localhost:8080")
    /// - `MAX_ENTRIES` - Eviction bound (default: 200)
    /// - `PRECACHE_URLS` - Comma-separated install-time list (default: "/,/index.html,/offline.png")
    /// - `OFFLINE_PLACEHOLDER` - Placeholder image URL (default: "/offline.png")
    /// - `IMAGE_EXTENSIONS` - Comma-separated extension set (default: "png,jpg,jpeg,webp,gif,svg,glb,gltf")
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            generation_tag: env::var("CACHE_GENERATION")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.generation_tag),
            upstream_origin: env::var("UPSTREAM_ORIGIN")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.upstream_origin),
            max_entries: env::var("MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_entries),
            precache_urls: env::var("PRECACHE_URLS")
                .ok()
                .map(|v| parse_list(&v))
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.precache_urls),
            offline_placeholder: env::var("OFFLINE_PLACEHOLDER")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.offline_placeholder),
            image_extensions: env::var("IMAGE_EXTENSIONS")
                .ok()
                .map(|v| parse_list(&v))
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.image_extensions),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generation_tag: "offline-cache-v1".to_string(),
            upstream_origin: "http://localhost:8080".to_string(),
            max_entries: 200,
            precache_urls: vec![
                "/".to_string(),
                "/index.html".to_string(),
                "/offline.png".to_string(),
            ],
            offline_placeholder: "/offline.png".to_string(),
            image_extensions: vec![
                "png".to_string(),
                "jpg".to_string(),
                "jpeg".to_string(),
                "webp".to_string(),
                "gif".to_string(),
                "svg".to_string(),
                "glb".to_string(),
                "gltf".to_string(),
            ],
            server_port: 3000,
        }
    }
}

/// Splits a comma-separated env value into trimmed, non-empty items.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
