//! HTTP Network Client
//!
//! reqwest-backed [`Network`] implementation resolving relative asset URLs
//! against the configured upstream origin.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::Client;
use url::Url;

use crate::cache::StoredResponse;
use crate::net::{Network, NetworkError};

/// User agent sent on upstream requests.
const USER_AGENT: &str = "offline-cache/0.1";

// == HTTP Network ==
/// Production fetch client.
///
/// Requests carry no timeout: a hung upstream fetch blocks that one request.
pub struct HttpNetwork {
    http: Client,
    origin: Url,
}

impl HttpNetwork {
    // == Constructor ==
    /// Creates a client resolving relative URLs against `origin`.
    pub fn new(origin: &str) -> Result<Self, NetworkError> {
        let origin =
            Url::parse(origin).map_err(|_| NetworkError::InvalidUrl(origin.to_string()))?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .use_rustls_tls()
            .build()
            .map_err(|e| NetworkError::Client(e.to_string()))?;

        Ok(Self { http, origin })
    }

    // == Resolve ==
    /// Resolves an absolute or origin-relative URL to a fetch target.
    fn resolve(&self, url: &str) -> Result<Url, NetworkError> {
        match Url::parse(url) {
            Ok(absolute) => Ok(absolute),
            Err(_) => self
                .origin
                .join(url)
                .map_err(|_| NetworkError::InvalidUrl(url.to_string())),
        }
    }
}

#[async_trait]
impl Network for HttpNetwork {
    async fn fetch(&self, url: &str) -> Result<StoredResponse, NetworkError> {
        let target = self.resolve(url)?;

        let response =
            self.http
                .get(target)
                .send()
                .await
                .map_err(|e| NetworkError::Unreachable {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;

        let status = response.status().as_u16();
        let headers = capture_headers(response.headers());
        let body: Bytes = response
            .bytes()
            .await
            .map_err(|e| NetworkError::Unreachable {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(StoredResponse::new(status, headers, body))
    }
}

// == Header Capture ==
/// Copies response headers into storable pairs.
///
/// Hop-by-hop and framing headers are dropped; the body is re-framed when
/// the stored response is served.
fn capture_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    const SKIPPED: [&str; 4] = [
        "connection",
        "keep-alive",
        "transfer-encoding",
        "content-length",
    ];

    headers
        .iter()
        .filter(|(name, _)| !SKIPPED.contains(&name.as_str()))
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}
