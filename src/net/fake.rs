//! Scripted network double for controller tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::cache::StoredResponse;
use crate::net::{Network, NetworkError};

// == Fake Network ==
/// In-memory [`Network`] with scripted routes and a fetch log.
///
/// Unrouted URLs answer 404, so a completed-but-unsuccessful exchange can be
/// exercised; `failing()` makes every fetch fail at the transport level.
#[derive(Default)]
pub(crate) struct FakeNetwork {
    routes: Mutex<HashMap<String, StoredResponse>>,
    log: Mutex<Vec<String>>,
    fail_all: bool,
}

impl FakeNetwork {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A network where every fetch fails at the transport level.
    pub(crate) fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Scripts a 200 response with the given body and content type.
    pub(crate) fn serve(&self, url: &str, content_type: &str, body: &'static [u8]) {
        self.serve_response(
            url,
            StoredResponse::new(
                200,
                vec![("content-type".to_string(), content_type.to_string())],
                Bytes::from_static(body),
            ),
        );
    }

    /// Scripts an arbitrary response.
    pub(crate) fn serve_response(&self, url: &str, response: StoredResponse) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), response);
    }

    /// Total number of fetches attempted.
    pub(crate) fn fetch_count(&self) -> usize {
        self.log.lock().unwrap().len()
    }

    /// Number of fetches attempted for one URL.
    pub(crate) fn fetch_count_for(&self, url: &str) -> usize {
        self.log.lock().unwrap().iter().filter(|u| *u == url).count()
    }

    /// All fetched URLs in request order.
    pub(crate) fn fetched(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl Network for FakeNetwork {
    async fn fetch(&self, url: &str) -> Result<StoredResponse, NetworkError> {
        self.log.lock().unwrap().push(url.to_string());

        if self.fail_all {
            return Err(NetworkError::Unreachable {
                url: url.to_string(),
                reason: "scripted failure".to_string(),
            });
        }

        let routed = self.routes.lock().unwrap().get(url).cloned();
        Ok(routed.unwrap_or_else(|| StoredResponse::new(404, Vec::new(), Bytes::new())))
    }
}
