//! Test helpers shared by several test modules.
#![cfg(test)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};

use serde_json::Value;

use crate::error::TransportError;
use crate::fetch::Transport;

/// In-memory transport that serves canned bodies and counts requests.
///
/// Unknown addresses answer with HTTP 404.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    /// Address → body, or `None` to simulate a server error
    responses: Mutex<HashMap<String, Option<Vec<u8>>>>,
    /// Address of every request, in arrival order
    requests: Mutex<Vec<String>>,
    /// Total number of requests
    count: AtomicUsize,
}

impl MockTransport {
    /// Transport with no canned responses.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url` from now on.
    pub(crate) fn respond(&self, url: &str, body: &str) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(url.to_string(), Some(body.as_bytes().to_vec()));
        }
    }

    /// Serve `json` for `url` from now on.
    pub(crate) fn respond_json(&self, url: &str, json: &Value) {
        self.respond(url, &json.to_string());
    }

    /// Answer requests for `url` with HTTP 503 from now on.
    pub(crate) fn fail(&self, url: &str) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(url.to_string(), None);
        }
    }

    /// Requests made so far.
    pub(crate) fn request_count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Requests made so far for `url`.
    pub(crate) fn requests_for(&self, url: &str) -> usize {
        self.requests.lock().map_or(0, |requests| requests.iter().filter(|r| *r == url).count())
    }
}

impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        let response = self.responses.lock().ok().and_then(|responses| responses.get(url).cloned());
        match response {
            Some(Some(body)) => Ok(body),
            Some(None) => Err(TransportError::Status(503)),
            None => Err(TransportError::Status(404)),
        }
    }
}
