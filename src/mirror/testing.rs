// src/mirror/testing.rs
// =============================================================================
// In-memory Transport for tests: a fixed map of URL -> response.
//
// Unknown URLs fail like an unreachable host. Every request is recorded in
// order so tests can assert what was (and was not) fetched.
// =============================================================================

use crate::transport::{Response, StatusCode, Transport, TransportError};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct FakeTransport {
    responses: HashMap<String, Response>,
    requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    // 200 OK with the given body
    pub fn page(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(url.to_string(), Response::ok(body));
        self
    }

    // Empty body with the given status code
    pub fn status(mut self, url: &str, code: u16) -> Self {
        let status = StatusCode::from_u16(code).unwrap();
        self.responses
            .insert(url.to_string(), Response::new(status, Vec::new()));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests.lock().unwrap().iter().filter(|r| *r == url).count()
    }
}

impl Transport for FakeTransport {
    async fn get(&self, url: &str) -> Result<Response, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());

        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| TransportError::Unreachable(url.to_string()))
    }
}
