// src/transport/mod.rs
// =============================================================================
// The HTTP side of the mirror: "given a URL, return status + body bytes,
// or fail".
//
// The crawl engine only talks to the Transport trait, so tests can swap in
// an in-memory site while the binary uses reqwest (see http.rs).
// =============================================================================

mod http;

pub use http::HttpTransport;
pub use reqwest::StatusCode;

use std::future::Future;
use thiserror::Error;

// A fetched response: status code plus the raw body bytes
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(StatusCode::OK, body)
    }
}

// Why a request produced no response at all
#[derive(Error, Debug)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("unreachable: {0}")]
    Unreachable(String),
}

// Anything that can perform a GET request
pub trait Transport {
    fn get(&self, url: &str) -> impl Future<Output = Result<Response, TransportError>>;
}
