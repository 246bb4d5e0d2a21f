// src/transport/http.rs
// =============================================================================
// reqwest-backed Transport.
//
// - One Client per run (connection pooling across pages and resources)
// - Per-request timeout, limited redirects
// - Status codes are returned as-is: deciding what counts as success is the
//   caller's job (pages need 200, resources accept any 2xx)
// =============================================================================

use super::{Response, Transport, TransportError};
use reqwest::Client;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_REDIRECTS: usize = 5;

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Response, TransportError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        Ok(Response::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds() {
        assert!(HttpTransport::new().is_ok());
    }

    #[tokio::test]
    async fn test_relative_url_is_a_transport_error() {
        // Relative resource URLs are requested raw too; reqwest refuses them
        let transport = HttpTransport::new().unwrap();
        let result = transport.get("img.png").await;
        assert!(matches!(result, Err(TransportError::Http(_))));
    }
}
