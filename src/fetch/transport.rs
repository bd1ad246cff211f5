//! Network seam of the fetch cache

use std::future::Future;
use std::time::Duration;

use crate::error::TransportError;

/// Retrieves the raw body behind a resource address.
pub trait Transport: Send + Sync {
    /// GET `url` and return the response body.
    ///
    /// Non-success statuses are errors.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}

/// HTTP transport backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Shared connection pool
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a client with a total request timeout and an identifying user agent.
    ///
    /// # Errors
    /// Fails when the TLS backend cannot be initialized.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send {
        (**self).get(url)
    }
}
