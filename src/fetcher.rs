//! Remote document fetching
//!
//! One GET per document, no retries. A failed fetch aborts the whole run, so
//! the error type distinguishes only what callers need to report: transport
//! failure vs. a body that was not the JSON we required.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Accept header sent when fetching the human-readable changelog page.
const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// DNS, TLS, connect or deadline failure reaching the remote. Timeouts
    /// land here too; they are a transport problem, not a decode problem.
    #[error("network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The body arrived but was not well-formed JSON.
    #[error("response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Seam between the orchestrator and the network, so runs can be driven by a
/// stub in tests.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch a resource and return the complete response body as text.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;

    /// Fetch a resource whose body must decode as JSON.
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// Production fetcher backed by `reqwest`, with a per-request deadline.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    async fn get_body(&self, url: &str, accept: Option<&str>) -> Result<String, FetchError> {
        let mut request = self.client.get(url);
        if let Some(accept) = accept {
            request = request.header(reqwest::header::ACCEPT, accept);
        }

        let network = |source: reqwest::Error| FetchError::Network {
            url: url.to_string(),
            source,
        };

        let response = request.send().await.map_err(network)?;
        response.text().await.map_err(network)
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.get_body(url, Some(HTML_ACCEPT)).await
    }

    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        let body = self.get_body(url, None).await?;
        serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
