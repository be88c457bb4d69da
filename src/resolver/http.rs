//! HTTP access to remote agent servers.

use crate::error::{BookError, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Path under an agent URL that serves the agent's Book source.
pub const BOOK_ENDPOINT: &str = "api/book";

/// Fetches agent sources and imported files over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBookFetcher {
    http_client: Client,
    request_timeout: Duration,
}

impl Default for HttpBookFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpBookFetcher {
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
            request_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// `{agent_url}/api/book`
    pub fn book_url(agent_url: &str) -> String {
        format!("{}/{}", agent_url.trim_end_matches('/'), BOOK_ENDPOINT)
    }

    /// Book source of the agent at `agent_url`; `None` on 404.
    pub async fn fetch_agent_source(&self, agent_url: &str) -> Result<Option<String>> {
        self.get_text(&Self::book_url(agent_url)).await
    }

    /// Body of `url` as text; `None` on 404.
    pub async fn fetch_text(&self, url: &str) -> Result<Option<String>> {
        self.get_text(url).await
    }

    async fn get_text(&self, url: &str) -> Result<Option<String>> {
        tracing::debug!(url, "Fetching remote book resource");
        let response = self
            .http_client
            .get(url)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| BookError::Fetch(format!("Failed to fetch {}: {}", url, e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(BookError::Fetch(format!(
                "{} returned error status: {}",
                url,
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BookError::Fetch(format!("Failed to read body of {}: {}", url, e)))?;
        Ok(Some(body))
    }
}
