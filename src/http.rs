//! Shared HTTP client construction and page fetching.

use crate::error::{Result, ScraperError};
use std::time::Duration;
use tracing::debug;

/// User agent string for requests
pub const USER_AGENT: &str = concat!("rustjair/", env!("CARGO_PKG_VERSION"));

/// Default connect and idle-read timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Options for the shared HTTP client
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Connect timeout and the longest pause allowed between reads.
    /// Transfers that keep receiving bytes are never cut off; `None` lets
    /// requests wait unbounded.
    pub timeout: Option<Duration>,
    /// Proxy URL (e.g., "http://127.0.0.1:7890")
    pub proxy: Option<String>,
    pub user_agent: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            proxy: None,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl HttpOptions {
    /// Timeout from a CLI-style seconds value, where `0` disables it.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        self
    }
}

/// Build HTTP client with optional proxy and timeouts
pub fn build_http_client(options: &HttpOptions) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(options.user_agent.as_str());

    if let Some(timeout) = options.timeout {
        builder = builder.connect_timeout(timeout).read_timeout(timeout);
    }

    if let Some(proxy_url) = options.proxy.as_deref() {
        let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
            ScraperError::Config(format!("Invalid proxy URL '{}': {}", proxy_url, e))
        })?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| ScraperError::Config(format!("Failed to build HTTP client: {}", e)))
}

/// Issue a GET and fail on transport errors or non-success status.
pub async fn get_checked(client: &reqwest::Client, url: &str) -> Result<reqwest::Response> {
    debug!(url = url, "GET");
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScraperError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response)
}

/// Fetch page content as text
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = get_checked(client, url).await?;
    let body = response.text().await?;
    debug!(url = url, bytes = body.len(), "Fetched page");
    Ok(body)
}
