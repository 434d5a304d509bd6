use futures::future::BoxFuture;
use serde_json::Value;
use std::time::Duration;

use hey_constants::{CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS, USER_AGENT};
use hey_error::{HeyError, Result};

use crate::entry::RegistryEntry;
use crate::package_url;

/// Anything that can answer "what does the registry know about this package".
pub trait RegistrySource: Send + Sync {
    /// Base URL of the registry, handed on to installers.
    fn base_url(&self) -> &str;

    fn fetch_entry<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<RegistryEntry>>;
}

/// `reqwest`-backed registry client. One GET per call, no caching, no retries.
#[derive(Clone, Debug)]
pub struct HttpRegistry {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRegistry {
    pub fn new(base_url: &str, timeout: Duration, connect_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .tcp_nodelay(true)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| HeyError::registry_unavailable(base_url, e))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn with_default_timeouts(base_url: &str) -> Result<Self> {
        Self::new(
            base_url,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
            Duration::from_secs(CONNECT_TIMEOUT_SECS),
        )
    }

    pub async fn fetch_json(&self, name: &str) -> Result<Value> {
        let url = package_url(&self.base_url, name);

        let resp = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    HeyError::registry_unavailable(&url, "request timed out")
                } else if e.is_connect() {
                    HeyError::registry_unavailable(&url, format!("connection failed: {e}"))
                } else {
                    HeyError::registry_unavailable(&url, e)
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(HeyError::registry_unavailable(&url, format!("HTTP {status}")));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| HeyError::registry_unavailable(&url, e))?;

        serde_json::from_str(&text).map_err(|e| {
            HeyError::registry_unavailable(
                &url,
                format!("invalid JSON (response length: {}): {e}", text.len()),
            )
        })
    }

    /// Download raw bytes, used for package tarballs.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HeyError::registry_unavailable(url, e))?;

        if !resp.status().is_success() {
            return Err(HeyError::registry_unavailable(
                url,
                format!("HTTP {}", resp.status()),
            ));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| HeyError::registry_unavailable(url, e))?;
        Ok(bytes.to_vec())
    }
}

impl RegistrySource for HttpRegistry {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn fetch_entry<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<RegistryEntry>> {
        Box::pin(async move {
            let json = self.fetch_json(name).await?;
            Ok(RegistryEntry::from_json(name, &json))
        })
    }
}
