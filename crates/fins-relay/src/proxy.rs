//! Upstream URL rewriting and request forwarding

use crate::error::Result;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::debug;

/// Forwards relay requests to the catalog
pub struct Forwarder {
    client: Client,
    upstream_base_url: String,
    resource_prefix: String,
}

impl Forwarder {
    pub fn new(upstream_base_url: &str, resource_prefix: &str) -> Self {
        Self {
            client: Client::new(),
            upstream_base_url: upstream_base_url.trim_end_matches('/').to_string(),
            resource_prefix: resource_prefix.trim_matches('/').to_string(),
        }
    }

    pub fn upstream_base_url(&self) -> &str {
        &self.upstream_base_url
    }

    /// Build the upstream URL for the part of the request after the mount
    /// point, e.g. `/resources/species/143?x=1`
    pub fn upstream_url(&self, suffix: &str) -> String {
        let suffix = if suffix.is_empty() || suffix.starts_with('?') {
            format!("/{}", suffix)
        } else {
            suffix.to_string()
        };

        if self.resource_prefix.is_empty() {
            format!("{}{}", self.upstream_base_url, suffix)
        } else {
            format!(
                "{}/{}{}",
                self.upstream_base_url, self.resource_prefix, suffix
            )
        }
    }

    /// Send `method` to `url` with the fixed JSON header pair and buffer the
    /// parsed body. The inbound request's own headers and body are not sent.
    pub async fn forward(&self, method: Method, url: &str) -> Result<(u16, Value)> {
        let response = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        let data: Value = serde_json::from_slice(&body)?;

        debug!(url = %url, status, size = body.len(), "Upstream responded");
        Ok((status, data))
    }
}
