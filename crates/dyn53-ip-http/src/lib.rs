// # HTTP IP Source
//
// This crate provides the external address source for dyn53.
//
// ## Architecture
//
// Fetches the host's address as seen from the internet from a public
// service (https://api.ipify.org by default). One `current()` call is one
// GET: no polling, no retry, no caching between calls.
//
// Two response shapes are understood:
// - `text`: the body is the bare address (`203.0.113.7`, optional newline)
// - `json`: the body is `{"ip":"203.0.113.7"}` (ipify `?format=json`)

use dyn53_core::address::parse_ipv4;
use dyn53_core::config::{IpServiceConfig, IpServiceFormat};
use dyn53_core::traits::IpSource;
use dyn53_core::{Error, Result};

use serde::Deserialize;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Default HTTP timeout for the address lookup
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON body returned by ipify-style services
#[derive(Debug, Deserialize)]
struct IpResponse {
    ip: String,
}

/// HTTP-based external address source
#[derive(Debug, Clone)]
pub struct HttpIpSource {
    /// URL to fetch the address from
    url: String,

    /// Response body format
    format: IpServiceFormat,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a new HTTP IP source
    ///
    /// # Parameters
    ///
    /// - `url`: URL to fetch the address from (e.g., "https://api.ipify.org")
    /// - `format`: Shape of the response body
    pub fn new(url: impl Into<String>, format: IpServiceFormat) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .user_agent(concat!("dyn53/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::ip_source(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into(),
            format,
            client,
        })
    }

    /// Create from the `ip.service.*` configuration
    pub fn from_config(config: &IpServiceConfig) -> Result<Self> {
        Self::new(config.url.clone(), config.format)
    }

    /// Fetch the response body
    async fn fetch_body(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::ip_source(format!("Request to {} failed: {}", self.url, e)))?;

        if !response.status().is_success() {
            return Err(Error::ip_source(format!(
                "{} answered with HTTP {}",
                self.url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| Error::ip_source(format!("Failed to read response: {}", e)))
    }

    /// Pull the address text out of a response body
    fn extract(&self, body: &str) -> Result<String> {
        match self.format {
            IpServiceFormat::Text => Ok(body.to_string()),
            IpServiceFormat::Json => serde_json::from_str::<IpResponse>(body)
                .map(|r| r.ip)
                .map_err(|e| Error::ip_source(format!("Invalid JSON from {}: {}", self.url, e))),
        }
    }
}

#[async_trait::async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<Ipv4Addr> {
        let body = self.fetch_body().await?;
        let reported = self.extract(&body)?;

        let ip = parse_ipv4(&reported).map_err(|_| {
            Error::invalid_address(format!(
                "External reported IP address is not a valid IPv4 IP address: {}",
                reported.trim()
            ))
        })?;

        tracing::debug!("External address from {}: {}", self.url, ip);
        Ok(ip)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
