//! Operating-system DNS lookups
//!
//! Asks the system resolver (the same path `getaddrinfo` takes) what the
//! managed hostname points at. Caching resolvers between the host and the
//! authoritative servers may return a value up to one TTL old; a stale
//! answer only causes an extra, idempotent UPSERT.

use crate::error::{Error, Result};
use crate::traits::HostResolver;
use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr};

/// [`HostResolver`] backed by the operating system resolver
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl SystemResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HostResolver for SystemResolver {
    async fn resolve_ipv4(&self, hostname: &str) -> Result<Ipv4Addr> {
        let hostname = hostname.trim();
        if hostname.is_empty() {
            return Err(Error::resolver("Cannot resolve an empty hostname"));
        }

        let addrs = tokio::net::lookup_host((hostname, 0))
            .await
            .map_err(|e| Error::resolver(format!("Lookup of {hostname} failed: {e}")))?;

        let ipv4 = addrs.map(|addr| addr.ip()).find_map(|ip| match ip {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        });

        match ipv4 {
            Some(ip) => {
                tracing::debug!("{} resolves to {}", hostname, ip);
                Ok(ip)
            }
            None => Err(Error::resolver(format!(
                "{hostname} has no IPv4 address in DNS"
            ))),
        }
    }
}
