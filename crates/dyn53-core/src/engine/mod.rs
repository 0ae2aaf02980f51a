//! Core dyn53 engine
//!
//! The Dyn53Engine is responsible for:
//! - Looking up the address DNS currently publishes via HostResolver
//! - Fetching the externally visible address via IpSource
//! - Deciding whether the A record needs to change
//! - Rewriting the record via DnsProvider when it does
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────┐
//! │ HostResolver │   │  IpSource   │
//! └──────────────┘   └─────────────┘
//!         │ published        │ external
//!         └────────┬─────────┘
//!                  ▼
//!         ┌──────────────┐
//!         │ Dyn53Engine  │── differ? ──┐
//!         └──────────────┘             ▼
//!                             ┌──────────────┐
//!                             │ DnsProvider  │
//!                             │ (update)     │
//!                             └──────────────┘
//! ```
//!
//! ## Cycle
//!
//! 1. Resolve the hostname
//! 2. Fetch the external address
//! 3. If they match, stop
//! 4. Otherwise call DnsProvider::update_record()
//!
//! One invocation is one cycle. Nothing is retried.

use crate::error::{Error, Result};
use crate::traits::{DnsProvider, HostResolver, IpSource, UpdateResult};
use std::net::Ipv4Addr;
use tracing::{debug, info};

/// Outcome of one check-and-update cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// DNS was out of date and the record was rewritten (or would have been)
    Updated {
        hostname: String,
        /// What DNS reported before the update
        previous_ip: Ipv4Addr,
        new_ip: Ipv4Addr,
        /// True if the provider only logged the change
        dry_run: bool,
    },

    /// DNS already matched the external address
    Unchanged {
        hostname: String,
        current_ip: Ipv4Addr,
    },
}

impl CycleOutcome {
    pub fn hostname(&self) -> &str {
        match self {
            Self::Updated { hostname, .. } | Self::Unchanged { hostname, .. } => hostname,
        }
    }
}

/// Core dyn53 engine
///
/// ## Lifecycle
///
/// 1. Create with [`Dyn53Engine::new()`]
/// 2. Call [`Dyn53Engine::run_once()`]
/// 3. Drop
pub struct Dyn53Engine {
    /// Looks up the published address
    resolver: Box<dyn HostResolver>,

    /// Looks up the external address
    ip_source: Box<dyn IpSource>,

    /// Rewrites the record
    provider: Box<dyn DnsProvider>,

    /// Managed hostname, trimmed
    hostname: String,
}

impl Dyn53Engine {
    /// Create a new engine
    ///
    /// # Parameters
    ///
    /// - `resolver`: DNS lookup implementation
    /// - `ip_source`: External address implementation
    /// - `provider`: DNS provider implementation
    /// - `hostname`: The name whose A record is managed
    pub fn new(
        resolver: Box<dyn HostResolver>,
        ip_source: Box<dyn IpSource>,
        provider: Box<dyn DnsProvider>,
        hostname: impl Into<String>,
    ) -> Result<Self> {
        let hostname = hostname.into().trim().to_string();
        if hostname.is_empty() {
            return Err(Error::config("Hostname cannot be empty"));
        }

        Ok(Self {
            resolver,
            ip_source,
            provider,
            hostname,
        })
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Compare the published address with the external one
    ///
    /// DNS is consulted first; the external service is only asked once
    /// the hostname has resolved.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ip))`: DNS is out of date, `ip` is the external address
    /// - `Ok(None)`: DNS already matches
    pub async fn check_ip(&self) -> Result<Option<Ipv4Addr>> {
        self.compare().await.map(|(published, external)| {
            (published != external).then_some(external)
        })
    }

    /// Resolve, fetch, and return `(published, external)`
    async fn compare(&self) -> Result<(Ipv4Addr, Ipv4Addr)> {
        let published = self.resolver.resolve_ipv4(&self.hostname).await?;
        debug!("DNS reports {} for {}", published, self.hostname);

        let external = self.ip_source.current().await?;
        debug!(
            "{} reports external address {}",
            self.ip_source.source_name(),
            external
        );

        Ok((published, external))
    }

    /// Point the A record at `new_ip`
    pub async fn update_dns_record(&self, new_ip: Ipv4Addr) -> Result<UpdateResult> {
        self.provider
            .update_record(&self.hostname, new_ip)
            .await
            .map_err(|e| match e {
                // Already descriptive; keep the message verbatim
                Error::NotFound(_) | Error::Provider { .. } => e,
                other => Error::provider(self.provider.provider_name(), other.to_string()),
            })
    }

    /// Run one check-and-update cycle
    pub async fn run_once(&self) -> Result<CycleOutcome> {
        let (published, external) = self.compare().await?;

        if published == external {
            info!("The IP address for {} did not change", self.hostname);
            return Ok(CycleOutcome::Unchanged {
                hostname: self.hostname.clone(),
                current_ip: published,
            });
        }

        info!(
            "IP change detected for {}: {} -> {}",
            self.hostname, published, external
        );

        let dry_run = match self.update_dns_record(external).await? {
            UpdateResult::Updated { .. } => false,
            UpdateResult::DryRun { .. } => true,
            // The record was already right; the resolver answered from a stale cache
            UpdateResult::Unchanged { current_ip } => {
                info!(
                    "Record for {} already holds {}, resolver answer was stale",
                    self.hostname, current_ip
                );
                return Ok(CycleOutcome::Unchanged {
                    hostname: self.hostname.clone(),
                    current_ip,
                });
            }
        };

        Ok(CycleOutcome::Updated {
            hostname: self.hostname.clone(),
            previous_ip: published,
            new_ip: external,
            dry_run,
        })
    }
}
