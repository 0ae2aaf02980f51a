// # DNS Provider Trait
//
// Defines the interface for rewriting the managed A record.
//
// ## Implementations
//
// - Hosted-zone walk over any [`HostedZoneApi`](super::HostedZoneApi):
//   [`crate::zone::ZoneProvider`], backed by Route 53 in `dyn53-provider-route53`

use async_trait::async_trait;
use std::net::Ipv4Addr;

/// Result of a DNS update operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateResult {
    /// Record was rewritten
    Updated {
        /// The address the record held before (if it held a parseable one)
        previous_ip: Option<Ipv4Addr>,
        /// The new address
        new_ip: Ipv4Addr,
    },
    /// Record already had the correct address (no write was made)
    Unchanged {
        /// The current address
        current_ip: Ipv4Addr,
    },
    /// Record was located but the write was skipped (dry-run mode)
    DryRun {
        /// The address the record holds
        previous_ip: Option<Ipv4Addr>,
        /// The address that would have been written
        new_ip: Ipv4Addr,
    },
}

/// Trait for DNS provider implementations
///
/// # Idempotency
///
/// `update_record` must be safe to call repeatedly with the same address:
/// once the record holds `new_ip`, further calls make no changes.
///
/// # No Retry
///
/// Providers make each API call once. A failure is returned to the caller
/// and ends the cycle; the next scheduled run tries again.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Point the A record for `hostname` at `new_ip`
    ///
    /// # Parameters
    ///
    /// - `hostname`: The managed name (e.g., "home.example.com")
    /// - `new_ip`: The address to publish
    ///
    /// # Returns
    ///
    /// - `Ok(UpdateResult)`: The result of the update operation
    /// - `Err(Error)`: If no matching record exists or the update failed
    async fn update_record(
        &self,
        hostname: &str,
        new_ip: Ipv4Addr,
    ) -> Result<UpdateResult, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
