// # Host Resolver Trait
//
// Defines the interface for looking up the address DNS currently publishes
// for the managed hostname.
//
// ## Implementations
//
// - Operating system resolver: [`crate::resolver::SystemResolver`]

use async_trait::async_trait;
use std::net::Ipv4Addr;

/// Trait for DNS lookups of the managed hostname
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Resolve `hostname` to the first IPv4 address published for it
    ///
    /// # Returns
    ///
    /// - `Ok(Ipv4Addr)`: The published address
    /// - `Err(Error)`: If the name does not resolve or has no IPv4 address
    async fn resolve_ipv4(&self, hostname: &str) -> Result<Ipv4Addr, crate::Error>;
}
