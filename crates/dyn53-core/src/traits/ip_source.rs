// # IP Source Trait
//
// Defines the interface for discovering the externally visible IPv4 address
// of the host.
//
// ## Implementations
//
// - HTTP service (api.ipify.org by default): `dyn53-ip-http` crate

use async_trait::async_trait;
use std::net::Ipv4Addr;

/// Trait for external address sources
///
/// One call is one lookup. Implementations do not retry and do not cache
/// between calls; a failed lookup ends the cycle.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Get the externally visible IPv4 address
    ///
    /// # Returns
    ///
    /// - `Ok(Ipv4Addr)`: The address as seen from outside
    /// - `Err(Error)`: If the lookup failed or the answer was not a valid IPv4 address
    async fn current(&self) -> Result<Ipv4Addr, crate::Error>;

    /// Get the source name (for logging/debugging)
    fn source_name(&self) -> &'static str;
}
