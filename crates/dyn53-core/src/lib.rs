// # dyn53-core
//
// Core library for the dyn53 dynamic DNS updater.
//
// ## Architecture Overview
//
// One run compares the address DNS publishes for a hostname with the
// address the host is seen from on the internet, and rewrites the A record
// when they differ:
// - **HostResolver**: Trait for looking up the published address
// - **IpSource**: Trait for fetching the external address
// - **DnsProvider**: Trait for rewriting the A record
// - **HostedZoneApi**: Trait for the DNS-hosting account (zones and record sets)
// - **ZoneProvider**: DnsProvider that walks every hosted zone for the record
// - **Dyn53Engine**: Runs one check-and-update cycle
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from implementations
// 2. **One-Shot**: A run is one cycle; scheduling belongs to cron/systemd timers
// 3. **No Retry**: Failures end the run and surface to the caller
// 4. **Idempotency**: A record that already holds the address is never rewritten

pub mod address;
pub mod config;
pub mod engine;
pub mod error;
pub mod resolver;
pub mod traits;
pub mod zone;

// Re-export core types for convenience
pub use traits::{DnsProvider, HostResolver, HostedZoneApi, IpSource, UpdateResult};
pub use engine::{CycleOutcome, Dyn53Engine};
pub use config::{Dyn53Config, IpServiceConfig, IpServiceFormat};
pub use error::{Error, Result};
pub use resolver::SystemResolver;
pub use zone::ZoneProvider;
