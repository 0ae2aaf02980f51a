//! Core traits for dyn53
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`IpSource`]: Fetch the externally visible address
//! - [`HostResolver`]: Look up the address DNS currently publishes
//! - [`DnsProvider`]: Rewrite the A record
//! - [`HostedZoneApi`]: Narrow view of a DNS-hosting account

pub mod ip_source;
pub mod resolver;
pub mod dns_provider;
pub mod hosted_zone;

pub use ip_source::IpSource;
pub use resolver::HostResolver;
pub use dns_provider::{DnsProvider, UpdateResult};
pub use hosted_zone::{ARecordChange, HostedZone, HostedZoneApi, RecordSet, RecordType};
