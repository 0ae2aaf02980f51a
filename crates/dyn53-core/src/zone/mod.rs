//! Hosted-zone walk and A record update
//!
//! [`ZoneProvider`] turns any [`HostedZoneApi`] into a [`DnsProvider`]:
//!
//! 1. List every hosted zone in the account
//! 2. In zone order, list the zone's record sets and take the first `A`
//!    record whose name matches the hostname (case-insensitive, trailing
//!    dot optional)
//! 3. Stop walking as soon as a match is found
//! 4. UPSERT the record with its own name and TTL and a single value
//!
//! The record is left untouched when it already holds exactly the new
//! address, so repeated runs are no-ops.

use crate::error::{Error, Result};
use crate::traits::{
    ARecordChange, DnsProvider, HostedZone, HostedZoneApi, RecordSet, RecordType, UpdateResult,
};
use async_trait::async_trait;
use std::net::Ipv4Addr;
use tracing::{debug, info, warn};

/// A matching record and the zone it lives in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedRecord {
    pub zone: HostedZone,
    pub record: RecordSet,
}

/// Normalize a DNS name for comparison: trimmed, lower-case, no trailing dot
pub fn normalize_name(name: &str) -> String {
    let name = name.trim().to_ascii_lowercase();
    match name.strip_suffix('.') {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}

/// Whether `record` is the A record for the (normalized) `hostname`
fn is_matching_a_record(record: &RecordSet, hostname: &str) -> bool {
    record.record_type == RecordType::A && normalize_name(&record.name) == hostname
}

/// [`DnsProvider`] that searches every hosted zone for the A record
pub struct ZoneProvider<A> {
    api: A,
    dry_run: bool,
}

impl<A: HostedZoneApi> ZoneProvider<A> {
    /// Create a provider that writes changes
    pub fn new(api: A) -> Self {
        Self {
            api,
            dry_run: false,
        }
    }

    /// Create a provider that locates the record but never writes
    pub fn new_dry_run(api: A) -> Self {
        Self { api, dry_run: true }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Find the A record for `hostname`, walking zones in order
    ///
    /// Returns `Ok(None)` when no zone holds a matching record.
    pub async fn locate(&self, hostname: &str) -> Result<Option<LocatedRecord>> {
        let wanted = normalize_name(hostname);
        let zones = self.api.list_hosted_zones().await?;
        debug!("Searching {} hosted zone(s) for {}", zones.len(), wanted);

        for zone in zones {
            let records = self.api.list_record_sets(&zone.id).await?;
            debug!(
                "Zone {} ({}) has {} record set(s)",
                zone.name,
                zone.id,
                records.len()
            );

            if let Some(record) = records
                .into_iter()
                .find(|r| is_matching_a_record(r, &wanted))
            {
                debug!("Found A record {} in zone {}", record.name, zone.id);
                return Ok(Some(LocatedRecord { zone, record }));
            }
        }

        Ok(None)
    }

    /// Build the UPSERT for a located record, refusing records that are not
    /// a plain A record with literal values
    fn change_for(&self, located: &LocatedRecord, new_ip: Ipv4Addr) -> Result<ARecordChange> {
        let record = &located.record;

        if record.alias {
            return Err(Error::provider(
                self.api.api_name(),
                format!(
                    "{} in zone {} is an alias record and will not be rewritten",
                    record.name, located.zone.name
                ),
            ));
        }

        if let Some(id) = &record.set_identifier {
            return Err(Error::provider(
                self.api.api_name(),
                format!(
                    "{} in zone {} uses a routing policy (set identifier {}) and will not be rewritten",
                    record.name, located.zone.name, id
                ),
            ));
        }

        let ttl = record.ttl.ok_or_else(|| {
            Error::provider(
                self.api.api_name(),
                format!("{} in zone {} has no TTL", record.name, located.zone.name),
            )
        })?;

        Ok(ARecordChange {
            name: record.name.clone(),
            ttl,
            value: new_ip.to_string(),
        })
    }
}

/// The address a record currently holds, if it holds exactly one valid one
fn single_value(record: &RecordSet) -> Option<Ipv4Addr> {
    match record.values.as_slice() {
        [only] => crate::address::parse_ipv4(only).ok(),
        _ => None,
    }
}

#[async_trait]
impl<A: HostedZoneApi> DnsProvider for ZoneProvider<A> {
    async fn update_record(&self, hostname: &str, new_ip: Ipv4Addr) -> Result<UpdateResult> {
        let located = self.locate(hostname).await?.ok_or_else(|| {
            Error::not_found(format!(
                "A matching record for {} was not found.  Unable to update the IP address to {}",
                hostname.trim(),
                new_ip
            ))
        })?;

        let change = self.change_for(&located, new_ip)?;

        if single_value(&located.record) == Some(new_ip) {
            info!(
                "DNS record already has correct IP: {} -> {}",
                located.record.name, new_ip
            );
            return Ok(UpdateResult::Unchanged { current_ip: new_ip });
        }

        let previous_ip = located
            .record
            .values
            .iter()
            .find_map(|v| crate::address::parse_ipv4(v).ok());

        if self.dry_run {
            warn!(
                "[DRY-RUN] Would UPSERT {} A {} (ttl {}) in zone {}",
                change.name, change.value, change.ttl, located.zone.id
            );
            return Ok(UpdateResult::DryRun {
                previous_ip,
                new_ip,
            });
        }

        info!(
            "Updating DNS record: {} -> {} (was: {:?}) in zone {}",
            change.name, new_ip, located.record.values, located.zone.id
        );
        self.api.upsert_a_record(&located.zone.id, &change).await?;
        info!("DNS record updated successfully: {} -> {}", change.name, new_ip);

        Ok(UpdateResult::Updated {
            previous_ip,
            new_ip,
        })
    }

    fn provider_name(&self) -> &'static str {
        self.api.api_name()
    }
}
