// # Hosted Zone API Trait
//
// The narrow slice of a DNS-hosting account that dyn53 needs: list the
// zones, list a zone's record sets, and UPSERT one A record.
//
// ## Implementations
//
// - AWS Route 53: `dyn53-provider-route53` crate
//
// Implementations hide pagination: each list call returns every item.

use async_trait::async_trait;
use std::fmt;

/// A hosted zone in the account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedZone {
    /// Provider zone ID (e.g., "/hostedzone/Z1D633PJN98FT9")
    pub id: String,
    /// Zone apex with trailing dot (e.g., "example.com.")
    pub name: String,
}

impl HostedZone {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// DNS record type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Ns,
    Soa,
    Txt,
    /// Any other type, by its wire name
    Other(String),
}

impl RecordType {
    /// Map a wire name ("A", "aaaa", "CNAME", ...) to a record type
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "A" => Self::A,
            "AAAA" => Self::Aaaa,
            "CNAME" => Self::Cname,
            "MX" => Self::Mx,
            "NS" => Self::Ns,
            "SOA" => Self::Soa,
            "TXT" => Self::Txt,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Soa => "SOA",
            Self::Txt => "TXT",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record set as listed by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    /// Record name as stored by the provider, usually with a trailing dot
    pub name: String,
    pub record_type: RecordType,
    /// TTL in seconds; absent for alias records
    pub ttl: Option<i64>,
    /// Record values (addresses for A records)
    pub values: Vec<String>,
    /// Whether this is an alias to another resource rather than literal values
    pub alias: bool,
    /// Set identifier of weighted/latency/failover/geo routing records
    pub set_identifier: Option<String>,
}

impl RecordSet {
    /// A plain record set with literal values
    pub fn simple(
        name: impl Into<String>,
        record_type: RecordType,
        ttl: i64,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            ttl: Some(ttl),
            values: values.into_iter().map(Into::into).collect(),
            alias: false,
            set_identifier: None,
        }
    }
}

/// A single-value A record UPSERT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ARecordChange {
    /// Record name, exactly as the provider stores it
    pub name: String,
    /// TTL carried over from the existing record
    pub ttl: i64,
    /// The new address, dotted quad
    pub value: String,
}

/// Trait for DNS-hosting account access
#[async_trait]
pub trait HostedZoneApi: Send + Sync {
    /// List every hosted zone in the account, in the provider's order
    async fn list_hosted_zones(&self) -> Result<Vec<HostedZone>, crate::Error>;

    /// List every record set in a zone, in the provider's order
    async fn list_record_sets(&self, zone_id: &str) -> Result<Vec<RecordSet>, crate::Error>;

    /// Create or replace an A record in a zone
    async fn upsert_a_record(
        &self,
        zone_id: &str,
        change: &ARecordChange,
    ) -> Result<(), crate::Error>;

    /// Get the API name (for logging/debugging)
    fn api_name(&self) -> &'static str;
}
