// # Route 53 Hosted Zone API
//
// This crate connects dyn53 to AWS Route 53.
//
// [`Route53Api`] implements [`HostedZoneApi`]; the zone walk, record
// matching and idempotency check live in `dyn53_core::zone::ZoneProvider`.
// [`route53_provider`] wires the two together.
//
// ## Behaviour
//
// - Static credentials from the properties file, never from the environment
// - Every list call follows pagination markers until the listing is complete
// - One `ChangeResourceRecordSets` call with a single UPSERT per update
// - No retry: the SDK retry layer is disabled, failures surface immediately
//
// ## Security Requirements
//
// - The access secret NEVER appears in logs or Debug output
//
// ## API Reference
//
// - ListHostedZonesByName: GET `/2013-04-01/hostedzonesbyname`
// - ListResourceRecordSets: GET `/2013-04-01/hostedzone/:id/rrset`
// - ChangeResourceRecordSets: POST `/2013-04-01/hostedzone/:id/rrset`

use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_route53::config::retry::RetryConfig;
use aws_sdk_route53::config::{BehaviorVersion, Region};
use aws_sdk_route53::error::DisplayErrorContext;
use aws_sdk_route53::types::{
    Change, ChangeAction, ChangeBatch, ResourceRecord, ResourceRecordSet, RrType,
};
use dyn53_core::config::Dyn53Config;
use dyn53_core::traits::{ARecordChange, HostedZone, HostedZoneApi, RecordSet, RecordType};
use dyn53_core::{Error, Result, ZoneProvider};

/// Provider name used in errors and logs
const PROVIDER: &str = "route53";

/// Name attached to the static credentials (shows up in SDK debug logs)
const CREDENTIALS_SOURCE: &str = "dyn53-properties";

/// Route 53 [`HostedZoneApi`] backed by the AWS SDK
#[derive(Clone)]
pub struct Route53Api {
    client: aws_sdk_route53::Client,
    region: String,
}

// Custom Debug implementation that hides the client (and with it the credentials)
impl std::fmt::Debug for Route53Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route53Api")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl Route53Api {
    /// Create a client from an access key pair
    ///
    /// # Security
    ///
    /// The secret will NEVER be logged or displayed in error messages.
    pub fn new(
        access_key: impl Into<String>,
        access_secret: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        let region: String = region.into();
        let credentials = Credentials::new(
            access_key.into(),
            access_secret.into(),
            None,
            None,
            CREDENTIALS_SOURCE,
        );

        let config = aws_sdk_route53::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region.clone()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled())
            .build();

        Self::from_client(aws_sdk_route53::Client::from_conf(config), region)
    }

    /// Wrap an already configured SDK client
    pub fn from_client(client: aws_sdk_route53::Client, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }

    /// Create a client from the loaded configuration
    pub fn from_config(config: &Dyn53Config) -> Self {
        Self::new(
            config.aws.access_key.clone(),
            config.aws.access_secret.clone(),
            config.region.clone(),
        )
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

/// Build a [`ZoneProvider`] over Route 53
///
/// With `dry_run` the record is located but never rewritten.
pub fn route53_provider(config: &Dyn53Config, dry_run: bool) -> ZoneProvider<Route53Api> {
    let api = Route53Api::from_config(config);
    if dry_run {
        tracing::warn!("Route 53 provider running in DRY-RUN mode - no changes will be made");
        ZoneProvider::new_dry_run(api)
    } else {
        ZoneProvider::new(api)
    }
}

fn sdk_error(action: &str, err: impl std::error::Error) -> Error {
    Error::provider(PROVIDER, format!("{action} failed: {}", DisplayErrorContext(err)))
}

/// Convert an SDK record set to the core model
fn record_set_from_sdk(rrs: &ResourceRecordSet) -> RecordSet {
    RecordSet {
        name: rrs.name().to_string(),
        record_type: RecordType::from_name(rrs.r#type().as_str()),
        ttl: rrs.ttl(),
        values: rrs
            .resource_records()
            .iter()
            .map(|rr| rr.value().to_string())
            .collect(),
        alias: rrs.alias_target().is_some(),
        set_identifier: rrs.set_identifier().map(str::to_string),
    }
}

/// Build the single-UPSERT change batch for an A record
fn change_batch(change: &ARecordChange) -> Result<ChangeBatch> {
    let build = |e: aws_sdk_route53::error::BuildError| {
        Error::provider(PROVIDER, format!("Invalid change request: {e}"))
    };

    let record = ResourceRecord::builder()
        .value(change.value.clone())
        .build()
        .map_err(build)?;

    let record_set = ResourceRecordSet::builder()
        .name(change.name.clone())
        .r#type(RrType::A)
        .ttl(change.ttl)
        .resource_records(record)
        .build()
        .map_err(build)?;

    let upsert = Change::builder()
        .action(ChangeAction::Upsert)
        .resource_record_set(record_set)
        .build()
        .map_err(build)?;

    ChangeBatch::builder()
        .comment(format!("dyn53: {} -> {}", change.name, change.value))
        .changes(upsert)
        .build()
        .map_err(build)
}

#[async_trait]
impl HostedZoneApi for Route53Api {
    async fn list_hosted_zones(&self) -> Result<Vec<HostedZone>> {
        let mut zones = Vec::new();
        let mut next_dns_name: Option<String> = None;
        let mut next_zone_id: Option<String> = None;

        loop {
            let page = self
                .client
                .list_hosted_zones_by_name()
                .set_dns_name(next_dns_name.take())
                .set_hosted_zone_id(next_zone_id.take())
                .send()
                .await
                .map_err(|e| sdk_error("ListHostedZonesByName", e))?;

            zones.extend(
                page.hosted_zones()
                    .iter()
                    .map(|z| HostedZone::new(z.id(), z.name())),
            );

            if !page.is_truncated() {
                break;
            }
            next_dns_name = page.next_dns_name().map(str::to_string);
            next_zone_id = page.next_hosted_zone_id().map(str::to_string);
            if next_dns_name.is_none() {
                break;
            }
        }

        tracing::debug!("Route 53 account has {} hosted zone(s)", zones.len());
        Ok(zones)
    }

    async fn list_record_sets(&self, zone_id: &str) -> Result<Vec<RecordSet>> {
        let mut records = Vec::new();
        let mut next_name: Option<String> = None;
        let mut next_type: Option<RrType> = None;
        let mut next_identifier: Option<String> = None;

        loop {
            let page = self
                .client
                .list_resource_record_sets()
                .hosted_zone_id(zone_id)
                .set_start_record_name(next_name.take())
                .set_start_record_type(next_type.take())
                .set_start_record_identifier(next_identifier.take())
                .send()
                .await
                .map_err(|e| sdk_error("ListResourceRecordSets", e))?;

            records.extend(page.resource_record_sets().iter().map(record_set_from_sdk));

            if !page.is_truncated() {
                break;
            }
            next_name = page.next_record_name().map(str::to_string);
            next_type = page.next_record_type().cloned();
            next_identifier = page.next_record_identifier().map(str::to_string);
            if next_name.is_none() {
                break;
            }
        }

        Ok(records)
    }

    async fn upsert_a_record(&self, zone_id: &str, change: &ARecordChange) -> Result<()> {
        let batch = change_batch(change)?;

        let output = self
            .client
            .change_resource_record_sets()
            .hosted_zone_id(zone_id)
            .change_batch(batch)
            .send()
            .await
            .map_err(|e| sdk_error("ChangeResourceRecordSets", e))?;

        tracing::info!(
            "Route 53 accepted UPSERT of {} in {}: {:?}",
            change.name,
            zone_id,
            output.change_info()
        );
        Ok(())
    }

    fn api_name(&self) -> &'static str {
        PROVIDER
    }
}
