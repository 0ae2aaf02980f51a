//! Test doubles and common utilities for contract tests
//!
//! This module provides minimal test doubles with call counters so tests
//! can assert which collaborators were consulted, and in what order.

#![allow(dead_code)]

use dyn53_core::error::{Error, Result};
use dyn53_core::traits::{
    ARecordChange, DnsProvider, HostResolver, HostedZone, HostedZoneApi, IpSource, RecordSet,
    UpdateResult,
};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A resolver that always answers with the same address (or fails)
pub struct StaticResolver {
    answer: std::result::Result<Ipv4Addr, String>,
    call_count: Arc<AtomicUsize>,
}

impl StaticResolver {
    pub fn new(ip: Ipv4Addr) -> Self {
        Self {
            answer: Ok(ip),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            answer: Err(message.to_string()),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            answer: other.answer.clone(),
            call_count: Arc::clone(&other.call_count),
        }
    }
}

#[async_trait::async_trait]
impl HostResolver for StaticResolver {
    async fn resolve_ipv4(&self, _hostname: &str) -> Result<Ipv4Addr> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.answer.clone().map_err(|m| Error::resolver(m))
    }
}

/// An external address source that always answers with the same address (or fails)
pub struct StaticIpSource {
    answer: std::result::Result<Ipv4Addr, String>,
    call_count: Arc<AtomicUsize>,
}

impl StaticIpSource {
    pub fn new(ip: Ipv4Addr) -> Self {
        Self {
            answer: Ok(ip),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            answer: Err(message.to_string()),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            answer: other.answer.clone(),
            call_count: Arc::clone(&other.call_count),
        }
    }
}

#[async_trait::async_trait]
impl IpSource for StaticIpSource {
    async fn current(&self) -> Result<Ipv4Addr> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.answer.clone().map_err(|m| Error::ip_source(m))
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

/// A mock DnsProvider that records every update call
pub struct MockDnsProvider {
    updated: Arc<Mutex<Vec<(String, Ipv4Addr)>>>,
    result: fn(Ipv4Addr) -> Result<UpdateResult>,
}

impl MockDnsProvider {
    /// A provider whose updates always succeed
    pub fn new() -> Self {
        Self::with_result(|new_ip| {
            Ok(UpdateResult::Updated {
                previous_ip: None,
                new_ip,
            })
        })
    }

    pub fn with_result(result: fn(Ipv4Addr) -> Result<UpdateResult>) -> Self {
        Self {
            updated: Arc::new(Mutex::new(Vec::new())),
            result,
        }
    }

    pub fn update_call_count(&self) -> usize {
        self.updated.lock().unwrap().len()
    }

    pub fn updates(&self) -> Vec<(String, Ipv4Addr)> {
        self.updated.lock().unwrap().clone()
    }

    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            updated: Arc::clone(&other.updated),
            result: other.result,
        }
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn update_record(&self, hostname: &str, new_ip: Ipv4Addr) -> Result<UpdateResult> {
        self.updated
            .lock()
            .unwrap()
            .push((hostname.to_string(), new_ip));
        (self.result)(new_ip)
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// An in-memory hosted-zone account
///
/// Zones are listed in insertion order; every call is recorded.
#[derive(Clone, Default)]
pub struct MockZoneApi {
    zones: Vec<HostedZone>,
    records: HashMap<String, Vec<RecordSet>>,
    fail_upsert: bool,
    zone_list_calls: Arc<AtomicUsize>,
    record_list_calls: Arc<Mutex<Vec<String>>>,
    upserts: Arc<Mutex<Vec<(String, ARecordChange)>>>,
}

impl MockZoneApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a zone and its record sets
    pub fn with_zone(mut self, id: &str, name: &str, records: Vec<RecordSet>) -> Self {
        self.zones.push(HostedZone::new(id, name));
        self.records.insert(id.to_string(), records);
        self
    }

    /// Make every UPSERT fail
    pub fn failing_upserts(mut self) -> Self {
        self.fail_upsert = true;
        self
    }

    pub fn zone_list_calls(&self) -> usize {
        self.zone_list_calls.load(Ordering::SeqCst)
    }

    /// Zone IDs whose record sets were listed, in order
    pub fn record_list_calls(&self) -> Vec<String> {
        self.record_list_calls.lock().unwrap().clone()
    }

    /// UPSERTs submitted, as (zone ID, change)
    pub fn upserts(&self) -> Vec<(String, ARecordChange)> {
        self.upserts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HostedZoneApi for MockZoneApi {
    async fn list_hosted_zones(&self) -> Result<Vec<HostedZone>> {
        self.zone_list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.zones.clone())
    }

    async fn list_record_sets(&self, zone_id: &str) -> Result<Vec<RecordSet>> {
        self.record_list_calls
            .lock()
            .unwrap()
            .push(zone_id.to_string());
        self.records
            .get(zone_id)
            .cloned()
            .ok_or_else(|| Error::provider("mock", format!("No such hosted zone: {zone_id}")))
    }

    async fn upsert_a_record(&self, zone_id: &str, change: &ARecordChange) -> Result<()> {
        if self.fail_upsert {
            return Err(Error::provider("mock", "InvalidChangeBatch"));
        }
        self.upserts
            .lock()
            .unwrap()
            .push((zone_id.to_string(), change.clone()));
        Ok(())
    }

    fn api_name(&self) -> &'static str {
        "mock"
    }
}

pub fn ip(a: u8, b: u8, c: u8, d: u8) -> Ipv4Addr {
    Ipv4Addr::new(a, b, c, d)
}
