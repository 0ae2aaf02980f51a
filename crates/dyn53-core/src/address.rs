//! Strict IPv4 address validation
//!
//! Both the DNS-reported and the externally reported address must be a
//! plain dotted quad: four decimal octets in `0..=255`, no leading zeros,
//! no signs and nothing else between the dots. Anything looser is rejected
//! before addresses are compared, so a malformed service response can
//! never be written into DNS.

use crate::error::{Error, Result};
use std::net::Ipv4Addr;

/// Parse `text` as a strict dotted-quad IPv4 address
///
/// Surrounding ASCII whitespace is ignored.
///
/// # Example
///
/// ```
/// use dyn53_core::address::parse_ipv4;
///
/// assert!(parse_ipv4("203.0.113.7").is_ok());
/// assert!(parse_ipv4("203.0.113.07").is_err());
/// ```
pub fn parse_ipv4(text: &str) -> Result<Ipv4Addr> {
    let trimmed = text.trim_matches(|c: char| c.is_ascii_whitespace());
    parse_octets(trimmed)
        .map(Ipv4Addr::from)
        .ok_or_else(|| Error::invalid_address(format!("not a valid IPv4 address: {trimmed}")))
}

fn parse_octets(text: &str) -> Option<[u8; 4]> {
    let mut octets = [0u8; 4];
    let mut parts = text.split('.');

    for slot in octets.iter_mut() {
        *slot = parse_octet(parts.next()?)?;
    }

    if parts.next().is_some() {
        return None;
    }

    Some(octets)
}

fn parse_octet(part: &str) -> Option<u8> {
    if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // "0" is fine, "00" and "07" are not
    if part.len() > 1 && part.starts_with('0') {
        return None;
    }
    part.parse::<u16>().ok().and_then(|n| u8::try_from(n).ok())
}
