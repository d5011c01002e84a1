//! External signal collectors.
//!
//! Each collector is independent and best-effort: one attempt, its own
//! timeout, and any failure degrades to that signal's unknown sentinel. No
//! collector error ever reaches the caller, and one failing signal never
//! blocks the others. The sentinels are first-class values rather than
//! caught errors, so "we do not know" is visible in the report.

use std::fmt;
use std::net::IpAddr;

use serde::Serialize;

use crate::config::AppConfig;

pub mod dns;
pub mod geo;
pub mod reputation;
pub mod tls;
pub mod whois_age;

/// Sentinel for the geolocation country field.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TlsStatus {
    Valid,
    Invalid,
    NoHostname,
}

impl fmt::Display for TlsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TlsStatus::Valid => write!(f, "valid"),
            TlsStatus::Invalid => write!(f, "invalid or absent"),
            TlsStatus::NoHostname => write!(f, "no hostname"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Reputation {
    Clean,
    Blacklisted,
    Unknown,
}

impl fmt::Display for Reputation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reputation::Clean => write!(f, "clean"),
            Reputation::Blacklisted => write!(f, "blacklisted"),
            Reputation::Unknown => write!(f, "unknown"),
        }
    }
}

/// Best-effort external facts about one hostname.
#[derive(Debug, Clone, Serialize)]
pub struct SignalReport {
    pub domain_resolves: bool,
    pub resolved_ip: Option<IpAddr>,
    pub tls: TlsStatus,
    /// Days since registration, clamped to non-negative; None when unknown.
    pub domain_age_days: Option<i64>,
    pub country: String,
    pub reputation: Reputation,
}

impl SignalReport {
    /// Neutral report for runs where collection is skipped entirely.
    /// `domain_resolves` stays true so the resolution override cannot fire
    /// on a check that never ran.
    pub fn skipped() -> Self {
        Self {
            domain_resolves: true,
            resolved_ip: None,
            tls: TlsStatus::NoHostname,
            domain_age_days: None,
            country: UNKNOWN_COUNTRY.to_string(),
            reputation: Reputation::Unknown,
        }
    }
}

/// Run every collector for one hostname. The collectors are mutually
/// independent and joined concurrently; geolocation needs the resolved
/// address, so it chains after resolution, but that chain still overlaps
/// the TLS, WHOIS and reputation lookups.
pub async fn collect(hostname: &str, config: &AppConfig) -> SignalReport {
    let dns_then_geo = async {
        let resolution = dns::resolve(hostname, config).await;
        let country = match resolution.address {
            Some(ip) => geo::country(&ip.to_string(), config).await,
            None => UNKNOWN_COUNTRY.to_string(),
        };
        (resolution, country)
    };

    let ((resolution, country), tls, domain_age_days, reputation) = tokio::join!(
        dns_then_geo,
        tls::check(hostname, config),
        whois_age::age_days(hostname, config),
        reputation::lookup(hostname, config),
    );

    SignalReport {
        domain_resolves: resolution.resolves,
        resolved_ip: resolution.address,
        tls,
        domain_age_days,
        country,
        reputation,
    }
}
