//! Domain age via WHOIS registration lookup.

use std::time::Duration;

use anyhow::anyhow;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use whois_rust::{WhoIs, WhoIsLookupOptions};

use crate::config::AppConfig;

/// Registries label the registration date in several ways; the first
/// matching line wins (some registries repeat it per nameserver).
static CREATION_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(?:creation date|created(?: on)?|registered(?: on)?|registration time|domain record activated)[ \t]*:[ \t]*(\S.*)$",
    )
    .unwrap()
});

/// Minimal TLD-to-server map; the empty key is the IANA fallback used for
/// everything else.
const SERVER_MAP: &str = r#"{
    "com": "whois.verisign-grs.com",
    "net": "whois.verisign-grs.com",
    "org": "whois.pir.org",
    "io": "whois.nic.io",
    "": "whois.iana.org"
}"#;

/// Days since domain registration, clamped to non-negative. Any failure -
/// client construction, lookup, timeout, missing or unparseable creation
/// date - degrades to None.
pub async fn age_days(hostname: &str, config: &AppConfig) -> Option<i64> {
    if hostname.is_empty() {
        return None;
    }

    let timeout = Duration::from_secs(config.signals.whois_timeout_secs);
    let raw = match tokio::time::timeout(timeout, lookup(hostname.to_string())).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(_) => {
            debug!("WHOIS lookup timed out for {}", hostname);
            return None;
        }
    };

    age_from_record(&raw, Utc::now())
}

async fn lookup(hostname: String) -> Option<String> {
    // whois-rust performs blocking socket I/O.
    let handle = tokio::task::spawn_blocking(move || -> anyhow::Result<String> {
        let client = WhoIs::from_string(SERVER_MAP)
            .map_err(|e| anyhow!("Failed to create WHOIS client: {}", e))?;
        let options = WhoIsLookupOptions::from_string(hostname.as_str())
            .map_err(|e| anyhow!("Invalid domain for WHOIS lookup: {}", e))?;
        client
            .lookup(options)
            .map_err(|e| anyhow!("WHOIS lookup failed: {}", e))
    });

    match handle.await {
        Ok(Ok(raw)) => Some(raw),
        Ok(Err(e)) => {
            debug!("{}", e);
            None
        }
        Err(e) => {
            debug!("WHOIS lookup task panicked: {}", e);
            None
        }
    }
}

fn age_from_record(raw: &str, now: DateTime<Utc>) -> Option<i64> {
    let captures = CREATION_LINE_REGEX.captures(raw)?;
    let value = captures.get(1)?.as_str().trim();
    let created = parse_creation_date(value)?;
    Some((now - created).num_days().max(0))
}

fn parse_creation_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y.%m.%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc());
        }
    }
    for format in ["%Y-%m-%d", "%d-%b-%Y", "%Y.%m.%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    None
}
