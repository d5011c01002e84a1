//! Hostname resolution via the system resolver configuration.

use std::net::IpAddr;
use std::time::Duration;

use hickory_resolver::TokioAsyncResolver;
use tracing::debug;

use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub resolves: bool,
    pub address: Option<IpAddr>,
}

impl Resolution {
    fn missing() -> Self {
        Self {
            resolves: false,
            address: None,
        }
    }

    fn found(address: IpAddr) -> Self {
        Self {
            resolves: true,
            address: Some(address),
        }
    }
}

/// Resolve a hostname to its first address. Failure of any kind - empty
/// hostname, resolver construction, lookup error, timeout - degrades to
/// does-not-resolve; nothing here reaches the caller as an error.
pub async fn resolve(hostname: &str, config: &AppConfig) -> Resolution {
    if hostname.is_empty() {
        return Resolution::missing();
    }

    // Dotted-quad hosts are already addresses.
    if let Ok(ip) = hostname.parse::<IpAddr>() {
        return Resolution::found(ip);
    }

    let resolver = match TokioAsyncResolver::tokio_from_system_conf() {
        Ok(resolver) => resolver,
        Err(e) => {
            debug!("system resolver unavailable: {}", e);
            return Resolution::missing();
        }
    };

    let timeout = Duration::from_secs(config.signals.dns_timeout_secs);
    match tokio::time::timeout(timeout, resolver.lookup_ip(hostname)).await {
        Ok(Ok(lookup)) => match lookup.iter().next() {
            Some(address) => {
                debug!("{} resolves to {}", hostname, address);
                Resolution::found(address)
            }
            None => Resolution::missing(),
        },
        Ok(Err(e)) => {
            debug!("lookup failed for {}: {}", hostname, e);
            Resolution::missing()
        }
        Err(_) => {
            debug!("lookup timed out for {}", hostname);
            Resolution::missing()
        }
    }
}
