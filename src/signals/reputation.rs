//! Host reputation via a threat-intelligence host API.

use std::time::Duration;

use tracing::debug;

use super::Reputation;
use crate::config::AppConfig;

/// Look up a hostname in the configured reputation service. The API takes a
/// form-encoded POST with a `host` field; the response body is matched by
/// substring, which is deliberately crude and failure tolerant. A body that
/// carries a query status and says "no results" is Clean; a body that
/// carries a query status and says anything else is a listing; everything
/// else is Unknown.
pub async fn lookup(hostname: &str, config: &AppConfig) -> Reputation {
    if hostname.is_empty() {
        return Reputation::Unknown;
    }

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(config.signals.reputation_timeout_secs))
        .user_agent(&config.http.user_agent)
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            debug!("failed to build reputation client: {}", e);
            return Reputation::Unknown;
        }
    };

    let response = match client
        .post(&config.signals.reputation_endpoint)
        .form(&[("host", hostname)])
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            debug!("reputation request failed for {}: {}", hostname, e);
            return Reputation::Unknown;
        }
    };

    if response.status() != reqwest::StatusCode::OK {
        debug!("reputation returned {} for {}", response.status(), hostname);
        return Reputation::Unknown;
    }

    let body = match response.text().await {
        Ok(body) => body.to_lowercase(),
        Err(e) => {
            debug!("reputation response unreadable for {}: {}", hostname, e);
            return Reputation::Unknown;
        }
    };

    if !body.contains("query_status") {
        return Reputation::Unknown;
    }
    // The service reports misses as "no_results"; older deployments spelled
    // it with a space.
    if body.contains("no_results") || body.contains("no results") {
        Reputation::Clean
    } else {
        Reputation::Blacklisted
    }
}
