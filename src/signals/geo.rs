//! IP geolocation via a free HTTP JSON API.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use super::UNKNOWN_COUNTRY;
use crate::config::AppConfig;

/// Country for a resolved address. Non-200 responses and failures of any
/// kind degrade to "Unknown".
pub async fn country(ip: &str, config: &AppConfig) -> String {
    if ip.is_empty() {
        return UNKNOWN_COUNTRY.to_string();
    }

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(config.signals.geo_timeout_secs))
        .user_agent(&config.http.user_agent)
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            debug!("failed to build geolocation client: {}", e);
            return UNKNOWN_COUNTRY.to_string();
        }
    };

    let url = format!("{}/{}", config.signals.geo_endpoint.trim_end_matches('/'), ip);
    let response = match client
        .get(&url)
        .query(&[("fields", "country")])
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            debug!("geolocation request failed for {}: {}", ip, e);
            return UNKNOWN_COUNTRY.to_string();
        }
    };

    if response.status() != reqwest::StatusCode::OK {
        debug!("geolocation returned {} for {}", response.status(), ip);
        return UNKNOWN_COUNTRY.to_string();
    }

    match response.json::<Value>().await {
        Ok(body) => body
            .get("country")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string()),
        Err(e) => {
            debug!("geolocation response unreadable for {}: {}", ip, e);
            UNKNOWN_COUNTRY.to_string()
        }
    }
}
