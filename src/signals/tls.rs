//! TLS certificate presence check.

use std::time::Duration;

use tokio::net::TcpStream;
use tracing::debug;

use super::TlsStatus;
use crate::config::AppConfig;

/// Attempt a TLS handshake against the configured port with the hostname as
/// SNI, validated against the system trust store. A completed handshake
/// means a certificate was obtained; any failure, including refused
/// connections and timeouts, reports Invalid.
pub async fn check(hostname: &str, config: &AppConfig) -> TlsStatus {
    if hostname.is_empty() {
        return TlsStatus::NoHostname;
    }

    let timeout = Duration::from_secs(config.signals.tls_timeout_secs);
    match tokio::time::timeout(timeout, handshake(hostname, config.signals.tls_port)).await {
        Ok(Ok(())) => TlsStatus::Valid,
        Ok(Err(e)) => {
            debug!("TLS handshake failed for {}: {}", hostname, e);
            TlsStatus::Invalid
        }
        Err(_) => {
            debug!("TLS handshake timed out for {}", hostname);
            TlsStatus::Invalid
        }
    }
}

async fn handshake(hostname: &str, port: u16) -> anyhow::Result<()> {
    let connector = tokio_native_tls::TlsConnector::from(native_tls::TlsConnector::new()?);
    let stream = TcpStream::connect((hostname, port)).await?;
    let _tls = connector.connect(hostname, stream).await?;
    Ok(())
}
