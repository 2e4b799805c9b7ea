//! Pre-flight connectivity check against the storefront's cart API.

use std::time::Duration;

use crate::address::ServerUrl;
use crate::error::ProvisionError;

/// Path probed on the resolved server.
pub const PROBE_PATH: &str = "/api/Cart";
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Issues a single bounded GET to confirm the described API is reachable.
/// No retries.
#[derive(Debug, Clone)]
pub struct ConnectivityProber {
    client: reqwest::Client,
    timeout: Duration,
}

impl ConnectivityProber {
    pub fn new() -> Self {
        Self::with_timeout(PROBE_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    pub async fn probe(&self, server_url: &ServerUrl) -> Result<(), ProvisionError> {
        let url = server_url.join(PROBE_PATH);
        tracing::info!("probing {} (timeout={:?})", url, self.timeout);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                let reason = if e.is_timeout() {
                    format!("timed out after {:?}", self.timeout)
                } else {
                    e.to_string()
                };
                tracing::error!("probe {} failed: {}", url, reason);
                ProvisionError::ProbeFailed {
                    url: url.clone(),
                    status: None,
                    reason,
                    body: String::new(),
                }
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::info!("probe {} ok (status={})", url, status.as_u16());
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        tracing::error!(
            "probe {} returned {} (body length={})",
            url,
            status.as_u16(),
            body.len()
        );
        Err(ProvisionError::ProbeFailed {
            url,
            status: Some(status.as_u16()),
            reason: status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string(),
            body,
        })
    }
}

impl Default for ConnectivityProber {
    fn default() -> Self {
        Self::new()
    }
}
