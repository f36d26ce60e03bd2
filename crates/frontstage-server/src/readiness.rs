//! Readiness probing for the embedded server.
//!
//! Polls the bound port over HTTP until it answers. Any HTTP response
//! counts as ready — a freshly mounted content root may well 404 on `/`.

use anyhow::Result;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Interval between readiness probes.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Probe the server once.
///
/// Returns whether an HTTP response came back, regardless of status.
pub async fn check_http_ready(port: u16) -> Result<bool> {
    let url = format!("http://127.0.0.1:{port}/");
    let client = Client::builder().timeout(Duration::from_secs(2)).build()?;

    Ok(client.get(&url).send().await.is_ok())
}

/// Wait until the server on `port` answers HTTP requests.
///
/// Polls every 100ms up to `timeout_secs`. The server is in-process, so
/// this normally succeeds on the first attempt; the timeout guards
/// against a serve task that died right after spawning.
pub async fn wait_for_http_ready(port: u16, timeout_secs: u64) -> Result<()> {
    let url = format!("http://127.0.0.1:{port}/");
    let client = Client::builder().timeout(Duration::from_secs(2)).build()?;

    let max_attempts = timeout_secs * 10;
    let mut attempt = 0;

    loop {
        attempt += 1;

        match client.get(&url).send().await {
            Ok(response) => {
                debug!(port = %port, status = %response.status(), "Server is answering");
                return Ok(());
            }
            Err(e) => {
                debug!(port = %port, error = %e, "Readiness probe failed, retrying");
            }
        }

        if attempt >= max_attempts {
            return Err(anyhow::anyhow!(
                "Server on port {port} did not answer within {timeout_secs}s"
            ));
        }

        sleep(POLL_INTERVAL).await;
    }
}
