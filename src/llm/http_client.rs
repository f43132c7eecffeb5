use crate::error::LlmError;
use reqwest::Client;
use std::time::Duration;

/// Shared HTTP client. `timeout_secs` bounds each read, so a stalled
/// connection fails while a reply that keeps streaming is left alone.
pub fn build_http_client(timeout_secs: u64) -> Result<Client, LlmError> {
    Client::builder()
        .read_timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .map_err(|e| LlmError::Request(format!("failed to build HTTP client: {e}")))
}
