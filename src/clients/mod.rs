pub mod backend;
pub mod identity;

use anyhow::{Result, anyhow};
use std::time::Duration;
use url::Url;

use crate::config::BackendConfig;
use crate::constants::http::USER_AGENT;

/// HTTP client shared by the backend and identity clients, with the fixed
/// connect/read/request timeouts from config.
pub fn build_http_client(config: &BackendConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .read_timeout(Duration::from_secs(config.read_timeout_seconds))
        .timeout(Duration::from_secs(config.request_timeout_seconds))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| anyhow!("Failed to build HTTP client: {e}"))
}

/// Parses a base address so that relative segments append to it.
pub fn parse_base_url(base: &str) -> Result<Url> {
    let mut base = base.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Url::parse(&base).map_err(|e| anyhow!("Invalid base URL '{base}': {e}"))
}

/// Appends percent-encoded path segments to `base`.
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| anyhow!("Base URL cannot carry a path: {base}"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
