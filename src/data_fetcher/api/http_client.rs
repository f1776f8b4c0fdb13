//! HTTP client creation and configuration utilities

use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, ORIGIN, REFERER};
use std::time::Duration;

use crate::constants::DEFAULT_API_DOMAIN;

/// Creates an HTTP client that presents itself like a desktop Chrome tab
/// opening the API URL directly: browser user agent, document accept types,
/// and the site itself as referer and origin.
///
/// # Arguments
/// * `timeout_seconds` - Overall request timeout
/// * `user_agent` - User agent string to send
pub fn create_http_client_with_timeout(
    timeout_seconds: u64,
    user_agent: &str,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(crate::constants::HTTP_POOL_MAX_IDLE_PER_HOST)
        .user_agent(user_agent)
        .default_headers(browser_headers())
        .build()
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,application/json;q=0.8,*/*;q=0.7",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(REFERER, HeaderValue::from_static("https://www.sofascore.com/"));
    headers.insert(ORIGIN, HeaderValue::from_static(DEFAULT_API_DOMAIN));
    headers
}
