//! ORCID works fetcher.
//!
//! Issues a single GET against the works endpoint and returns the decoded JSON.
//! There is no pagination and no retry: the endpoint is expected to return the
//! whole grouped work list in one response.

use crate::error::{OrcidError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE, REFERER, USER_AGENT};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Default client identity
pub const DEFAULT_USER_AGENT: &str = concat!("orcid-works/", env!("CARGO_PKG_VERSION"));

/// Request options for the works endpoint
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub user_agent: String,
    /// Raw `Cookie` header value
    pub cookie: Option<String>,
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cookie: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the ORCID works endpoint
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(url: &Url, options: &FetchOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .default_headers(build_headers(url, options)?)
            .timeout(options.timeout)
            .build()
            .map_err(|e| OrcidError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// GET `url` and decode the body as JSON.
    pub async fn fetch(&self, url: &Url) -> Result<serde_json::Value> {
        info!(url = %url, "Fetching ORCID works");

        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OrcidError::Api {
                code: status.as_u16(),
                message: format!("ORCID request failed: {}", status),
            });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Response received");

        Ok(serde_json::from_str(&body)?)
    }
}

/// Static header set sent with the request.
///
/// The referer is the endpoint itself, mirroring what the ORCID web UI sends.
pub fn build_headers(url: &Url, options: &FetchOptions) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, header_value(&options.user_agent)?);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, */*"));
    headers.insert(REFERER, header_value(url.as_str())?);

    if let Some(cookie) = options.cookie.as_deref().filter(|c| !c.is_empty()) {
        headers.insert(COOKIE, header_value(cookie)?);
    }

    Ok(headers)
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| OrcidError::Config(format!("Invalid header value '{}': {}", value, e)))
}
