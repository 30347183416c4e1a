//! Session cookie loading for ORCID requests.
//!
//! Some ORCID front-ends sit behind a load balancer that pins sessions with
//! cookies. Nothing is hardcoded: cookies are read from a user-supplied JSON
//! file (browser-export format) and turned into a `Cookie` header.

use crate::error::{OrcidError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default cookie file path: `~/.orcid_cookies.json`
fn default_cookie_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|p| p.join(".orcid_cookies.json"))
        .ok_or_else(|| OrcidError::Config("Cannot determine home directory".to_string()))
}

/// Cookie entry as exported by browser tooling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub domain: String,
}

/// Loads cookies from disk
pub struct CookieJar {
    path: PathBuf,
}

impl CookieJar {
    /// Jar backed by the default path
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: default_cookie_path()?,
        })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load cookies from file
    ///
    /// Returns empty vec if file doesn't exist or is invalid
    pub fn load(&self) -> Vec<Cookie> {
        if !self.path.exists() {
            debug!(path = ?self.path, "Cookie file not found");
            return Vec::new();
        }

        match std::fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<Vec<Cookie>>(&content) {
                Ok(cookies) => {
                    info!(count = cookies.len(), path = ?self.path, "Loaded cookies");
                    cookies
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse cookies");
                    Vec::new()
                }
            },
            Err(e) => {
                warn!(error = %e, "Failed to read cookie file");
                Vec::new()
            }
        }
    }

    /// `Cookie` header value for `host`, or `None` when no cookie applies
    pub fn header_for(&self, host: &str) -> Option<String> {
        build_cookie_header(&self.load(), host)
    }
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self {
            path: PathBuf::from(".orcid_cookies.json"),
        })
    }
}

/// Join the cookies whose domain matches `host` into a header value.
///
/// Cookies without a domain apply to every host.
pub fn build_cookie_header(cookies: &[Cookie], host: &str) -> Option<String> {
    let header = cookies
        .iter()
        .filter(|c| domain_matches(&c.domain, host))
        .map(|c| format!("{}={}", c.name, c.value))
        .collect::<Vec<_>>()
        .join("; ");

    (!header.is_empty()).then_some(header)
}

fn domain_matches(domain: &str, host: &str) -> bool {
    let domain = domain.trim_start_matches('.');
    domain.is_empty() || host == domain || host.ends_with(&format!(".{}", domain))
}
