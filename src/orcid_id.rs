//! ORCID iD parsing and endpoint construction.
//!
//! An ORCID iD is 16 characters in four hyphenated blocks; the last character
//! is an ISO 7064 MOD 11-2 check digit (`0`-`9` or `X`).

use crate::error::{OrcidError, Result};
use regex::Regex;
use std::fmt;
use url::Url;

/// ORCID web base URL
const ORCID_BASE_URL: &str = "https://orcid.org";

/// Number of works requested in the single page we fetch
const PAGE_SIZE: &str = "100";

/// A validated ORCID iD in canonical `XXXX-XXXX-XXXX-XXXX` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrcidId(String);

impl OrcidId {
    /// Parse an iD, accepting a bare iD or an `orcid.org` profile URL.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let bare = ["https://orcid.org/", "http://orcid.org/", "orcid.org/"]
            .iter()
            .find_map(|prefix| trimmed.strip_prefix(prefix))
            .unwrap_or(trimmed)
            .trim_end_matches('/')
            .to_uppercase();

        let re = Regex::new(r"^\d{4}-\d{4}-\d{4}-\d{3}[\dX]$")
            .map_err(|e| OrcidError::Config(format!("Invalid iD pattern: {}", e)))?;
        if !re.is_match(&bare) {
            return Err(OrcidError::InvalidOrcid(input.to_string()));
        }

        let digits: Vec<char> = bare.chars().filter(|c| *c != '-').collect();
        let (body, check) = digits.split_at(15);
        if checksum(body) != Some(check[0]) {
            return Err(OrcidError::InvalidOrcid(input.to_string()));
        }

        Ok(Self(bare))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// JSON endpoint listing this profile's grouped works.
    pub fn works_url(&self) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/{}/worksPage.json", ORCID_BASE_URL, self.0))
            .map_err(|e| OrcidError::Config(format!("Invalid works URL: {}", e)))?;

        url.query_pairs_mut()
            .append_pair("offset", "0")
            .append_pair("sort", "date")
            .append_pair("sortAsc", "false")
            .append_pair("pageSize", PAGE_SIZE);

        Ok(url)
    }
}

impl fmt::Display for OrcidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ISO 7064 MOD 11-2 check character over the first 15 digits.
fn checksum(body: &[char]) -> Option<char> {
    let mut total: u32 = 0;
    for c in body {
        total = (total + c.to_digit(10)?) * 2;
    }
    match (12 - total % 11) % 11 {
        10 => Some('X'),
        n => char::from_digit(n, 10),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() -> Result<()> {
        assert_eq!(OrcidId::parse("0000-0002-1825-0097")?.as_str(), "0000-0002-1825-0097");
        assert_eq!(OrcidId::parse("0000-0002-9079-593x")?.as_str(), "0000-0002-9079-593X");
        assert_eq!(
            OrcidId::parse("https://orcid.org/0000-0002-1825-0097/")?.as_str(),
            "0000-0002-1825-0097"
        );
        Ok(())
    }

    #[test]
    fn test_parse_rejects_bad_check_digit() {
        assert!(matches!(
            OrcidId::parse("0000-0002-1825-0098"),
            Err(OrcidError::InvalidOrcid(_))
        ));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(OrcidId::parse("").is_err());
        assert!(OrcidId::parse("0000-0002-1825").is_err());
        assert!(OrcidId::parse("0000000218250097").is_err());
    }

    #[test]
    fn test_display_is_canonical() -> Result<()> {
        let id = OrcidId::parse("orcid.org/0000-0002-9079-593x")?;
        assert_eq!(id.to_string(), "0000-0002-9079-593X");
        Ok(())
    }

    #[test]
    fn test_works_url() -> Result<()> {
        let url = OrcidId::parse("0000-0002-1825-0097")?.works_url()?;
        assert_eq!(url.host_str(), Some("orcid.org"));
        assert_eq!(url.path(), "/0000-0002-1825-0097/worksPage.json");
        assert!(url.as_str().contains("pageSize=100"));
        Ok(())
    }
}
