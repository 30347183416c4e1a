//! Flattening of ORCID's grouped works JSON.
//!
//! The works endpoint returns `{groups: [{works: [...]}, ...]}` where every work
//! is a deeply nested object. Each work becomes one [`CleanedWork`]; nothing is
//! filtered or deduplicated. Missing fields fall back to defaults through the
//! [`Lookup`] accessor instead of failing. An unreadable external identifier
//! is reported as a `warn!` log event (stderr) and the work keeps a blank link.

use crate::error::IdentifierError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Fallback for a missing work type
pub const UNKNOWN_TYPE: &str = "unknown";
/// Fallback for a missing title
pub const NO_TITLE: &str = "No title available";
/// Placeholder author list entry when no contributor has a credit name
pub const NO_AUTHORS: &str = "No authors listed";

/// One flattened ORCID work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedWork {
    #[serde(rename = "type")]
    pub work_type: String,
    pub title: String,
    /// Link from the last external identifier, if any
    pub access_url: Option<String>,
    /// `YYYY[-MM[-DD]]`
    pub publication_date: Option<String>,
    pub created_date: Option<String>,
    pub last_modified: Option<String>,
    /// Never empty
    pub authors: Vec<String>,
    pub journal: String,
    pub put_code: String,
    pub source: String,
}

/// Get-or-default access into untyped JSON.
///
/// Paths walk object keys; any non-object along the way reads as missing.
pub trait Lookup {
    fn at(&self, path: &[&str]) -> Option<&Value>;

    /// Scalar at `path` as text. Strings are returned as-is and numbers in
    /// decimal; everything else counts as missing.
    fn str_at(&self, path: &[&str]) -> Option<String> {
        self.at(path).and_then(scalar_text)
    }

    fn str_or(&self, path: &[&str], default: &str) -> String {
        self.str_at(path).unwrap_or_else(|| default.to_string())
    }

    /// Array at `path`, empty when missing or not an array
    fn list_at(&self, path: &[&str]) -> &[Value] {
        self.at(path)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Lookup for Value {
    fn at(&self, path: &[&str]) -> Option<&Value> {
        path.iter()
            .try_fold(self, |node, key| node.get(key))
            .filter(|v| !v.is_null())
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_blank(s: String) -> Option<String> {
    (!s.trim().is_empty()).then_some(s)
}

/// Flatten every work of every group.
pub fn clean_works(root: &Value) -> Vec<CleanedWork> {
    let groups = root.list_at(&["groups"]);
    let works: Vec<CleanedWork> = groups
        .iter()
        .flat_map(|group| group.list_at(&["works"]))
        .map(clean_work)
        .collect();

    info!(groups = groups.len(), works = works.len(), "Normalized works");
    works
}

/// Flatten a single work.
pub fn clean_work(work: &Value) -> CleanedWork {
    let access_url = extract_access_url(work).unwrap_or_else(|e| {
        warn!(error = %e, "Could not read access URL, leaving it blank");
        None
    });

    CleanedWork {
        work_type: work.str_or(&["workType", "value"], UNKNOWN_TYPE),
        title: work.str_or(&["title", "value"], NO_TITLE),
        access_url,
        publication_date: format_date(work.at(&["publicationDate"])),
        created_date: format_date(work.at(&["createdDate"])),
        last_modified: format_date(work.at(&["lastModified"])),
        authors: extract_authors(work),
        journal: work.str_or(&["journalTitle", "value"], ""),
        put_code: work.str_or(&["putCode", "value"], ""),
        source: work.str_or(&["sourceName"], ""),
    }
}

/// Link of the work's last external identifier.
///
/// Prefers the normalized URL and falls back to the plain URL; blank values
/// count as absent. An entry (or link member) that is not an object is an
/// error so the caller can report it.
pub fn extract_access_url(work: &Value) -> Result<Option<String>, IdentifierError> {
    let Some(last) = work.list_at(&["workExternalIdentifiers"]).last() else {
        return Ok(None);
    };
    if !last.is_object() {
        return Err(IdentifierError(last.to_string()));
    }

    let link = |key: &str| -> Result<Option<String>, IdentifierError> {
        match last.at(&[key]) {
            None => Ok(None),
            Some(member) if member.is_object() => Ok(member.str_at(&["value"]).and_then(non_blank)),
            Some(_) => Err(IdentifierError(last.to_string())),
        }
    };

    match link("normalizedUrl")? {
        Some(url) => Ok(Some(url)),
        None => link("url"),
    }
}

/// Render an ORCID `{year, month, day}` object as `YYYY[-MM[-DD]]`.
///
/// Returns `None` without a year. Month and day are independently optional and
/// zero-padded to two digits.
pub fn format_date(date: Option<&Value>) -> Option<String> {
    let date = date?;
    let part = |key: &str| date.str_at(&[key]).and_then(non_blank);

    let year = part("year").filter(|y| y.trim() != "0")?;
    let mut formatted = year.trim().to_string();
    for key in ["month", "day"] {
        if let Some(value) = part(key) {
            formatted.push_str(&format!("-{:0>2}", value.trim()));
        }
    }

    Some(formatted)
}

/// Credit names of the contributors, in order.
pub fn extract_authors(work: &Value) -> Vec<String> {
    let authors: Vec<String> = work
        .list_at(&["contributorsGroupedByOrcid"])
        .iter()
        .filter_map(|contributor| contributor.str_at(&["creditName", "content"]))
        .collect();

    if authors.is_empty() {
        debug!("No credit names found");
        vec![NO_AUTHORS.to_string()]
    } else {
        authors
    }
}
