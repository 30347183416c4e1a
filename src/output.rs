//! Output writers: CSV, JSON and console summaries.

use crate::error::Result;
use crate::normalize::CleanedWork;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{error, info, warn};

/// Default CSV destination, relative to the working directory
pub const DEFAULT_CSV_PATH: &str = "data/orcid_works_cleaned.csv";

/// Default number of records shown by [`format_sample`]
pub const DEFAULT_SAMPLE_SIZE: usize = 3;

/// Authors shown per record in the console sample
const SAMPLE_AUTHORS: usize = 3;

/// CSV column order
pub const CSV_COLUMNS: &[&str] = &[
    "type", "title", "access_url", "publication_date", "created_date",
    "last_modified", "authors", "journal", "put_code", "source",
];

/// CSV representation of a [`CleanedWork`]; authors collapse into one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvRow {
    #[serde(rename = "type")]
    pub work_type: String,
    pub title: String,
    pub access_url: Option<String>,
    pub publication_date: Option<String>,
    pub created_date: Option<String>,
    pub last_modified: Option<String>,
    pub authors: String,
    pub journal: String,
    pub put_code: String,
    pub source: String,
}

impl From<&CleanedWork> for CsvRow {
    fn from(work: &CleanedWork) -> Self {
        Self {
            work_type: work.work_type.clone(),
            title: work.title.clone(),
            access_url: work.access_url.clone(),
            publication_date: work.publication_date.clone(),
            created_date: work.created_date.clone(),
            last_modified: work.last_modified.clone(),
            authors: work.authors.join(", "),
            journal: work.journal.clone(),
            put_code: work.put_code.clone(),
            source: work.source.clone(),
        }
    }
}

/// What [`save_csv`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Rows written
    Written(usize),
    /// Nothing to write; no file was touched
    Empty,
    /// The write failed; the error has already been logged
    Failed(String),
}

/// Write works to CSV.
///
/// Failures are logged and reported through the outcome, never returned as errors.
pub fn save_csv(path: &Path, works: &[CleanedWork]) -> WriteOutcome {
    if works.is_empty() {
        warn!(path = ?path, "No data to save");
        return WriteOutcome::Empty;
    }

    match write_csv(path, works) {
        Ok(rows) => {
            info!(path = ?path, rows = rows, "Saved CSV");
            WriteOutcome::Written(rows)
        }
        Err(e) => {
            error!(path = ?path, error = %e, "Failed to save CSV");
            WriteOutcome::Failed(e.to_string())
        }
    }
}

fn write_csv(path: &Path, works: &[CleanedWork]) -> Result<usize> {
    ensure_parent(path)?;

    let mut wtr = csv::WriterBuilder::new().has_headers(true).from_path(path)?;
    for work in works {
        wtr.serialize(CsvRow::from(work))?;
    }
    wtr.flush()?;

    Ok(works.len())
}

/// Read back a CSV written by [`save_csv`].
pub fn read_csv(path: &Path) -> Result<Vec<CsvRow>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let rows = rdr.deserialize().collect::<std::result::Result<Vec<CsvRow>, _>>()?;
    Ok(rows)
}

/// Write works as indented JSON, keeping non-ASCII text unescaped.
pub fn save_json(path: &Path, works: &[CleanedWork]) -> Result<()> {
    ensure_parent(path)?;

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, works)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!(path = ?path, works = works.len(), "Saved JSON");
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Human-readable preview of the first `size` works.
pub fn format_sample(works: &[CleanedWork], size: usize) -> String {
    let mut out = format!("===== First {} cleaned works =====\n", size);

    for (i, work) in works.iter().take(size).enumerate() {
        let shown = work
            .authors
            .iter()
            .take(SAMPLE_AUTHORS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        let _ = writeln!(out, "#{}: {} ({})", i + 1, work.title, work.work_type);
        let _ = writeln!(out, "    URL: {}", or_na(&work.access_url));
        let _ = writeln!(out, "    Published: {}", or_na(&work.publication_date));
        let _ = writeln!(out, "    Last modified: {}", or_na(&work.last_modified));
        let _ = writeln!(out, "    Authors: {} ({} total)\n", shown, work.authors.len());
    }

    out
}

/// One `count: journal` line per entry.
pub fn format_journal_summary(stats: &[(String, usize)]) -> String {
    stats
        .iter()
        .map(|(journal, count)| format!("{}: {}\n", count, journal))
        .collect()
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("n/a")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn work(title: &str, authors: &[&str]) -> CleanedWork {
        CleanedWork {
            work_type: "journal-article".to_string(),
            title: title.to_string(),
            access_url: Some("https://doi.org/10.1234/abc".to_string()),
            publication_date: Some("2021-07".to_string()),
            created_date: None,
            last_modified: Some("2022-01-09".to_string()),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            journal: "Géotechnique".to_string(),
            put_code: "123456".to_string(),
            source: "Crossref".to_string(),
        }
    }

    #[test]
    fn test_csv_round_trip() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested/works.csv");
        let mut second = work("Second, with \"quotes\"", &["Solo"]);
        second.access_url = None;
        let works = vec![work("First", &["Ada", "Charles"]), second];

        assert_eq!(save_csv(&path, &works), WriteOutcome::Written(2));

        let rows = read_csv(&path)?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], CsvRow::from(&works[0]));
        assert_eq!(rows[0].authors, "Ada, Charles");
        assert_eq!(rows[1].title, "Second, with \"quotes\"");
        assert_eq!(rows[1].access_url, None);
        assert_eq!(rows[1].created_date, None);
        assert_eq!(rows[1].journal, "Géotechnique");
        Ok(())
    }

    #[test]
    fn test_csv_header_order() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("works.csv");
        save_csv(&path, &[work("T", &["A"])]);

        let content = std::fs::read_to_string(&path)?;
        let header = content.lines().next().unwrap_or_default();
        assert_eq!(header, CSV_COLUMNS.join(","));
        Ok(())
    }

    #[test]
    fn test_csv_empty_writes_nothing() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("empty.csv");
        assert_eq!(save_csv(&path, &[]), WriteOutcome::Empty);
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn test_csv_failure_is_reported() -> Result<()> {
        let dir = TempDir::new()?;
        // a directory cannot be opened as a file
        let outcome = save_csv(dir.path(), &[work("T", &["A"])]);
        assert!(matches!(outcome, WriteOutcome::Failed(_)));
        Ok(())
    }

    #[test]
    fn test_json_keeps_non_ascii() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("works.json");
        let works = vec![work("Étude", &["Zoë"])];
        save_json(&path, &works)?;

        let content = std::fs::read_to_string(&path)?;
        assert!(content.contains("Géotechnique"));
        assert!(content.contains("\n  {"));
        assert!(content.contains("\"type\": \"journal-article\""));

        let back: Vec<CleanedWork> = serde_json::from_str(&content)?;
        assert_eq!(back, works);
        Ok(())
    }

    #[test]
    fn test_format_sample() {
        let works = vec![
            work("One", &["A", "B", "C", "D", "E"]),
            work("Two", &["X"]),
            work("Three", &["Y"]),
            work("Four", &["Z"]),
        ];
        let out = format_sample(&works, DEFAULT_SAMPLE_SIZE);
        assert!(out.contains("#1: One (journal-article)"));
        assert!(out.contains("    Authors: A, B, C (5 total)"));
        assert!(out.contains("#3: Three"));
        assert!(!out.contains("Four"));
    }

    #[test]
    fn test_format_sample_missing_values() {
        let mut w = work("Bare", &["A"]);
        w.access_url = None;
        w.publication_date = None;
        let out = format_sample(&[w], 1);
        assert!(out.contains("    URL: n/a"));
        assert!(out.contains("    Published: n/a"));
    }

    #[test]
    fn test_format_journal_summary() {
        let stats = vec![("Nature".to_string(), 3), ("Science".to_string(), 1)];
        assert_eq!(format_journal_summary(&stats), "3: Nature\n1: Science\n");
    }
}
