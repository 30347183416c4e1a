//! orcid-works - ORCID works export
//!
//! Fetches a profile's works, writes them to CSV (and optionally JSON) and
//! prints a sample plus a journal frequency table.
//!
//! ## Usage
//! ```bash
//! orcid-works 0000-0002-1825-0097
//! orcid-works 0000-0002-1825-0097 --json data/orcid_works_cleaned.json --sample 5
//! orcid-works --url "https://orcid.org/0000-0002-1825-0097/worksPage.json?offset=0&pageSize=100"
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use orcid_works::{
    cookies::CookieJar,
    fetcher::{FetchOptions, Fetcher, DEFAULT_USER_AGENT},
    normalize,
    orcid_id::OrcidId,
    output::{self, WriteOutcome, DEFAULT_CSV_PATH, DEFAULT_SAMPLE_SIZE},
    stats,
};
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

// ============================================================================
// CLI Definition
// ============================================================================

/// Export an ORCID profile's works to CSV
#[derive(Parser)]
#[command(name = "orcid-works")]
#[command(version, about, long_about = None)]
struct Cli {
    /// ORCID iD or profile URL (e.g., 0000-0002-1825-0097)
    #[arg(required_unless_present = "url")]
    orcid: Option<String>,

    /// Full works endpoint URL, used instead of the one derived from the iD
    #[arg(long)]
    url: Option<String>,

    /// CSV output path
    #[arg(short, long, default_value = DEFAULT_CSV_PATH)]
    output: PathBuf,

    /// Also write the cleaned works as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Number of works to preview
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    sample: usize,

    /// Cookie file (JSON array of {name, value, domain}); defaults to ~/.orcid_cookies.json
    #[arg(long)]
    cookie_file: Option<PathBuf>,

    /// User-Agent header
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    run_export(cli).await
}

// ============================================================================
// Export Pipeline
// ============================================================================

async fn run_export(cli: Cli) -> Result<()> {
    let url = resolve_endpoint(cli.orcid.as_deref(), cli.url.as_deref())?;

    let jar = cli
        .cookie_file
        .map(CookieJar::with_path)
        .unwrap_or_default();
    debug!(path = ?jar.path(), "Cookie file");
    let cookie = url.host_str().and_then(|host| jar.header_for(host));

    let options = FetchOptions {
        user_agent: cli.user_agent,
        cookie,
        ..Default::default()
    };

    // --- Fetch ---
    let fetcher = Fetcher::new(&url, &options)?;
    let data = fetcher
        .fetch(&url)
        .await
        .context("Failed to fetch ORCID works")?;

    // --- Normalize ---
    let works = normalize::clean_works(&data);
    info!(works = works.len(), "Works ready for export");

    print!("{}", output::format_sample(&works, cli.sample));

    // --- Write ---
    if let Some(json_path) = &cli.json {
        output::save_json(json_path, &works)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;
        println!("Saved {} works to {}", works.len(), json_path.display());
    }

    match output::save_csv(&cli.output, &works) {
        WriteOutcome::Written(rows) => {
            println!("Saved {} works to {}", rows, cli.output.display())
        }
        WriteOutcome::Empty => println!("No works to save"),
        WriteOutcome::Failed(e) => println!("Error saving CSV: {}", e),
    }

    // --- Summarize ---
    let journals = stats::count_journals(&works);
    print!("{}", output::format_journal_summary(&journals));

    Ok(())
}

/// Endpoint from `--url`, or derived from the ORCID iD.
fn resolve_endpoint(orcid: Option<&str>, url: Option<&str>) -> Result<Url> {
    if let Some(raw) = url {
        return Url::parse(raw).with_context(|| format!("Invalid --url '{}'", raw));
    }

    match orcid {
        Some(raw) => {
            let id = OrcidId::parse(raw)?;
            info!(orcid = %id, "Resolved ORCID iD");
            Ok(id.works_url()?)
        }
        None => bail!("Either an ORCID iD or --url is required"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_endpoint_prefers_url() -> Result<()> {
        let url = resolve_endpoint(
            Some("0000-0002-1825-0097"),
            Some("https://orcid.org/x/worksPage.json"),
        )?;
        assert_eq!(url.path(), "/x/worksPage.json");
        Ok(())
    }

    #[test]
    fn test_resolve_endpoint_from_id() -> Result<()> {
        let url = resolve_endpoint(Some("0000-0002-1825-0097"), None)?;
        assert_eq!(url.path(), "/0000-0002-1825-0097/worksPage.json");
        Ok(())
    }

    #[test]
    fn test_resolve_endpoint_errors() {
        assert!(resolve_endpoint(None, None).is_err());
        assert!(resolve_endpoint(Some("not-an-id"), None).is_err());
        assert!(resolve_endpoint(None, Some("::bad")).is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["orcid-works", "0000-0002-1825-0097", "--sample", "5"]);
        assert!(matches!(cli, Ok(ref c) if c.sample == 5 && c.output == PathBuf::from(DEFAULT_CSV_PATH)));
        assert!(Cli::try_parse_from(["orcid-works"]).is_err());
    }
}
