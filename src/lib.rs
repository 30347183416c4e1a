//! # orcid-works
//!
//! Fetch an ORCID profile's works, flatten them into one record per work, and
//! export them as CSV/JSON with a journal frequency summary.
//!
//! ## Modules
//!
//! - [`fetcher`] - single GET against the ORCID works endpoint
//! - [`normalize`] - grouped works JSON to [`normalize::CleanedWork`] records
//! - [`stats`] - journal frequency counting
//! - [`output`] - CSV/JSON writers and console summaries
//! - [`orcid_id`] - ORCID iD validation and endpoint URLs
//! - [`cookies`] - optional session cookies
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use orcid_works::{fetcher::{Fetcher, FetchOptions}, normalize, orcid_id::OrcidId, stats};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let url = OrcidId::parse("0000-0002-1825-0097")?.works_url()?;
//!     let data = Fetcher::new(&url, &FetchOptions::default())?.fetch(&url).await?;
//!     let works = normalize::clean_works(&data);
//!     println!("{} works, {} journals", works.len(), stats::count_journals(&works).len());
//!     Ok(())
//! }
//! ```

pub mod cookies;
pub mod error;
pub mod fetcher;
pub mod normalize;
pub mod orcid_id;
pub mod output;
pub mod stats;

pub use error::{OrcidError, Result};
