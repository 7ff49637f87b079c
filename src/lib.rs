//! fromscan: find container build files on GitHub and index the base images they declare

pub mod discovery;
pub mod engine;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

use log::{debug, info};
use std::sync::Arc;

use crate::engine::fetcher::{Fetcher, HttpFetcher};

/// Result alias used by public fromscan API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Scan already-discovered `files` with up to `workers` workers and return the aggregated report.
///
/// - `fetcher` supplies file bodies; use [`HttpFetcher`] for real downloads or
///   [`StaticFetcher`](crate::engine::fetcher::StaticFetcher) for in-memory content.
/// - `workers` is clamped to `1..=files.len()`. Empty `files` returns an empty report without starting workers.
/// - Fetch failures do not fail the call; those files simply contribute no values.
pub fn scan_files(
    files: &[DiscoveredFile],
    fetcher: Arc<dyn Fetcher>,
    workers: usize,
) -> Result<ScanReport> {
    engine::collect_report(engine::jobs_from_files(files), workers, fetcher, None)
}

/// Single entry point: discover files named `opts.file_name` in the configured org/repo, scan them, aggregate.
///
/// Discovery errors are returned; zero matches is an empty report, not an error.
///
/// ```ignore
/// let opts = fromscan::ScanOpts { org: "acme".into(), workers: 8, ..Default::default() };
/// let report = fromscan::find_images(&opts)?;
/// for image in &report.distinct_values { println!("{image}"); }
/// ```
pub fn find_images(opts: &ScanOpts) -> Result<ScanReport> {
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        ScanOpts {
            gh_token: opts.gh_token.as_ref().map(|_| "***".to_string()),
            ..opts.clone()
        }
    );
    let files = discovery::discover_files(opts)?;
    info!("fileCount: {}", files.len());
    if files.is_empty() {
        return Ok(ScanReport::default());
    }
    let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::with_timeout_secs(opts.fetch_timeout_secs)?);
    scan_files(&files, fetcher, opts.workers)
}
