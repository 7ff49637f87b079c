//! Core collection and processing logic

use anyhow::Result;
use log::debug;
use std::sync::Arc;

use crate::engine::aggregate::build_report;
use crate::engine::fetcher::Fetcher;
use crate::pipeline::run_pipeline;
use crate::{DiscoveredFile, ScanJob, ScanReport};

/// Jobs in discovery order.
pub fn jobs_from_files(files: &[DiscoveredFile]) -> Vec<ScanJob> {
    files.iter().map(ScanJob::from).collect()
}

/// Fetch and scan every job with the worker pool, then aggregate.
/// Jobs → job channel → workers (fetch + scan) → result channel → report.
pub fn collect_report(
    jobs: Vec<ScanJob>,
    requested_workers: usize,
    fetcher: Arc<dyn Fetcher>,
    on_result: Option<&(dyn Fn(usize) + Send)>,
) -> Result<ScanReport> {
    let results = run_pipeline(jobs, requested_workers, fetcher, on_result)?;
    let report = build_report(&results);
    debug!(
        "{} results, {} with values, {} distinct values",
        results.len(),
        results.iter().filter(|r| r.found).count(),
        report.distinct_values.len()
    );
    Ok(report)
}
