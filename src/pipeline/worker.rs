//! Scan workers: pull a job or a stop signal, fetch-and-scan, send exactly one result per job.

use crossbeam_channel::{Receiver, Sender, select};
use log::{debug, warn};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::engine::fetcher::{Fetcher, fetch_and_scan, redact_userinfo};
use crate::{ScanJob, ScanOutcome, ScanResult};

/// Spawn `num_workers` threads sharing the job, stop and result channels.
pub fn spawn_scan_workers(
    job_rx: &Receiver<ScanJob>,
    term_rx: &Receiver<()>,
    result_tx: &Sender<ScanResult>,
    fetcher: &Arc<dyn Fetcher>,
    num_workers: usize,
) -> Vec<JoinHandle<()>> {
    (0..num_workers)
        .map(|worker_id| {
            let job_rx = job_rx.clone();
            let term_rx = term_rx.clone();
            let result_tx = result_tx.clone();
            let fetcher = Arc::clone(fetcher);
            thread::spawn(move || run_worker(worker_id, job_rx, term_rx, result_tx, fetcher))
        })
        .collect()
}

/// Block until either a stop signal or a job is ready. Stop wins when both are.
/// A disconnected stop or job channel also stops the worker.
fn next_job(job_rx: &Receiver<ScanJob>, term_rx: &Receiver<()>) -> Option<ScanJob> {
    if term_rx.try_recv().is_ok() {
        return None;
    }
    select! {
        recv(term_rx) -> _ => None,
        recv(job_rx) -> job => job.ok(),
    }
}

/// Fetch errors and fetcher panics both become [`ScanOutcome::NotFound`] so the job still yields a result.
pub fn process_job(worker_id: usize, fetcher: &dyn Fetcher, job: ScanJob) -> ScanResult {
    let outcome = match catch_unwind(AssertUnwindSafe(|| fetch_and_scan(fetcher, &job.url))) {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(err)) => {
            warn!(
                "worker {}: fetch failed for {} ({}): {:#}",
                worker_id,
                job.name,
                redact_userinfo(&job.url),
                err
            );
            ScanOutcome::NotFound
        }
        Err(_) => {
            warn!("worker {}: fetcher panicked on {}", worker_id, job.name);
            ScanOutcome::NotFound
        }
    };
    ScanResult::from_outcome(job, outcome)
}

pub fn run_worker(
    worker_id: usize,
    job_rx: Receiver<ScanJob>,
    term_rx: Receiver<()>,
    result_tx: Sender<ScanResult>,
    fetcher: Arc<dyn Fetcher>,
) {
    let mut processed = 0_usize;
    while let Some(job) = next_job(&job_rx, &term_rx) {
        let result = process_job(worker_id, fetcher.as_ref(), job);
        if result_tx.send(result).is_err() {
            // Coordinator is gone; nobody will read further results.
            break;
        }
        processed += 1;
    }
    debug!("worker {}: stopped after {} jobs", worker_id, processed);
}
