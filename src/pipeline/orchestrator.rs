use anyhow::{Result, anyhow};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::{debug, info};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::engine::fetcher::Fetcher;
use crate::pipeline::{PipelineTuning, create_pipeline_channels, spawn_scan_workers};
use crate::{ScanJob, ScanResult};

/// Drives one run of the worker pool: owns the queue handles and knows how many results to expect.
///
/// Lifecycle: [`Coordinator::start`] → [`enqueue`](Coordinator::enqueue) each job →
/// [`drain`](Coordinator::drain) → [`shutdown`](Coordinator::shutdown).
/// Shutdown is at-least-signaled, not confirmed: every worker is sent a stop signal but nobody waits for it.
pub struct Coordinator {
    tuning: PipelineTuning,
    job_tx: Sender<ScanJob>,
    result_rx: Receiver<ScanResult>,
    term_tx: Sender<()>,
    worker_handles: Vec<JoinHandle<()>>,
    enqueued: usize,
}

impl Coordinator {
    /// Size channels for `job_count` jobs, reconcile the worker count, and launch the workers.
    pub fn start(requested_workers: usize, job_count: usize, fetcher: Arc<dyn Fetcher>) -> Self {
        let tuning = PipelineTuning::reconcile(requested_workers, job_count);
        let channels = create_pipeline_channels(&tuning);
        let worker_handles = spawn_scan_workers(
            &channels.job_rx,
            &channels.term_rx,
            &channels.result_tx,
            &fetcher,
            tuning.num_workers,
        );
        info!("All {} workers started...", tuning.num_workers);
        // Only workers hold result senders now, so drain sees a disconnect if they all die.
        drop(channels.result_tx);
        Coordinator {
            tuning,
            job_tx: channels.job_tx,
            result_rx: channels.result_rx,
            term_tx: channels.term_tx,
            worker_handles,
            enqueued: 0,
        }
    }

    pub fn tuning(&self) -> &PipelineTuning {
        &self.tuning
    }

    pub fn num_workers(&self) -> usize {
        self.worker_handles.len()
    }

    pub fn enqueued(&self) -> usize {
        self.enqueued
    }

    /// Queue one job. Never blocks: fails if more jobs are queued than the capacity given to `start`.
    pub fn enqueue(&mut self, job: ScanJob) -> Result<()> {
        match self.job_tx.try_send(job) {
            Ok(()) => {
                self.enqueued += 1;
                Ok(())
            }
            Err(TrySendError::Full(job)) => Err(anyhow!(
                "job queue full ({} slots); cannot queue {}",
                self.tuning.channel_cap,
                job.name
            )),
            Err(TrySendError::Disconnected(job)) => {
                Err(anyhow!("all workers exited; cannot queue {}", job.name))
            }
        }
    }

    /// Receive exactly one result per queued job, in arrival order.
    /// `on_result` is called once per result (progress reporting).
    pub fn drain(&self, on_result: Option<&(dyn Fn(usize) + Send)>) -> Result<Vec<ScanResult>> {
        let mut results = Vec::with_capacity(self.enqueued);
        for received in 0..self.enqueued {
            let res = self.result_rx.recv().map_err(|_| {
                anyhow!(
                    "workers exited after {} of {} results",
                    received,
                    self.enqueued
                )
            })?;
            results.push(res);
            if let Some(cb) = on_result {
                cb(1);
            }
        }
        Ok(results)
    }

    /// Send one stop signal per worker and return without waiting.
    ///
    /// The returned handles may be joined by callers that want confirmation; dropping them detaches the threads.
    pub fn shutdown(self) -> Vec<JoinHandle<()>> {
        for _ in 0..self.worker_handles.len() {
            // Capacity equals the worker count, so this cannot be Full; Disconnected means every worker is already gone.
            let _ = self.term_tx.try_send(());
        }
        info!("Stop signal sent to all workers...");
        self.worker_handles
    }
}

/// Run `jobs` through a pool of up to `requested_workers` workers and return one result per job.
///
/// Empty `jobs` returns immediately without starting any worker.
pub fn run_pipeline(
    jobs: Vec<ScanJob>,
    requested_workers: usize,
    fetcher: Arc<dyn Fetcher>,
    on_result: Option<&(dyn Fn(usize) + Send)>,
) -> Result<Vec<ScanResult>> {
    if jobs.is_empty() {
        debug!("No jobs; pool not started");
        return Ok(Vec::new());
    }
    let mut coordinator = Coordinator::start(requested_workers, jobs.len(), fetcher);
    for job in jobs {
        coordinator.enqueue(job)?;
    }
    info!("All {} files queued for processing...", coordinator.enqueued());

    let drained = coordinator.drain(on_result);
    // Signal workers even when draining failed, so idle ones do not linger.
    let _detached = coordinator.shutdown();
    let results = drained?;
    info!("All files processed...");
    Ok(results)
}
