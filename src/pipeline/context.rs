//! Pipeline tuning and channels: worker-count reconciliation and pre-sized queues.

use crossbeam_channel::{Receiver, Sender, bounded};
use log::{info, warn};

use crate::{ScanJob, ScanResult};

/// Worker count and channel capacity for one run, derived from the job count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineTuning {
    pub requested_workers: usize,
    /// Workers actually launched: `1..=job_count`.
    pub num_workers: usize,
    /// Capacity of the job and result channels. Always ≥ job count so neither side blocks on send.
    pub channel_cap: usize,
}

impl PipelineTuning {
    /// Clamp `requested` into `1..=job_count`; size channels to hold every job.
    pub fn reconcile(requested: usize, job_count: usize) -> Self {
        let cap = job_count.max(1);
        let num_workers = if requested == 0 {
            warn!("Worker count must be at least 1; using 1");
            1
        } else if requested > cap {
            info!(
                "Reducing number of workers to number of files ({} -> {})",
                requested, cap
            );
            cap
        } else {
            requested
        };
        PipelineTuning {
            requested_workers: requested,
            num_workers,
            channel_cap: cap,
        }
    }
}

/// Channels for one run. Workers get clones of `job_rx`, `term_rx`, `result_tx`.
pub struct PipelineChannels {
    pub job_tx: Sender<ScanJob>,
    pub job_rx: Receiver<ScanJob>,
    pub result_tx: Sender<ScanResult>,
    pub result_rx: Receiver<ScanResult>,
    /// One unit per worker; capacity = worker count so shutdown never blocks.
    pub term_tx: Sender<()>,
    pub term_rx: Receiver<()>,
}

pub fn create_pipeline_channels(tuning: &PipelineTuning) -> PipelineChannels {
    let (job_tx, job_rx) = bounded::<ScanJob>(tuning.channel_cap);
    let (result_tx, result_rx) = bounded::<ScanResult>(tuning.channel_cap);
    let (term_tx, term_rx) = bounded::<()>(tuning.num_workers);
    PipelineChannels {
        job_tx,
        job_rx,
        result_tx,
        result_rx,
        term_tx,
        term_rx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn more_workers_than_jobs_is_clamped() {
        let t = PipelineTuning::reconcile(16, 3);
        assert_eq!(t.num_workers, 3);
        assert_eq!(t.channel_cap, 3);
        assert_eq!(t.requested_workers, 16);
    }

    #[test]
    fn fewer_workers_than_jobs_is_kept() {
        let t = PipelineTuning::reconcile(2, 10);
        assert_eq!(t.num_workers, 2);
        assert_eq!(t.channel_cap, 10);
    }

    #[test]
    fn zero_workers_becomes_one() {
        assert_eq!(PipelineTuning::reconcile(0, 5).num_workers, 1);
    }

    #[test]
    fn channels_hold_every_job_without_blocking() {
        let t = PipelineTuning::reconcile(1, 4);
        let ch = create_pipeline_channels(&t);
        for i in 0..4 {
            ch.job_tx
                .try_send(ScanJob {
                    name: format!("f{i}"),
                    url: format!("u{i}"),
                })
                .unwrap();
        }
        assert!(ch.job_tx.is_full());
        assert_eq!(ch.term_tx.capacity(), Some(1));
    }
}
