//! Pipeline components: tuning and channels, scan workers, coordinator.

pub mod context;
pub mod orchestrator;
pub mod worker;

pub use context::{PipelineChannels, PipelineTuning, create_pipeline_channels};
pub use orchestrator::{Coordinator, run_pipeline};
pub use worker::{process_job, run_worker, spawn_scan_workers};
