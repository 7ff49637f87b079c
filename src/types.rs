//! Public and internal types for the fromscan API and pipeline.

use std::collections::HashMap;
use std::path::PathBuf;

/// One file to fetch and scan: display name plus the raw download URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanJob {
    pub name: String,
    pub url: String,
}

/// What a single fetch-and-scan produced.
///
/// Fetch failures never surface here as errors: the worker logs them and reports [`ScanOutcome::NotFound`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    /// At least one marker line was seen; values in file order, duplicates kept.
    Found(Vec<String>),
    /// No marker line, empty body, or the fetch failed.
    NotFound,
}

impl ScanOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, ScanOutcome::Found(_))
    }

    /// Flatten into the `(found, values)` pair used by [`ScanResult`].
    pub fn into_parts(self) -> (bool, Vec<String>) {
        match self {
            ScanOutcome::Found(values) => (true, values),
            ScanOutcome::NotFound => (false, Vec::new()),
        }
    }
}

/// Result for exactly one [`ScanJob`]. `url` is only set when values were found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanResult {
    pub name: String,
    pub url: Option<String>,
    pub found: bool,
    pub values: Vec<String>,
}

impl ScanResult {
    pub fn from_outcome(job: ScanJob, outcome: ScanOutcome) -> Self {
        match outcome {
            ScanOutcome::Found(values) if !values.is_empty() => ScanResult {
                name: job.name,
                url: Some(job.url),
                found: true,
                values,
            },
            _ => ScanResult {
                name: job.name,
                url: None,
                found: false,
                values: Vec::new(),
            },
        }
    }
}

/// A candidate file returned by discovery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub file_name: String,
    pub repository: String,
    pub path: String,
    pub download_url: String,
}

impl From<&DiscoveredFile> for ScanJob {
    fn from(f: &DiscoveredFile) -> Self {
        ScanJob {
            name: f.file_name.clone(),
            url: f.download_url.clone(),
        }
    }
}

/// File name → values found in that file.
pub type FileIndex = HashMap<String, Vec<String>>;

/// Value → URLs of every file that declared it, in drain order.
pub type ValueIndex = HashMap<String, Vec<String>>;

/// Everything a run produces after aggregation.
#[derive(Clone, Debug, Default)]
pub struct ScanReport {
    pub file_index: FileIndex,
    pub value_index: ValueIndex,
    /// Key set of `value_index`; order is unspecified.
    pub distinct_values: Vec<String>,
    pub files_scanned: usize,
}

/// Lib-only options for [`find_images`](crate::find_images): discovery scope and pool size.
#[derive(Clone, Debug)]
pub struct ScanOpts {
    /// GitHub organization (or user) to search.
    pub org: String,
    /// Restrict the search to one repository in `org`.
    pub repo: Option<String>,
    /// File name to match, e.g. `Dockerfile`.
    pub file_name: String,
    /// Token for private repositories and higher search limits.
    pub gh_token: Option<String>,
    /// Requested worker count; clamped to the number of files.
    pub workers: usize,
    /// Per-fetch timeout in seconds. `None` waits forever.
    pub fetch_timeout_secs: Option<u64>,
    /// Search API base URL (GitHub Enterprise). `None` uses api.github.com.
    pub api_base: Option<String>,
}

impl Default for ScanOpts {
    fn default() -> Self {
        ScanOpts {
            org: String::new(),
            repo: None,
            file_name: crate::utils::config::DEFAULT_FILE_NAME.to_string(),
            gh_token: None,
            workers: crate::utils::config::DEFAULT_WORKERS,
            fetch_timeout_secs: None,
            api_base: None,
        }
    }
}

impl From<&Opts> for ScanOpts {
    fn from(o: &Opts) -> Self {
        ScanOpts {
            org: o.org.clone(),
            repo: o.repo.clone(),
            file_name: o.file_name.clone(),
            gh_token: o.gh_token.clone(),
            workers: o.workers,
            fetch_timeout_secs: o.fetch_timeout_secs,
            api_base: o.api_base.clone(),
        }
    }
}

/// Full options (CLI + `.fromscan.toml`). Use [`ScanOpts`] for lib.
#[derive(Clone, Debug)]
pub struct Opts {
    pub org: String,
    pub repo: Option<String>,
    pub file_name: String,
    pub gh_token: Option<String>,
    pub workers: usize,
    pub fetch_timeout_secs: Option<u64>,
    pub api_base: Option<String>,
    /// Write the value → files mapping to `output_file`.
    pub generate_output_file: bool,
    pub output_file: PathBuf,
    /// Debug logging and a progress bar while draining results.
    pub verbose: bool,
    /// Prompt for a token when none is found in flags or environment.
    pub prompt_token: bool,
}

impl Default for Opts {
    fn default() -> Self {
        use crate::utils::config::{DEFAULT_FILE_NAME, DEFAULT_OUTPUT_FILE, DEFAULT_WORKERS};
        Opts {
            org: String::new(),
            repo: None,
            file_name: DEFAULT_FILE_NAME.to_string(),
            gh_token: None,
            workers: DEFAULT_WORKERS,
            fetch_timeout_secs: None,
            api_base: None,
            generate_output_file: false,
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            verbose: false,
            prompt_token: false,
        }
    }
}
