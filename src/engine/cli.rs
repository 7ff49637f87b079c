//! CLI command handler: discover, scan, print; optionally write the mapping file.

use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;

use crate::discovery::discover_files;
use crate::engine::arg_parser::Cli;
use crate::engine::core::{collect_report, jobs_from_files};
use crate::engine::fetcher::{Fetcher, HttpFetcher};
use crate::engine::output::{print_distinct_values, write_value_index};
use crate::engine::progress::{finish_progress, progress_callback, setup_progress};
use crate::utils::fromscan_toml::{FromscanToml, apply_file_to_opts, load_fromscan_toml};
use crate::utils::{resolve_token, setup_logging};
use crate::{Opts, ScanOpts};

/// Overwrite opts with every flag that was given. Call after applying the file.
pub fn apply_cli_to_opts(cli: &Cli, opts: &mut Opts) {
    if let Some(ref org) = cli.org {
        opts.org = org.clone();
    }
    if cli.repo.is_some() {
        opts.repo = cli.repo.clone();
    }
    if let Some(ref name) = cli.file_name {
        opts.file_name = name.clone();
    }
    if let Some(w) = cli.workers {
        opts.workers = usize::try_from(w).unwrap_or(usize::MAX);
    }
    if let Some(g) = cli.generate_output_file {
        opts.generate_output_file = g;
    }
    if let Some(ref p) = cli.output_file {
        opts.output_file = p.clone();
    }
    if let Some(secs) = cli.fetch_timeout {
        opts.fetch_timeout_secs = (secs > 0).then_some(secs);
    }
    if let Some(v) = cli.verbose {
        opts.verbose = v;
    }
    if let Some(p) = cli.prompt_token {
        opts.prompt_token = p;
    }
}

pub fn validate_opts(opts: &Opts) -> Result<()> {
    if opts.org.trim().is_empty() {
        bail!("GitHub organization name is required to scan the files (--org or .fromscan.toml)");
    }
    if opts.file_name.trim().is_empty() {
        bail!("file name to search for must not be empty");
    }
    if opts.workers == 0 {
        bail!("number of workers must be at least 1");
    }
    Ok(())
}

/// Defaults → `.fromscan.toml` in `dir` → CLI flags. Sets up logging once verbosity is known.
fn setup_opts(cli: &Cli, dir: &Path) -> Result<Opts> {
    let file = load_fromscan_toml(dir);
    let file_verbose = file
        .as_ref()
        .ok()
        .and_then(|f| f.as_ref())
        .and_then(FromscanToml::verbose);
    setup_logging(cli.verbose.or(file_verbose).unwrap_or(false));

    let mut opts = Opts::default();
    match file {
        Ok(Some(file)) => {
            debug!("Loaded settings from config file");
            apply_file_to_opts(&file, &mut opts);
        }
        Ok(None) => {}
        Err(e) => warn!("Ignoring config file: {:#}", e),
    }
    apply_cli_to_opts(cli, &mut opts);
    validate_opts(&opts)?;
    opts.gh_token = resolve_token(cli.gh_token.as_deref(), dir, opts.prompt_token)?;
    Ok(opts)
}

/// Discover matching files, scan them with the worker pool, print distinct values, optionally write the mapping.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let dir = std::env::current_dir().context("resolve working directory")?;
    let opts = setup_opts(cli, &dir)?;
    let scan_opts = ScanOpts::from(&opts);

    let files = discover_files(&scan_opts)
        .context("Please verify that the organization / repository names are valid")?;
    info!("fileCount: {}", files.len());
    if files.is_empty() {
        info!("No files with name '{}' found", opts.file_name);
        return Ok(());
    }

    let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::with_timeout_secs(opts.fetch_timeout_secs)?);
    let bar = setup_progress(opts.verbose, files.len());
    let on_result = progress_callback(&bar);
    let report = collect_report(
        jobs_from_files(&files),
        opts.workers,
        fetcher,
        on_result.as_deref(),
    )?;
    finish_progress(&bar);

    if opts.generate_output_file {
        write_value_index(&report.value_index, &opts.output_file)?;
    }
    print_distinct_values(&report.distinct_values);
    Ok(())
}
