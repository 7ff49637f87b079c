//! Load `.fromscan.toml` from a directory (CLI only). Lib callers pass [`ScanOpts`](crate::ScanOpts) directly.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FromscanToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    org: Option<String>,
    repo: Option<String>,
    file_name: Option<String>,
    workers: Option<usize>,
    generate_output_file: Option<bool>,
    output_file: Option<String>,
    verbose: Option<bool>,
    fetch_timeout: Option<u64>,
    api_base: Option<String>,
}

/// Load `.fromscan.toml` from `dir`. `Ok(None)` when the file is missing or unreadable;
/// `Err` when it exists but does not parse (caller logs and continues with defaults).
pub(crate) fn load_fromscan_toml(dir: &Path) -> anyhow::Result<Option<FromscanToml>> {
    let path = dir.join(PackagePaths::get().config_filename());
    let Ok(s) = std::fs::read_to_string(&path) else {
        return Ok(None);
    };
    parse_fromscan_toml(&s)
        .map(Some)
        .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
}

pub(crate) fn parse_fromscan_toml(s: &str) -> Result<FromscanToml, toml::de::Error> {
    toml::from_str(s)
}

impl FromscanToml {
    /// Needed before logging is set up, ahead of the full merge.
    pub(crate) fn verbose(&self) -> Option<bool> {
        self.settings.verbose
    }
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($file:expr, $opts:expr, $file_field:ident => $opts_field:ident) => {
        if let Some(ref v) = $file.$file_field {
            $opts.$opts_field = v.clone();
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI.
/// The token is never read from the file.
pub(crate) fn apply_file_to_opts(file: &FromscanToml, opts: &mut Opts) {
    let s = &file.settings;
    apply_file_opt!(s, opts, org => org);
    if s.repo.is_some() {
        opts.repo = s.repo.clone();
    }
    apply_file_opt!(s, opts, file_name => file_name);
    apply_file_opt!(s, opts, workers => workers);
    apply_file_opt!(s, opts, generate_output_file => generate_output_file);
    if let Some(ref p) = s.output_file {
        opts.output_file = PathBuf::from(p);
    }
    apply_file_opt!(s, opts, verbose => verbose);
    if let Some(secs) = s.fetch_timeout {
        opts.fetch_timeout_secs = (secs > 0).then_some(secs);
    }
    if s.api_base.is_some() {
        opts.api_base = s.api_base.clone();
    }
}
