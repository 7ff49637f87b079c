//! Application configuration constants.
//! Defaults and GitHub API settings in one place.

use std::sync::OnceLock;

// ---- Package / names (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
    token_env_key: String,
    user_agent: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
                token_env_key: format!("{}_GH_TOKEN", pkg.to_uppercase()),
                user_agent: format!("{pkg}/{}", env!("CARGO_PKG_VERSION")),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// `.fromscan.toml`, looked up in the working directory.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// Package-specific token variable, checked before [`GitHubConsts::TOKEN_ENV_KEY`].
    pub fn token_env_key(&self) -> &str {
        &self.token_env_key
    }

    /// GitHub rejects API requests without a User-Agent.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

// ---- Defaults ----

/// File name matched during discovery when none is given.
pub const DEFAULT_FILE_NAME: &str = "Dockerfile";

/// Requested worker count when none is given.
pub const DEFAULT_WORKERS: usize = 1;

/// Where the value → files mapping is written when output is enabled.
pub const DEFAULT_OUTPUT_FILE: &str = "./containerImageFiles.json";

// ---- Scanning ----

/// First token of a line that declares a base image.
pub const MARKER: &str = "FROM";

// ---- Output ----

pub struct OutputConsts;

impl OutputConsts {
    pub const BANNER: &'static str = "Distinct container images:";
    pub const RULE: &'static str = "--------------------------";
    /// Indent for the JSON output file.
    pub const JSON_INDENT: &'static [u8] = b" ";
}

// ---- GitHub ----

/// GitHub search and raw-content settings.
pub struct GitHubConsts;

impl GitHubConsts {
    pub const API_BASE: &'static str = "https://api.github.com";
    pub const ACCEPT: &'static str = "application/vnd.github+json";
    /// Search API maximum.
    pub const PER_PAGE: u32 = 100;
    pub const WEB_HOST: &'static str = "github.com";
    pub const RAW_HOST: &'static str = "raw.githubusercontent.com";
    pub const TOKEN_ENV_KEY: &'static str = "GITHUB_TOKEN";
}
