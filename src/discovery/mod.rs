//! Discovery: list candidate files through GitHub code search.
//!
//! Produces [`DiscoveredFile`](crate::DiscoveredFile)s whose `download_url` points at raw content
//! (with the token embedded when one is configured). See [`discover_files`] for the main API.

mod client;
mod query;
mod raw_url;

pub use client::{FileFilter, GitHubSearch, next_link};
pub use query::{SearchScope, build_query};
pub use raw_url::raw_download_url;

use anyhow::Result;

use crate::{DiscoveredFile, ScanOpts};

/// Search for files named `opts.file_name` in the org (or repo) from `opts`.
pub fn discover_files(opts: &ScanOpts) -> Result<Vec<DiscoveredFile>> {
    let search = GitHubSearch::new(opts.api_base.as_deref())?;
    let filter = FileFilter {
        scope: SearchScope::new(&opts.org, opts.repo.as_deref()),
        file_name: opts.file_name.clone(),
        token: opts.gh_token.clone(),
    };
    search.find_files(&filter)
}
