//! GitHub code search client: paginated listing of files matching a name.

use anyhow::{Context, Result, bail};
use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, LINK};
use serde::Deserialize;

use crate::DiscoveredFile;
use crate::utils::config::{GitHubConsts, PackagePaths};

use super::query::{SearchScope, build_query};
use super::raw_url::raw_download_url;

#[derive(Debug, Deserialize)]
struct CodeSearchPage {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    incomplete_results: bool,
    #[serde(default)]
    items: Vec<CodeSearchItem>,
}

#[derive(Debug, Deserialize)]
struct CodeSearchItem {
    name: String,
    path: String,
    html_url: String,
    repository: RepositoryRef,
}

#[derive(Debug, Deserialize)]
struct RepositoryRef {
    name: String,
}

/// What to look for and how to authenticate.
#[derive(Clone, Debug)]
pub struct FileFilter {
    pub scope: SearchScope,
    pub file_name: String,
    pub token: Option<String>,
}

/// Blocking client for `GET /search/code`.
pub struct GitHubSearch {
    client: Client,
    api_base: String,
}

impl GitHubSearch {
    /// `api_base: None` targets api.github.com.
    pub fn new(api_base: Option<&str>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(PackagePaths::get().user_agent())
            .build()
            .context("build GitHub API client")?;
        let api_base = api_base
            .unwrap_or(GitHubConsts::API_BASE)
            .trim_end_matches('/')
            .to_string();
        Ok(GitHubSearch { client, api_base })
    }

    /// Every file matching `filter`, following `rel="next"` links until the last page.
    /// Any failed or non-success request aborts the listing.
    pub fn find_files(&self, filter: &FileFilter) -> Result<Vec<DiscoveredFile>> {
        let query = build_query(&filter.scope, &filter.file_name);
        info!("Searching GitHub: {}", query);

        let per_page = GitHubConsts::PER_PAGE.to_string();
        let first = self
            .client
            .get(format!("{}/search/code", self.api_base))
            .query(&[
                ("q", query.as_str()),
                ("per_page", per_page.as_str()),
            ]);

        let mut files = Vec::new();
        let mut request = Some(first);
        let mut page_no = 0_usize;
        while let Some(req) = request.take() {
            page_no += 1;
            let req = req.header(ACCEPT, GitHubConsts::ACCEPT);
            let req = match filter.token.as_deref() {
                Some(token) => req.header(AUTHORIZATION, format!("Bearer {token}")),
                None => req,
            };
            let resp = req
                .send()
                .with_context(|| format!("search request (page {page_no})"))?;
            let status = resp.status();
            let next = resp
                .headers()
                .get(LINK)
                .and_then(|v| v.to_str().ok())
                .and_then(next_link);
            if !status.is_success() {
                let body = resp.text().unwrap_or_default();
                bail!("GitHub search failed with {}: {}", status, body.trim());
            }
            let page: CodeSearchPage = resp
                .json()
                .with_context(|| format!("decode search response (page {page_no})"))?;
            debug!(
                "page {}: {} items (total {}, incomplete: {})",
                page_no,
                page.items.len(),
                page.total_count,
                page.incomplete_results
            );
            files.extend(
                page.items
                    .into_iter()
                    .map(|item| to_discovered(item, filter.token.as_deref())),
            );
            request = next.map(|url| self.client.get(url));
        }
        Ok(files)
    }
}

fn to_discovered(item: CodeSearchItem, token: Option<&str>) -> DiscoveredFile {
    DiscoveredFile {
        download_url: raw_download_url(&item.html_url, token),
        file_name: item.name,
        repository: item.repository.name,
        path: item.path,
    }
}

/// URL tagged `rel="next"` in an RFC 8288 `Link` header, if any.
pub fn next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let is_next = pieces.any(|p| {
            let p = p.trim();
            p == "rel=\"next\"" || p == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}
