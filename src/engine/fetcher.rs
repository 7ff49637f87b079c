//! Blocking retrieval of raw file content.

use anyhow::{Context, Result};
use log::debug;
use std::io::{BufRead, BufReader, Cursor};
use std::time::Duration;

use crate::ScanOutcome;
use crate::engine::scanner::scan_reader;
use crate::utils::config::PackagePaths;

/// Source of file bodies, shared by all workers.
///
/// Only transport failures are errors. Implementations must not turn an HTTP error status into `Err`:
/// a 404 page is scanned like any other body.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Box<dyn BufRead + Send>>;
}

/// Fetch `url` with `fetcher` and scan the body. `Err` only for transport failures.
pub fn fetch_and_scan(fetcher: &dyn Fetcher, url: &str) -> Result<ScanOutcome> {
    let reader = fetcher.fetch(url)?;
    Ok(scan_reader(reader))
}

/// HTTP(S) fetcher over a shared blocking `reqwest` client.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    timeout: Option<Duration>,
}

impl HttpFetcher {
    /// `timeout: None` waits indefinitely, so a hung server blocks its worker.
    /// With a timeout the body is read in full inside [`Fetcher::fetch`], so a stall
    /// mid-body is a transport error rather than a truncated scan.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(PackagePaths::get().user_agent())
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;
        Ok(HttpFetcher { client, timeout })
    }

    pub fn with_timeout_secs(secs: Option<u64>) -> Result<Self> {
        Self::new(secs.map(Duration::from_secs))
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Box<dyn BufRead + Send>> {
        let resp = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("GET {}", redact_userinfo(url)))?;
        if !resp.status().is_success() {
            debug!(
                "{} returned {}; scanning body anyway",
                redact_userinfo(url),
                resp.status()
            );
        }
        if self.timeout.is_none() {
            return Ok(Box::new(BufReader::new(resp)));
        }
        let body = resp
            .bytes()
            .with_context(|| format!("read body of {}", redact_userinfo(url)))?;
        Ok(Box::new(Cursor::new(body)))
    }
}

/// In-memory fetcher: URL → body. URLs not in the map fail like a refused connection.
#[derive(Clone, Debug, Default)]
pub struct StaticFetcher {
    bodies: std::collections::HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&self, url: &str) -> Result<Box<dyn BufRead + Send>> {
        match self.bodies.get(url) {
            Some(body) => Ok(Box::new(Cursor::new(body.clone().into_bytes()))),
            None => anyhow::bail!("no body registered for {}", url),
        }
    }
}

/// Strip `user:token@` from a URL before it goes into logs or errors.
pub fn redact_userinfo(url: &str) -> String {
    match url.split_once("://") {
        Some((scheme, rest)) => {
            let (authority, tail) = match rest.find('/') {
                Some(i) => rest.split_at(i),
                None => (rest, ""),
            };
            match authority.rsplit_once('@') {
                Some((_, host)) => format!("{scheme}://***@{host}{tail}"),
                None => url.to_string(),
            }
        }
        None => url.to_string(),
    }
}
