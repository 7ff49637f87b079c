//! GitHub token loading: flag → env var → .env in dir → secure prompt (opt-in).

use anyhow::{Context, Result};
use colored::Colorize;
use log::{debug, info};
use std::path::Path;

use crate::utils::config::{GitHubConsts, PackagePaths};

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn try_env() -> Option<String> {
    [
        PackagePaths::get().token_env_key(),
        GitHubConsts::TOKEN_ENV_KEY,
    ]
    .iter()
    .find_map(|key| std::env::var(key).ok().as_deref().and_then(non_empty))
}

fn try_env_then_dotenv(dir: &Path) -> Option<String> {
    if let Some(s) = try_env() {
        return Some(s);
    }
    let env_path = dir.join(".env");
    if env_path.is_file() {
        let _ = dotenvy::from_path(&env_path);
        return try_env();
    }
    None
}

/// Resolve the token used for search and raw downloads.
///
/// `flag` wins when non-empty. Otherwise `FROMSCAN_GH_TOKEN` / `GITHUB_TOKEN` from the environment,
/// then from `.env` in `dir`. When still missing and `prompt` is set, asks on the terminal.
/// `Ok(None)` means anonymous access (public repositories only).
pub fn resolve_token(flag: Option<&str>, dir: &Path, prompt: bool) -> Result<Option<String>> {
    if let Some(s) = flag.and_then(non_empty) {
        debug!("Token provided on command line");
        return Ok(Some(s));
    }
    if let Some(s) = try_env_then_dotenv(dir) {
        info!("Token found in environment");
        return Ok(Some(s));
    }
    if !prompt {
        debug!("No token; searching anonymously");
        return Ok(None);
    }
    let label = format!("[{}]", env!("CARGO_PKG_NAME")).cyan().bold();
    let token = rpassword::prompt_password(format!("{} GitHub token: ", label))
        .context("read GitHub token")?;
    Ok(non_empty(&token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_is_trimmed_and_wins() {
        let got = resolve_token(Some("  abc123 \n"), Path::new("/nonexistent"), false).unwrap();
        assert_eq!(got.as_deref(), Some("abc123"));
    }

    #[test]
    fn blank_values_are_ignored() {
        assert_eq!(non_empty("   "), None);
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty(" x "), Some("x".to_string()));
    }
}
