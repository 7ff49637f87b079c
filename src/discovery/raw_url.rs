use crate::utils::config::GitHubConsts;

/// Turn a blob page URL into its raw-content URL, injecting `token` as userinfo when given.
///
/// `https://github.com/o/r/blob/main/Dockerfile` → `https://raw.githubusercontent.com/o/r/main/Dockerfile`.
/// Only the first occurrence of each pattern is replaced.
pub fn raw_download_url(html_url: &str, token: Option<&str>) -> String {
    let raw = html_url
        .replacen("/blob/", "/", 1)
        .replacen(GitHubConsts::WEB_HOST, GitHubConsts::RAW_HOST, 1);
    match token.filter(|t| !t.is_empty()) {
        Some(token) => raw.replacen("https://", &format!("https://{token}@"), 1),
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = "https://github.com/acme/web/blob/3f2a/docker/Dockerfile";

    #[test]
    fn rewrites_host_and_drops_blob() {
        assert_eq!(
            raw_download_url(HTML, None),
            "https://raw.githubusercontent.com/acme/web/3f2a/docker/Dockerfile"
        );
    }

    #[test]
    fn injects_token() {
        assert_eq!(
            raw_download_url(HTML, Some("t0k")),
            "https://t0k@raw.githubusercontent.com/acme/web/3f2a/docker/Dockerfile"
        );
    }

    #[test]
    fn empty_token_is_ignored() {
        assert!(!raw_download_url(HTML, Some("")).contains('@'));
    }
}
