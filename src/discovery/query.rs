/// Where to search: a whole organization, or one repository inside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchScope {
    Org(String),
    Repo { org: String, repo: String },
}

impl SearchScope {
    /// Repository scope when `repo` is set and non-empty, organization scope otherwise.
    pub fn new(org: &str, repo: Option<&str>) -> Self {
        match repo.map(str::trim).filter(|r| !r.is_empty()) {
            Some(repo) => SearchScope::Repo {
                org: org.to_string(),
                repo: repo.to_string(),
            },
            None => SearchScope::Org(org.to_string()),
        }
    }
}

/// Code search query, e.g. `org:acme filename:Dockerfile` or `repo:acme/web filename:Dockerfile`.
pub fn build_query(scope: &SearchScope, file_name: &str) -> String {
    match scope {
        SearchScope::Org(org) => format!("org:{org} filename:{file_name}"),
        SearchScope::Repo { org, repo } => format!("repo:{org}/{repo} filename:{file_name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn org_query() {
        let scope = SearchScope::new("acme", None);
        assert_eq!(build_query(&scope, "Dockerfile"), "org:acme filename:Dockerfile");
    }

    #[test]
    fn repo_query() {
        let scope = SearchScope::new("acme", Some("web"));
        assert_eq!(
            build_query(&scope, "Dockerfile"),
            "repo:acme/web filename:Dockerfile"
        );
    }

    #[test]
    fn blank_repo_means_org_scope() {
        assert_eq!(
            SearchScope::new("acme", Some("  ")),
            SearchScope::Org("acme".to_string())
        );
    }
}
