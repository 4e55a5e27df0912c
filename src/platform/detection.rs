//! Target repository detection from flags and the environment

use crate::error::{Error, Result};
use crate::types::RepoConfig;
use regex::Regex;
use std::sync::LazyLock;

/// Branch used when neither a flag nor `GITHUB_REF_NAME` names one
pub const DEFAULT_BRANCH: &str = "main";

static RE_SSH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^git@[^:]+:(.+?)(?:\.git)?/?$").expect("hardcoded regex is valid")
});
static RE_HTTPS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^/]+/(.+?)(?:\.git)?/?$").expect("hardcoded regex is valid")
});

/// Parse `owner/repo` from a short spec or a GitHub remote URL
///
/// Accepts `owner/repo`, `https://github.com/owner/repo(.git)` and
/// `git@github.com:owner/repo(.git)`.
pub fn parse_repo_spec(spec: &str) -> Result<(String, String)> {
    let spec = spec.trim();

    let path = RE_SSH
        .captures(spec)
        .or_else(|| RE_HTTPS.captures(spec))
        .and_then(|c| c.get(1))
        .map_or(spec, |m| m.as_str());

    let mut parts = path.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(Error::Parse(format!(
            "invalid repository '{spec}', expected owner/repo"
        ))),
    }
}

/// Resolve the target repository and branch
///
/// Flags win over `GITHUB_REPOSITORY` / `GITHUB_REF_NAME`; the branch
/// defaults to [`DEFAULT_BRANCH`]. `lookup` reads environment variables.
pub fn resolve_repo_config(
    repo_flag: Option<&str>,
    branch_flag: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<RepoConfig> {
    let spec = repo_flag
        .map(ToString::to_string)
        .or_else(|| lookup("GITHUB_REPOSITORY"))
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| {
            Error::Config("no repository given; pass --repo or set GITHUB_REPOSITORY".to_string())
        })?;

    let (owner, repo) = parse_repo_spec(&spec)?;

    let branch = branch_flag
        .map(ToString::to_string)
        .or_else(|| lookup("GITHUB_REF_NAME"))
        .filter(|b| !b.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BRANCH.to_string());

    Ok(RepoConfig {
        owner,
        repo,
        branch,
    })
}
