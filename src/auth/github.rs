//! GitHub authentication

use crate::auth::AuthSource;
use crate::error::{Error, Result};
use std::env;
use tokio::process::Command;

/// Environment variables checked for a GitHub token, in priority order
///
/// `INPUT_GITHUB-TOKEN` is how GitHub Actions passes a `github-token` input.
pub const GITHUB_TOKEN_VARS: [&str; 3] = ["INPUT_GITHUB-TOKEN", "GITHUB_TOKEN", "GH_TOKEN"];

/// GitHub authentication configuration
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// Authentication token
    pub token: String,
    /// Where the token was obtained from
    pub source: AuthSource,
}

/// Look up a GitHub token in the environment via `lookup`
pub fn github_token_from(lookup: impl Fn(&str) -> Option<String>) -> Option<GitHubAuthConfig> {
    GITHUB_TOKEN_VARS
        .iter()
        .find_map(|&var| lookup(var).filter(|t| !t.trim().is_empty()))
        .map(|token| GitHubAuthConfig {
            token,
            source: AuthSource::EnvVar,
        })
}

/// Get GitHub authentication
///
/// Priority:
/// 1. `INPUT_GITHUB-TOKEN`, `GITHUB_TOKEN`, `GH_TOKEN` environment variables
/// 2. gh CLI (`gh auth token`)
pub async fn get_github_auth() -> Result<GitHubAuthConfig> {
    if let Some(config) = github_token_from(|k| env::var(k).ok()) {
        return Ok(config);
    }

    if let Some(token) = get_gh_cli_token().await {
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::Cli,
        });
    }

    Err(Error::Auth(
        "No GitHub authentication found. Set GITHUB_TOKEN or run `gh auth login`".to_string(),
    ))
}

async fn get_gh_cli_token() -> Option<String> {
    // Check authenticated
    let status = Command::new("gh")
        .args(["auth", "status"])
        .output()
        .await
        .ok()?;

    if !status.status.success() {
        return None;
    }

    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Test GitHub authentication, returning the authenticated login
pub async fn test_github_auth(config: &GitHubAuthConfig, api_base: &str) -> Result<String> {
    let octocrab = octocrab::Octocrab::builder()
        .personal_token(config.token.clone())
        .base_uri(api_base)?
        .build()?;

    let user = octocrab
        .current()
        .user()
        .await
        .map_err(|e| Error::Auth(format!("Invalid token: {e}")))?;

    Ok(user.login)
}
