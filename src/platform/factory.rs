//! Service factory
//!
//! Creates the upstream services from configuration and resolved credentials.

use crate::auth::{get_github_auth, get_leetcode_auth};
use crate::config::Config;
use crate::error::Result;
use crate::platform::{GitHubService, JudgeService, LeetCodeService, VcsService};
use crate::types::RepoConfig;

/// Create the version-control service for `repo`
///
/// Handles token lookup and client construction.
pub async fn create_vcs_service(config: &Config, repo: RepoConfig) -> Result<Box<dyn VcsService>> {
    let auth = get_github_auth().await?;
    Ok(Box::new(GitHubService::new(
        &auth.token,
        &config.apis.github,
        config.github_endpoints.clone(),
        repo,
    )?))
}

/// Create the judge service from environment credentials
pub fn create_judge_service(config: &Config) -> Result<Box<dyn JudgeService>> {
    let auth = get_leetcode_auth()?;
    Ok(Box::new(LeetCodeService::new(
        &auth,
        &config.apis.leetcode_graphql,
        &config.apis.leetcode_submissions,
    )?))
}
