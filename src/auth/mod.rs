//! Authentication for GitHub and LeetCode
//!
//! GitHub supports GitHub Actions inputs, environment variables and the gh
//! CLI. LeetCode uses browser session cookies passed through the environment.

mod github;
mod leetcode;

pub use github::{GitHubAuthConfig, get_github_auth, github_token_from, test_github_auth};
pub use leetcode::{LeetCodeAuthConfig, get_leetcode_auth, leetcode_auth_from, test_leetcode_auth};

/// Source of authentication credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from the gh CLI
    Cli,
    /// Credentials from environment variables
    EnvVar,
}
