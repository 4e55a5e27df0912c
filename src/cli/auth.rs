//! Auth command - test and explain credentials

use crate::cli::style::{Stylize, check};
use anstream::println;
use leetcode_sync::auth::{
    get_github_auth, get_leetcode_auth, test_github_auth, test_leetcode_auth,
};
use leetcode_sync::config::Config;
use leetcode_sync::error::Result;
use std::path::Path;

/// Service whose credentials are being managed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthTarget {
    /// GitHub token
    GitHub,
    /// LeetCode session cookies
    LeetCode,
}

/// Run the auth test command
async fn run_auth_test(target: AuthTarget, config: &Config) -> Result<()> {
    match target {
        AuthTarget::GitHub => {
            println!("Testing GitHub authentication...");
            let auth = get_github_auth().await?;
            let login = test_github_auth(&auth, &config.apis.github).await?;
            println!("{} Authenticated as: {}", check(), login.accent());
            println!("Token source: {:?}", auth.source);
        }
        AuthTarget::LeetCode => {
            println!("Testing LeetCode authentication...");
            let auth = get_leetcode_auth()?;
            let username = test_leetcode_auth(&auth, &config.apis.leetcode_graphql).await?;
            println!("{} Signed in as: {}", check(), username.accent());
        }
    }
    Ok(())
}

/// Run the auth setup command (show instructions)
fn run_auth_setup(target: AuthTarget) {
    match target {
        AuthTarget::GitHub => {
            println!("{}", "GitHub Authentication Setup".emphasis());
            println!("===========================");
            println!();
            println!("Option 1: Environment variable");
            println!("  Set GITHUB_TOKEN or GH_TOKEN (needs contents: write)");
            println!("  In GitHub Actions, pass the `github-token` input");
            println!();
            println!("Option 2: GitHub CLI");
            println!("  Install: https://cli.github.com/");
            println!("  Run: gh auth login");
        }
        AuthTarget::LeetCode => {
            println!("{}", "LeetCode Authentication Setup".emphasis());
            println!("=============================");
            println!();
            println!("Sign in to leetcode.com in a browser and copy two cookies:");
            println!("  csrftoken        -> LEETCODE_CSRF_TOKEN");
            println!("  LEETCODE_SESSION -> LEETCODE_SESSION");
            println!();
            println!("In GitHub Actions, pass the `leetcode-csrf-token` and");
            println!("`leetcode-session` inputs instead.");
        }
    }
}

/// Wrapper for auth commands
pub async fn run_auth(target: AuthTarget, test: bool, config_path: Option<&Path>) -> Result<()> {
    if test {
        let config = Config::load(config_path)?;
        run_auth_test(target, &config).await
    } else {
        run_auth_setup(target);
        Ok(())
    }
}
