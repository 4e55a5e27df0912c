//! Sync command - mirror new accepted submissions into the repository

use crate::cli::progress::{CliProgress, SpinnerSleeper};
use crate::cli::style::Stylize;
use anstream::println;
use leetcode_sync::auth::get_leetcode_auth;
use leetcode_sync::config::Config;
use leetcode_sync::error::Result;
use leetcode_sync::platform::{create_judge_service, create_vcs_service, resolve_repo_config};
use leetcode_sync::sync::run_sync as run_engine;
use std::path::Path;

/// Run the sync command
pub async fn run_sync(
    config_path: Option<&Path>,
    repo: Option<&str>,
    branch: Option<&str>,
    dry_run: bool,
    verbose: bool,
) -> Result<()> {
    let config = Config::load(config_path)?;

    // Fail fast before touching the network
    get_leetcode_auth()?;
    let repo_config = resolve_repo_config(repo, branch, |k| std::env::var(k).ok())?;

    println!(
        "Syncing into {}",
        format!(
            "{}/{}@{}",
            repo_config.owner, repo_config.repo, repo_config.branch
        )
        .accent()
    );

    let vcs = create_vcs_service(&config, repo_config).await?;
    let judge = create_judge_service(&config)?;
    let progress = CliProgress { verbose };

    let result = run_engine(
        vcs.as_ref(),
        judge.as_ref(),
        &config.settings,
        &SpinnerSleeper,
        &progress,
        dry_run,
    )
    .await?;

    println!();
    if dry_run {
        println!(
            "Dry run complete: {} submissions would be committed",
            result.submissions.len().accent()
        );
    } else {
        println!(
            "Sync complete: {} commits from {} pages",
            result.commits_created.accent(),
            result.pages.accent()
        );
    }

    Ok(())
}
