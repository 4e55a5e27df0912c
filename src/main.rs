//! lcsync - mirror LeetCode solves into GitHub
//!
//! CLI binary for syncing accepted submissions as dated commits.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::AuthTarget;

#[derive(Parser)]
#[command(name = "lcsync")]
#[command(about = "Mirror accepted LeetCode submissions into a GitHub repository")]
#[command(version)]
struct Cli {
    /// Path to config file (defaults to <config dir>/lcsync/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output and debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Commit new accepted submissions to the repository
    Sync {
        /// Target repository as owner/repo (defaults to GITHUB_REPOSITORY)
        #[arg(long)]
        repo: Option<String>,

        /// Branch to commit to (defaults to GITHUB_REF_NAME, then main)
        #[arg(long)]
        branch: Option<String>,

        /// Dry run - show what would be committed without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Authentication management
    Auth {
        #[command(subcommand)]
        service: AuthService,
    },

    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
enum AuthService {
    /// GitHub token
    Github {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// LeetCode session cookies
    Leetcode {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Test authentication
    Test,
    /// Show authentication setup instructions
    Setup,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "leetcode_sync=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Sync {
            repo,
            branch,
            dry_run,
        } => {
            cli::run_sync(
                config,
                repo.as_deref(),
                branch.as_deref(),
                dry_run,
                cli.verbose,
            )
            .await?;
        }
        Commands::Auth { service } => {
            let (target, action) = match service {
                AuthService::Github { action } => (AuthTarget::GitHub, action),
                AuthService::Leetcode { action } => (AuthTarget::LeetCode, action),
            };
            cli::run_auth(target, matches!(action, AuthAction::Test), config).await?;
        }
        Commands::Config => cli::run_config(config)?,
    }

    Ok(())
}
