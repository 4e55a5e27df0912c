//! Incremental sync engine
//!
//! One run walks through three steps:
//! 1. Cursor - find the last synced timestamp in repository history
//! 2. Fetch - page through the submissions feed, filtering as we go
//! 3. Commit - replay the new submissions oldest-first as a commit chain

mod chain;
mod cursor;
mod filter;
mod languages;
mod paginate;
mod progress;

pub use chain::{
    DESCRIPTION_FILE, NOTES_FILE, build_tree_entries, commit_all, commit_message, folder_path,
    format_commit_date, render_description, solution_file_name,
};
pub use cursor::{EPOCH_CURSOR, is_sync_commit, resolve_cursor};
pub use filter::{Classification, DedupeFilter};
pub use languages::{FALLBACK_EXTENSION, extension_for};
pub use paginate::{FetchOutcome, RetryPolicy, Sleeper, TokioSleeper, fetch_all_since};
pub use progress::{NoopProgress, Phase, ProgressCallback};

use crate::config::SyncSettings;
use crate::error::{Error, Result};
use crate::platform::{JudgeService, VcsService};
use crate::types::{ChainState, EnrichedSubmission};
use tracing::info;

/// State owned by a single run
///
/// Created once per run and dropped at the end; nothing here outlives it.
#[derive(Debug)]
pub struct RunContext {
    /// Timestamp boundary; only newer submissions are synced
    pub cursor: i64,
    /// Dedupe state across all pages of this run
    pub filter: DedupeFilter,
    /// Valid submissions gathered so far, newest first
    pub pending: Vec<EnrichedSubmission>,
    /// Pages read from the feed
    pub pages: u32,
}

impl RunContext {
    /// Start a run at `cursor`
    pub fn new(cursor: i64, settings: &SyncSettings) -> Self {
        Self {
            cursor,
            filter: DedupeFilter::new(cursor, settings.filter_dupes_by_secs),
            pending: Vec::new(),
            pages: 0,
        }
    }

    /// Pending submissions in commit order (oldest first)
    pub fn into_commit_order(self) -> Vec<EnrichedSubmission> {
        let mut pending = self.pending;
        pending.reverse();
        pending
    }
}

/// Summary of a finished run
#[derive(Debug, Clone)]
pub struct SyncResult {
    /// Cursor the run started from
    pub cursor: i64,
    /// Feed pages read
    pub pages: u32,
    /// Submissions that passed the filter, oldest first
    pub submissions: Vec<EnrichedSubmission>,
    /// Commits pushed by this run
    pub commits_created: usize,
    /// Branch tip after the run, when anything was committed
    pub final_state: Option<ChainState>,
}

/// Run one sync
///
/// Resolves the cursor, reads the feed and commits every new submission.
/// With `dry_run` nothing is written; the result lists what would be
/// committed.
pub async fn run_sync(
    vcs: &dyn VcsService,
    judge: &dyn JudgeService,
    settings: &SyncSettings,
    sleeper: &dyn Sleeper,
    progress: &dyn ProgressCallback,
    dry_run: bool,
) -> Result<SyncResult> {
    progress.on_phase(Phase::ResolvingCursor).await;
    let cursor = resolve_cursor(vcs, &settings.commit_message, settings.commits_page_size).await?;
    progress.on_cursor(cursor).await;

    let mut ctx = RunContext::new(cursor, settings);

    progress.on_phase(Phase::Paginating).await;
    let fetched = fetch_all_since(
        judge,
        &mut ctx.filter,
        settings.submissions_page_size,
        &RetryPolicy::from_settings(settings),
        sleeper,
        progress,
    )
    .await?;
    ctx.pending = fetched.submissions;
    ctx.pages = fetched.pages;

    let pages = ctx.pages;
    let submissions = ctx.into_commit_order();
    let mut result = SyncResult {
        cursor,
        pages,
        submissions,
        commits_created: 0,
        final_state: None,
    };

    if result.submissions.is_empty() {
        progress.on_message("Nothing to sync - already up to date").await;
        progress.on_phase(Phase::Complete).await;
        return Ok(result);
    }

    if dry_run {
        progress.on_message("Dry run - no commits will be made").await;
        report_dry_run(settings, &result.submissions, progress).await;
        progress.on_phase(Phase::Complete).await;
        return Ok(result);
    }

    let tip = vcs
        .latest_commit()
        .await?
        .ok_or_else(|| Error::EmptyRepository(vcs.repo().branch.clone()))?;
    let author = vcs.root_author().await?;

    progress.on_phase(Phase::Committing).await;
    let final_state = commit_all(
        vcs,
        ChainState {
            tree_sha: tip.tree_sha,
            commit_sha: tip.sha,
        },
        &author,
        &settings.commit_message,
        &result.submissions,
        progress,
    )
    .await?;

    result.commits_created = result.submissions.len();
    result.final_state = Some(final_state);
    info!(commits = result.commits_created, "sync completed");
    progress.on_phase(Phase::Complete).await;

    Ok(result)
}

/// Report what would be committed in a dry run
async fn report_dry_run(
    settings: &SyncSettings,
    submissions: &[EnrichedSubmission],
    progress: &dyn ProgressCallback,
) {
    progress.on_message("Would commit:").await;
    for submission in submissions {
        let date = format_commit_date(submission.record.timestamp).unwrap_or_default();
        progress
            .on_message(&format!(
                "  - {} ({}{}) at {date}",
                commit_message(&settings.commit_message, submission),
                folder_path(submission),
                solution_file_name(&submission.record.lang),
            ))
            .await;
    }
}
