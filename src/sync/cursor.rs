//! Cursor resolution from repository history
//!
//! The repository's own history is the only record of sync progress: the
//! newest commit carrying the marker prefix tells us where the last run
//! (possibly a partial one) stopped.

use crate::error::Result;
use crate::platform::VcsService;
use crate::types::CommitSummary;
use tracing::{debug, info};

/// Cursor meaning "nothing synced yet"
pub const EPOCH_CURSOR: i64 = 0;

/// Whether a commit was made by a previous sync
pub fn is_sync_commit(commit: &CommitSummary, marker: &str) -> bool {
    commit.message.starts_with(marker)
}

/// Find the committer timestamp of the newest sync commit
///
/// Pages through history newest-first. A short page means history is
/// exhausted; if no sync commit was seen the cursor is [`EPOCH_CURSOR`].
/// Failures propagate: there is no safe guess for this value.
pub async fn resolve_cursor(vcs: &dyn VcsService, marker: &str, page_size: u32) -> Result<i64> {
    let mut page = 1;

    loop {
        let commits = vcs.list_commits(page, page_size).await?;
        debug!(page, count = commits.len(), "scanning history for sync marker");

        if let Some(commit) = commits.iter().find(|c| is_sync_commit(c, marker)) {
            let cursor = commit.committed_at.timestamp();
            info!(cursor, sha = %commit.sha, "found last sync commit");
            return Ok(cursor);
        }

        if commits.len() < page_size as usize {
            info!("no sync commit in history, syncing everything");
            return Ok(EPOCH_CURSOR);
        }

        page += 1;
    }
}
