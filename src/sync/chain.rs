//! Commit chain builder
//!
//! Replays submissions oldest-first as a linear history. Each commit's
//! parent is the SHA the service assigned to the previous one, so every
//! step waits for the last.

use crate::error::{Error, Result};
use crate::platform::VcsService;
use crate::sync::languages::{FALLBACK_EXTENSION, extension_for};
use crate::sync::progress::ProgressCallback;
use crate::types::{
    ChainState, CommitSignature, EnrichedSubmission, GitIdentity, NewCommit, TreeEntry,
};
use chrono::DateTime;
use tracing::{info, warn};

/// Description file name inside each problem folder
pub const DESCRIPTION_FILE: &str = "README.md";

/// Notes file name inside each problem folder
pub const NOTES_FILE: &str = "Notes.md";

/// Commit date format understood by the git-data API
const COMMIT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Folder for a submission: `"<id padded to 4> <title>/"`
pub fn folder_path(submission: &EnrichedSubmission) -> String {
    format!(
        "{:0>4} {}/",
        submission.question.question_id, submission.record.title
    )
}

/// Solution file name, e.g. `Solution.py`
pub fn solution_file_name(lang: &str) -> String {
    let ext = extension_for(lang).unwrap_or_else(|| {
        warn!(lang, "unknown language, using .{FALLBACK_EXTENSION}");
        FALLBACK_EXTENSION
    });
    format!("Solution.{ext}")
}

/// Rendered problem description
pub fn render_description(submission: &EnrichedSubmission) -> String {
    format!(
        "<h1>{}</h1>\n<h2>{}</h2>\n{}\n",
        submission.record.title,
        submission.question.difficulty,
        submission.question.content.as_deref().unwrap_or_default()
    )
}

/// Files to add for one submission
pub fn build_tree_entries(submission: &EnrichedSubmission) -> Vec<TreeEntry> {
    let folder = folder_path(submission);

    let mut entries = vec![
        TreeEntry::file(
            format!("{folder}{DESCRIPTION_FILE}"),
            render_description(submission),
        ),
        TreeEntry::file(
            format!("{folder}{}", solution_file_name(&submission.record.lang)),
            submission.record.code.clone(),
        ),
    ];

    if let Some(note) = submission.note.as_deref().filter(|n| !n.is_empty()) {
        entries.push(TreeEntry::file(format!("{folder}{NOTES_FILE}"), note));
    }

    entries
}

/// Format an epoch timestamp as a UTC commit date
pub fn format_commit_date(timestamp: i64) -> Result<String> {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format(COMMIT_DATE_FORMAT).to_string())
        .ok_or_else(|| Error::Parse(format!("timestamp {timestamp} is out of range")))
}

/// Commit message for a submission
pub fn commit_message(prefix: &str, submission: &EnrichedSubmission) -> String {
    format!("{prefix} - {}", submission.record.title)
}

/// Commit one submission on top of `state` and move the branch to it
async fn commit_one(
    vcs: &dyn VcsService,
    state: &ChainState,
    author: &GitIdentity,
    message_prefix: &str,
    submission: &EnrichedSubmission,
    progress: &dyn ProgressCallback,
) -> Result<ChainState> {
    let entries = build_tree_entries(submission);
    let tree_sha = vcs.create_tree(&state.tree_sha, &entries).await?;

    let signature = CommitSignature {
        name: author.name.clone(),
        email: author.email.clone(),
        date: format_commit_date(submission.record.timestamp)?,
    };
    let commit = NewCommit {
        message: commit_message(message_prefix, submission),
        tree: tree_sha.clone(),
        parents: vec![state.commit_sha.clone()],
        author: signature.clone(),
        committer: signature,
    };
    let created = vcs.create_commit(&commit).await?;

    vcs.update_ref(&created.sha, true).await?;

    info!(
        sha = %created.sha,
        title = %submission.record.title,
        timestamp = submission.record.timestamp,
        "committed submission"
    );
    progress.on_committed(submission, &created).await;

    Ok(ChainState {
        tree_sha,
        commit_sha: created.sha,
    })
}

/// Commit every submission in order, threading the chain state forward
///
/// `submissions` must be oldest-first. The first failure aborts the rest;
/// commits already pushed stay on the branch.
pub async fn commit_all(
    vcs: &dyn VcsService,
    initial: ChainState,
    author: &GitIdentity,
    message_prefix: &str,
    submissions: &[EnrichedSubmission],
    progress: &dyn ProgressCallback,
) -> Result<ChainState> {
    let mut state = initial;

    for (idx, submission) in submissions.iter().enumerate() {
        state = match commit_one(vcs, &state, author, message_prefix, submission, progress).await {
            Ok(next) => next,
            Err(e) => {
                warn!(
                    committed = idx,
                    remaining = submissions.len() - idx,
                    tip = %state.commit_sha,
                    "commit chain stopped"
                );
                return Err(e);
            }
        };
    }

    Ok(state)
}
