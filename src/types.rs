//! Core types for leetcode-sync

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status string the judge uses for accepted submissions
pub const ACCEPTED_STATUS: &str = "Accepted";

/// A raw submission record from the judge's submissions feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionRecord {
    /// Problem title (e.g. "Two Sum")
    pub title: String,
    /// URL slug of the problem (e.g. "two-sum")
    pub title_slug: String,
    /// Judge language name (e.g. "python3")
    pub lang: String,
    /// Human-readable verdict ("Accepted", "Wrong Answer", ...)
    pub status_display: String,
    /// Submission time, seconds since epoch
    pub timestamp: i64,
    /// Submitted source code
    #[serde(default)]
    pub code: String,
}

impl SubmissionRecord {
    /// Whether the judge accepted this submission
    pub fn is_accepted(&self) -> bool {
        self.status_display == ACCEPTED_STATUS
    }
}

/// One page of the submissions feed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionPage {
    /// Records on this page, newest first
    #[serde(default)]
    pub submissions_dump: Vec<SubmissionRecord>,
    /// Continuation key for the next page
    #[serde(default)]
    pub last_key: Option<String>,
    /// Whether the feed has more pages
    #[serde(default)]
    pub has_next: bool,
}

/// Question metadata from the judge's GraphQL API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionData {
    /// Internal question id (e.g. "1")
    pub question_id: String,
    /// Question title
    pub title: String,
    /// Difficulty label ("Easy", "Medium", "Hard")
    pub difficulty: String,
    /// HTML problem statement; absent for paid-only questions
    #[serde(default)]
    pub content: Option<String>,
}

/// A submission ready to be committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedSubmission {
    /// The raw feed record
    pub record: SubmissionRecord,
    /// Question metadata
    pub question: QuestionData,
    /// The user's note for this question, if any
    pub note: Option<String>,
}

/// Tip of the linear history being built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainState {
    /// Tree SHA of the tip commit
    pub tree_sha: String,
    /// SHA of the tip commit
    pub commit_sha: String,
}

/// A git author/committer identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GitIdentity {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
}

/// A commit as returned by history listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    /// Commit SHA
    pub sha: String,
    /// Tree SHA
    pub tree_sha: String,
    /// Full commit message
    pub message: String,
    /// Commit author
    pub author: GitIdentity,
    /// When the commit was committed
    pub committed_at: DateTime<Utc>,
}

/// A file to add to a tree, with inline content
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TreeEntry {
    /// Path relative to the repository root
    pub path: String,
    /// File mode (always a regular file here)
    pub mode: String,
    /// File content
    pub content: String,
}

impl TreeEntry {
    /// Regular, non-executable file
    pub fn file(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: "100644".to_string(),
            content: content.into(),
        }
    }
}

/// Signature attached to a new commit
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommitSignature {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// ISO 8601 date (`%Y-%m-%dT%H:%M:%SZ`)
    pub date: String,
}

/// Payload for creating a commit object
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewCommit {
    /// Commit message
    pub message: String,
    /// Tree SHA
    pub tree: String,
    /// Parent commit SHAs
    pub parents: Vec<String>,
    /// Author signature
    pub author: CommitSignature,
    /// Committer signature
    pub committer: CommitSignature,
}

/// A commit object created through the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCommit {
    /// New commit SHA
    pub sha: String,
    /// Web URL, when the service reports one
    pub html_url: Option<String>,
}

/// Target repository for the sync
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Branch that receives the commits
    pub branch: String,
}
