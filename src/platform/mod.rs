//! Upstream services: the version-control host and the judge
//!
//! The sync engine only talks to these traits, so the same engine runs
//! against GitHub/LeetCode in production and against in-memory mocks in tests.

mod detection;
mod factory;
mod github;
mod leetcode;

pub use detection::{parse_repo_spec, resolve_repo_config};
pub use factory::{create_judge_service, create_vcs_service};
pub use github::GitHubService;
pub use leetcode::LeetCodeService;

use crate::error::Result;
use crate::types::{
    CommitSummary, CreatedCommit, GitIdentity, NewCommit, QuestionData, RepoConfig,
    SubmissionPage, TreeEntry,
};
use async_trait::async_trait;

/// Tree-based version-control API
///
/// Every write depends on the SHA returned by the previous one, so callers
/// must await each call before issuing the next.
#[async_trait]
pub trait VcsService: Send + Sync {
    /// List commits on the branch, newest first; `page` is 1-based
    async fn list_commits(&self, page: u32, per_page: u32) -> Result<Vec<CommitSummary>>;

    /// Current tip of the branch, `None` if the branch has no commits
    async fn latest_commit(&self) -> Result<Option<CommitSummary>>;

    /// Author of the oldest commit on the branch
    async fn root_author(&self) -> Result<GitIdentity>;

    /// Create a tree from `base_tree` plus `entries`, returning its SHA
    async fn create_tree(&self, base_tree: &str, entries: &[TreeEntry]) -> Result<String>;

    /// Create a commit object
    async fn create_commit(&self, commit: &NewCommit) -> Result<CreatedCommit>;

    /// Point the branch at `sha`
    async fn update_ref(&self, sha: &str, force: bool) -> Result<()>;

    /// Repository this service writes to
    fn repo(&self) -> &RepoConfig;
}

/// Judge service exposing a user's submissions and question metadata
#[async_trait]
pub trait JudgeService: Send + Sync {
    /// Fetch one page of the submissions feed, newest first
    async fn submissions_page(
        &self,
        offset: u64,
        limit: u32,
        last_key: &str,
    ) -> Result<SubmissionPage>;

    /// Question metadata for a title slug
    async fn question_data(&self, title_slug: &str) -> Result<QuestionData>;

    /// The user's note on a question, if they wrote one
    async fn question_note(&self, title_slug: &str) -> Result<Option<String>>;
}
