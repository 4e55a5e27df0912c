//! In-memory version-control service
//!
//! Keeps a linear history so that commits made by one run are visible to
//! the cursor resolver of the next.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use leetcode_sync::error::{Error, Result};
use leetcode_sync::platform::VcsService;
use leetcode_sync::types::{
    CommitSummary, CreatedCommit, GitIdentity, NewCommit, RepoConfig, TreeEntry,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use super::fixtures::{owner_identity, repo_config};

/// Call record for `create_tree`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTreeCall {
    pub base_tree: String,
    pub entries: Vec<TreeEntry>,
}

/// Mock VCS with a newest-first history and error injection
pub struct MockVcs {
    repo: RepoConfig,
    next_id: AtomicU64,
    history: Mutex<Vec<CommitSummary>>,
    unreferenced: Mutex<HashMap<String, CommitSummary>>,
    // Call tracking
    list_calls: Mutex<Vec<(u32, u32)>>,
    tree_calls: Mutex<Vec<CreateTreeCall>>,
    commit_calls: Mutex<Vec<NewCommit>>,
    ref_calls: Mutex<Vec<String>>,
    // Error injection
    fail_tree_call: Mutex<Option<usize>>,
    fail_commit_call: Mutex<Option<usize>>,
    fail_ref_call: Mutex<Option<usize>>,
    fail_list: Mutex<Option<String>>,
}

impl MockVcs {
    /// Repository with no commits at all
    pub fn empty() -> Self {
        Self {
            repo: repo_config(),
            next_id: AtomicU64::new(1),
            history: Mutex::new(Vec::new()),
            unreferenced: Mutex::new(HashMap::new()),
            list_calls: Mutex::new(Vec::new()),
            tree_calls: Mutex::new(Vec::new()),
            commit_calls: Mutex::new(Vec::new()),
            ref_calls: Mutex::new(Vec::new()),
            fail_tree_call: Mutex::new(None),
            fail_commit_call: Mutex::new(None),
            fail_ref_call: Mutex::new(None),
            fail_list: Mutex::new(None),
        }
    }

    /// Repository with a single initial commit by the owner
    pub fn with_initial_commit() -> Self {
        let vcs = Self::empty();
        vcs.push_existing("Initial commit", 10, owner_identity());
        vcs
    }

    /// Append an existing commit on top of history
    pub fn push_existing(&self, message: &str, timestamp: i64, author: GitIdentity) -> String {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let sha = format!("existing-{id}");
        self.history.lock().unwrap().insert(
            0,
            CommitSummary {
                sha: sha.clone(),
                tree_sha: format!("existing-tree-{id}"),
                message: message.to_string(),
                author,
                committed_at: DateTime::from_timestamp(timestamp, 0).unwrap(),
            },
        );
        sha
    }

    // === Error injection methods ===

    /// Make the `n`th `create_tree` call (1-based) fail
    pub fn fail_create_tree_on(&self, n: usize) {
        *self.fail_tree_call.lock().unwrap() = Some(n);
    }

    /// Make the `n`th `create_commit` call (1-based) fail
    pub fn fail_create_commit_on(&self, n: usize) {
        *self.fail_commit_call.lock().unwrap() = Some(n);
    }

    /// Make the `n`th `update_ref` call (1-based) fail; the commit stays dangling
    pub fn fail_update_ref_on(&self, n: usize) {
        *self.fail_ref_call.lock().unwrap() = Some(n);
    }

    /// Clear every injected failure
    pub fn clear_failures(&self) {
        *self.fail_tree_call.lock().unwrap() = None;
        *self.fail_commit_call.lock().unwrap() = None;
        *self.fail_ref_call.lock().unwrap() = None;
        *self.fail_list.lock().unwrap() = None;
    }

    /// Make `list_commits` fail
    pub fn fail_list_commits(&self, msg: &str) {
        *self.fail_list.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// Current history, newest first
    pub fn history(&self) -> Vec<CommitSummary> {
        self.history.lock().unwrap().clone()
    }

    /// Commits whose message carries `marker`, oldest first
    pub fn sync_commits(&self, marker: &str) -> Vec<CommitSummary> {
        let mut commits: Vec<_> = self
            .history()
            .into_iter()
            .filter(|c| c.message.starts_with(marker))
            .collect();
        commits.reverse();
        commits
    }

    pub fn list_calls(&self) -> Vec<(u32, u32)> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn tree_calls(&self) -> Vec<CreateTreeCall> {
        self.tree_calls.lock().unwrap().clone()
    }

    pub fn commit_calls(&self) -> Vec<NewCommit> {
        self.commit_calls.lock().unwrap().clone()
    }

    pub fn ref_calls(&self) -> Vec<String> {
        self.ref_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VcsService for MockVcs {
    async fn list_commits(&self, page: u32, per_page: u32) -> Result<Vec<CommitSummary>> {
        self.list_calls.lock().unwrap().push((page, per_page));

        if let Some(msg) = self.fail_list.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        let history = self.history.lock().unwrap();
        let start = ((page - 1) * per_page) as usize;
        Ok(history
            .iter()
            .skip(start)
            .take(per_page as usize)
            .cloned()
            .collect())
    }

    async fn latest_commit(&self) -> Result<Option<CommitSummary>> {
        Ok(self.history.lock().unwrap().first().cloned())
    }

    async fn root_author(&self) -> Result<GitIdentity> {
        self.history
            .lock()
            .unwrap()
            .last()
            .map(|c| c.author.clone())
            .ok_or_else(|| Error::EmptyRepository(self.repo.branch.clone()))
    }

    async fn create_tree(&self, base_tree: &str, entries: &[TreeEntry]) -> Result<String> {
        let call_number = {
            let mut calls = self.tree_calls.lock().unwrap();
            calls.push(CreateTreeCall {
                base_tree: base_tree.to_string(),
                entries: entries.to_vec(),
            });
            calls.len()
        };

        if *self.fail_tree_call.lock().unwrap() == Some(call_number) {
            return Err(Error::GitHubApi("tree creation failed".to_string()));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(format!("tree-{id}"))
    }

    async fn create_commit(&self, commit: &NewCommit) -> Result<CreatedCommit> {
        let call_number = {
            let mut calls = self.commit_calls.lock().unwrap();
            calls.push(commit.clone());
            calls.len()
        };

        if *self.fail_commit_call.lock().unwrap() == Some(call_number) {
            return Err(Error::GitHubApi("commit creation failed".to_string()));
        }

        let committed_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&commit.committer.date)
            .map_err(|e| Error::Parse(e.to_string()))?
            .with_timezone(&Utc);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let sha = format!("commit-{id}");

        self.unreferenced.lock().unwrap().insert(
            sha.clone(),
            CommitSummary {
                sha: sha.clone(),
                tree_sha: commit.tree.clone(),
                message: commit.message.clone(),
                author: GitIdentity {
                    name: commit.author.name.clone(),
                    email: commit.author.email.clone(),
                },
                committed_at,
            },
        );

        Ok(CreatedCommit {
            html_url: Some(format!(
                "https://github.com/{}/{}/commit/{sha}",
                self.repo.owner, self.repo.repo
            )),
            sha,
        })
    }

    async fn update_ref(&self, sha: &str, force: bool) -> Result<()> {
        let call_number = {
            let mut calls = self.ref_calls.lock().unwrap();
            calls.push(sha.to_string());
            calls.len()
        };
        assert!(force, "sync always force-updates the branch");

        if *self.fail_ref_call.lock().unwrap() == Some(call_number) {
            return Err(Error::GitHubApi("reference update failed".to_string()));
        }

        let commit = self
            .unreferenced
            .lock()
            .unwrap()
            .remove(sha)
            .ok_or_else(|| Error::GitHubApi(format!("unknown commit {sha}")))?;
        self.history.lock().unwrap().insert(0, commit);
        Ok(())
    }

    fn repo(&self) -> &RepoConfig {
        &self.repo
    }
}
