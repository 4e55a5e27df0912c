//! Test data factories for leetcode-sync types
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use leetcode_sync::config::SyncSettings;
use leetcode_sync::sync::Sleeper;
use leetcode_sync::types::{GitIdentity, QuestionData, RepoConfig, SubmissionRecord};
use std::sync::Mutex;
use std::time::Duration;

/// Marker used by test settings
pub const MARKER: &str = "LeetCode sync";

/// Create an accepted submission record
pub fn accepted(title: &str, lang: &str, timestamp: i64) -> SubmissionRecord {
    SubmissionRecord {
        title: title.to_string(),
        title_slug: slug(title),
        lang: lang.to_string(),
        status_display: "Accepted".to_string(),
        timestamp,
        code: format!("// {title} at {timestamp}"),
    }
}

/// Create a submission record with another verdict
pub fn rejected(title: &str, lang: &str, timestamp: i64) -> SubmissionRecord {
    SubmissionRecord {
        status_display: "Wrong Answer".to_string(),
        ..accepted(title, lang, timestamp)
    }
}

/// Slug the judge would use for a title
pub fn slug(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

/// Question metadata with a given id
pub fn question(id: &str, title: &str) -> QuestionData {
    QuestionData {
        question_id: id.to_string(),
        title: title.to_string(),
        difficulty: "Easy".to_string(),
        content: Some(format!("<p>{title} statement</p>")),
    }
}

/// Identity of the repository owner (author of the root commit)
pub fn owner_identity() -> GitIdentity {
    GitIdentity {
        name: "Repo Owner".to_string(),
        email: "owner@example.com".to_string(),
    }
}

/// Target repository used by tests
pub fn repo_config() -> RepoConfig {
    RepoConfig {
        owner: "testowner".to_string(),
        repo: "solutions".to_string(),
        branch: "main".to_string(),
    }
}

/// Settings with the test marker and a given dedupe window
pub fn settings(window_secs: i64) -> SyncSettings {
    SyncSettings {
        commit_message: MARKER.to_string(),
        filter_dupes_by_secs: window_secs,
        ..SyncSettings::default()
    }
}

/// Sleeper that records requested delays instead of waiting
#[derive(Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    /// Requested delays in whole seconds
    pub fn delays_secs(&self) -> Vec<u64> {
        self.delays
            .lock()
            .unwrap()
            .iter()
            .map(Duration::as_secs)
            .collect()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}
