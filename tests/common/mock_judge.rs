//! In-memory judge service
//!
//! Serves a fixed newest-first feed split into pages, with per-offset
//! failure injection.

#![allow(dead_code)]

use async_trait::async_trait;
use leetcode_sync::error::{Error, Result};
use leetcode_sync::platform::JudgeService;
use leetcode_sync::types::{QuestionData, SubmissionPage, SubmissionRecord};
use std::collections::HashMap;
use std::sync::Mutex;

use super::fixtures::{question, slug};

/// Call record for `submissions_page`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCall {
    pub offset: u64,
    pub limit: u32,
    pub last_key: String,
}

/// Mock judge serving a fixed feed
pub struct MockJudge {
    records: Vec<SubmissionRecord>,
    questions: Mutex<HashMap<String, QuestionData>>,
    notes: Mutex<HashMap<String, String>>,
    failures: Mutex<HashMap<u64, u32>>,
    // Call tracking
    page_calls: Mutex<Vec<PageCall>>,
    question_calls: Mutex<Vec<String>>,
}

impl MockJudge {
    /// Feed of `records` (newest first)
    pub fn new(records: Vec<SubmissionRecord>) -> Self {
        Self {
            records,
            questions: Mutex::new(HashMap::new()),
            notes: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
            page_calls: Mutex::new(Vec::new()),
            question_calls: Mutex::new(Vec::new()),
        }
    }

    /// Register question metadata
    pub fn add_question(&self, id: &str, title: &str) {
        self.questions
            .lock()
            .unwrap()
            .insert(slug(title), question(id, title));
    }

    /// Register a user note
    pub fn add_note(&self, title: &str, note: &str) {
        self.notes
            .lock()
            .unwrap()
            .insert(slug(title), note.to_string());
    }

    /// Make the page at `offset` fail `times` times before succeeding
    pub fn fail_page(&self, offset: u64, times: u32) {
        self.failures.lock().unwrap().insert(offset, times);
    }

    // === Call verification methods ===

    pub fn page_calls(&self) -> Vec<PageCall> {
        self.page_calls.lock().unwrap().clone()
    }

    pub fn question_calls(&self) -> Vec<String> {
        self.question_calls.lock().unwrap().clone()
    }
}

/// Continuation key the mock hands out after the page at `offset`
pub fn key_after(offset: u64) -> String {
    format!("key-{offset}")
}

#[async_trait]
impl JudgeService for MockJudge {
    async fn submissions_page(
        &self,
        offset: u64,
        limit: u32,
        last_key: &str,
    ) -> Result<SubmissionPage> {
        self.page_calls.lock().unwrap().push(PageCall {
            offset,
            limit,
            last_key: last_key.to_string(),
        });

        if let Some(remaining) = self.failures.lock().unwrap().get_mut(&offset) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(Error::LeetCodeApi("transient failure".to_string()));
            }
        }

        let start = usize::try_from(offset).unwrap();
        let end = (start + limit as usize).min(self.records.len());
        let dump = self.records.get(start..end).unwrap_or_default().to_vec();

        Ok(SubmissionPage {
            submissions_dump: dump,
            last_key: Some(key_after(offset)),
            has_next: end < self.records.len(),
        })
    }

    async fn question_data(&self, title_slug: &str) -> Result<QuestionData> {
        self.question_calls
            .lock()
            .unwrap()
            .push(title_slug.to_string());
        self.questions
            .lock()
            .unwrap()
            .get(title_slug)
            .cloned()
            .ok_or_else(|| Error::LeetCodeApi(format!("no question found for '{title_slug}'")))
    }

    async fn question_note(&self, title_slug: &str) -> Result<Option<String>> {
        Ok(self.notes.lock().unwrap().get(title_slug).cloned())
    }
}
