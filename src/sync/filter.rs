//! Deduplication filter
//!
//! Classifies feed records newest-first. State lives for one run only.

use crate::error::Result;
use crate::platform::JudgeService;
use crate::types::{EnrichedSubmission, SubmissionRecord};
use std::collections::HashMap;
use tracing::debug;

/// Outcome of classifying one page
#[derive(Debug, Default)]
pub struct Classification {
    /// Valid submissions in feed order (newest first)
    pub accepted: Vec<EnrichedSubmission>,
    /// Whether a record at or before the cursor was seen
    pub boundary_reached: bool,
}

/// Stateful filter over the newest-first submissions feed
#[derive(Debug)]
pub struct DedupeFilter {
    cursor: i64,
    window_secs: i64,
    /// (title, lang) -> timestamp of the newest accepted record for that key
    latest: HashMap<(String, String), i64>,
    boundary_reached: bool,
}

impl DedupeFilter {
    /// Create a filter for records newer than `cursor`
    pub fn new(cursor: i64, window_secs: i64) -> Self {
        Self {
            cursor,
            window_secs,
            latest: HashMap::new(),
            boundary_reached: false,
        }
    }

    /// Whether the cursor boundary has been hit
    pub const fn boundary_reached(&self) -> bool {
        self.boundary_reached
    }

    /// Whether `record` repeats a newer accepted record within the window
    fn is_duplicate(&self, record: &SubmissionRecord) -> bool {
        self.latest
            .get(&(record.title.clone(), record.lang.clone()))
            .is_some_and(|newer| newer - record.timestamp < self.window_secs)
    }

    /// Classify one page of records, enriching the valid ones
    ///
    /// Records must arrive newest-first. Once the boundary is reached every
    /// later call accepts nothing.
    pub async fn classify(
        &mut self,
        records: Vec<SubmissionRecord>,
        judge: &dyn JudgeService,
    ) -> Result<Classification> {
        let mut out = Classification::default();

        for record in records {
            if self.boundary_reached || record.timestamp <= self.cursor {
                self.boundary_reached = true;
                break;
            }

            if !record.is_accepted() {
                continue;
            }

            if self.is_duplicate(&record) {
                debug!(
                    title = %record.title,
                    lang = %record.lang,
                    timestamp = record.timestamp,
                    "skipping duplicate accept"
                );
                continue;
            }

            self.latest
                .insert((record.title.clone(), record.lang.clone()), record.timestamp);

            let question = judge.question_data(&record.title_slug).await?;
            let note = judge.question_note(&record.title_slug).await?;

            out.accepted.push(EnrichedSubmission {
                record,
                question,
                note,
            });
        }

        out.boundary_reached = self.boundary_reached;
        Ok(out)
    }
}
