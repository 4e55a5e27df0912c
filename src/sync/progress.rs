//! Progress callback trait for interface-agnostic updates
//!
//! This trait allows different front-ends (CLI, CI logs) to receive
//! progress updates while a sync runs.

use crate::error::Error;
use crate::types::{CreatedCommit, EnrichedSubmission};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Sync phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Scanning history for the last sync point
    ResolvingCursor,
    /// Reading the submissions feed
    Paginating,
    /// Building the commit chain
    Committing,
    /// Sync complete
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ResolvingCursor => "Finding last sync point",
            Self::Paginating => "Fetching submissions",
            Self::Committing => "Committing",
            Self::Complete => "Done",
        };
        f.write_str(s)
    }
}

/// Progress callback trait
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called once the cursor is known
    async fn on_cursor(&self, cursor: i64);

    /// Called after a submissions page was fetched
    async fn on_page(&self, offset: u64, records: usize);

    /// Called before sleeping ahead of a retry
    async fn on_retry(&self, offset: u64, attempt: u32, delay: Duration, error: &Error);

    /// Called when a submission passes the filter
    async fn on_accepted(&self, submission: &EnrichedSubmission);

    /// Called after the branch was moved to a new commit
    async fn on_committed(&self, submission: &EnrichedSubmission, commit: &CreatedCommit);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_cursor(&self, _cursor: i64) {}
    async fn on_page(&self, _offset: u64, _records: usize) {}
    async fn on_retry(&self, _offset: u64, _attempt: u32, _delay: Duration, _error: &Error) {}
    async fn on_accepted(&self, _submission: &EnrichedSubmission) {}
    async fn on_committed(&self, _submission: &EnrichedSubmission, _commit: &CreatedCommit) {}
    async fn on_message(&self, _message: &str) {}
}
