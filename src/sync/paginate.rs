//! Retrying paginator over the submissions feed
//!
//! A failed page is retried in place with exponential backoff. The retry
//! counter is local to the page being fetched.

use crate::config::SyncSettings;
use crate::error::{Error, Result};
use crate::platform::JudgeService;
use crate::sync::filter::DedupeFilter;
use crate::sync::progress::ProgressCallback;
use crate::types::{EnrichedSubmission, SubmissionPage};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};

/// Backoff policy for page fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed per page
    pub max_retries: u32,
    /// Retry `n` waits `base_secs^n` seconds
    pub base_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            base_secs: 3,
        }
    }
}

impl RetryPolicy {
    /// Build from config settings
    pub const fn from_settings(settings: &SyncSettings) -> Self {
        Self {
            max_retries: settings.max_retries,
            base_secs: settings.backoff_base_secs,
        }
    }

    /// Delay before retry number `retry` (1-based)
    pub fn delay(&self, retry: u32) -> Duration {
        Duration::from_secs(self.base_secs.saturating_pow(retry))
    }
}

/// Something that can wait
///
/// Abstracted so tests can record backoff delays instead of sleeping.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Block the run for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Everything gathered by a full pagination pass
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Valid submissions, newest first
    pub submissions: Vec<EnrichedSubmission>,
    /// Pages fetched successfully
    pub pages: u32,
}

/// Fetch one page, retrying the same page on failure
async fn fetch_page(
    judge: &dyn JudgeService,
    offset: u64,
    limit: u32,
    last_key: &str,
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    progress: &dyn ProgressCallback,
) -> Result<SubmissionPage> {
    let mut retries = 0;

    loop {
        match judge.submissions_page(offset, limit, last_key).await {
            Ok(page) => return Ok(page),
            Err(e) => {
                retries += 1;
                if retries > policy.max_retries {
                    return Err(Error::RetriesExhausted {
                        offset,
                        attempts: retries,
                        last_error: Box::new(e),
                    });
                }

                let delay = policy.delay(retries);
                warn!(
                    offset,
                    retry = retries,
                    delay_secs = delay.as_secs(),
                    error = %e,
                    "submissions page failed, retrying"
                );
                progress.on_retry(offset, retries, delay, &e).await;
                sleeper.sleep(delay).await;
            }
        }
    }
}

/// Read the feed until the filter hits the cursor or the feed runs out
///
/// Returns valid submissions newest-first; reverse before committing.
pub async fn fetch_all_since(
    judge: &dyn JudgeService,
    filter: &mut DedupeFilter,
    page_size: u32,
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    progress: &dyn ProgressCallback,
) -> Result<FetchOutcome> {
    let mut outcome = FetchOutcome::default();
    let mut offset: u64 = 0;
    let mut last_key = String::new();

    loop {
        let page = fetch_page(
            judge, offset, page_size, &last_key, policy, sleeper, progress,
        )
        .await?;
        outcome.pages += 1;
        progress.on_page(offset, page.submissions_dump.len()).await;

        if let Some(key) = page.last_key {
            last_key = key;
        }

        let classified = filter.classify(page.submissions_dump, judge).await?;
        for submission in &classified.accepted {
            progress.on_accepted(submission).await;
        }
        outcome.submissions.extend(classified.accepted);

        if classified.boundary_reached || !page.has_next {
            break;
        }
        offset += u64::from(page_size);
    }

    info!(
        pages = outcome.pages,
        accepted = outcome.submissions.len(),
        "finished reading submissions"
    );
    Ok(outcome)
}
