//! CLI progress callback with styled output and a backoff spinner

use crate::cli::style::{Stream, Stylize, arrow, check, hyperlink_url, spinner_style};
use anstream::{eprintln, println};
use async_trait::async_trait;
use indicatif::ProgressBar;
use leetcode_sync::error::Error;
use leetcode_sync::sync::{Phase, ProgressCallback, Sleeper, folder_path};
use leetcode_sync::types::{CreatedCommit, EnrichedSubmission};
use std::time::Duration;

/// CLI progress callback that prints to stdout with styled output
pub struct CliProgress {
    /// Verbose mode also prints per-page and per-accept lines
    pub verbose: bool,
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        match phase {
            Phase::Complete => println!("{} {}", check(), phase.to_string().success()),
            _ => println!("{}...", phase.to_string().emphasis()),
        }
    }

    async fn on_cursor(&self, cursor: i64) {
        if cursor == 0 {
            println!("  {}", "No previous sync found, syncing everything".muted());
        } else {
            let when = leetcode_sync::sync::format_commit_date(cursor)
                .unwrap_or_else(|_| cursor.to_string());
            println!("  Last synced at {}", when.accent());
        }
    }

    async fn on_page(&self, offset: u64, records: usize) {
        if self.verbose {
            println!(
                "  {}",
                format!("Page at offset {offset}: {records} submissions").muted()
            );
        }
    }

    async fn on_retry(&self, offset: u64, attempt: u32, delay: Duration, error: &Error) {
        eprintln!(
            "  {}: page at offset {offset} failed (attempt {attempt}): {error}; retrying in {}s",
            "warning".warn(),
            delay.as_secs()
        );
    }

    async fn on_accepted(&self, submission: &EnrichedSubmission) {
        if self.verbose {
            println!(
                "  {} {} {}",
                arrow(),
                submission.record.title.accent(),
                format!("({})", submission.record.lang).muted()
            );
        }
    }

    async fn on_committed(&self, submission: &EnrichedSubmission, commit: &CreatedCommit) {
        println!(
            "  {} Committed {}",
            check(),
            folder_path(submission).emphasis()
        );
        if let Some(url) = &commit.html_url {
            println!("    {}", hyperlink_url(Stream::Stdout, url));
        }
    }

    async fn on_message(&self, message: &str) {
        println!("  {message}");
    }
}

/// Sleeper that shows a countdown spinner while backing off
pub struct SpinnerSleeper;

#[async_trait]
impl Sleeper for SpinnerSleeper {
    async fn sleep(&self, duration: Duration) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.enable_steady_tick(Duration::from_millis(100));

        let deadline = tokio::time::Instant::now() + duration;
        loop {
            let left = deadline.saturating_duration_since(tokio::time::Instant::now());
            if left.is_zero() {
                break;
            }
            spinner.set_message(format!("Retrying in {}s", left.as_secs_f64().ceil()));
            tokio::time::sleep(left.min(Duration::from_secs(1))).await;
        }

        spinner.finish_and_clear();
    }
}
