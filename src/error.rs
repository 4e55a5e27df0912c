//! Error types for leetcode-sync

use thiserror::Error;

/// Errors produced by the sync engine and its services
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read or parsed
    #[error("config error: {0}")]
    Config(String),

    /// Missing or invalid credentials
    #[error("authentication error: {0}")]
    Auth(String),

    /// GitHub API returned an error or an unexpected payload
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// LeetCode API returned an error or an unexpected payload
    #[error("LeetCode API error: {0}")]
    LeetCodeApi(String),

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed input (timestamps, repository specs, headers)
    #[error("parse error: {0}")]
    Parse(String),

    /// The target branch has no commits to build on
    #[error("branch '{0}' has no commits; create an initial commit first")]
    EmptyRepository(String),

    /// A submissions page kept failing after every retry
    #[error("giving up on submissions page at offset {offset} after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        /// Offset of the page that could not be fetched
        offset: u64,
        /// Total attempts made, including the first
        attempts: u32,
        /// The final failure
        last_error: Box<Error>,
    },
}

/// Result alias using the crate error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<octocrab::Error> for Error {
    fn from(e: octocrab::Error) -> Self {
        Self::GitHubApi(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}
