//! leetcode-sync - mirror accepted LeetCode submissions into a GitHub repository
//!
//! Each new accepted submission becomes one commit, dated when the problem was
//! solved. Progress is recorded only in the repository's own history, so runs
//! are idempotent and a partially applied run is picked up by the next one.

pub mod auth;
pub mod config;
pub mod error;
pub mod platform;
pub mod sync;
pub mod types;
