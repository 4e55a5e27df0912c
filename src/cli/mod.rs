//! CLI commands
//!
//! Command implementations for the `lcsync` binary.

mod auth;
mod config;
mod progress;
mod style;
mod sync;

pub use auth::{AuthTarget, run_auth};
pub use config::run_config;
pub use sync::run_sync;
