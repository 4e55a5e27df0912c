//! Configuration file handling
//!
//! The config is a TOML file with three tables: `[settings]`, `[apis]`
//! and `[github_endpoints]`. Every key has a default, so an empty file (or
//! no file at all) is a valid configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Largest `per_page` the GitHub commits listing honours
pub const MAX_COMMITS_PAGE_SIZE: u32 = 100;

/// Largest `limit` the submissions feed honours
pub const MAX_SUBMISSIONS_PAGE_SIZE: u32 = 20;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sync behaviour
    pub settings: SyncSettings,
    /// Service base URLs
    pub apis: ApiUrls,
    /// GitHub endpoint path templates
    pub github_endpoints: GitHubEndpoints,
}

/// Sync behaviour knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Prefix that marks a commit as created by this tool
    pub commit_message: String,
    /// Window within which repeated accepts of the same problem+language collapse
    pub filter_dupes_by_secs: i64,
    /// Retries per submissions page before the run is abandoned
    pub max_retries: u32,
    /// Backoff base; retry `n` sleeps `base^n` seconds
    pub backoff_base_secs: u64,
    /// Page size when scanning commit history
    pub commits_page_size: u32,
    /// Page size when reading the submissions feed
    pub submissions_page_size: u32,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            commit_message: "Sync LeetCode submission".to_string(),
            filter_dupes_by_secs: 86_400,
            max_retries: 5,
            backoff_base_secs: 3,
            commits_page_size: 100,
            submissions_page_size: 20,
        }
    }
}

/// Base URLs of the two upstream services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiUrls {
    /// GitHub REST API root
    pub github: String,
    /// LeetCode GraphQL endpoint
    pub leetcode_graphql: String,
    /// LeetCode submissions feed
    pub leetcode_submissions: String,
}

impl Default for ApiUrls {
    fn default() -> Self {
        Self {
            github: "https://api.github.com".to_string(),
            leetcode_graphql: "https://leetcode.com/graphql".to_string(),
            leetcode_submissions: "https://leetcode.com/api/submissions/".to_string(),
        }
    }
}

/// GitHub endpoint templates
///
/// Placeholders: `{owner}`, `{repo}`, `{branch}`, `{per_page}`, `{page}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubEndpoints {
    /// Paginated commit listing for the branch
    pub read_commits: String,
    /// Tree creation
    pub tree: String,
    /// Commit creation
    pub commit: String,
    /// Branch reference update
    pub reference: String,
}

impl Default for GitHubEndpoints {
    fn default() -> Self {
        Self {
            read_commits: "/repos/{owner}/{repo}/commits?sha={branch}&per_page={per_page}&page={page}"
                .to_string(),
            tree: "/repos/{owner}/{repo}/git/trees".to_string(),
            commit: "/repos/{owner}/{repo}/git/commits".to_string(),
            reference: "/repos/{owner}/{repo}/git/refs/heads/{branch}".to_string(),
        }
    }
}

impl Config {
    /// Parse a config from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from an explicit path; the file must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_toml(&text)
    }

    /// Load from `path` if given, otherwise from the default location,
    /// falling back to built-in defaults when no default file exists
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Serialize back to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        let s = &self.settings;
        if s.commit_message.trim().is_empty() {
            return Err(Error::Config("settings.commit_message must not be empty".to_string()));
        }
        if s.filter_dupes_by_secs < 0 {
            return Err(Error::Config(
                "settings.filter_dupes_by_secs must not be negative".to_string(),
            ));
        }
        if s.commits_page_size == 0 || s.submissions_page_size == 0 {
            return Err(Error::Config("page sizes must be positive".to_string()));
        }
        // A capped page looks like the end of the listing to the cursor
        // scan and shifts feed offsets, so oversized values are refused.
        if s.commits_page_size > MAX_COMMITS_PAGE_SIZE {
            return Err(Error::Config(format!(
                "settings.commits_page_size must be at most {MAX_COMMITS_PAGE_SIZE}"
            )));
        }
        if s.submissions_page_size > MAX_SUBMISSIONS_PAGE_SIZE {
            return Err(Error::Config(format!(
                "settings.submissions_page_size must be at most {MAX_SUBMISSIONS_PAGE_SIZE}"
            )));
        }
        if s.backoff_base_secs == 0 {
            return Err(Error::Config("settings.backoff_base_secs must be positive".to_string()));
        }
        Ok(())
    }
}

/// Default config location: `<config dir>/lcsync/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lcsync").join("config.toml"))
}

/// Substitute `{name}` placeholders in an endpoint template
///
/// Unknown placeholders are left untouched.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{name}}}"), value)
    })
}
