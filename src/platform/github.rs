//! GitHub git-data API implementation

use crate::config::{GitHubEndpoints, render_template};
use crate::error::{Error, Result};
use crate::platform::VcsService;
use crate::types::{
    CommitSummary, CreatedCommit, GitIdentity, NewCommit, RepoConfig, TreeEntry,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, LINK};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

static LAST_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([^>]+)>;\s*rel="last""#).expect("hardcoded regex is valid")
});

/// GitHub service using reqwest against the git-data endpoints
pub struct GitHubService {
    client: Client,
    api_base: String,
    endpoints: GitHubEndpoints,
    repo: RepoConfig,
}

#[derive(Deserialize)]
struct CommitListItem {
    sha: String,
    commit: CommitDetail,
}

#[derive(Deserialize)]
struct CommitDetail {
    message: String,
    tree: ShaRef,
    author: Signature,
    committer: Signature,
}

#[derive(Deserialize)]
struct Signature {
    name: String,
    email: String,
    date: DateTime<Utc>,
}

#[derive(Deserialize)]
struct ShaRef {
    sha: String,
}

#[derive(Deserialize)]
struct CreatedCommitResponse {
    sha: String,
    html_url: Option<String>,
}

#[derive(Serialize)]
struct CreateTreePayload<'a> {
    base_tree: &'a str,
    tree: &'a [TreeEntry],
}

#[derive(Serialize)]
struct UpdateRefPayload<'a> {
    sha: &'a str,
    force: bool,
}

impl From<CommitListItem> for CommitSummary {
    fn from(item: CommitListItem) -> Self {
        Self {
            sha: item.sha,
            tree_sha: item.commit.tree.sha,
            message: item.commit.message,
            author: GitIdentity {
                name: item.commit.author.name,
                email: item.commit.author.email,
            },
            committed_at: item.commit.committer.date,
        }
    }
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(
        token: &str,
        api_base: &str,
        endpoints: GitHubEndpoints,
        repo: RepoConfig,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| Error::Auth(format!("token is not a valid header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("lcsync/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            endpoints,
            repo,
        })
    }

    fn url(&self, template: &str, extra: &[(&str, &str)]) -> String {
        let mut vars = vec![
            ("owner", self.repo.owner.as_str()),
            ("repo", self.repo.repo.as_str()),
        ];
        vars.extend_from_slice(extra);
        format!("{}{}", self.api_base, render_template(template, &vars))
    }

    fn commits_url(&self, page: u32, per_page: u32) -> String {
        let branch = encode_branch(&self.repo.branch);
        let page = page.to_string();
        let per_page = per_page.to_string();
        self.url(
            &self.endpoints.read_commits,
            &[
                ("branch", branch.as_str()),
                ("page", page.as_str()),
                ("per_page", per_page.as_str()),
            ],
        )
    }

    fn ref_url(&self) -> String {
        let branch = encode_branch(&self.repo.branch);
        self.url(&self.endpoints.reference, &[("branch", branch.as_str())])
    }

    /// GET a commit listing, returning the items and the `Link` header
    ///
    /// An empty repository answers 409; that is reported as no commits.
    async fn get_commit_list(&self, url: &str) -> Result<(Vec<CommitListItem>, Option<String>)> {
        debug!(url, "listing commits");
        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::CONFLICT {
            return Ok((Vec::new(), None));
        }

        let response = response
            .error_for_status()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;
        let link = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let items = response.json().await?;
        Ok((items, link))
    }
}

/// Percent-encode a branch name segment by segment, keeping `/` literal
fn encode_branch(branch: &str) -> String {
    branch
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Extract the `rel="last"` URL from a GitHub `Link` header
pub fn last_page_url(link_header: &str) -> Option<String> {
    LAST_LINK
        .captures(link_header)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

#[async_trait]
impl VcsService for GitHubService {
    async fn list_commits(&self, page: u32, per_page: u32) -> Result<Vec<CommitSummary>> {
        let (items, _) = self.get_commit_list(&self.commits_url(page, per_page)).await?;
        Ok(items.into_iter().map(CommitSummary::from).collect())
    }

    async fn latest_commit(&self) -> Result<Option<CommitSummary>> {
        Ok(self.list_commits(1, 1).await?.into_iter().next())
    }

    async fn root_author(&self) -> Result<GitIdentity> {
        let (items, link) = self.get_commit_list(&self.commits_url(1, 1)).await?;

        // Single-page history carries no Link header; the tip is the root.
        let root = match link.as_deref().and_then(last_page_url) {
            Some(last) => self.get_commit_list(&last).await?.0.into_iter().next(),
            None => items.into_iter().next(),
        };

        root.map(|c| GitIdentity {
            name: c.commit.author.name,
            email: c.commit.author.email,
        })
        .ok_or_else(|| Error::EmptyRepository(self.repo.branch.clone()))
    }

    async fn create_tree(&self, base_tree: &str, entries: &[TreeEntry]) -> Result<String> {
        let url = self.url(&self.endpoints.tree, &[]);
        let payload = CreateTreePayload {
            base_tree,
            tree: entries,
        };

        let tree: ShaRef = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .json()
            .await?;

        debug!(sha = %tree.sha, entries = entries.len(), "created tree");
        Ok(tree.sha)
    }

    async fn create_commit(&self, commit: &NewCommit) -> Result<CreatedCommit> {
        let url = self.url(&self.endpoints.commit, &[]);

        let created: CreatedCommitResponse = self
            .client
            .post(&url)
            .json(commit)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .json()
            .await?;

        debug!(sha = %created.sha, "created commit");
        Ok(CreatedCommit {
            sha: created.sha,
            html_url: created.html_url,
        })
    }

    async fn update_ref(&self, sha: &str, force: bool) -> Result<()> {
        let url = self.ref_url();

        self.client
            .patch(&url)
            .json(&UpdateRefPayload { sha, force })
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        debug!(sha, branch = %self.repo.branch, "updated ref");
        Ok(())
    }

    fn repo(&self) -> &RepoConfig {
        &self.repo
    }
}
