//! LeetCode authentication

use crate::error::{Error, Result};
use reqwest::Client;
use reqwest::header::COOKIE;
use serde::Deserialize;
use std::env;

const CSRF_VARS: [&str; 2] = ["INPUT_LEETCODE-CSRF-TOKEN", "LEETCODE_CSRF_TOKEN"];
const SESSION_VARS: [&str; 2] = ["INPUT_LEETCODE-SESSION", "LEETCODE_SESSION"];

const USER_STATUS_QUERY: &str =
    "query globalData {\n  userStatus {\n    username\n    isSignedIn\n  }\n}\n";

/// LeetCode session credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeetCodeAuthConfig {
    /// Value of the `csrftoken` cookie
    pub csrf_token: String,
    /// Value of the `LEETCODE_SESSION` cookie
    pub session: String,
}

impl LeetCodeAuthConfig {
    /// `Cookie` header carrying both credentials
    pub fn cookie_header(&self) -> String {
        format!(
            "csrftoken={}; LEETCODE_SESSION={}",
            self.csrf_token, self.session
        )
    }
}

fn first_set(vars: &[&str], lookup: &impl Fn(&str) -> Option<String>) -> Option<String> {
    vars.iter()
        .find_map(|&var| lookup(var).filter(|v| !v.trim().is_empty()))
}

/// Read LeetCode credentials via `lookup`; both cookies are required
pub fn leetcode_auth_from(lookup: impl Fn(&str) -> Option<String>) -> Result<LeetCodeAuthConfig> {
    match (first_set(&CSRF_VARS, &lookup), first_set(&SESSION_VARS, &lookup)) {
        (Some(csrf_token), Some(session)) => Ok(LeetCodeAuthConfig {
            csrf_token,
            session,
        }),
        _ => Err(Error::Auth(
            "Unable to get LeetCode credentials. Set LEETCODE_CSRF_TOKEN and LEETCODE_SESSION"
                .to_string(),
        )),
    }
}

/// Get LeetCode credentials from the process environment
pub fn get_leetcode_auth() -> Result<LeetCodeAuthConfig> {
    leetcode_auth_from(|k| env::var(k).ok())
}

#[derive(Deserialize)]
struct GlobalData {
    data: Option<UserStatusEnvelope>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserStatusEnvelope {
    user_status: UserStatus,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserStatus {
    username: Option<String>,
    is_signed_in: bool,
}

/// Test LeetCode session cookies, returning the signed-in username
pub async fn test_leetcode_auth(config: &LeetCodeAuthConfig, graphql_url: &str) -> Result<String> {
    let response: GlobalData = Client::new()
        .post(graphql_url)
        .header(COOKIE, config.cookie_header())
        .header("x-csrftoken", &config.csrf_token)
        .json(&serde_json::json!({
            "operationName": "globalData",
            "variables": {},
            "query": USER_STATUS_QUERY,
        }))
        .send()
        .await?
        .error_for_status()
        .map_err(|e| Error::Auth(format!("LeetCode rejected the session: {e}")))?
        .json()
        .await?;

    match response.data.map(|d| d.user_status) {
        Some(UserStatus {
            username: Some(name),
            is_signed_in: true,
        }) => Ok(name),
        _ => Err(Error::Auth("LeetCode session is not signed in".to_string())),
    }
}
