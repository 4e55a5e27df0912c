//! LeetCode judge service implementation

use crate::auth::LeetCodeAuthConfig;
use crate::error::{Error, Result};
use crate::platform::JudgeService;
use crate::types::{QuestionData, SubmissionPage};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue, REFERER};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const QUESTION_DATA_QUERY: &str = "query questionData($titleSlug: String!) {\n  question(titleSlug: $titleSlug) {\n    questionId\n    questionFrontendId\n    title\n    titleSlug\n    content\n    isPaidOnly\n    difficulty\n    __typename\n  }\n}\n";

const QUESTION_NOTE_QUERY: &str = "query QuestionNote($titleSlug: String!) {\n  question(titleSlug: $titleSlug) {\n    questionId\n    note\n    __typename\n  }\n}\n";

/// LeetCode service using reqwest with session cookies
pub struct LeetCodeService {
    client: Client,
    graphql_url: String,
    submissions_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlRequest<'a> {
    operation_name: &'a str,
    variables: SlugVariables<'a>,
    query: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SlugVariables<'a> {
    title_slug: &'a str,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<QuestionEnvelope<T>>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct QuestionEnvelope<T> {
    question: Option<T>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct QuestionNote {
    #[serde(default)]
    note: Option<String>,
}

impl LeetCodeService {
    /// Create a new LeetCode service
    pub fn new(
        auth: &LeetCodeAuthConfig,
        graphql_url: &str,
        submissions_url: &str,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut cookie = HeaderValue::from_str(&auth.cookie_header())
            .map_err(|e| Error::Auth(format!("LeetCode cookies are not valid header values: {e}")))?;
        cookie.set_sensitive(true);
        headers.insert(COOKIE, cookie);
        headers.insert(
            "x-csrftoken",
            HeaderValue::from_str(&auth.csrf_token)
                .map_err(|e| Error::Auth(format!("CSRF token is not a valid header value: {e}")))?,
        );
        if let Ok(origin) = url::Url::parse(graphql_url) {
            if let Ok(referer) = HeaderValue::from_str(origin.origin().ascii_serialization().as_str())
            {
                headers.insert(REFERER, referer);
            }
        }

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("lcsync/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::LeetCodeApi(e.to_string()))?;

        Ok(Self {
            client,
            graphql_url: graphql_url.to_string(),
            submissions_url: submissions_url.to_string(),
        })
    }

    async fn question_query<T: DeserializeOwned>(
        &self,
        operation_name: &str,
        query: &str,
        title_slug: &str,
    ) -> Result<T> {
        let request = GraphQlRequest {
            operation_name,
            variables: SlugVariables { title_slug },
            query,
        };

        let response: GraphQlResponse<T> = self
            .client
            .post(&self.graphql_url)
            .json(&request)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::LeetCodeApi(e.to_string()))?
            .json()
            .await?;

        if let Some(err) = response.errors.first() {
            return Err(Error::LeetCodeApi(format!(
                "{operation_name}({title_slug}): {}",
                err.message
            )));
        }

        response
            .data
            .and_then(|d| d.question)
            .ok_or_else(|| Error::LeetCodeApi(format!("no question found for '{title_slug}'")))
    }
}

#[async_trait]
impl JudgeService for LeetCodeService {
    async fn submissions_page(
        &self,
        offset: u64,
        limit: u32,
        last_key: &str,
    ) -> Result<SubmissionPage> {
        let url = url::Url::parse_with_params(
            &self.submissions_url,
            &[
                ("offset", offset.to_string()),
                ("limit", limit.to_string()),
                ("lastkey", last_key.to_string()),
            ],
        )
        .map_err(|e| Error::Parse(format!("invalid submissions URL: {e}")))?;

        debug!(offset, limit, "fetching submissions page");
        let page = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::LeetCodeApi(e.to_string()))?
            .json()
            .await?;
        Ok(page)
    }

    async fn question_data(&self, title_slug: &str) -> Result<QuestionData> {
        self.question_query("questionData", QUESTION_DATA_QUERY, title_slug)
            .await
    }

    async fn question_note(&self, title_slug: &str) -> Result<Option<String>> {
        let note: QuestionNote = self
            .question_query("QuestionNote", QUESTION_NOTE_QUERY, title_slug)
            .await?;
        Ok(note.note.filter(|n| !n.is_empty()))
    }
}
