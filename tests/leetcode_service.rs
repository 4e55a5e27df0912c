//! LeetCode adapter tests against a mock HTTP server

use leetcode_sync::auth::LeetCodeAuthConfig;
use leetcode_sync::error::Error;
use leetcode_sync::platform::{JudgeService, LeetCodeService};
use mockito::{Matcher, Server};
use serde_json::json;

fn auth() -> LeetCodeAuthConfig {
    LeetCodeAuthConfig {
        csrf_token: "csrf".to_string(),
        session: "session".to_string(),
    }
}

fn service(server: &Server) -> LeetCodeService {
    LeetCodeService::new(
        &auth(),
        &format!("{}/graphql", server.url()),
        &format!("{}/api/submissions/", server.url()),
    )
    .unwrap()
}

#[tokio::test]
async fn test_submissions_page_sends_cursor_and_cookies() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/submissions/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("offset".into(), "40".into()),
            Matcher::UrlEncoded("limit".into(), "20".into()),
            Matcher::UrlEncoded("lastkey".into(), "abc".into()),
        ]))
        .match_header("cookie", "csrftoken=csrf; LEETCODE_SESSION=session")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "submissions_dump": [{
                    "id": 1,
                    "title": "Two Sum",
                    "title_slug": "two-sum",
                    "lang": "python3",
                    "status_display": "Accepted",
                    "timestamp": 1000,
                    "code": "class Solution: pass",
                    "runtime": "40 ms"
                }],
                "last_key": "def",
                "has_next": true
            })
            .to_string(),
        )
        .create_async()
        .await;

    let page = service(&server)
        .submissions_page(40, 20, "abc")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.last_key.as_deref(), Some("def"));
    assert!(page.has_next);
    assert_eq!(page.submissions_dump.len(), 1);
    let record = &page.submissions_dump[0];
    assert!(record.is_accepted());
    assert_eq!(record.title_slug, "two-sum");
    assert_eq!(record.timestamp, 1000);
}

#[tokio::test]
async fn test_malformed_page_is_an_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/submissions/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html>please log in</html>")
        .create_async()
        .await;

    let err = service(&server).submissions_page(0, 20, "").await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}

#[tokio::test]
async fn test_question_data() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql")
        .match_header("x-csrftoken", "csrf")
        .match_body(Matcher::PartialJson(json!({
            "operationName": "questionData",
            "variables": { "titleSlug": "two-sum" }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": { "question": {
                    "questionId": "1",
                    "questionFrontendId": "1",
                    "title": "Two Sum",
                    "titleSlug": "two-sum",
                    "content": "<p>Given an array</p>",
                    "isPaidOnly": false,
                    "difficulty": "Easy"
                }}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let question = service(&server).question_data("two-sum").await.unwrap();

    mock.assert_async().await;
    assert_eq!(question.question_id, "1");
    assert_eq!(question.difficulty, "Easy");
    assert_eq!(question.content.as_deref(), Some("<p>Given an array</p>"));
}

#[tokio::test]
async fn test_missing_question_is_an_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":{"question":null}}"#)
        .create_async()
        .await;

    let err = service(&server).question_data("nope").await.unwrap_err();
    assert!(matches!(err, Error::LeetCodeApi(_)));
}

#[tokio::test]
async fn test_graphql_errors_are_reported() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":null,"errors":[{"message":"rate limited"}]}"#)
        .create_async()
        .await;

    let err = service(&server).question_data("two-sum").await.unwrap_err();
    assert!(err.to_string().contains("rate limited"));
}

#[tokio::test]
async fn test_question_note_present() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({ "operationName": "QuestionNote" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":{"question":{"questionId":"1","note":"hash map"}}}"#)
        .create_async()
        .await;

    let note = service(&server).question_note("two-sum").await.unwrap();
    assert_eq!(note.as_deref(), Some("hash map"));
}

#[tokio::test]
async fn test_empty_note_is_none() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":{"question":{"questionId":"1","note":""}}}"#)
        .create_async()
        .await;

    assert!(service(&server).question_note("two-sum").await.unwrap().is_none());
}
