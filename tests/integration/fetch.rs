//! Tests for `lerna-changelog issue` and `lerna-changelog user`

use super::common::TestContext;
use assert_fs::prelude::*;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Point the project at a GitLab instance served by `server`
fn gitlab_project(ctx: &TestContext, server: &MockServer, cache_dir: Option<&str>) {
    ctx.write_manifest(
        "package.json",
        serde_json::json!({
            "changelog": {
                "repo": {
                    "type": "gitlab",
                    "name": "group/app",
                    "protocol": "http",
                    "domain": server.address().to_string()
                },
                "cacheDir": cache_dir
            }
        }),
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_issue_from_gitlab_is_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/group%2Fapp/issues/7"))
        .and(header("authorization", "bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "iid": 7,
            "title": "Crash on start",
            "labels": ["bug"],
            "author": { "username": "al", "web_url": "https://gitlab.com/al" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = TestContext::new();
    gitlab_project(&ctx, &server, Some(".changelog"));

    for _ in 0..2 {
        let mut cmd = ctx.changelog();
        cmd.env("GITHUB_AUTH", "secret").args(["issue", "7"]);
        let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
            .await
            .unwrap();
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

        let issue: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(issue["number"], 7);
        assert_eq!(issue["labels"], serde_json::json!([{ "name": "bug" }]));
        assert_eq!(issue["author"]["login"], "al");
        assert_eq!(issue["author"]["url"], "https://gitlab.com/al");
    }

    ctx.temp
        .child(".changelog/github")
        .assert(predicates::path::is_dir());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_user_placeholder_for_unknown_gitlab_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/users"))
        .and(query_param("username", "ghost"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let ctx = TestContext::new();
    gitlab_project(&ctx, &server, None);

    let mut cmd = ctx.changelog();
    cmd.env("GITHUB_AUTH", "secret").args(["user", "ghost"]);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();
    assert!(output.status.success());

    let user: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(user["login"], "ghost");
    assert_eq!(user["name"], "ghost");
    assert_eq!(user["url"], format!("http://{}/ghost", server.address()));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_issue_not_found_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/group%2Fapp/issues/404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({ "message": "404 Not found" })),
        )
        .mount(&server)
        .await;

    let ctx = TestContext::new();
    gitlab_project(&ctx, &server, Some(".changelog"));

    let mut cmd = ctx.changelog();
    cmd.env("GITHUB_AUTH", "secret").args(["issue", "404"]);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("404"), "stderr: {}", stderr);
    assert!(stderr.contains("issues/404"), "stderr: {}", stderr);

    // Error responses are never cached
    let cached: Vec<_> = std::fs::read_dir(ctx.temp.path().join(".changelog/github"))
        .unwrap()
        .collect();
    assert!(cached.is_empty());
}
