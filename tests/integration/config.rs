//! Tests for `lerna-changelog config`

use super::common::TestContext;
use predicates::prelude::*;

#[test]
fn test_config_prints_resolved_configuration() {
    let ctx = TestContext::new();
    ctx.write_manifest(
        "package.json",
        serde_json::json!({
            "version": "1.0.0-package.0",
            "changelog": { "repo": "foo/package", "nextVersionFromMetadata": true }
        }),
    );
    ctx.write_manifest(
        "lerna.json",
        serde_json::json!({ "changelog": { "repo": "foo/lerna", "nextVersion": "next" } }),
    );

    let output = ctx.changelog().arg("config").output().unwrap();
    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["repo"]["name"], "foo/package");
    assert_eq!(config["repo"]["type"], "github");
    assert_eq!(config["repo"]["protocol"], "https");
    assert_eq!(config["repo"]["domain"], "github.com");
    assert_eq!(config["nextVersion"], "v1.0.0-package.0");
}

#[test]
fn test_config_with_root_flag() {
    let ctx = TestContext::new();
    ctx.write_manifest(
        "lerna.json",
        serde_json::json!({ "version": "4.2.0", "changelog": { "repo": "a/b" } }),
    );

    let root = ctx.temp.path().to_path_buf();
    let other = TestContext::new();
    other
        .changelog()
        .arg("--root")
        .arg(&root)
        .arg("--next-version-from-metadata")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"nextVersion\": \"v4.2.0\""));
}

#[test]
fn test_config_missing_configuration_fails() {
    let ctx = TestContext::new();

    ctx.changelog()
        .arg("config")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no changelog configuration found"));
}

#[test]
fn test_issue_url_requires_credential() {
    let ctx = TestContext::new();
    ctx.write_manifest(
        "package.json",
        serde_json::json!({ "changelog": { "repo": "a/b" } }),
    );

    ctx.changelog()
        .arg("issue-url")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Must provide GITHUB_AUTH"));
}

#[test]
fn test_issue_url_gitlab() {
    let ctx = TestContext::new();
    ctx.write_manifest(
        "package.json",
        serde_json::json!({
            "changelog": { "repo": { "type": "gitlab", "name": "group/app", "domain": "gitlab.example.com" } }
        }),
    );

    ctx.changelog()
        .env("GITHUB_AUTH", "secret")
        .arg("issue-url")
        .assert()
        .success()
        .stdout(predicate::str::diff("https://gitlab.example.com/group/app/-/issues/\n"));
}
