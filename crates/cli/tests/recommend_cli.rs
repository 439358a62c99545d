//! CLI integration tests for `skillpath recommend` and `skillpath weights`.
//!
//! The oracle URL points at a closed port so every request takes the
//! fallback path.

use std::process::{Command, Output};

use anyhow::{Context, Result};
use skillpath_test_utils::TestFixture;

const DATASET: &str = r#"{
  "users": [
    {"id": "admin", "tenantId": "acme", "name": "Ada", "isAdmin": true,
     "recommendationWeights": {"skill_gap": 0.6, "collaborative": 0.4}},
    {"id": "emp", "tenantId": "acme", "name": "Eli", "skills": [{"skillId": "s1", "level": 2}]},
    {"id": "dana", "tenantId": "acme", "name": "Dana"},
    {"id": "gil", "tenantId": "globex", "name": "Gil"}
  ],
  "skills": [{"_id": "s1", "name": "Rust"}, {"_id": "s2", "name": "SQL"}],
  "resources": [
    {"id": "r1", "title": "Rust Book", "provider": "Unknown", "type": "book", "skillId": "s1", "createdBy": "dana"},
    {"id": "r2", "title": "SQL Basics", "type": "course", "skillId": "s2", "createdBy": "dana"},
    {"id": "r3", "title": "Borrow Checker Tour", "provider": "Udemy", "type": "video", "skillId": "s1", "createdBy": "dana"},
    {"id": "g1", "title": "Globex Only", "provider": "Internal", "skillId": "s1", "createdBy": "gil"}
  ]
}"#;

fn closed_port_url() -> Result<String> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(format!("http://127.0.0.1:{port}"))
}

fn run(fixture: &TestFixture, args: &[&str]) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_skillpath"))
        .args(args)
        .env("HOME", fixture.home_path())
        .env_remove("SKILLPATH_ORACLE_URL")
        .env_remove("SKILLPATH_ORACLE_TIMEOUT_MS")
        .env_remove("SKILLPATH_RECOMMEND_LIMIT")
        .env_remove("SKILLPATH_WEIGHTS_FILE")
        .env_remove("SKILLPATH_DATA")
        .output()
        .context("failed to execute skillpath")?;

    if cfg!(debug_assertions) {
        eprintln!("stdout:\n{}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr:\n{}", String::from_utf8_lossy(&output.stderr));
    }
    Ok(output)
}

#[test]
fn recommend_falls_back_when_oracle_is_down() -> Result<()> {
    let fixture = TestFixture::new()?;
    let data = fixture.write_file("dataset.json", DATASET)?;
    let url = closed_port_url()?;

    let output = run(
        &fixture,
        &[
            "recommend",
            "--data",
            data.to_str().context("utf-8 path")?,
            "--user",
            "emp",
            "--tenant",
            "acme",
            "--target",
            "s2:4",
            "--oracle-url",
            &url,
            "--timeout-ms",
            "500",
            "--format",
            "json",
        ],
    )?;
    assert!(output.status.success(), "status: {:?}", output.status);

    let body: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let recs = body["recommendations"]
        .as_array()
        .context("recommendations array")?;
    assert_eq!(recs.len(), 3);
    for rec in recs {
        let id = rec["resourceId"].as_str().unwrap_or_default();
        assert!(["r1", "r2", "r3"].contains(&id), "unexpected {id}");
        assert_ne!(rec["provider"], "Unknown");
        assert_eq!(rec["author"], "Dana");
    }
    Ok(())
}

#[test]
fn recommend_respects_config_file_limit() -> Result<()> {
    let fixture = TestFixture::new()?;
    let data = fixture.write_file("dataset.json", DATASET)?;
    let url = closed_port_url()?;
    fixture.write_config(&format!(
        "[oracle]\nurl = \"{url}\"\ntimeout_ms = 500\n\n[recommend]\nlimit = 2\n"
    ))?;

    let output = run(
        &fixture,
        &[
            "recommend",
            "--data",
            data.to_str().context("utf-8 path")?,
            "--user",
            "emp",
            "--tenant",
            "acme",
            "--format",
            "json",
        ],
    )?;
    assert!(output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(body["recommendations"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[test]
fn recommend_unknown_user_fails() -> Result<()> {
    let fixture = TestFixture::new()?;
    let data = fixture.write_file("dataset.json", DATASET)?;
    let url = closed_port_url()?;

    let output = run(
        &fixture,
        &[
            "recommend",
            "--data",
            data.to_str().context("utf-8 path")?,
            "--user",
            "ghost",
            "--tenant",
            "acme",
            "--oracle-url",
            &url,
        ],
    )?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("user not found: ghost"));
    Ok(())
}

#[test]
fn weights_reports_admin_tier() -> Result<()> {
    let fixture = TestFixture::new()?;
    let data = fixture.write_file("dataset.json", DATASET)?;

    let output = run(
        &fixture,
        &[
            "weights",
            "--data",
            data.to_str().context("utf-8 path")?,
            "--tenant",
            "acme",
            "--format",
            "json",
        ],
    )?;
    assert!(output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(body["tier"], "admin");
    assert_eq!(body["weights"]["skill_gap"], 0.6);
    Ok(())
}

#[test]
fn weights_fall_back_to_legacy_file_then_defaults() -> Result<()> {
    let fixture = TestFixture::new()?;
    let data = fixture.write_file("dataset.json", DATASET)?;
    let data = data.to_str().context("utf-8 path")?.to_string();

    let output = run(
        &fixture,
        &["weights", "--data", &data, "--tenant", "globex", "--format", "json"],
    )?;
    let body: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(body["tier"], "default");

    fixture.write_weights_file(r#"{"weights": {"resource_type": 1.0}}"#)?;
    let output = run(
        &fixture,
        &["weights", "--data", &data, "--tenant", "globex", "--format", "json"],
    )?;
    let body: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(body["tier"], "legacy");
    assert_eq!(body["weights"]["resource_type"], 1.0);
    Ok(())
}
