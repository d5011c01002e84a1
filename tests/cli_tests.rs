//! CLI surface behavior.

mod common;

use std::fs;

use assert_cmd::Command;
use common::fixtures::write_constant_model;
use predicates::prelude::*;

fn write_config(dir: &std::path::Path, models: &[phishscout::config::ModelConfig]) -> String {
    let mut config = String::from(
        r#"[http]
user_agent = "phishscout-test/0.1"
request_timeout_secs = 2

[signals]
dns_timeout_secs = 1
tls_timeout_secs = 1
whois_timeout_secs = 1
geo_timeout_secs = 1
reputation_timeout_secs = 1
geo_endpoint = "http://127.0.0.1:9/json"
reputation_endpoint = "http://127.0.0.1:9/v1/host/"
"#,
    );
    for model in models {
        config.push_str(&format!(
            "\n[[models]]\nname = \"{}\"\nartifact = \"{}\"\nschema = \"{}\"\nfeatures = \"content\"\n",
            model.name, model.artifact, model.schema
        ));
    }
    let path = dir.join("phishscout.toml");
    fs::write(&path, config).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_help_shows_usage() {
    Command::cargo_bin("phishscout")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("URL to analyze"));
}

#[test]
fn test_missing_url_fails() {
    Command::cargo_bin("phishscout")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("a URL is required"));
}

#[test]
fn test_whitespace_url_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let models = vec![write_constant_model(dir.path(), "content", 0.9, &["url_len"])];
    let config_path = write_config(dir.path(), &models);

    Command::cargo_bin("phishscout")
        .unwrap()
        .args(["--config", &config_path, "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("URL cannot be empty"));
}

#[test]
fn test_init_creates_config_file() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("phishscout")
        .unwrap()
        .current_dir(dir.path())
        .arg("--init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created default configuration file"));

    assert!(dir.path().join("config/phishscout.toml").exists());
}

#[test]
fn test_offline_analysis_emits_json_verdict() {
    let dir = tempfile::tempdir().unwrap();
    let models = vec![write_constant_model(dir.path(), "content", 0.9, &["url_len"])];
    let config_path = write_config(dir.path(), &models);

    Command::cargo_bin("phishscout")
        .unwrap()
        .args([
            "--config",
            &config_path,
            "--no-signals",
            "-f",
            "json",
            "http://login.example.com/admin",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"label\": \"Phishing\""))
        .stdout(predicate::str::contains("\"model\": \"content\""));
}

#[test]
fn test_offline_analysis_text_report() {
    let dir = tempfile::tempdir().unwrap();
    let models = vec![write_constant_model(dir.path(), "content", 0.2, &["url_len"])];
    let config_path = write_config(dir.path(), &models);

    Command::cargo_bin("phishscout")
        .unwrap()
        .args([
            "--config",
            &config_path,
            "--no-signals",
            "--show-features",
            "http://example.com/",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Result: Legitimate"))
        .stdout(predicate::str::contains("Feature vector (content):"))
        .stdout(predicate::str::contains("url_len ="));
}

#[test]
fn test_mismatched_schema_is_fatal_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    let models = vec![write_constant_model(dir.path(), "content", 0.9, &["url_len"])];
    // Widen the schema so it no longer matches the artifact's input width.
    fs::write(&models[0].schema, r#"["url_len", "nb_dots"]"#).unwrap();
    let config_path = write_config(dir.path(), &models);

    Command::cargo_bin("phishscout")
        .unwrap()
        .args(["--config", &config_path, "--no-signals", "http://example.com/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("schema lists 2 columns"));
}

#[test]
fn test_unknown_output_format_rejected() {
    Command::cargo_bin("phishscout")
        .unwrap()
        .args(["-f", "yaml", "http://example.com/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Output format must be"));
}
