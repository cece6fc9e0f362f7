use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

const CORPUS: &str = r#"[
    {
        "id": "PMC1001",
        "title": "Microgravity induces pelvic bone loss through osteoclastic activity",
        "abstract": "Bone density decreased in mice after spaceflight exposure.",
        "category": "bone",
        "organism": "Mus musculus",
        "tags": ["bone", "microgravity"],
        "year": 2015
    },
    {
        "id": "PMC1002",
        "title": "Plant growth and gravitropism in Arabidopsis seedlings",
        "abstract": "Root orientation responses under altered gravity.",
        "year": 2019
    }
]"#;

fn write_corpus(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("corpus.json");
    std::fs::write(&path, CORPUS).unwrap();
    path
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("sbk").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("sbk").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_search_json_output() {
    let dir = tempdir().unwrap();
    let corpus = write_corpus(dir.path());

    let mut cmd = Command::cargo_bin("sbk").unwrap();
    cmd.args([
        "--data",
        corpus.to_str().unwrap(),
        "--format",
        "json",
        "search",
        "bone loss",
    ]);
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["hits"][0]["id"], Value::String("PMC1001".to_string()));
    assert_eq!(json["total_candidates"], Value::from(2));
}

#[test]
fn test_data_path_via_environment() {
    let dir = tempdir().unwrap();
    let corpus = write_corpus(dir.path());

    let mut cmd = Command::cargo_bin("sbk").unwrap();
    cmd.env("SBK_DATA", &corpus)
        .args(["--format", "json", "stats"]);
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total_publications"], Value::from(2));
}

#[test]
fn test_search_with_category_filter() {
    let dir = tempdir().unwrap();
    let corpus = write_corpus(dir.path());

    let mut cmd = Command::cargo_bin("sbk").unwrap();
    cmd.args([
        "--data",
        corpus.to_str().unwrap(),
        "--format",
        "json",
        "search",
        "--category",
        "plants",
    ]);
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let hits = json["hits"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["id"], Value::String("PMC1002".to_string()));
}

#[test]
fn test_missing_data_errors_as_json() {
    let mut cmd = Command::cargo_bin("sbk").unwrap();
    cmd.env_remove("SBK_DATA")
        .args(["--format", "json", "stats"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"error\":true"));
}

#[test]
fn test_missing_data_errors_human() {
    let mut cmd = Command::cargo_bin("sbk").unwrap();
    cmd.env_remove("SBK_DATA")
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_unknown_filter_field_rejected() {
    let dir = tempdir().unwrap();
    let corpus = write_corpus(dir.path());

    let mut cmd = Command::cargo_bin("sbk").unwrap();
    cmd.args([
        "--data",
        corpus.to_str().unwrap(),
        "search",
        "bone",
        "--filter",
        "colour=red",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("colour"));
}

#[test]
fn test_stats_human_output() {
    let dir = tempdir().unwrap();
    let corpus = write_corpus(dir.path());

    let mut cmd = Command::cargo_bin("sbk").unwrap();
    cmd.args(["--data", corpus.to_str().unwrap(), "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Publications"));
}

#[test]
fn test_list_pages_through_corpus() {
    let dir = tempdir().unwrap();
    let corpus = write_corpus(dir.path());

    let mut cmd = Command::cargo_bin("sbk").unwrap();
    cmd.args([
        "--data",
        corpus.to_str().unwrap(),
        "--format",
        "json",
        "list",
        "--offset",
        "1",
        "--limit",
        "10",
    ]);
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total"], Value::from(2));
    let page = json["publications"].as_array().unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["id"], Value::String("PMC1002".to_string()));
}

#[test]
fn test_corrupt_corpus_fails_cleanly() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corpus.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut cmd = Command::cargo_bin("sbk").unwrap();
    cmd.args(["--data", path.to_str().unwrap(), "stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
