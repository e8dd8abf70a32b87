//! CLI integration tests
//!
//! These tests run the `deadui` binary against the fixture project.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

/// Get the path to the fixture project
fn project_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/unity_project")
}

fn deadui() -> Command {
    Command::cargo_bin("deadui").unwrap()
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    deadui()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deadui"))
        .stdout(predicate::str::contains("--graph"))
        .stdout(predicate::str::contains("--parallel"));
}

#[test]
fn test_cli_version() {
    deadui()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("deadui"));
}

#[test]
fn test_cli_requires_input() {
    deadui()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to analyze"));
}

// ============================================================================
// Report Tests
// ============================================================================

#[test]
fn test_cli_csv_report() {
    let output = deadui()
        .arg(project_path())
        .args(["--format", "csv", "--quiet"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let csv = String::from_utf8(output).unwrap();
    let lines: Vec<_> = csv.lines().collect();

    assert_eq!(lines[0], "UI Element,Status");
    assert_eq!(lines[1], "Assets/Scenes/MainMenu.unity::PlayButton,reachable");
    assert_eq!(lines.len(), 13);

    let first_dead = lines.iter().position(|l| l.ends_with(",dead")).unwrap();
    assert!(lines[first_dead..].iter().all(|l| l.ends_with(",dead")));
    assert!(lines.contains(&"Assets/Prefabs/UI/ShopPanel.prefab::UnknownButton(999),dead"));
}

#[test]
fn test_cli_json_report_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("report.json");

    deadui()
        .arg(project_path())
        .args(["--format", "json", "--quiet", "--output"])
        .arg(&report)
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(value["reachable_count"], 5);
    assert_eq!(value["dead_count"], 7);
    assert_eq!(value["batch"]["chunks_skipped"], 1);
}

#[test]
fn test_cli_terminal_report() {
    deadui()
        .arg(project_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Assets/Prefabs/UI/ShopPanel.prefab"))
        .stdout(predicate::str::contains("BuyButton"));
}

// ============================================================================
// Entry Selection Tests
// ============================================================================

#[test]
fn test_cli_explicit_entry() {
    deadui()
        .arg(project_path())
        .args(["--format", "csv", "--quiet"])
        .args(["--entry", "Assets/Prefabs/UI/ShopPanel.prefab::BuyButton"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Assets/Prefabs/UI/ShopPanel.prefab::BuyButton,reachable"))
        .stdout(predicate::str::contains("Purchase,reachable"))
        .stdout(predicate::str::contains("OnPlay,dead"));
}

#[test]
fn test_cli_keyword_without_fallback() {
    deadui()
        .arg(project_path())
        .args(["--format", "csv", "--quiet", "--keyword", "Nowhere", "--no-fallback"])
        .assert()
        .success()
        .stdout(predicate::str::contains(",reachable").not())
        .stdout(predicate::str::contains("OnPlay,dead"));
}

// ============================================================================
// Graph Artifact Tests
// ============================================================================

#[test]
fn test_cli_export_then_analyze_cached_graph() {
    let dir = tempfile::tempdir().unwrap();
    let graph = dir.path().join("ui_navigation_graph.gexf");

    let fresh = deadui()
        .arg(project_path())
        .args(["--format", "csv", "--quiet", "--export-graph"])
        .arg(&graph)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert!(graph.exists());

    let cached = deadui()
        .args(["--format", "csv", "--quiet", "--graph"])
        .arg(&graph)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(fresh, cached);
}

#[test]
fn test_cli_missing_graph_artifact() {
    deadui()
        .args(["--graph", "/nonexistent/graph.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Graph artifact not found"));
}

// ============================================================================
// Platform Gate Tests
// ============================================================================

#[test]
fn test_cli_android_project_is_analyzed() {
    deadui()
        .arg(project_path())
        .args(["--platform", "android", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UI Element,Status"));
}

#[test]
fn test_cli_non_android_project_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("Assets")).unwrap();
    fs::write(
        dir.path().join("Assets/Menu.prefab"),
        "--- !u!1 &1\nGameObject:\n  m_Name: Play\n",
    )
    .unwrap();

    deadui()
        .arg(dir.path())
        .args(["--platform", "android", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UI Element").not())
        .stderr(predicate::str::contains("Skipping analysis"));
}

#[test]
fn test_cli_platform_with_cached_graph_warns() {
    let dir = tempfile::tempdir().unwrap();
    let graph = dir.path().join("graph.json");
    fs::write(
        &graph,
        r#"{"nodes": [{"id": "MainMenu::Play"}, {"id": "OnPlay"}], "edges": [{"source": "MainMenu::Play", "target": "OnPlay"}]}"#,
    )
    .unwrap();

    deadui()
        .args(["--platform", "android", "--format", "csv", "--graph"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("OnPlay,reachable"))
        .stderr(predicate::str::contains("needs a project directory"));
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn test_cli_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("deadui.toml");
    fs::write(
        &config,
        r#"
[entry]
keywords = ["ShopPanel"]

[report]
format = "csv"
"#,
    )
    .unwrap();

    deadui()
        .arg(project_path())
        .arg("--quiet")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Assets/Prefabs/UI/ShopPanel.prefab::BuyButton,reachable"))
        .stdout(predicate::str::contains("Assets/Scenes/MainMenu.unity::PlayButton,dead"));
}
