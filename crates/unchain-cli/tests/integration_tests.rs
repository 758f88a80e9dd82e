//! Integration tests for the unchain CLI
//!
//! These tests verify the CLI behavior end-to-end

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Helper function to create a test CLI command
#[allow(deprecated)]
fn cli() -> Command {
    let mut cmd = Command::cargo_bin("unchain").unwrap();
    cmd.env_remove("RUST_LOG").arg("--no-color");
    cmd
}

/// Temporary project with one chained and one clean file
fn create_test_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("chained.js"), "var a = b = c;\n").unwrap();
    fs::write(temp_dir.path().join("clean.js"), "let x = 1;\nx = 2;\n").unwrap();
    temp_dir
}

#[test]
fn test_help_command() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("unchain reports chained assignments"))
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_version_command() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(VERSION));
}

#[test]
fn test_version_detailed() {
    cli()
        .args(["version", "--detailed"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("unchain {VERSION}")))
        .stdout(predicate::str::contains("Build information:"));
}

#[test]
fn test_lint_clean_file() {
    let temp_dir = create_test_project();
    cli()
        .arg("lint")
        .arg(temp_dir.path().join("clean.js"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"))
        .stdout(predicate::str::contains("Files checked: 1"));
}

#[test]
fn test_lint_reports_chained_assignment() {
    let temp_dir = create_test_project();
    cli()
        .arg("lint")
        .arg(temp_dir.path().join("chained.js"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "warning[style/no-chained-assignments]: chained assignment detected",
        ))
        .stdout(predicate::str::contains("chained.js:1:9]"))
        .stdout(predicate::str::contains("Warnings: 1"));
}

#[test]
fn test_lint_directory() {
    let temp_dir = create_test_project();
    fs::create_dir(temp_dir.path().join("node_modules")).unwrap();
    fs::write(temp_dir.path().join("node_modules/dep.js"), "p = q = r;\n").unwrap();

    cli()
        .args(["lint", "--format", "compact"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("unchain: 2 files, 1 issues"))
        .stdout(predicate::str::contains("dep.js").not());
}

#[test]
fn test_error_on_warnings() {
    let temp_dir = create_test_project();
    cli()
        .args(["lint", "--error-on-warnings"])
        .arg(temp_dir.path().join("chained.js"))
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_parse_error_fails() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("broken.js");
    fs::write(&file, "var = 1;\n").unwrap();

    cli()
        .arg("lint")
        .arg(&file)
        .assert()
        .failure()
        .stdout(predicate::str::contains("correctness/parse-error"));
}

#[test]
fn test_json_output() {
    let temp_dir = create_test_project();
    let output = cli()
        .args(["lint", "--format", "json"])
        .arg(temp_dir.path().join("chained.js"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["files_checked"], 1);
    assert_eq!(json["summary"]["warnings"], 1);
    assert_eq!(json["issues"][0]["rule_id"], "style/no-chained-assignments");
    assert_eq!(json["issues"][0]["location"]["line"], 1);
    assert_eq!(json["issues"][0]["location"]["column"], 9);
}

#[test]
fn test_write_splits_chain() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("app.js");
    fs::write(&file, "a = b = c = d; // keep\n").unwrap();

    cli()
        .args(["lint", "--write"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixes applied: 2"));

    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "a = d;\nc = d;\nb = d; // keep\n"
    );
}

#[test]
fn test_write_with_pass_cap() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("app.js");
    fs::write(&file, "a = b = c = d;\n").unwrap();

    cli()
        .args(["lint", "--write", "--max-passes", "1"])
        .arg(&file)
        .assert()
        .failure()
        .code(1);

    assert_eq!(fs::read_to_string(&file).unwrap(), "a = c = d;\nb = d;\n");
}

#[test]
fn test_dry_run_prints_diff() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("app.js");
    fs::write(&file, "x = y = 0;\n").unwrap();

    cli()
        .args(["lint", "--dry-run"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("-x = y = 0;"))
        .stdout(predicate::str::contains("+x = 0;"))
        .stdout(predicate::str::contains("+y = 0;"));

    assert_eq!(fs::read_to_string(&file).unwrap(), "x = y = 0;\n");
}

#[test]
fn test_write_and_dry_run_conflict() {
    cli()
        .args(["lint", "--write", "--dry-run", "a.js"])
        .assert()
        .failure();
}

#[test]
fn test_config_disables_rule() {
    let temp_dir = create_test_project();
    fs::write(
        temp_dir.path().join(".unchainrc.json"),
        r#"{ "linter": { "rules": { "style/no-chained-assignments": "off" } } }"#,
    )
    .unwrap();

    cli()
        .args(["lint", "--error-on-warnings"])
        .arg(temp_dir.path().join("chained.js"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_no_files_found() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("notes.txt"), "a = b = c;\n").unwrap();

    cli()
        .arg("lint")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No JavaScript files found"));
}

#[test]
fn test_rules_list() {
    cli()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("style/no-chained-assignments"))
        .stdout(predicate::str::contains("correctness/parse-error"))
        .stdout(predicate::str::contains("Total: 2 rules"));
}

#[test]
fn test_rules_list_by_category() {
    cli()
        .args(["rules", "--category", "style"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 1 rules"))
        .stdout(predicate::str::contains("correctness/parse-error").not());
}

#[test]
fn test_rules_explain() {
    cli()
        .args(["rules", "explain", "style/no-chained-assignments"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rule: style/no-chained-assignments"))
        .stdout(predicate::str::contains("Autofix available"));
}

#[test]
fn test_rules_explain_unknown() {
    cli()
        .args(["rules", "explain", "style/nope"])
        .assert()
        .failure();
}

#[test]
fn test_config_init() {
    let temp_dir = TempDir::new().unwrap();

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".unchainrc.json"));

    let content = fs::read_to_string(temp_dir.path().join(".unchainrc.json")).unwrap();
    assert!(content.contains("style/no-chained-assignments"));

    // A second run must not overwrite without --force
    cli()
        .current_dir(temp_dir.path())
        .args(["config", "init"])
        .assert()
        .failure();

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_config_init_toml() {
    let temp_dir = TempDir::new().unwrap();

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "init", "--format", "toml"])
        .assert()
        .success();

    let content = fs::read_to_string(temp_dir.path().join(".unchainrc.toml")).unwrap();
    assert!(content.contains("[linter]"));
}

#[test]
fn test_config_show_resolved() {
    let temp_dir = TempDir::new().unwrap();
    cli()
        .current_dir(temp_dir.path())
        .args(["config", "show", "--resolved"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"maxPasses\": 10"));
}

#[test]
fn test_config_validate_rejects_unknown_rule() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("unchain.json");
    fs::write(&config, r#"{ "linter": { "rules": { "style/nope": "error" } } }"#).unwrap();

    cli()
        .args(["config", "validate"])
        .arg(&config)
        .assert()
        .failure();
}

#[test]
fn test_config_schema() {
    cli()
        .args(["config", "schema"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"linter\""));
}
