//! CLI integration tests
//!
//! Run the built binary against files in a temp directory and check its
//! output, exit status and the files it writes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const SAMPLE: &str = "0 HEAD\n1 SOUR OTHER_APP\n0 @I1@ INDI\n1 NAME John /Smith/\n1 FAMS @F1@\n0 @F1@ FAM\n1 HUSB @I1@\n1 NOTE @N1@\n0 @N1@ NOTE A note long enough that a forty character budget must split it\n0 TRLR";

fn write_input(temp_dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = temp_dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run(dir: &Path, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_gedcom-cli");
    Command::new(cli_bin)
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

#[test]
fn test_cli_normalize_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    write_input(&temp_dir, "in.ged", SAMPLE);

    let output = run(temp_dir.path(), &["normalize", "in.ged"]);

    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("0 HEAD\n1 SOUR OTHER_APP\n1 GEDC\n"));
    assert!(stdout.ends_with("\n0 TRLR"));
}

#[test]
fn test_cli_normalize_with_config_to_file() {
    let temp_dir = TempDir::new().unwrap();
    write_input(&temp_dir, "in.ged", SAMPLE);
    write_input(
        &temp_dir,
        "codec.toml",
        "max_line_len = 40\nsource_name = \"GEDCOM_CLI_TEST\"\n",
    );

    let output = run(
        temp_dir.path(),
        &["--config", "codec.toml", "normalize", "in.ged", "-o", "out.ged"],
    );

    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("out.ged"));

    let written = fs::read_to_string(temp_dir.path().join("out.ged")).unwrap();
    assert!(written.contains("1 SOUR GEDCOM_CLI_TEST"));
    assert!(written.contains("\n1 CONC "));
    for line in written.lines() {
        assert!(line.chars().count() <= 40, "too long: {line:?}");
    }
}

#[test]
fn test_cli_tree_exports_json() {
    let temp_dir = TempDir::new().unwrap();
    write_input(&temp_dir, "in.ged", SAMPLE);

    let output = run(temp_dir.path(), &["tree", "in.ged", "--output", "tree.json"]);

    assert!(output.status.success());
    let json = fs::read_to_string(temp_dir.path().join("tree.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["name"], "gedcom");
    assert_eq!(value["content"]["children"][0]["name"], "header");
    assert_eq!(value["content"]["children"][1]["name"], "individual");
}

#[test]
fn test_cli_check_clean_file_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    write_input(&temp_dir, "in.ged", SAMPLE);

    let output = run(temp_dir.path(), &["check", "in.ged"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("3 records, 0 malformed, 0 unresolved"));
}

#[test]
fn test_cli_check_reports_problems_and_fails() {
    let temp_dir = TempDir::new().unwrap();
    write_input(
        &temp_dir,
        "bad.ged",
        "0 HEAD\n0 @F1@ FAM\n1 WIFE @I404@\n0 @N1@ NOTE x\n?? nonsense\n0 TRLR",
    );

    let output = run(temp_dir.path(), &["check", "bad.ged"]);

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Malformed line 5"));
    assert!(stdout.contains("@I404@"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("2 problem(s) found"));
}

#[test]
fn test_cli_strict_read_fails_on_dangling_pointer() {
    let temp_dir = TempDir::new().unwrap();
    write_input(&temp_dir, "bad.ged", "0 HEAD\n0 @F1@ FAM\n1 WIFE @I404@\n0 TRLR");

    let output = run(temp_dir.path(), &["normalize", "bad.ged"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_UNRESOLVED_REFERENCE"));
}

#[test]
fn test_cli_invalid_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    write_input(&temp_dir, "in.ged", SAMPLE);
    write_input(&temp_dir, "codec.toml", "max_line_len = 8\n");

    let output = run(
        temp_dir.path(),
        &["--config", "codec.toml", "normalize", "in.ged"],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_CONFIG"));
}
