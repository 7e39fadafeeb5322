//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const NURSERY: &str = "Twinkle, twinkle, little star. I am not a teapot. \
                       Carrots are healthy. My name is Bob! Why?";

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

fn write_file(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

/// Run `score --json` on a file and parse the JSON output.
fn score_json(dir: &Path, file: &str, extra: &[&str]) -> Value {
    let output = cmd()
        .args(["-C", dir.to_str().unwrap(), "score", file, "--json"])
        .args(extra)
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn no_arguments_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn long_help_lists_environment_variables() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("FLESCH_INDEX_LOG_DIR"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_json_outputs_valid_json() {
    let output = cmd().arg("info").arg("--json").assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: Value =
        serde_json::from_str(&stdout).expect("info --json should output valid JSON");

    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn quiet_flag_accepted() {
    cmd().args(["-q", "info"]).assert().success();
}

#[test]
fn multiple_verbose_flags_accepted() {
    cmd().args(["-vv", "info"]).assert().success();
}

#[test]
fn color_never_accepted() {
    cmd().args(["--color", "never", "info"]).assert().success();
}

// =============================================================================
// Score: text output
// =============================================================================

#[test]
fn score_prints_name_score_band_and_grade() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(tmp.path(), "nursery.txt", NURSERY);

    cmd()
        .args(["--color", "never", "score", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Document"))
        .stdout(predicate::str::contains("nursery.txt"))
        .stdout(predicate::str::contains("Flesch Reading Ease Score"))
        .stdout(predicate::str::contains("108.83"))
        .stdout(predicate::str::contains("very easy"))
        .stdout(predicate::str::contains("Flesch–Kincaid Grade Level"))
        .stdout(predicate::str::contains("-1.08"));
}

#[test]
fn score_passes_min_score() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(tmp.path(), "nursery.txt", NURSERY);

    cmd()
        .args(["score", path.to_str().unwrap(), "--min-score", "60"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS:"));
}

#[test]
fn score_below_min_score_fails() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(
        tmp.path(),
        "dense.txt",
        "Comprehensive organizational restructuring necessitated interdepartmental deliberation.",
    );

    cmd()
        .args(["score", path.to_str().unwrap(), "--min-score", "60"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("min: 60"));
}

// =============================================================================
// Score: errors
// =============================================================================

#[test]
fn score_missing_file_fails() {
    cmd()
        .args(["score", "definitely-not-here.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("definitely-not-here.txt"));
}

#[test]
fn score_text_without_sentences_fails() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(tmp.path(), "fragment.txt", "no terminator anywhere");

    cmd()
        .args(["score", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no sentences"));
}

#[test]
fn score_respects_input_limit() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "nursery.txt", NURSERY);
    write_file(tmp.path(), ".flesch-index.toml", "max_input_bytes = 10\n");

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "score", "nursery.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

#[test]
fn strip_flags_conflict() {
    cmd()
        .args(["score", "a.md", "--strip-markdown", "--no-strip-markdown"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

// =============================================================================
// Score: JSON output
// =============================================================================

#[test]
fn score_json_reports_counts() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "nursery.txt", NURSERY);

    let json = score_json(tmp.path(), "nursery.txt", &[]);
    assert_eq!(json["name"], "nursery.txt");
    assert_eq!(json["sentences"], 5);
    assert_eq!(json["words"], 17);
    assert_eq!(json["unique_words"], 16);
    assert_eq!(json["syllables"], 19);
    assert_eq!(json["level"], "very-easy");
    assert!((json["score"].as_f64().unwrap() - 108.831_059).abs() < 1e-4);
    assert!(json.get("analysis").is_none());
}

#[test]
fn markdown_is_stripped_by_extension() {
    let tmp = TempDir::new().unwrap();
    let text = "# Heading Here\n\nCarrots are healthy.\n\n```\ncode. more.\n```\n";
    write_file(tmp.path(), "notes.md", text);

    let stripped = score_json(tmp.path(), "notes.md", &[]);
    assert_eq!(stripped["sentences"], 1);
    assert_eq!(stripped["words"], 3);

    let raw = score_json(tmp.path(), "notes.md", &["--no-strip-markdown"]);
    assert_eq!(raw["sentences"], 3);
}

// =============================================================================
// Score: --analysis
// =============================================================================

#[test]
fn analysis_writes_charts_to_configured_dir() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "nursery.txt", NURSERY);
    write_file(tmp.path(), ".flesch-index.toml", "chart_dir = \"out\"\n");

    let json = score_json(tmp.path(), "nursery.txt", &["--analysis"]);

    assert_eq!(json["analysis"]["syllables"]["total_words"], 17);
    let charts = json["charts"].as_array().unwrap();
    assert_eq!(charts.len(), 2);
    assert!(tmp.path().join("out/nursery-syllables.png").is_file());
    assert!(tmp.path().join("out/nursery-ratios.png").is_file());
}

#[test]
fn chart_dir_from_environment() {
    let tmp = TempDir::new().unwrap();
    let charts = tmp.path().join("env-charts");
    let path = write_file(tmp.path(), "nursery.txt", NURSERY);

    cmd()
        .env("FLESCH_INDEX_CHART_DIR", charts.to_str().unwrap())
        .args([
            "score",
            path.to_str().unwrap(),
            "--analysis",
            "--chart",
            "ratios",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("nursery-ratios.png"));

    assert!(charts.join("nursery-ratios.png").is_file());
    assert!(!charts.join("nursery-syllables.png").exists());
}

#[test]
fn chart_requires_analysis() {
    cmd()
        .args(["score", "a.txt", "--chart", "syllables"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--analysis"));
}
