// crates/pipeline-harness-cli/tests/cli_e2e.rs
// ============================================================================
// Module: CLI End-to-End Tests
// Description: Drives the built binary against a fake pipeline tool.
// Purpose: Ensure exit codes, report contents, and fatal errors end to end.
// Dependencies: pipeline-harness binary
// ============================================================================
//! ## Overview
//! Runs `pipeline-harness` with `sh` as the runtime and a small script as the
//! tool entry point, so each "pipeline" is itself a shell script.

#![cfg(unix)]
#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use serde_json::Value;
use serde_json::json;
use tempfile::TempDir;
use tempfile::tempdir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Fake tool entry point: runs the pipeline argument as a shell script.
const FAKE_TOOL: &str = "[ \"$1\" = \"run\" ] || exit 64\nexec sh \"$2\"\n";

/// Path of the built binary.
fn harness_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pipeline-harness"))
}

/// Creates a scratch directory holding the fake tool and two pipelines.
fn workspace() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("tool.sh"), FAKE_TOOL).unwrap();
    fs::write(
        dir.path().join("good.sh"),
        "echo running\ntouch out.txt\nprintf '{\"rows\": 3}' > result.json\n",
    )
    .unwrap();
    fs::write(dir.path().join("bad.sh"), "echo broken >&2\nexit 1\n").unwrap();
    dir
}

/// Runs the harness inside `dir` with the fake tool and extra `args`.
fn run_harness(dir: &Path, args: &[&str]) -> Output {
    Command::new(harness_bin())
        .current_dir(dir)
        .env_remove("PIPELINE_HARNESS_CONFIG")
        .env_remove("PIPELINE_HARNESS_LANG")
        .args(["--runtime", "sh", "--cli-path", "tool.sh"])
        .args(args)
        .output()
        .unwrap()
}

/// Parses the report file at `path`.
fn read_report(path: &Path) -> Value {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// One passing and one failing case exit 1 with matching counts.
#[test]
fn mixed_suite_exits_failure_and_writes_report() {
    let dir = workspace();
    fs::write(
        dir.path().join("test-config.yaml"),
        "tests:\n  good:\n    pipeline: good.sh\n    expected_outputs: [out.txt]\n    json_validations:\n      result.json: [rows]\n  bad:\n    pipeline: bad.sh\n",
    )
    .unwrap();

    let output = run_harness(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let report = read_report(&dir.path().join("test-results.json"));
    assert_eq!(report["summary"], json!({"total": 2, "passed": 1, "failed": 1}));
    assert_eq!(report["runtime"], json!("sh"));
    assert_eq!(report["cli_path"], json!("tool.sh"));
    assert_eq!(report["gate"], json!("execution"));
    assert!(report["timestamp"].as_f64().unwrap() > 0.0);
    let results = report["results"].as_array().unwrap();
    assert_eq!(results[0]["name"], json!("good"));
    assert_eq!(results[0]["execution"]["stdout"], json!("running\n"));
    assert_eq!(results[0]["artifact_check"]["succeeded"], json!(true));
    assert_eq!(results[0]["structured_checks"]["result.json"]["succeeded"], json!(true));
    assert_eq!(results[1]["name"], json!("bad"));
    assert_eq!(results[1]["execution"]["exit_code"], json!(1));
    assert!(results[1].get("artifact_check").is_none());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Testing good: good.sh"));
    assert!(stdout.contains("Total: 2"));
    assert!(stdout.contains("Some tests failed"));
    assert!(!stdout.contains("All tests passed!"));
    assert!(stdout.contains("Detailed results saved to test-results.json"));
}

/// An all-passing suite exits 0 and honors an explicit config and output path.
#[test]
fn passing_suite_exits_success() {
    let dir = workspace();
    fs::write(dir.path().join("suite.yaml"), "tests:\n  good:\n    pipeline: good.sh\n").unwrap();

    let output = run_harness(dir.path(), &["suite.yaml", "--output", "reports/run.json"]);

    assert_eq!(output.status.code(), Some(0));
    let report = read_report(&dir.path().join("reports").join("run.json"));
    assert_eq!(report["summary"]["passed"], json!(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("All tests passed!"));
}

/// The strict gate fails a case whose outputs are missing.
#[test]
fn strict_gate_fails_missing_outputs() {
    let dir = workspace();
    fs::write(
        dir.path().join("test-config.yaml"),
        "tests:\n  good:\n    pipeline: good.sh\n    expected_outputs: [never.txt]\n",
    )
    .unwrap();

    let lenient = run_harness(dir.path(), &[]);
    assert_eq!(lenient.status.code(), Some(0));

    let strict = run_harness(dir.path(), &["--strict"]);
    assert_eq!(strict.status.code(), Some(1));
    let report = read_report(&dir.path().join("test-results.json"));
    assert_eq!(report["gate"], json!("strict"));
    assert_eq!(report["summary"]["failed"], json!(1));
}

/// The config path can come from the environment.
#[test]
fn config_path_from_environment() {
    let dir = workspace();
    fs::write(dir.path().join("env-suite.yaml"), "tests:\n  good:\n    pipeline: good.sh\n").unwrap();

    let output = Command::new(harness_bin())
        .current_dir(dir.path())
        .env("PIPELINE_HARNESS_CONFIG", "env-suite.yaml")
        .env_remove("PIPELINE_HARNESS_LANG")
        .args(["--runtime", "sh", "--cli-path", "tool.sh"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
}

/// A missing config is fatal before any case runs and writes no report.
#[test]
fn missing_config_is_fatal() {
    let dir = workspace();

    let output = run_harness(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load test configuration"));
    assert!(!dir.path().join("test-results.json").exists());
}

/// Invalid suites are rejected with the validation message.
#[test]
fn invalid_config_is_fatal() {
    let dir = workspace();
    fs::write(dir.path().join("test-config.yaml"), "tests:\n  empty:\n    pipeline: \"\"\n").unwrap();

    let output = run_harness(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("tests.empty.pipeline must be non-empty"));
}

/// Setup commands run before cases and are recorded.
#[test]
fn setup_commands_are_recorded() {
    let dir = workspace();
    fs::write(
        dir.path().join("test-config.yaml"),
        "setup:\n  - touch prepared\n  - exit 4\ntests:\n  good:\n    pipeline: good.sh\n",
    )
    .unwrap();

    let output = run_harness(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(0));
    assert!(dir.path().join("prepared").exists());
    let report = read_report(&dir.path().join("test-results.json"));
    assert_eq!(report["setup"][0]["succeeded"], json!(true));
    assert_eq!(report["setup"][1]["exit_code"], json!(4));
}

/// Setup commands are not cut short by the case timeout.
#[test]
fn setup_commands_outlive_case_timeout() {
    let dir = workspace();
    fs::write(
        dir.path().join("test-config.yaml"),
        "setup:\n  - sleep 2; touch built\ntests:\n  good:\n    pipeline: good.sh\n",
    )
    .unwrap();

    let output = run_harness(dir.path(), &["--timeout-secs", "1"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(dir.path().join("built").exists());
    let report = read_report(&dir.path().join("test-results.json"));
    assert_eq!(report["setup"][0]["succeeded"], json!(true));
}

/// An explicit setup timeout stops a slow setup command.
#[test]
fn setup_timeout_flag_bounds_setup() {
    let dir = workspace();
    fs::write(
        dir.path().join("test-config.yaml"),
        "setup:\n  - exec sleep 5\ntests:\n  good:\n    pipeline: good.sh\n",
    )
    .unwrap();

    let output = run_harness(dir.path(), &["--setup-timeout-secs", "1"]);

    assert_eq!(output.status.code(), Some(0));
    let report = read_report(&dir.path().join("test-results.json"));
    assert_eq!(report["setup"][0]["status"], json!("timed_out"));
    assert_eq!(report["setup"][0]["stderr"], json!("Setup command timed out after 1 seconds"));
}

/// Catalan output carries the machine-translation disclaimer.
#[test]
fn catalan_output_is_localized() {
    let dir = workspace();
    fs::write(dir.path().join("test-config.yaml"), "tests:\n  good:\n    pipeline: good.sh\n").unwrap();

    let output = run_harness(dir.path(), &["--lang", "ca"]);

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("traduïda automàticament"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Resum de les proves"));
    assert!(stdout.contains("Totes les proves han passat!"));
}

/// The version flag prints the package version.
#[test]
fn version_flag_prints_version() {
    let output = Command::new(harness_bin()).arg("--version").output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}
