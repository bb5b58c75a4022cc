//! Process runner tests for pipeline-harness-core.
// crates/pipeline-harness-core/tests/process.rs
// ============================================================================
// Module: Process Runner Tests
// Description: Exit, timeout, and launch-failure handling for tool invocations.
// Purpose: Ensure every invocation yields a classified execution outcome.
// ============================================================================

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
    reason = "Test-only assertions and helpers are permitted."
)]

use std::time::Duration;

use pipeline_harness_core::ExecutionStatus;
use pipeline_harness_core::PipelineTool;
use pipeline_harness_core::ProcessRunner;
use pipeline_harness_core::SENTINEL_EXIT_CODE;
use pipeline_harness_core::runtime::run_shell;
use tempfile::tempdir;

mod common;
use crate::common::fake_tool;
use crate::common::write_pipeline;

/// Generous limit for invocations expected to finish quickly.
const QUICK: Duration = Duration::from_secs(30);

/// A zero exit is a success with captured output.
#[tokio::test]
async fn successful_run_captures_output() {
    let dir = tempdir().unwrap();
    let runner = ProcessRunner::new(fake_tool(dir.path()));
    let pipeline = write_pipeline(dir.path(), "ok.sh", "echo hello\necho note >&2\nexit 0\n");

    let outcome = runner.run(&pipeline, dir.path(), QUICK).await;

    assert!(outcome.succeeded);
    assert_eq!(outcome.status, ExecutionStatus::Exited);
    assert_eq!(outcome.exit_code, 0);
    assert_eq!(outcome.stdout, "hello\n");
    assert_eq!(outcome.stderr, "note\n");
    assert!(outcome.duration_seconds >= 0.0);
}

/// A non-zero exit is a failure that keeps the real exit code.
#[tokio::test]
async fn nonzero_exit_is_failure() {
    let dir = tempdir().unwrap();
    let runner = ProcessRunner::new(fake_tool(dir.path()));
    let pipeline = write_pipeline(dir.path(), "fail.sh", "echo boom >&2\nexit 3\n");

    let outcome = runner.run(&pipeline, dir.path(), QUICK).await;

    assert!(!outcome.succeeded);
    assert_eq!(outcome.status, ExecutionStatus::Exited);
    assert_eq!(outcome.exit_code, 3);
    assert_eq!(outcome.stderr, "boom\n");
}

/// The tool runs inside the requested working directory.
#[tokio::test]
async fn runs_in_working_dir() {
    let dir = tempdir().unwrap();
    let work = dir.path().join("work");
    std::fs::create_dir(&work).unwrap();
    let runner = ProcessRunner::new(fake_tool(dir.path()));
    let pipeline = write_pipeline(dir.path(), "pwd.sh", "touch created-here\n");

    let outcome = runner.run(&pipeline, &work, QUICK).await;

    assert!(outcome.succeeded);
    assert!(work.join("created-here").exists());
}

/// A run past its deadline is killed and recorded with the sentinel code.
#[tokio::test]
async fn deadline_kills_and_keeps_partial_output() {
    let dir = tempdir().unwrap();
    let runner = ProcessRunner::new(fake_tool(dir.path()));
    let pipeline =
        write_pipeline(dir.path(), "slow.sh", "echo partial\necho warn >&2\nexec sleep 5\n");

    let outcome = runner.run(&pipeline, dir.path(), Duration::from_secs(1)).await;

    assert!(!outcome.succeeded);
    assert_eq!(outcome.status, ExecutionStatus::TimedOut);
    assert_eq!(outcome.exit_code, SENTINEL_EXIT_CODE);
    assert!((outcome.duration_seconds - 1.0).abs() < f64::EPSILON);
    assert_eq!(outcome.stdout, "partial\n");
    assert_eq!(outcome.stderr, "warn\nPipeline execution timed out after 1 seconds");
}

/// A timed-out run with no stderr records only the timeout message.
#[tokio::test]
async fn deadline_message_stands_alone_without_stderr() {
    let dir = tempdir().unwrap();
    let runner = ProcessRunner::new(fake_tool(dir.path()));
    let pipeline = write_pipeline(dir.path(), "silent.sh", "exec sleep 5\n");

    let outcome = runner.run(&pipeline, dir.path(), Duration::from_secs(1)).await;

    assert_eq!(outcome.stderr, "Pipeline execution timed out after 1 seconds");
}

/// A runtime that cannot be started is a launch failure, not a panic.
#[tokio::test]
async fn missing_runtime_is_launch_failure() {
    let dir = tempdir().unwrap();
    let runner = ProcessRunner::new(PipelineTool {
        runtime: dir.path().join("no-such-runtime").display().to_string(),
        cli_path: "index.js".to_string(),
    });

    let outcome = runner.run("pipeline.yaml", dir.path(), QUICK).await;

    assert!(!outcome.succeeded);
    assert_eq!(outcome.status, ExecutionStatus::LaunchFailed);
    assert_eq!(outcome.exit_code, SENTINEL_EXIT_CODE);
    assert!(!outcome.stderr.is_empty());
    assert!(outcome.stdout.is_empty());
}

/// A missing working directory is a launch failure.
#[tokio::test]
async fn missing_working_dir_is_launch_failure() {
    let dir = tempdir().unwrap();
    let runner = ProcessRunner::new(fake_tool(dir.path()));
    let pipeline = write_pipeline(dir.path(), "ok.sh", "exit 0\n");

    let outcome = runner.run(&pipeline, &dir.path().join("absent"), QUICK).await;

    assert_eq!(outcome.status, ExecutionStatus::LaunchFailed);
    assert_eq!(outcome.exit_code, SENTINEL_EXIT_CODE);
}

/// A process killed by a signal reports the negated signal number.
#[tokio::test]
async fn signal_death_reports_negative_signal() {
    let dir = tempdir().unwrap();
    let runner = ProcessRunner::new(fake_tool(dir.path()));
    let pipeline = write_pipeline(dir.path(), "killed.sh", "kill -9 $$\n");

    let outcome = runner.run(&pipeline, dir.path(), QUICK).await;

    assert!(!outcome.succeeded);
    assert_eq!(outcome.status, ExecutionStatus::Exited);
    assert_eq!(outcome.exit_code, -9);
}

/// Shell commands share the same supervision.
#[tokio::test]
async fn shell_commands_are_supervised() {
    let dir = tempdir().unwrap();

    let ok = run_shell("echo one && echo two", dir.path(), Some(QUICK)).await;
    assert!(ok.succeeded);
    assert_eq!(ok.stdout, "one\ntwo\n");

    let failed = run_shell("exit 7", dir.path(), None).await;
    assert_eq!(failed.exit_code, 7);

    let slow = run_shell("exec sleep 5", dir.path(), Some(Duration::from_secs(1))).await;
    assert_eq!(slow.status, ExecutionStatus::TimedOut);
    assert_eq!(slow.stderr, "Setup command timed out after 1 seconds");
}
