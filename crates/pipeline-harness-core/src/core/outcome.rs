// crates/pipeline-harness-core/src/core/outcome.rs
// ============================================================================
// Module: Execution Outcomes
// Description: Structured result of one subprocess invocation.
// Purpose: Make exit, timeout, and launch failure first-class result states.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An [`ExecutionOutcome`] is produced for every invocation, whatever
//! happened. Timeouts and launch failures are not errors: they are recorded
//! with the sentinel exit code [`SENTINEL_EXIT_CODE`] and a distinct
//! [`ExecutionStatus`].
//!
//! ## Invariants
//! - `succeeded` is true only for [`ExecutionStatus::Exited`] with code 0.
//! - `duration_seconds` is always populated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Exit code recorded when no real process exit status exists.
pub const SENTINEL_EXIT_CODE: i32 = -1;

// ============================================================================
// SECTION: Types
// ============================================================================

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// Process exited on its own before the deadline.
    Exited,
    /// Deadline elapsed and the process was killed.
    TimedOut,
    /// Process could not be started or supervised.
    LaunchFailed,
}

/// Result of one subprocess invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionOutcome {
    /// True iff the process exited with status 0 within the timeout.
    pub succeeded: bool,
    /// Classification of how the invocation ended.
    pub status: ExecutionStatus,
    /// Real exit status, or [`SENTINEL_EXIT_CODE`].
    pub exit_code: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error, or the failure description.
    pub stderr: String,
    /// Wall-clock elapsed time in seconds.
    pub duration_seconds: f64,
}

impl ExecutionOutcome {
    /// Builds the outcome for a process that exited on its own.
    #[must_use]
    pub fn exited(exit_code: i32, stdout: String, stderr: String, elapsed: Duration) -> Self {
        Self {
            succeeded: exit_code == 0,
            status: ExecutionStatus::Exited,
            exit_code,
            stdout,
            stderr,
            duration_seconds: elapsed.as_secs_f64(),
        }
    }

    /// Builds the outcome for a process killed at the deadline.
    ///
    /// Output captured before the kill is kept; `message` is appended after
    /// any partial stderr.
    #[must_use]
    pub fn timed_out(
        message: String,
        timeout: Duration,
        stdout: String,
        partial_stderr: &str,
    ) -> Self {
        let stderr = if partial_stderr.trim().is_empty() {
            message
        } else {
            let mut combined = partial_stderr.trim_end().to_string();
            combined.push('\n');
            combined.push_str(&message);
            combined
        };
        Self {
            succeeded: false,
            status: ExecutionStatus::TimedOut,
            exit_code: SENTINEL_EXIT_CODE,
            stdout,
            stderr,
            duration_seconds: timeout.as_secs_f64(),
        }
    }

    /// Builds the outcome for a process that never ran.
    #[must_use]
    pub fn launch_failed(error: String, elapsed: Duration) -> Self {
        Self {
            succeeded: false,
            status: ExecutionStatus::LaunchFailed,
            exit_code: SENTINEL_EXIT_CODE,
            stdout: String::new(),
            stderr: error,
            duration_seconds: elapsed.as_secs_f64(),
        }
    }
}

/// Returns the fixed stderr message recorded for a timed-out tool invocation.
#[must_use]
pub fn timeout_message(timeout: Duration) -> String {
    format!("Pipeline execution timed out after {} seconds", timeout.as_secs_f64())
}

/// Returns the fixed stderr message recorded for a timed-out setup command.
#[must_use]
pub fn setup_timeout_message(timeout: Duration) -> String {
    format!("Setup command timed out after {} seconds", timeout.as_secs_f64())
}
