// crates/pipeline-harness-cli/src/console.rs
// ============================================================================
// Module: Console Rendering
// Description: Localized rendering of suite progress and summaries.
// Purpose: Turn core progress events into human-readable console lines.
// Dependencies: pipeline-harness-core, crate::i18n
// ============================================================================

//! ## Overview
//! [`ConsoleProgress`] implements the core progress sink by writing one
//! localized line per event. Rendering is separated from writing so the text
//! can be checked without a terminal. Write failures are ignored: progress
//! output is advisory and the report file is the source of truth.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cell::RefCell;
use std::io::Write;

use pipeline_harness_core::ArtifactCheckResult;
use pipeline_harness_core::ExecutionOutcome;
use pipeline_harness_core::ExecutionStatus;
use pipeline_harness_core::GatePolicy;
use pipeline_harness_core::ProgressEvent;
use pipeline_harness_core::ProgressSink;
use pipeline_harness_core::StructuredCheckResult;
use pipeline_harness_core::SuiteReport;

use crate::t;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum characters of captured error text shown on one console line.
pub const ERROR_EXCERPT_CHARS: usize = 200;

// ============================================================================
// SECTION: Progress Sink
// ============================================================================

/// Progress sink writing localized lines to a writer.
pub struct ConsoleProgress<W: Write> {
    /// Destination for rendered lines.
    out: RefCell<W>,
}

impl<W: Write> ConsoleProgress<W> {
    /// Creates a sink writing to `out`.
    pub const fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> ProgressSink for ConsoleProgress<W> {
    fn emit(&self, event: &ProgressEvent<'_>) {
        let line = render_event(event);
        let _ = writeln!(self.out.borrow_mut(), "{line}");
    }
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders one progress event as a localized line.
#[must_use]
pub fn render_event(event: &ProgressEvent<'_>) -> String {
    match *event {
        ProgressEvent::SetupStarted {
            command,
        } => t!("setup.start", command = command),
        ProgressEvent::SetupFinished {
            record,
        } => {
            if record.outcome.succeeded {
                t!("setup.ok", duration = seconds(record.outcome.duration_seconds))
            } else {
                t!(
                    "setup.failed",
                    code = record.outcome.exit_code,
                    error = excerpt(&record.outcome.stderr)
                )
            }
        }
        ProgressEvent::CaseStarted {
            name,
            pipeline_path,
        } => t!("case.start", name = name, pipeline = pipeline_path),
        ProgressEvent::ExecutionFinished {
            outcome, ..
        } => render_execution(outcome),
        ProgressEvent::ArtifactsChecked {
            result, ..
        } => render_artifacts(result),
        ProgressEvent::StructuredChecked {
            path,
            result,
            ..
        } => render_structured(path, result),
    }
}

/// Renders the end-of-run summary block.
#[must_use]
pub fn render_summary(report: &SuiteReport) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        t!("summary.header"),
        t!("summary.total", total = report.summary.total),
        t!("summary.passed", passed = report.summary.passed),
        t!("summary.failed", failed = report.summary.failed),
        t!("summary.gate", gate = gate_label(report.gate)),
    ];
    let setup_failures = report.setup.iter().filter(|record| !record.outcome.succeeded).count();
    if setup_failures > 0 {
        lines.push(t!("summary.setup_failures", count = setup_failures));
    }
    lines.push(if report.all_passed() { t!("summary.all_passed") } else { t!("summary.some_failed") });
    lines
}

/// Renders the outcome of a tool invocation.
fn render_execution(outcome: &ExecutionOutcome) -> String {
    match outcome.status {
        ExecutionStatus::Exited if outcome.succeeded => {
            t!("case.execution.ok", duration = seconds(outcome.duration_seconds))
        }
        ExecutionStatus::Exited => t!(
            "case.execution.failed",
            duration = seconds(outcome.duration_seconds),
            code = outcome.exit_code,
            error = excerpt(&outcome.stderr)
        ),
        ExecutionStatus::TimedOut => {
            t!("case.execution.timed_out", duration = seconds(outcome.duration_seconds))
        }
        ExecutionStatus::LaunchFailed => t!(
            "case.execution.launch_failed",
            duration = seconds(outcome.duration_seconds),
            error = excerpt(&outcome.stderr)
        ),
    }
}

/// Renders an expected-output check.
fn render_artifacts(result: &ArtifactCheckResult) -> String {
    if result.succeeded() {
        t!("case.artifacts.ok", count = result.total_expected())
    } else {
        t!(
            "case.artifacts.missing",
            count = result.missing.len(),
            total = result.total_expected(),
            missing = result.missing.join(", ")
        )
    }
}

/// Renders one JSON field-presence check.
fn render_structured(path: &str, result: &StructuredCheckResult) -> String {
    match result {
        StructuredCheckResult::Failed {
            error, ..
        } => t!("case.json.failed", path = path, error = error),
        StructuredCheckResult::Checked {
            missing_fields,
            data_type,
            ..
        } if missing_fields.is_empty() => t!("case.json.ok", path = path, kind = data_type),
        StructuredCheckResult::Checked {
            missing_fields, ..
        } => t!("case.json.missing_fields", path = path, fields = missing_fields.join(", ")),
    }
}

/// Returns the localized label for a gate policy.
fn gate_label(gate: GatePolicy) -> String {
    match gate {
        GatePolicy::Execution => t!("summary.gate.execution"),
        GatePolicy::Strict => t!("summary.gate.strict"),
    }
}

/// Formats seconds with two decimals.
fn seconds(value: f64) -> String {
    format!("{value:.2}")
}

/// Collapses captured text onto one line, truncated to [`ERROR_EXCERPT_CHARS`].
#[must_use]
pub fn excerpt(text: &str) -> String {
    let joined = text.lines().map(str::trim).filter(|line| !line.is_empty()).collect::<Vec<_>>().join(" | ");
    if joined.chars().count() <= ERROR_EXCERPT_CHARS {
        return joined;
    }
    let mut truncated: String = joined.chars().take(ERROR_EXCERPT_CHARS).collect();
    truncated.push_str("...");
    truncated
}
