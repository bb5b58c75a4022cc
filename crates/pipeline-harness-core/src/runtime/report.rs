// crates/pipeline-harness-core/src/runtime/report.rs
// ============================================================================
// Module: Report Aggregator
// Description: Folds case results into a suite report and persists it.
// Purpose: Produce the machine-readable artifact consumed after a run.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`aggregate`] is a pure fold: counts depend only on the case results and
//! the gate policy. [`write_report`] serializes the report as pretty JSON and
//! overwrites any existing file at the destination.
//!
//! ## Invariants
//! - `summary.total == summary.passed + summary.failed == results.len()`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::core::CaseResult;
use crate::core::GatePolicy;
use crate::core::SuiteReport;
use crate::core::SuiteSummary;
use crate::runtime::process::PipelineTool;
use crate::runtime::suite::SuiteRun;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while persisting a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Report could not be serialized.
    #[error("report serialization failed: {0}")]
    Serialize(String),
    /// Report file could not be written.
    #[error("report write failed for {path}: {error}")]
    Io {
        /// Destination path.
        path: String,
        /// Underlying error text.
        error: String,
    },
}

// ============================================================================
// SECTION: Aggregation
// ============================================================================

/// Counts passed and failed cases under `gate`.
#[must_use]
pub fn summarize(results: &[CaseResult], gate: GatePolicy) -> SuiteSummary {
    let passed = results.iter().filter(|result| result.passed(gate)).count();
    SuiteSummary {
        total: results.len(),
        passed,
        failed: results.len() - passed,
    }
}

/// Builds the suite report for a finished run.
#[must_use]
pub fn aggregate(run: SuiteRun, tool: &PipelineTool, gate: GatePolicy, timestamp: f64) -> SuiteReport {
    let summary = summarize(&run.results, gate);
    SuiteReport {
        timestamp,
        cli_path: tool.cli_path.clone(),
        runtime: tool.runtime.clone(),
        gate,
        setup: run.setup,
        results: run.results,
        summary,
    }
}

// ============================================================================
// SECTION: Persistence
// ============================================================================

/// Writes `report` to `path` as pretty-printed JSON, replacing any existing file.
///
/// # Errors
///
/// Returns [`ReportError`] when serialization or the write fails.
pub fn write_report(report: &SuiteReport, path: &Path) -> Result<(), ReportError> {
    let mut bytes =
        serde_json::to_vec_pretty(report).map_err(|err| ReportError::Serialize(err.to_string()))?;
    bytes.push(b'\n');
    let io_error = |err: std::io::Error| ReportError::Io {
        path: path.display().to_string(),
        error: err.to_string(),
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, bytes).map_err(io_error)
}
