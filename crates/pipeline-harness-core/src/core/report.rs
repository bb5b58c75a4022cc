// crates/pipeline-harness-core/src/core/report.rs
// ============================================================================
// Module: Suite Report Types
// Description: Per-case records and the aggregate suite report.
// Purpose: Define the machine-readable report written at the end of a run.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`CaseResult`] is assembled once per case; a [`SuiteReport`] folds every
//! case result into counts. Whether a case counts as passed is decided by the
//! [`GatePolicy`] recorded in the report.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;

use crate::core::checks::ArtifactCheckResult;
use crate::core::checks::StructuredCheckResult;
use crate::core::outcome::ExecutionOutcome;

// ============================================================================
// SECTION: Gate Policy
// ============================================================================

/// Rule deciding whether a case counts toward `passed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePolicy {
    /// A case passes when its execution succeeded; validation is informational.
    #[default]
    Execution,
    /// A case passes when its execution and every performed validation succeeded.
    Strict,
}

// ============================================================================
// SECTION: Case Results
// ============================================================================

/// Structured checks keyed by artifact path, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredChecks(Vec<(String, StructuredCheckResult)>);

impl StructuredChecks {
    /// Records the result for an artifact path.
    pub fn push(&mut self, path: impl Into<String>, result: StructuredCheckResult) {
        self.0.push((path.into(), result));
    }

    /// Returns the result for `path`, if checked.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&StructuredCheckResult> {
        self.0.iter().find(|(candidate, _)| candidate == path).map(|(_, result)| result)
    }

    /// Iterates `(path, result)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StructuredCheckResult)> {
        self.0.iter().map(|(path, result)| (path.as_str(), result))
    }

    /// Returns the number of checked artifacts.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no artifact was checked.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true when every checked artifact succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.iter().all(|(_, result)| result.succeeded())
    }
}

impl Serialize for StructuredChecks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (path, result) in self.iter() {
            map.serialize_entry(path, result)?;
        }
        map.end()
    }
}

/// Full record for one case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseResult {
    /// Case name.
    pub name: String,
    /// Pipeline path copied from the case spec.
    pub pipeline_path: String,
    /// Subprocess outcome.
    pub execution: ExecutionOutcome,
    /// Expected-output check, when declared and execution succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_check: Option<ArtifactCheckResult>,
    /// JSON checks, when declared and execution succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_checks: Option<StructuredChecks>,
}

impl CaseResult {
    /// Returns true when every performed validation succeeded.
    #[must_use]
    pub fn validations_succeeded(&self) -> bool {
        self.artifact_check.as_ref().is_none_or(ArtifactCheckResult::succeeded)
            && self.structured_checks.as_ref().is_none_or(StructuredChecks::all_succeeded)
    }

    /// Returns true when the case counts as passed under `policy`.
    #[must_use]
    pub fn passed(&self, policy: GatePolicy) -> bool {
        match policy {
            GatePolicy::Execution => self.execution.succeeded,
            GatePolicy::Strict => self.execution.succeeded && self.validations_succeeded(),
        }
    }
}

/// Recorded outcome of one setup command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetupRecord {
    /// Shell command text.
    pub command: String,
    /// Invocation outcome.
    #[serde(flatten)]
    pub outcome: ExecutionOutcome,
}

// ============================================================================
// SECTION: Suite Report
// ============================================================================

/// Pass/fail counts for a suite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SuiteSummary {
    /// Number of cases.
    pub total: usize,
    /// Number of passed cases.
    pub passed: usize,
    /// Number of failed cases.
    pub failed: usize,
}

/// Final aggregate written at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuiteReport {
    /// Unix epoch seconds at aggregation, supplied by the host.
    pub timestamp: f64,
    /// Tool entry point passed to the runtime.
    pub cli_path: String,
    /// Runtime used to launch the tool.
    pub runtime: String,
    /// Gate policy used for the counts.
    pub gate: GatePolicy,
    /// Setup command outcomes.
    pub setup: Vec<SetupRecord>,
    /// Case results in execution order.
    pub results: Vec<CaseResult>,
    /// Pass/fail counts.
    pub summary: SuiteSummary,
}

impl SuiteReport {
    /// Returns true when every case passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.summary.passed == self.summary.total
    }
}
