// crates/pipeline-harness-core/src/core/suite.rs
// ============================================================================
// Module: Suite Definitions
// Description: Declarative suite and case descriptions consumed by the runner.
// Purpose: Hold the validated configuration data model for a suite run.
// Dependencies: Standard library.
// ============================================================================

//! ## Overview
//! A [`SuiteConfig`] is built once by the configuration loader and is
//! immutable afterwards. Case order is declaration order and is the order in
//! which cases execute and appear in the report.
//!
//! ## Invariants
//! - Case names are unique within a suite.
//! - `pipeline_path` is non-empty; required JSON field names are non-empty.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Working directory used when a case does not declare one.
pub const DEFAULT_WORKING_DIR: &str = ".";

// ============================================================================
// SECTION: Suite Types
// ============================================================================

/// Root configuration for one suite run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Shell commands run once, in order, before any case.
    pub setup_commands: Vec<String>,
    /// Cases in declaration order.
    pub cases: Vec<NamedCase>,
}

impl SuiteConfig {
    /// Appends a setup command.
    #[must_use]
    pub fn with_setup(mut self, command: impl Into<String>) -> Self {
        self.setup_commands.push(command.into());
        self
    }

    /// Appends a named case.
    #[must_use]
    pub fn with_case(mut self, name: impl Into<String>, spec: CaseSpec) -> Self {
        self.cases.push(NamedCase {
            name: name.into(),
            spec,
        });
        self
    }

    /// Returns the case registered under `name`, if any.
    #[must_use]
    pub fn case(&self, name: &str) -> Option<&CaseSpec> {
        self.cases.iter().find(|case| case.name == name).map(|case| &case.spec)
    }
}

/// A case paired with its suite-unique name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedCase {
    /// Case name.
    pub name: String,
    /// Case description.
    pub spec: CaseSpec,
}

/// Declarative description of one test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseSpec {
    /// Pipeline description handed to the tool.
    pub pipeline_path: String,
    /// Directory the tool runs in; `None` means [`DEFAULT_WORKING_DIR`].
    pub working_dir: Option<PathBuf>,
    /// Files expected to exist after a successful run, relative to the working directory.
    pub expected_outputs: Option<Vec<String>>,
    /// JSON artifacts and the top-level fields each must contain.
    pub json_checks: Option<Vec<JsonCheck>>,
    /// Per-case timeout override.
    pub timeout: Option<Duration>,
}

impl CaseSpec {
    /// Creates a case with only a pipeline path.
    #[must_use]
    pub fn new(pipeline_path: impl Into<String>) -> Self {
        Self {
            pipeline_path: pipeline_path.into(),
            working_dir: None,
            expected_outputs: None,
            json_checks: None,
            timeout: None,
        }
    }

    /// Sets the working directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Sets the expected output list.
    #[must_use]
    pub fn with_expected_outputs<I, S>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected_outputs = Some(outputs.into_iter().map(Into::into).collect());
        self
    }

    /// Appends a JSON field-presence check.
    #[must_use]
    pub fn with_json_check<I, S>(mut self, path: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.json_checks.get_or_insert_with(Vec::new).push(JsonCheck {
            path: path.into(),
            required_fields: fields.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Sets a per-case timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the effective working directory.
    #[must_use]
    pub fn working_dir(&self) -> &Path {
        self.working_dir.as_deref().unwrap_or_else(|| Path::new(DEFAULT_WORKING_DIR))
    }
}

/// Required top-level fields for one JSON artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonCheck {
    /// Artifact path, resolved against the harness working directory.
    pub path: String,
    /// Field names that must appear as top-level keys.
    pub required_fields: Vec<String>,
}
