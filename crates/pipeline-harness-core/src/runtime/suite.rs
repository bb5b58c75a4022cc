// crates/pipeline-harness-core/src/runtime/suite.rs
// ============================================================================
// Module: Suite Runner
// Description: Sequential driver for setup steps and test cases.
// Purpose: Run each case once, validate its outputs, and assemble case records.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! [`SuiteRunner`] executes setup commands, then every case in declaration
//! order, strictly one at a time. A case's validations only run when its
//! execution succeeded: a failed run cannot have produced trustworthy outputs.
//! No case failure aborts the suite.
//!
//! Relative case working directories and JSON artifact paths resolve against
//! the runner's base directory (the harness working directory by default);
//! expected outputs resolve against the case working directory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::CaseResult;
use crate::core::CaseSpec;
use crate::core::DEFAULT_WORKING_DIR;
use crate::core::SetupRecord;
use crate::core::StructuredChecks;
use crate::core::SuiteConfig;
use crate::interfaces::ProgressEvent;
use crate::interfaces::ProgressSink;
use crate::runtime::artifacts::check_outputs;
use crate::runtime::process::DEFAULT_TIMEOUT;
use crate::runtime::process::PipelineTool;
use crate::runtime::process::ProcessRunner;
use crate::runtime::process::run_shell;
use crate::runtime::structured::check_json_fields;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Everything a suite run produced, before aggregation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuiteRun {
    /// Setup command outcomes, in order.
    pub setup: Vec<SetupRecord>,
    /// Case results, in declaration order.
    pub results: Vec<CaseResult>,
}

/// Drives a suite against the pipeline tool.
pub struct SuiteRunner<'a> {
    /// Tool launcher.
    runner: ProcessRunner,
    /// Progress observer.
    progress: &'a dyn ProgressSink,
    /// Timeout for cases without an override.
    default_timeout: Duration,
    /// Timeout for setup commands; `None` lets them run to completion.
    setup_timeout: Option<Duration>,
    /// Directory relative paths resolve against.
    base_dir: PathBuf,
}

impl<'a> SuiteRunner<'a> {
    /// Creates a runner with the default case timeout, unbounded setup, and
    /// the current directory as base.
    #[must_use]
    pub fn new(runner: ProcessRunner, progress: &'a dyn ProgressSink) -> Self {
        Self {
            runner,
            progress,
            default_timeout: DEFAULT_TIMEOUT,
            setup_timeout: None,
            base_dir: PathBuf::from(DEFAULT_WORKING_DIR),
        }
    }

    /// Overrides the default per-invocation timeout.
    #[must_use]
    pub const fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Bounds setup commands; by default they are not bounded.
    #[must_use]
    pub const fn with_setup_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.setup_timeout = timeout;
        self
    }

    /// Overrides the base directory for relative paths.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Returns the tool launch settings.
    #[must_use]
    pub const fn tool(&self) -> &PipelineTool {
        self.runner.tool()
    }

    /// Runs setup commands and then every case, in order.
    pub async fn run(&self, config: &SuiteConfig) -> SuiteRun {
        let setup = self.run_setup(&config.setup_commands).await;
        let mut results = Vec::with_capacity(config.cases.len());
        for case in &config.cases {
            results.push(self.run_case(&case.name, &case.spec).await);
        }
        SuiteRun {
            setup,
            results,
        }
    }

    /// Runs setup commands best-effort; failures are recorded, never fatal.
    pub async fn run_setup(&self, commands: &[String]) -> Vec<SetupRecord> {
        let mut records = Vec::with_capacity(commands.len());
        for command in commands {
            self.progress.emit(&ProgressEvent::SetupStarted {
                command,
            });
            let outcome = run_shell(command, &self.base_dir, self.setup_timeout).await;
            let record = SetupRecord {
                command: command.clone(),
                outcome,
            };
            self.progress.emit(&ProgressEvent::SetupFinished {
                record: &record,
            });
            records.push(record);
        }
        records
    }

    /// Runs one case and its validations.
    pub async fn run_case(&self, name: &str, spec: &CaseSpec) -> CaseResult {
        self.progress.emit(&ProgressEvent::CaseStarted {
            name,
            pipeline_path: &spec.pipeline_path,
        });
        let working_dir = self.resolve(spec.working_dir());
        let limit = spec.timeout.unwrap_or(self.default_timeout);
        let execution = self.runner.run(&spec.pipeline_path, &working_dir, limit).await;
        self.progress.emit(&ProgressEvent::ExecutionFinished {
            name,
            outcome: &execution,
        });

        let mut result = CaseResult {
            name: name.to_string(),
            pipeline_path: spec.pipeline_path.clone(),
            execution,
            artifact_check: None,
            structured_checks: None,
        };
        if !result.execution.succeeded {
            return result;
        }

        if let Some(expected) = &spec.expected_outputs {
            let check = check_outputs(expected, &working_dir);
            self.progress.emit(&ProgressEvent::ArtifactsChecked {
                name,
                result: &check,
            });
            result.artifact_check = Some(check);
        }

        if let Some(json_checks) = &spec.json_checks {
            let mut structured = StructuredChecks::default();
            for json_check in json_checks {
                let outcome =
                    check_json_fields(&self.resolve(Path::new(&json_check.path)), &json_check.required_fields);
                self.progress.emit(&ProgressEvent::StructuredChecked {
                    name,
                    path: &json_check.path,
                    result: &outcome,
                });
                structured.push(json_check.path.clone(), outcome);
            }
            result.structured_checks = Some(structured);
        }
        result
    }

    /// Resolves `path` against the base directory.
    fn resolve(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }
}
