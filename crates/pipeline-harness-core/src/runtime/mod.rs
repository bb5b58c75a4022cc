// crates/pipeline-harness-core/src/runtime/mod.rs
// ============================================================================
// Module: Pipeline Harness Runtime
// Description: Process supervision, output validation, and suite execution.
// Purpose: Provide the executable half of the harness on top of the core types.
// Dependencies: crate::{core, interfaces}, tokio, serde_json
// ============================================================================

//! ## Overview
//! The runtime launches the pipeline tool, validates what it leaves behind,
//! and folds case records into a report. Progress is reported through
//! [`crate::interfaces::ProgressSink`].

pub mod artifacts;
pub mod process;
pub mod report;
pub mod structured;
pub mod suite;

pub use artifacts::check_outputs;
pub use process::DEFAULT_CLI_PATH;
pub use process::DEFAULT_RUNTIME;
pub use process::DEFAULT_TIMEOUT;
pub use process::MAX_CAPTURE_BYTES;
pub use process::PipelineTool;
pub use process::ProcessRunner;
pub use process::run_shell;
pub use report::ReportError;
pub use report::aggregate;
pub use report::summarize;
pub use report::write_report;
pub use structured::MAX_JSON_ARTIFACT_BYTES;
pub use structured::check_json_fields;
pub use structured::evaluate_fields;
pub use suite::SuiteRun;
pub use suite::SuiteRunner;
