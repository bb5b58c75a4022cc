// crates/pipeline-harness-core/src/lib.rs
// ============================================================================
// Module: Pipeline Harness Core Library
// Description: Public API surface for the Pipeline Harness core.
// Purpose: Expose suite types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Pipeline Harness core drives an external pipeline tool once per declared
//! test case, validates the artifacts it leaves behind, and folds the per-case
//! records into a suite report. The tool is an opaque black box characterized
//! only by exit code, captured output, and wall-clock duration.
//!
//! The core never writes to the console and never reads wall-clock time for
//! reports; hosts observe progress through [`ProgressSink`] and supply report
//! timestamps explicitly.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::NoopProgress;
pub use interfaces::ProgressEvent;
pub use interfaces::ProgressSink;
pub use runtime::DEFAULT_TIMEOUT;
pub use runtime::PipelineTool;
pub use runtime::ProcessRunner;
pub use runtime::ReportError;
pub use runtime::SuiteRun;
pub use runtime::SuiteRunner;
pub use runtime::aggregate;
pub use runtime::check_json_fields;
pub use runtime::check_outputs;
pub use runtime::write_report;
