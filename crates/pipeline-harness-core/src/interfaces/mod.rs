// crates/pipeline-harness-core/src/interfaces/mod.rs
// ============================================================================
// Module: Pipeline Harness Interfaces
// Description: Host-facing interfaces for observing suite progress.
// Purpose: Keep console rendering out of the core runtime.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The runtime reports progress as [`ProgressEvent`]s. Hosts decide how to
//! render them (the CLI localizes them to the console; tests record them).
//! Sinks must not fail: rendering problems are the host's concern.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::ArtifactCheckResult;
use crate::core::ExecutionOutcome;
use crate::core::SetupRecord;
use crate::core::StructuredCheckResult;

// ============================================================================
// SECTION: Progress Events
// ============================================================================

/// A progress notification emitted while a suite runs.
#[derive(Debug, Clone, Copy)]
pub enum ProgressEvent<'a> {
    /// A setup command is about to run.
    SetupStarted {
        /// Shell command text.
        command: &'a str,
    },
    /// A setup command finished.
    SetupFinished {
        /// Recorded outcome.
        record: &'a SetupRecord,
    },
    /// A case is about to run.
    CaseStarted {
        /// Case name.
        name: &'a str,
        /// Pipeline path for the case.
        pipeline_path: &'a str,
    },
    /// The tool invocation for a case finished.
    ExecutionFinished {
        /// Case name.
        name: &'a str,
        /// Invocation outcome.
        outcome: &'a ExecutionOutcome,
    },
    /// The expected-output check for a case finished.
    ArtifactsChecked {
        /// Case name.
        name: &'a str,
        /// Check result.
        result: &'a ArtifactCheckResult,
    },
    /// One JSON artifact check for a case finished.
    StructuredChecked {
        /// Case name.
        name: &'a str,
        /// Artifact path.
        path: &'a str,
        /// Check result.
        result: &'a StructuredCheckResult,
    },
}

/// Receiver of progress events.
pub trait ProgressSink {
    /// Handles one progress event.
    fn emit(&self, event: &ProgressEvent<'_>);
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn emit(&self, _event: &ProgressEvent<'_>) {}
}
