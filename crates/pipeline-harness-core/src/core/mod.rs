// crates/pipeline-harness-core/src/core/mod.rs
// ============================================================================
// Module: Pipeline Harness Core Types
// Description: Canonical suite, execution, validation, and report structures.
// Purpose: Provide stable, serializable types for suite definitions and results.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Core types describe what a suite asks for ([`SuiteConfig`], [`CaseSpec`])
//! and what a run produced ([`ExecutionOutcome`], [`ArtifactCheckResult`],
//! [`StructuredCheckResult`], [`CaseResult`], [`SuiteReport`]). Result types
//! are created once per run and never mutated after they are returned.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod checks;
pub mod outcome;
pub mod report;
pub mod suite;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use checks::ArtifactCheckResult;
pub use checks::JsonKind;
pub use checks::StructuredCheckResult;
pub use checks::StructuredFailureKind;
pub use outcome::ExecutionOutcome;
pub use outcome::ExecutionStatus;
pub use outcome::SENTINEL_EXIT_CODE;
pub use outcome::setup_timeout_message;
pub use outcome::timeout_message;
pub use report::CaseResult;
pub use report::GatePolicy;
pub use report::SetupRecord;
pub use report::StructuredChecks;
pub use report::SuiteReport;
pub use report::SuiteSummary;
pub use suite::CaseSpec;
pub use suite::DEFAULT_WORKING_DIR;
pub use suite::JsonCheck;
pub use suite::NamedCase;
pub use suite::SuiteConfig;
