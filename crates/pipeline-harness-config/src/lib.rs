// crates/pipeline-harness-config/src/lib.rs
// ============================================================================
// Module: Pipeline Harness Config Library
// Description: Suite document loading and validation.
// Purpose: Single source of truth for test-config.yaml semantics.
// Dependencies: pipeline-harness-core, serde, serde_yaml
// ============================================================================

//! ## Overview
//! `pipeline-harness-config` turns a suite document into a validated
//! [`pipeline_harness_core::SuiteConfig`]. Loading fails closed: any path,
//! size, encoding, parse, or validation problem is reported before a single
//! case runs.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
