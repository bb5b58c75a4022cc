// crates/pipeline-harness-cli/src/lib.rs
// ============================================================================
// Module: Pipeline Harness CLI Library
// Description: Shared helpers for the Pipeline Harness command-line interface.
// Purpose: Provide reusable components (i18n, console rendering) for the binary and tests.
// Dependencies: pipeline-harness-core
// ============================================================================

//! ## Overview
//! This library houses the localized message catalog and the console renderer
//! for suite progress. The binary entry point (`src/main.rs`) imports these
//! helpers so that every user-facing line goes through the catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Console rendering of suite progress and summaries.
pub mod console;
/// Internationalization helpers and message catalog.
pub mod i18n;
