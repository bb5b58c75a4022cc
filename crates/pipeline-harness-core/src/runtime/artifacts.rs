// crates/pipeline-harness-core/src/runtime/artifacts.rs
// ============================================================================
// Module: Artifact Validator
// Description: Existence checks for expected output files.
// Purpose: Partition expected outputs into present and missing paths.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Expected outputs are resolved against the case working directory. The check
//! only reads filesystem metadata and never mutates anything.

use std::path::Path;

use crate::core::ArtifactCheckResult;

/// Checks which of `expected_paths` exist under `working_dir`.
///
/// Order is preserved within both the present and the missing list; an empty
/// input yields an empty, successful result.
#[must_use]
pub fn check_outputs<S: AsRef<str>>(expected_paths: &[S], working_dir: &Path) -> ArtifactCheckResult {
    let mut result = ArtifactCheckResult::default();
    for path in expected_paths {
        let path = path.as_ref();
        if working_dir.join(path).exists() {
            result.present.push(path.to_string());
        } else {
            result.missing.push(path.to_string());
        }
    }
    result
}
