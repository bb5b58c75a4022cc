// crates/pipeline-harness-core/src/runtime/structured.rs
// ============================================================================
// Module: Structured Output Validator
// Description: Top-level field-presence checks for JSON artifacts.
// Purpose: Load a JSON artifact and report which required keys are missing.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! The document is parsed into a generic [`serde_json::Value`]; only the
//! object variant's key set matters. A missing file, an unreadable file, and a
//! malformed document are distinct failures so reports stay diagnosable.
//!
//! ## Invariants
//! - `missing_fields` follows the order of the required field list.
//! - Non-object documents have no keys, so every required field is missing.
//! - Reads are bounded by [`MAX_JSON_ARTIFACT_BYTES`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs::File;
use std::io;
use std::io::Read;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::core::JsonKind;
use crate::core::StructuredCheckResult;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum JSON artifact size read for field checks.
pub const MAX_JSON_ARTIFACT_BYTES: usize = 16 * 1024 * 1024;

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Checks that the JSON document at `artifact_path` has every required top-level field.
#[must_use]
pub fn check_json_fields<S: AsRef<str>>(
    artifact_path: &Path,
    required_fields: &[S],
) -> StructuredCheckResult {
    let bytes = match read_file_limited(artifact_path, MAX_JSON_ARTIFACT_BYTES) {
        Ok(bytes) => bytes,
        Err(ReadLimitError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
            return StructuredCheckResult::file_not_found();
        }
        Err(err) => return StructuredCheckResult::unreadable(err),
    };
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(document) => evaluate_fields(&document, required_fields),
        Err(err) => StructuredCheckResult::malformed(err),
    }
}

/// Checks an already-parsed document for required top-level fields.
#[must_use]
pub fn evaluate_fields<S: AsRef<str>>(document: &Value, required_fields: &[S]) -> StructuredCheckResult {
    let present_keys: BTreeSet<String> =
        document.as_object().map(|map| map.keys().cloned().collect()).unwrap_or_default();
    let missing_fields: Vec<String> = required_fields
        .iter()
        .map(AsRef::as_ref)
        .filter(|field| !present_keys.contains(*field))
        .map(ToString::to_string)
        .collect();
    StructuredCheckResult::Checked {
        succeeded: missing_fields.is_empty(),
        missing_fields,
        present_keys,
        data_type: JsonKind::of(document),
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Errors returned by bounded artifact reads.
#[derive(Debug, Error)]
enum ReadLimitError {
    /// File I/O failure.
    #[error("{0}")]
    Io(io::Error),
    /// File is larger than the read limit.
    #[error("file exceeds size limit of {limit} bytes")]
    TooLarge {
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file while enforcing a maximum byte limit.
fn read_file_limited(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let read_limit = u64::try_from(max_bytes.saturating_add(1)).unwrap_or(u64::MAX);
    let mut bytes = Vec::new();
    file.take(read_limit).read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        return Err(ReadLimitError::TooLarge {
            limit: max_bytes,
        });
    }
    Ok(bytes)
}
