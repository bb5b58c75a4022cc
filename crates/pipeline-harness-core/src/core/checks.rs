// crates/pipeline-harness-core/src/core/checks.rs
// ============================================================================
// Module: Validation Results
// Description: Outcomes of artifact existence and JSON field-presence checks.
// Purpose: Record validation detail for reporting without aborting the suite.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Validation results are derived from filesystem state at check time and are
//! never persisted on their own; they travel inside a case result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use serde::Serializer;
use serde_json::Value;

// ============================================================================
// SECTION: Artifact Checks
// ============================================================================

/// Outcome of an expected-output existence check.
///
/// # Invariants
/// - `present` followed by `missing` is a partition of the checked list.
/// - Each list preserves input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactCheckResult {
    /// Paths found on disk.
    pub present: Vec<String>,
    /// Paths not found on disk.
    pub missing: Vec<String>,
}

impl ArtifactCheckResult {
    /// Returns true when no expected output is missing.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.missing.is_empty()
    }

    /// Returns the number of paths checked.
    #[must_use]
    pub const fn total_expected(&self) -> usize {
        self.present.len() + self.missing.len()
    }
}

impl Serialize for ArtifactCheckResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        /// Report shape for artifact checks.
        #[derive(Serialize)]
        struct Wire<'a> {
            /// Overall check result.
            succeeded: bool,
            /// Paths found on disk.
            present: &'a [String],
            /// Paths not found on disk.
            missing: &'a [String],
            /// Count of checked paths.
            total_expected: usize,
            /// Count of present paths.
            created_count: usize,
            /// Count of missing paths.
            missing_count: usize,
        }

        Wire {
            succeeded: self.succeeded(),
            present: &self.present,
            missing: &self.missing,
            total_expected: self.total_expected(),
            created_count: self.present.len(),
            missing_count: self.missing.len(),
        }
        .serialize(serializer)
    }
}

// ============================================================================
// SECTION: Structured Checks
// ============================================================================

/// Reason a JSON artifact could not be checked at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuredFailureKind {
    /// The artifact path does not exist.
    FileNotFound,
    /// The artifact exists but is not valid JSON.
    MalformedJson,
    /// The artifact exists but could not be read.
    Unreadable,
}

/// Variant of the parsed top-level JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonKind {
    /// JSON object.
    Object,
    /// JSON array.
    Array,
    /// JSON string.
    String,
    /// JSON number.
    Number,
    /// JSON boolean.
    Boolean,
    /// JSON null.
    Null,
}

impl JsonKind {
    /// Classifies a parsed JSON value.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::Object,
            Value::Array(_) => Self::Array,
            Value::String(_) => Self::String,
            Value::Number(_) => Self::Number,
            Value::Bool(_) => Self::Boolean,
            Value::Null => Self::Null,
        }
    }

    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one JSON field-presence check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StructuredCheckResult {
    /// The artifact could not be loaded or parsed; no fields were checked.
    Failed {
        /// Failure classification.
        kind: StructuredFailureKind,
        /// Human-readable cause.
        error: String,
    },
    /// The artifact parsed and its top-level keys were checked.
    Checked {
        /// True when no required field is missing.
        succeeded: bool,
        /// Required fields absent from the top level, in required order.
        missing_fields: Vec<String>,
        /// Top-level keys present (empty for non-object documents).
        present_keys: BTreeSet<String>,
        /// Variant of the parsed document.
        data_type: JsonKind,
    },
}

impl StructuredCheckResult {
    /// Failure for an artifact that does not exist.
    #[must_use]
    pub fn file_not_found() -> Self {
        Self::Failed {
            kind: StructuredFailureKind::FileNotFound,
            error: "file not found".to_string(),
        }
    }

    /// Failure for an artifact that is not valid JSON.
    #[must_use]
    pub fn malformed(detail: impl fmt::Display) -> Self {
        Self::Failed {
            kind: StructuredFailureKind::MalformedJson,
            error: format!("malformed JSON: {detail}"),
        }
    }

    /// Failure for an artifact that exists but cannot be read.
    #[must_use]
    pub fn unreadable(detail: impl fmt::Display) -> Self {
        Self::Failed {
            kind: StructuredFailureKind::Unreadable,
            error: format!("unreadable: {detail}"),
        }
    }

    /// Returns true when the artifact parsed and had every required field.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        match self {
            Self::Failed {
                ..
            } => false,
            Self::Checked {
                succeeded, ..
            } => *succeeded,
        }
    }

    /// Returns the missing fields when the artifact was checked.
    #[must_use]
    pub fn missing_fields(&self) -> Option<&[String]> {
        match self {
            Self::Failed {
                ..
            } => None,
            Self::Checked {
                missing_fields, ..
            } => Some(missing_fields),
        }
    }

    /// Returns the failure cause when the artifact could not be checked.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed {
                error, ..
            } => Some(error),
            Self::Checked {
                ..
            } => None,
        }
    }
}
