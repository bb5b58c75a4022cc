// crates/pipeline-harness-config/src/config.rs
// ============================================================================
// Module: Pipeline Harness Configuration
// Description: Suite document loading and validation.
// Purpose: Provide strict, fail-closed suite parsing with hard limits.
// Dependencies: pipeline-harness-core, serde, serde_yaml
// ============================================================================

//! ## Overview
//! The suite document is YAML (JSON parses as a YAML subset) with two
//! top-level keys: `setup`, a list of shell commands, and `tests`, a mapping
//! of case name to case definition. Mapping order is preserved because it is
//! the execution order. Unknown keys are rejected.
//!
//! ## Invariants
//! - Case names are unique and non-empty.
//! - Every case has a non-empty `pipeline`.
//! - Required JSON field names are non-empty.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fmt;
use std::fs;
use std::marker::PhantomData;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use pipeline_harness_core::CaseSpec;
use pipeline_harness_core::SuiteConfig;
use serde::Deserialize;
use serde::Deserializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default suite document filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "test-config.yaml";
/// Environment variable used to override the suite document path.
pub const CONFIG_ENV_VAR: &str = "PIPELINE_HARNESS_CONFIG";
/// Maximum suite document size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Loads and validates the suite document using the default resolution rules.
///
/// Resolution order: explicit `path`, then [`CONFIG_ENV_VAR`], then
/// [`DEFAULT_CONFIG_NAME`] in the current directory.
///
/// # Errors
///
/// Returns [`ConfigError`] when loading, parsing, or validation fails.
pub fn load_suite(path: Option<&Path>) -> Result<SuiteConfig, ConfigError> {
    let resolved = resolve_path(path)?;
    validate_path(&resolved)?;
    let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
    if bytes.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
    }
    let content = std::str::from_utf8(&bytes)
        .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
    parse_suite(content)
}

/// Parses and validates suite document text.
///
/// # Errors
///
/// Returns [`ConfigError`] when the document is empty, malformed, or invalid.
pub fn parse_suite(content: &str) -> Result<SuiteConfig, ConfigError> {
    if content.trim().is_empty() {
        return Err(ConfigError::Invalid("config document is empty".to_string()));
    }
    let document: SuiteDocument =
        serde_yaml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
    document.validate()?;
    Ok(document.into_suite())
}

// ============================================================================
// SECTION: Document Model
// ============================================================================

/// Top-level suite document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SuiteDocument {
    /// Setup commands run before any case.
    #[serde(default)]
    setup: Option<Vec<String>>,
    /// Cases keyed by name, in declaration order.
    #[serde(default)]
    tests: Option<OrderedEntries<CaseDocument>>,
}

/// One case definition as written in the document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CaseDocument {
    /// Pipeline description handed to the tool.
    pipeline: String,
    /// Directory the tool runs in.
    #[serde(default)]
    working_dir: Option<String>,
    /// Files expected after a successful run.
    #[serde(default)]
    expected_outputs: Option<Vec<String>>,
    /// JSON artifact paths mapped to required top-level fields.
    #[serde(default)]
    json_validations: Option<OrderedEntries<Vec<String>>>,
    /// Per-case timeout override in seconds.
    #[serde(default)]
    timeout_seconds: Option<u64>,
}

impl SuiteDocument {
    /// Validates the document for internal consistency.
    fn validate(&self) -> Result<(), ConfigError> {
        for (index, command) in self.setup.iter().flatten().enumerate() {
            if command.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("setup[{index}] must be non-empty")));
            }
        }
        let mut names = BTreeSet::new();
        for (name, case) in self.tests.iter().flat_map(OrderedEntries::iter) {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid("tests case name must be non-empty".to_string()));
            }
            if !names.insert(name.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate tests case name: {name}")));
            }
            case.validate(name)?;
        }
        Ok(())
    }

    /// Converts the validated document into the runtime suite model.
    fn into_suite(self) -> SuiteConfig {
        let mut suite = SuiteConfig {
            setup_commands: self.setup.unwrap_or_default(),
            cases: Vec::new(),
        };
        for (name, case) in self.tests.map(OrderedEntries::into_inner).unwrap_or_default() {
            suite = suite.with_case(name, case.into_spec());
        }
        suite
    }
}

impl CaseDocument {
    /// Validates one case definition.
    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.pipeline.trim().is_empty() {
            return Err(ConfigError::Invalid(format!("tests.{name}.pipeline must be non-empty")));
        }
        if let Some(dir) = &self.working_dir
            && dir.trim().is_empty()
        {
            return Err(ConfigError::Invalid(format!(
                "tests.{name}.working_dir must be non-empty"
            )));
        }
        if self.expected_outputs.iter().flatten().any(|output| output.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "tests.{name}.expected_outputs entries must be non-empty"
            )));
        }
        let mut paths = BTreeSet::new();
        for (path, fields) in self.json_validations.iter().flat_map(OrderedEntries::iter) {
            if path.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "tests.{name}.json_validations path must be non-empty"
                )));
            }
            if !paths.insert(path.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate tests.{name}.json_validations path: {path}"
                )));
            }
            if fields.iter().any(|field| field.is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "tests.{name}.json_validations.{path} field names must be non-empty"
                )));
            }
        }
        if self.timeout_seconds == Some(0) {
            return Err(ConfigError::Invalid(format!(
                "tests.{name}.timeout_seconds must be greater than zero"
            )));
        }
        Ok(())
    }

    /// Converts the validated case into a runtime case spec.
    fn into_spec(self) -> CaseSpec {
        let mut spec = CaseSpec::new(self.pipeline);
        spec.working_dir = self.working_dir.map(PathBuf::from);
        spec.expected_outputs = self.expected_outputs;
        if let Some(validations) = self.json_validations {
            for (path, fields) in validations.into_inner() {
                spec = spec.with_json_check(path, fields);
            }
        }
        spec.timeout = self.timeout_seconds.map(Duration::from_secs);
        spec
    }
}

// ============================================================================
// SECTION: Ordered Mappings
// ============================================================================

/// Mapping entries in document order.
#[derive(Debug)]
struct OrderedEntries<T>(Vec<(String, T)>);

impl<T> OrderedEntries<T> {
    /// Iterates entries in document order.
    fn iter(&self) -> impl Iterator<Item = &(String, T)> {
        self.0.iter()
    }

    /// Returns the entries.
    fn into_inner(self) -> Vec<(String, T)> {
        self.0
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OrderedEntries<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// Visitor collecting mapping entries without reordering.
struct EntriesVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for EntriesVisitor<T> {
    type Value = OrderedEntries<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a mapping")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::new();
        while let Some(entry) = access.next_entry::<String, T>()? {
            entries.push(entry);
        }
        Ok(OrderedEntries(entries))
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// YAML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
