//! Suite document validation tests for pipeline-harness-config.
// crates/pipeline-harness-config/tests/document_validation.rs
// =============================================================================
// Module: Document Validation Tests
// Description: Semantic rules applied to parsed suite documents.
// Purpose: Ensure invalid suites are rejected and valid ones map faithfully.
// =============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::path::Path;
use std::time::Duration;

use pipeline_harness_config::ConfigError;
use pipeline_harness_config::parse_suite;
use pipeline_harness_core::JsonCheck;
use pipeline_harness_core::SuiteConfig;

type TestResult = Result<(), String>;

/// Checks that parsing failed with a message containing `needle`.
fn assert_invalid(result: Result<SuiteConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}

/// Every case field maps onto the runtime model.
#[test]
fn full_case_maps_every_field() -> TestResult {
    let suite = parse_suite(
        r"
tests:
  transform:
    pipeline: pipelines/transform.yaml
    working_dir: examples/transform
    expected_outputs:
      - out/result.csv
      - out/summary.txt
    json_validations:
      out/stats.json: [count, mean]
      out/meta.json: []
    timeout_seconds: 5
",
    )
    .map_err(|err| err.to_string())?;

    let case = suite.case("transform").ok_or("missing case")?;
    assert_eq!(case.pipeline_path, "pipelines/transform.yaml");
    assert_eq!(case.working_dir(), Path::new("examples/transform"));
    assert_eq!(
        case.expected_outputs.as_deref(),
        Some(&["out/result.csv".to_string(), "out/summary.txt".to_string()][..])
    );
    assert_eq!(
        case.json_checks.as_deref(),
        Some(
            &[
                JsonCheck {
                    path: "out/stats.json".to_string(),
                    required_fields: vec!["count".to_string(), "mean".to_string()],
                },
                JsonCheck {
                    path: "out/meta.json".to_string(),
                    required_fields: Vec::new(),
                },
            ][..]
        )
    );
    assert_eq!(case.timeout, Some(Duration::from_secs(5)));
    Ok(())
}

/// Omitted optional fields stay absent.
#[test]
fn minimal_case_has_no_checks() -> TestResult {
    let suite = parse_suite("tests:\n  smoke:\n    pipeline: smoke.yaml\n").map_err(|err| err.to_string())?;
    let case = suite.case("smoke").ok_or("missing case")?;
    assert_eq!(case.working_dir(), Path::new("."));
    assert!(case.expected_outputs.is_none());
    assert!(case.json_checks.is_none());
    assert!(case.timeout.is_none());
    assert!(suite.setup_commands.is_empty());
    Ok(())
}

/// JSON documents are accepted as YAML.
#[test]
fn json_documents_parse() -> TestResult {
    let suite = parse_suite(r#"{"setup": ["make"], "tests": {"b": {"pipeline": "b.json"}, "a": {"pipeline": "a.json"}}}"#)
        .map_err(|err| err.to_string())?;
    let names: Vec<&str> = suite.cases.iter().map(|case| case.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a"]);
    Ok(())
}

/// A suite with no tests is valid and empty.
#[test]
fn empty_tests_mapping_is_valid() -> TestResult {
    let suite = parse_suite("tests: {}\n").map_err(|err| err.to_string())?;
    assert!(suite.cases.is_empty());
    Ok(())
}

/// An empty document is rejected.
#[test]
fn empty_document_is_rejected() -> TestResult {
    assert_invalid(parse_suite("  \n"), "config document is empty")
}

/// Cases must name a pipeline.
#[test]
fn empty_pipeline_is_rejected() -> TestResult {
    assert_invalid(
        parse_suite("tests:\n  smoke:\n    pipeline: \"  \"\n"),
        "tests.smoke.pipeline must be non-empty",
    )
}

/// A missing pipeline key is a parse error.
#[test]
fn missing_pipeline_is_rejected() -> TestResult {
    assert_invalid(parse_suite("tests:\n  smoke:\n    working_dir: .\n"), "pipeline")
}

/// Required field names must be non-empty.
#[test]
fn empty_field_name_is_rejected() -> TestResult {
    assert_invalid(
        parse_suite("tests:\n  smoke:\n    pipeline: p.yaml\n    json_validations:\n      out.json: [id, \"\"]\n"),
        "tests.smoke.json_validations.out.json field names must be non-empty",
    )
}

/// Case names must be unique.
#[test]
fn duplicate_case_names_are_rejected() -> TestResult {
    assert_invalid(
        parse_suite("tests:\n  smoke:\n    pipeline: a.yaml\n  smoke:\n    pipeline: b.yaml\n"),
        "duplicate",
    )
}

/// JSON artifact paths must be unique within a case.
#[test]
fn duplicate_json_paths_are_rejected() -> TestResult {
    assert_invalid(
        parse_suite(
            "tests:\n  smoke:\n    pipeline: p.yaml\n    json_validations:\n      out.json: [a]\n      out.json: [b]\n",
        ),
        "duplicate",
    )
}

/// Setup commands must be non-empty.
#[test]
fn empty_setup_command_is_rejected() -> TestResult {
    assert_invalid(parse_suite("setup:\n  - make\n  - \"\"\ntests: {}\n"), "setup[1] must be non-empty")
}

/// Timeouts must be positive.
#[test]
fn zero_timeout_is_rejected() -> TestResult {
    assert_invalid(
        parse_suite("tests:\n  smoke:\n    pipeline: p.yaml\n    timeout_seconds: 0\n"),
        "tests.smoke.timeout_seconds must be greater than zero",
    )
}

/// Unknown keys are rejected at both levels.
#[test]
fn unknown_keys_are_rejected() -> TestResult {
    assert_invalid(parse_suite("tests: {}\nparallel: true\n"), "unknown field")?;
    assert_invalid(
        parse_suite("tests:\n  smoke:\n    pipeline: p.yaml\n    retries: 2\n"),
        "unknown field",
    )
}
