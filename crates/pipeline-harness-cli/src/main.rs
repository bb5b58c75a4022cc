// crates/pipeline-harness-cli/src/main.rs
// ============================================================================
// Module: Pipeline Harness CLI Entry Point
// Description: Runs a declared test suite against the pipeline tool.
// Purpose: Load the suite, execute it, print a summary, and write the report.
// Dependencies: clap, pipeline-harness-config, pipeline-harness-core, thiserror, tokio.
// ============================================================================

//! ## Overview
//! `pipeline-harness` loads a suite document, runs every case against the
//! pipeline tool in declaration order, prints localized progress and a
//! summary, writes the JSON report, and exits 0 only when every case passed.
//! Configuration load and report write failures are fatal and exit 1.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use clap::ArgAction;
use clap::Parser;
use clap::ValueEnum;
use pipeline_harness_cli::console::ConsoleProgress;
use pipeline_harness_cli::console::render_summary;
use pipeline_harness_cli::i18n::Locale;
use pipeline_harness_cli::i18n::set_locale;
use pipeline_harness_cli::t;
use pipeline_harness_config::load_suite;
use pipeline_harness_core::DEFAULT_TIMEOUT;
use pipeline_harness_core::GatePolicy;
use pipeline_harness_core::PipelineTool;
use pipeline_harness_core::ProcessRunner;
use pipeline_harness_core::SuiteRunner;
use pipeline_harness_core::aggregate;
use pipeline_harness_core::runtime::DEFAULT_CLI_PATH;
use pipeline_harness_core::runtime::DEFAULT_RUNTIME;
use pipeline_harness_core::write_report;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "PIPELINE_HARNESS_LANG";
/// Report path used when `--output` is not given.
const DEFAULT_REPORT_PATH: &str = "test-results.json";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "pipeline-harness", disable_version_flag = true)]
struct Cli {
    /// Suite document path (overrides `PIPELINE_HARNESS_CONFIG`; default `test-config.yaml`).
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,
    /// Report output path.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_REPORT_PATH)]
    output: PathBuf,
    /// Program that executes the tool entry point.
    #[arg(long, value_name = "PROG", default_value = DEFAULT_RUNTIME)]
    runtime: String,
    /// Tool entry point passed to the runtime.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CLI_PATH)]
    cli_path: String,
    /// Default per-invocation timeout in seconds.
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,
    /// Timeout in seconds for each setup command (unbounded when omitted).
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    setup_timeout_secs: Option<u64>,
    /// Count a case as passed only when its validations also succeed.
    #[arg(long, action = ArgAction::SetTrue)]
    strict: bool,
    /// Preferred output language (overrides `PIPELINE_HARNESS_LANG`).
    #[arg(long, value_enum, value_name = "LANG")]
    lang: Option<LangArg>,
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue)]
    show_version: bool,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

/// Invocation settings resolved from flags.
#[derive(Debug, Clone, PartialEq)]
struct HarnessSettings {
    /// Tool launch settings.
    tool: PipelineTool,
    /// Default per-invocation timeout.
    timeout: Duration,
    /// Setup command timeout, if bounded.
    setup_timeout: Option<Duration>,
    /// Report destination.
    report_path: PathBuf,
    /// Pass/fail rule.
    gate: GatePolicy,
}

impl HarnessSettings {
    /// Resolves settings from parsed flags.
    fn from_cli(cli: &Cli) -> Self {
        Self {
            tool: PipelineTool {
                runtime: cli.runtime.clone(),
                cli_path: cli.cli_path.clone(),
            },
            timeout: cli.timeout_secs.map_or(DEFAULT_TIMEOUT, Duration::from_secs),
            setup_timeout: cli.setup_timeout_secs.map(Duration::from_secs),
            report_path: cli.output.clone(),
            gate: if cli.strict { GatePolicy::Strict } else { GatePolicy::Execution },
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Loads the suite, runs it, and writes the report.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let settings = HarnessSettings::from_cli(&cli);
    let suite = load_suite(cli.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    write_stdout_line(&t!(
        "suite.start",
        count = suite.cases.len(),
        runtime = settings.tool.runtime,
        cli_path = settings.tool.cli_path
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;

    let progress = ConsoleProgress::new(std::io::stdout());
    let runner = SuiteRunner::new(ProcessRunner::new(settings.tool.clone()), &progress)
        .with_default_timeout(settings.timeout)
        .with_setup_timeout(settings.setup_timeout);
    let run = runner.run(&suite).await;
    let report = aggregate(run, runner.tool(), settings.gate, report_timestamp()?);

    for line in render_summary(&report) {
        write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    write_report(&report, &settings.report_path)
        .map_err(|err| CliError::new(t!("report.write_failed", error = err)))?;
    write_stdout_line(&t!("report.saved", path = settings.report_path.display()))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;

    Ok(if report.all_passed() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

/// Returns the current time as Unix epoch seconds for the report.
fn report_timestamp() -> CliResult<f64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64())
        .map_err(|err| CliError::new(t!("time.system_failed", error = err)))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
