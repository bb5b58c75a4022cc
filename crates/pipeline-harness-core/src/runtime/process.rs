// crates/pipeline-harness-core/src/runtime/process.rs
// ============================================================================
// Module: Process Runner
// Description: Subprocess launch with output capture and wall-clock timeout.
// Purpose: Turn one tool invocation into a structured execution outcome.
// Dependencies: tokio
// ============================================================================

//! ## Overview
//! [`ProcessRunner`] launches `<runtime> <cli_path> run <pipeline>` in a
//! working directory and always returns an [`ExecutionOutcome`]. Launch
//! failures and timeouts are outcomes, not errors. Output streams are drained
//! by background tasks into bounded buffers so that a child blocked on a full
//! pipe cannot stall the deadline, and output captured before a kill survives.
//!
//! ## Invariants
//! - Exactly one invocation per call; no retries.
//! - A timed-out child is killed before the outcome is returned.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::process::ExitStatus;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use tokio::io::AsyncRead;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::core::ExecutionOutcome;
use crate::core::SENTINEL_EXIT_CODE;
use crate::core::setup_timeout_message;
use crate::core::timeout_message;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Timeout applied when the caller does not override it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
/// Runtime used to launch the tool when none is configured.
pub const DEFAULT_RUNTIME: &str = "node";
/// Tool entry point used when none is configured.
pub const DEFAULT_CLI_PATH: &str = "./cli/dist/index.js";
/// Maximum bytes retained per captured stream.
pub const MAX_CAPTURE_BYTES: usize = 8 * 1024 * 1024;
/// Subcommand passed to the tool ahead of the pipeline path.
const RUN_SUBCOMMAND: &str = "run";
/// Time allowed for stream drainers to finish once the child is gone.
const DRAIN_GRACE: Duration = Duration::from_secs(2);
/// Read buffer size for stream drainers.
const CAPTURE_CHUNK_BYTES: usize = 8 * 1024;

// ============================================================================
// SECTION: Tool Definition
// ============================================================================

/// How the pipeline tool is launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineTool {
    /// Program that executes the tool entry point (for example `node`).
    pub runtime: String,
    /// Tool entry point passed as the first argument.
    pub cli_path: String,
}

impl Default for PipelineTool {
    fn default() -> Self {
        Self {
            runtime: DEFAULT_RUNTIME.to_string(),
            cli_path: DEFAULT_CLI_PATH.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Launches the pipeline tool and supervises each invocation.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    /// Tool launch settings.
    tool: PipelineTool,
}

impl ProcessRunner {
    /// Creates a runner for the given tool.
    #[must_use]
    pub const fn new(tool: PipelineTool) -> Self {
        Self {
            tool,
        }
    }

    /// Returns the tool launch settings.
    #[must_use]
    pub const fn tool(&self) -> &PipelineTool {
        &self.tool
    }

    /// Runs the tool once against `pipeline_path` inside `working_dir`.
    pub async fn run(
        &self,
        pipeline_path: &str,
        working_dir: &Path,
        limit: Duration,
    ) -> ExecutionOutcome {
        let mut command = Command::new(&self.tool.runtime);
        command.arg(&self.tool.cli_path).arg(RUN_SUBCOMMAND).arg(pipeline_path);
        command.current_dir(working_dir);
        run_command(command, Some(limit), timeout_message).await
    }
}

/// Runs a setup command line through the platform shell.
///
/// With `limit` set to `None` the command runs until it exits on its own.
pub async fn run_shell(
    command_text: &str,
    working_dir: &Path,
    limit: Option<Duration>,
) -> ExecutionOutcome {
    let mut command = shell_command(command_text);
    command.current_dir(working_dir);
    run_command(command, limit, setup_timeout_message).await
}

/// Spawns `command`, waits up to `limit` when one is set, and classifies the result.
async fn run_command(
    mut command: Command,
    limit: Option<Duration>,
    describe_timeout: fn(Duration) -> String,
) -> ExecutionOutcome {
    command.stdin(Stdio::null());
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());
    command.kill_on_drop(true);

    let started = Instant::now();
    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(err) => return ExecutionOutcome::launch_failed(err.to_string(), started.elapsed()),
    };
    let stdout = StreamCapture::start(child.stdout.take());
    let stderr = StreamCapture::start(child.stderr.take());

    let waited = match limit {
        Some(limit) => timeout(limit, child.wait()).await.map_err(|_| limit),
        None => Ok(child.wait().await),
    };
    match waited {
        Ok(Ok(status)) => {
            let elapsed = started.elapsed();
            let stdout = stdout.finish().await;
            let stderr = stderr.finish().await;
            ExecutionOutcome::exited(exit_code(status), stdout, stderr, elapsed)
        }
        Ok(Err(err)) => {
            let _ = child.kill().await;
            let elapsed = started.elapsed();
            let _ = stdout.finish().await;
            let _ = stderr.finish().await;
            ExecutionOutcome::launch_failed(err.to_string(), elapsed)
        }
        Err(limit) => {
            let _ = child.kill().await;
            let stdout = stdout.finish().await;
            let stderr = stderr.finish().await;
            ExecutionOutcome::timed_out(describe_timeout(limit), limit, stdout, &stderr)
        }
    }
}

// ============================================================================
// SECTION: Stream Capture
// ============================================================================

/// Background drainer for one child output stream.
struct StreamCapture {
    /// Bytes captured so far, capped at [`MAX_CAPTURE_BYTES`].
    buffer: Arc<Mutex<Vec<u8>>>,
    /// Drainer task, absent when the stream was not piped.
    task: Option<JoinHandle<()>>,
}

impl StreamCapture {
    /// Starts draining `reader` into a shared buffer.
    fn start<R>(reader: Option<R>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let task = reader.map(|mut reader| {
            let sink = Arc::clone(&buffer);
            tokio::spawn(async move {
                let mut chunk = vec![0_u8; CAPTURE_CHUNK_BYTES];
                loop {
                    match reader.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(read) => {
                            let mut captured = sink.lock().await;
                            let room = MAX_CAPTURE_BYTES.saturating_sub(captured.len());
                            captured.extend_from_slice(&chunk[..read.min(room)]);
                        }
                    }
                }
            })
        });
        Self {
            buffer,
            task,
        }
    }

    /// Waits briefly for the drainer, then returns what was captured.
    async fn finish(self) -> String {
        if let Some(mut task) = self.task
            && timeout(DRAIN_GRACE, &mut task).await.is_err()
        {
            task.abort();
        }
        let captured = self.buffer.lock().await;
        String::from_utf8_lossy(&captured).into_owned()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Maps an exit status to an exit code; signal deaths report `-signal`.
fn exit_code(status: ExitStatus) -> i32 {
    status
        .code()
        .or_else(|| terminating_signal(status).map(i32::saturating_neg))
        .unwrap_or(SENTINEL_EXIT_CODE)
}

/// Returns the signal that terminated the process.
#[cfg(unix)]
fn terminating_signal(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

/// Returns the signal that terminated the process.
#[cfg(not(unix))]
const fn terminating_signal(_status: ExitStatus) -> Option<i32> {
    None
}

/// Builds a platform shell invocation for `command_text`.
#[cfg(windows)]
fn shell_command(command_text: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(command_text);
    command
}

/// Builds a platform shell invocation for `command_text`.
#[cfg(not(windows))]
fn shell_command(command_text: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(command_text);
    command
}
