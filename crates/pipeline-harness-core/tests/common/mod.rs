// crates/pipeline-harness-core/tests/common/mod.rs
// =============================================================================
// Module: Harness Test Helpers
// Description: Fake pipeline tool and progress recorder for integration tests.
// Purpose: Drive the runtime against shell scripts instead of a real tool.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use pipeline_harness_core::PipelineTool;
use pipeline_harness_core::ProgressEvent;
use pipeline_harness_core::ProgressSink;

/// Fake tool entry point: `sh tool.sh run <pipeline>` executes the pipeline as a script.
const FAKE_TOOL: &str = "[ \"$1\" = \"run\" ] || exit 64\nexec sh \"$2\"\n";

/// Writes the fake tool into `dir` and returns launch settings for it.
pub fn fake_tool(dir: &Path) -> PipelineTool {
    let tool_path = dir.join("tool.sh");
    fs::write(&tool_path, FAKE_TOOL).unwrap();
    PipelineTool {
        runtime: "sh".to_string(),
        cli_path: tool_path.display().to_string(),
    }
}

/// Writes a pipeline script into `dir` and returns its absolute path.
pub fn write_pipeline(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path.display().to_string()
}

/// Progress sink that records a compact line per event.
#[derive(Default)]
pub struct RecordingProgress {
    /// Recorded lines in emission order.
    pub lines: RefCell<Vec<String>>,
}

impl RecordingProgress {
    /// Returns a snapshot of the recorded lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl ProgressSink for RecordingProgress {
    fn emit(&self, event: &ProgressEvent<'_>) {
        let line = match event {
            ProgressEvent::SetupStarted {
                command,
            } => format!("setup-start {command}"),
            ProgressEvent::SetupFinished {
                record,
            } => format!("setup-done {} {}", record.command, record.outcome.exit_code),
            ProgressEvent::CaseStarted {
                name, ..
            } => format!("case-start {name}"),
            ProgressEvent::ExecutionFinished {
                name,
                outcome,
            } => format!("executed {name} {}", outcome.succeeded),
            ProgressEvent::ArtifactsChecked {
                name,
                result,
            } => format!("artifacts {name} {}", result.succeeded()),
            ProgressEvent::StructuredChecked {
                name,
                path,
                result,
            } => format!("json {name} {path} {}", result.succeeded()),
        };
        self.lines.borrow_mut().push(line);
    }
}
