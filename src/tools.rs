//! External tool invocation.
//!
//! Each lint/format tool is an opaque subprocess: we hand it a scratch file
//! or pipe the code through stdin, then capture exit status, stdout and
//! stderr. A binary missing from PATH is a distinguished outcome, not a
//! failure; adapters turn it into an installation hint.

use std::io::Write;
use std::process::Stdio;
use std::time::Duration;
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// Captured output cap (64 KiB). Prevents OOM from runaway tool output.
const MAX_OUTPUT_BYTES: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{0} not found on PATH")]
    NotFound(String),

    #[error("{0} timed out after {1}s")]
    TimedOut(String, u64),

    #[error("failed to run {0}: {1}")]
    Io(String, std::io::Error),
}

#[derive(Debug)]
pub struct ToolOutput {
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs external tools with a fixed per-invocation timeout.
#[derive(Clone)]
pub struct ToolInvoker {
    timeout: Duration,
}

impl ToolInvoker {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub async fn run(&self, program: &str, args: &[&str]) -> Result<ToolOutput, ToolError> {
        self.run_with_stdin(program, args, None).await
    }

    /// Run `program` with `args`, optionally piping `input` through stdin.
    pub async fn run_with_stdin(
        &self,
        program: &str,
        args: &[&str],
        input: Option<&str>,
    ) -> Result<ToolOutput, ToolError> {
        debug!(tool = %program, "running tool");

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ToolError::NotFound(program.to_string()));
            }
            Err(err) => return Err(ToolError::Io(program.to_string(), err)),
        };

        if let Some(input) = input {
            if let Some(mut pipe) = child.stdin.take() {
                // Uploads are small enough to write in full before draining
                // output; a tool that exits early just breaks the pipe.
                let _ = pipe.write_all(input.as_bytes()).await;
                let _ = pipe.shutdown().await;
            }
        }

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => return Err(ToolError::Io(program.to_string(), err)),
            Err(_) => {
                warn!(tool = %program, secs = self.timeout.as_secs(), "tool timed out");
                return Err(ToolError::TimedOut(program.to_string(), self.timeout.as_secs()));
            }
        };

        Ok(ToolOutput {
            status: output.status.code(),
            stdout: capture(program, &output.stdout),
            stderr: capture(program, &output.stderr),
        })
    }
}

fn capture(program: &str, bytes: &[u8]) -> String {
    if bytes.len() > MAX_OUTPUT_BYTES {
        warn!(tool = %program, bytes = bytes.len(), "truncating large output");
        String::from_utf8_lossy(&bytes[..MAX_OUTPUT_BYTES]).into_owned()
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// Write `code` to a scoped temp file with the given suffix. The file is
/// removed when the handle drops, on every exit path.
pub fn scratch_file(suffix: &str, code: &str) -> std::io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile()?;
    file.write_all(code.as_bytes())?;
    file.flush()?;
    Ok(file)
}
