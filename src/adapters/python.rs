//! Python analysis and formatting via flake8, radon and black.

use crate::config::ToolchainConfig;
use crate::tools::{scratch_file, ToolError, ToolInvoker, ToolOutput};
use crate::types::{AnalyzeOutcome, FormatChange, FormatOutcome, ToolReport};
use async_trait::async_trait;
use tracing::warn;

use super::LanguageAdapter;

const FLAKE8_HINT: &str = "flake8 not found on PATH. Install with: pip install flake8";
const RADON_HINT: &str = "radon not found on PATH. Install with: pip install radon";
const BLACK_HINT: &str = "black not found on PATH. Install with: pip install black";

/// flake8 output template matching the `line:col: CODE message` shape the
/// other adapters produce.
const FLAKE8_FORMAT: &str = "--format=%(row)d:%(col)d: %(code)s %(text)s";

pub struct PythonAdapter {
    invoker: ToolInvoker,
    flake8_bin: String,
    radon_bin: String,
    black_bin: String,
}

impl PythonAdapter {
    pub fn new(config: &ToolchainConfig) -> Self {
        Self {
            invoker: ToolInvoker::new(config.timeout_secs),
            flake8_bin: config.flake8_bin.clone(),
            radon_bin: config.radon_bin.clone(),
            black_bin: config.black_bin.clone(),
        }
    }

    async fn complexity(&self, path: &str) -> String {
        match self.invoker.run(&self.radon_bin, &["cc", path, "-j"]).await {
            Ok(output) if output.success() => output.stdout.trim().to_string(),
            Ok(output) => format!("radon error: {}", stderr_or_unknown(&output)),
            Err(ToolError::NotFound(_)) => RADON_HINT.to_string(),
            Err(err) => format!("radon error: {}", err),
        }
    }
}

fn stderr_or_unknown(output: &ToolOutput) -> String {
    let stderr = output.stderr.trim();
    if stderr.is_empty() {
        "unknown error".to_string()
    } else {
        stderr.to_string()
    }
}

#[async_trait]
impl LanguageAdapter for PythonAdapter {
    async fn analyze(&self, _alias: &str, code: &str) -> AnalyzeOutcome {
        let file = match scratch_file(".py", code) {
            Ok(file) => file,
            Err(err) => {
                warn!(error = %err, "could not stage python code");
                return AnalyzeOutcome::Toolchain(ToolReport::missing_tool(format!(
                    "temp file error: {}",
                    err
                )));
            }
        };
        let path = file.path().to_string_lossy().to_string();

        let lint = match self
            .invoker
            .run(&self.flake8_bin, &[&path, FLAKE8_FORMAT])
            .await
        {
            Ok(output) => {
                let stdout = output.stdout.trim();
                if !stdout.is_empty() {
                    // flake8 exits 1 whenever it has findings; stdout content
                    // is the findings list either way.
                    stdout.lines().map(str::to_string).collect()
                } else if output.success() {
                    Vec::new()
                } else {
                    vec![format!("flake8 error: {}", output.stderr.trim())]
                }
            }
            Err(ToolError::NotFound(_)) => {
                return AnalyzeOutcome::Toolchain(ToolReport::missing_tool(FLAKE8_HINT));
            }
            Err(err) => vec![format!("flake8 error: {}", err)],
        };

        let complexity = self.complexity(&path).await;

        AnalyzeOutcome::Toolchain(ToolReport::new(lint, complexity))
    }

    async fn format(&self, _alias: &str, code: &str) -> FormatOutcome {
        let file = match scratch_file(".py", code) {
            Ok(file) => file,
            Err(err) => {
                warn!(error = %err, "could not stage python code");
                return FormatOutcome::Change(FormatChange::unchanged(
                    code,
                    format!("temp file error: {}", err),
                ));
            }
        };
        let path = file.path().to_string_lossy().to_string();

        // black rewrites the file in place, so the result is read back from
        // the scratch file rather than captured from stdout.
        match self.invoker.run(&self.black_bin, &[&path]).await {
            Ok(output) if output.success() => match tokio::fs::read_to_string(file.path()).await {
                Ok(formatted) => FormatOutcome::Change(FormatChange::formatted(code, formatted)),
                Err(err) => FormatOutcome::Change(FormatChange::unchanged(
                    code,
                    format!("Black failed: {}", err),
                )),
            },
            Ok(output) => FormatOutcome::Change(FormatChange::unchanged(
                code,
                format!("Black failed: {}", stderr_or_unknown(&output)),
            )),
            Err(ToolError::NotFound(_)) => {
                FormatOutcome::Change(FormatChange::unchanged(code, BLACK_HINT))
            }
            Err(err) => FormatOutcome::Change(FormatChange::unchanged(
                code,
                format!("Black failed: {}", err),
            )),
        }
    }
}
