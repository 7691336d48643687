//! C/C++ analysis via cpplint and lizard. No formatter is integrated.

use crate::config::ToolchainConfig;
use crate::tools::{scratch_file, ToolError, ToolInvoker};
use crate::types::{AnalyzeOutcome, FormatChange, FormatOutcome, ToolReport};
use async_trait::async_trait;
use tracing::warn;

use super::LanguageAdapter;

const CPPLINT_HINT: &str = "cpplint not found. Install with: pip install cpplint";
const LIZARD_HINT: &str = "lizard not found. Install with: pip install lizard";
const NO_FORMATTER_NOTE: &str = "C++ formatting not implemented (consider clang-format).";

/// Cyclomatic complexity threshold passed to lizard.
const LIZARD_CCN: &str = "10";

pub struct CppAdapter {
    invoker: ToolInvoker,
    cpplint_bin: String,
    lizard_bin: String,
}

impl CppAdapter {
    pub fn new(config: &ToolchainConfig) -> Self {
        Self {
            invoker: ToolInvoker::new(config.timeout_secs),
            cpplint_bin: config.cpplint_bin.clone(),
            lizard_bin: config.lizard_bin.clone(),
        }
    }

    async fn complexity(&self, path: &str) -> String {
        match self
            .invoker
            .run(&self.lizard_bin, &["-C", LIZARD_CCN, path])
            .await
        {
            Ok(output) if output.success() => {
                let stdout = output.stdout.trim();
                if stdout.is_empty() {
                    "No complexity issues".to_string()
                } else {
                    stdout.to_string()
                }
            }
            Ok(output) => {
                let stderr = output.stderr.trim();
                let reason = if stderr.is_empty() {
                    "unknown error"
                } else {
                    stderr
                };
                format!("Lizard error: {}", reason)
            }
            Err(ToolError::NotFound(_)) => LIZARD_HINT.to_string(),
            Err(err) => format!("Lizard error: {}", err),
        }
    }
}

#[async_trait]
impl LanguageAdapter for CppAdapter {
    async fn analyze(&self, _alias: &str, code: &str) -> AnalyzeOutcome {
        let file = match scratch_file(".cpp", code) {
            Ok(file) => file,
            Err(err) => {
                warn!(error = %err, "could not stage c++ code");
                return AnalyzeOutcome::Toolchain(ToolReport::missing_tool(format!(
                    "temp file error: {}",
                    err
                )));
            }
        };
        let path = file.path().to_string_lossy().to_string();

        // cpplint writes findings to stderr, one per line, and exits 1 when
        // it found anything.
        let lint = match self.invoker.run(&self.cpplint_bin, &[&path]).await {
            Ok(output) => output
                .stderr
                .trim()
                .lines()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty())
                .collect(),
            Err(ToolError::NotFound(_)) => {
                return AnalyzeOutcome::Toolchain(ToolReport::missing_tool(CPPLINT_HINT));
            }
            Err(err) => vec![format!("cpplint error: {}", err)],
        };

        let complexity = self.complexity(&path).await;

        AnalyzeOutcome::Toolchain(ToolReport::new(lint, complexity))
    }

    async fn format(&self, _alias: &str, code: &str) -> FormatOutcome {
        FormatOutcome::Change(FormatChange::unchanged(code, NO_FORMATTER_NOTE))
    }
}
