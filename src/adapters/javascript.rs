//! JavaScript/TypeScript analysis and formatting via ESLint and Prettier.
//!
//! Both tools take the code over stdin, so no scratch file is needed.
//! ESLint still wants a filename to pick its parser, hence the dummy
//! `--stdin-filename` whose extension tracks the submitted alias.

use crate::config::ToolchainConfig;
use crate::tools::{ToolError, ToolInvoker};
use crate::types::{AnalyzeOutcome, FormatChange, FormatOutcome, ToolReport};
use async_trait::async_trait;
use serde::Deserialize;

use super::LanguageAdapter;

const ESLINT_HINT: &str = "ESLint not found on PATH. Install Node + ESLint (npm install -D eslint).";
const PRETTIER_HINT: &str = "Prettier not found on PATH. Install with: npm install -D prettier";

/// ESLint reports per-file; the stdin invocation yields exactly one entry.
#[derive(Deserialize)]
struct FileReport {
    messages: Vec<FileMessage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileMessage {
    #[serde(default)]
    line: Option<u32>,
    #[serde(default)]
    column: Option<u32>,
    rule_id: Option<String>,
    #[serde(default)]
    message: String,
}

fn render_eslint_findings(stdout: &str) -> Result<Vec<String>, serde_json::Error> {
    let reports: Vec<FileReport> = serde_json::from_str(stdout)?;
    Ok(reports
        .iter()
        .flat_map(|report| &report.messages)
        .map(|msg| {
            // Fatal messages can come without a position or rule id.
            format!(
                "{}:{}: {} {}",
                msg.line.unwrap_or(1),
                msg.column.unwrap_or(1),
                msg.rule_id.as_deref().unwrap_or("rule"),
                msg.message
            )
        })
        .collect())
}

fn stdin_filename(alias: &str) -> &'static str {
    if alias == "typescript" {
        "dummy.ts"
    } else {
        "dummy.js"
    }
}

fn prettier_parser(alias: &str) -> &'static str {
    if alias == "typescript" {
        "typescript"
    } else {
        "babel"
    }
}

pub struct JavaScriptAdapter {
    invoker: ToolInvoker,
    eslint_bin: String,
    prettier_bin: String,
    eslint_config: String,
}

impl JavaScriptAdapter {
    pub fn new(config: &ToolchainConfig) -> Self {
        Self {
            invoker: ToolInvoker::new(config.timeout_secs),
            eslint_bin: config.eslint_bin.clone(),
            prettier_bin: config.prettier_bin.clone(),
            eslint_config: config.eslint_config.clone(),
        }
    }
}

#[async_trait]
impl LanguageAdapter for JavaScriptAdapter {
    async fn analyze(&self, alias: &str, code: &str) -> AnalyzeOutcome {
        let args = [
            "-c",
            self.eslint_config.as_str(),
            "-f",
            "json",
            "--stdin",
            "--stdin-filename",
            stdin_filename(alias),
        ];

        let lint = match self
            .invoker
            .run_with_stdin(&self.eslint_bin, &args, Some(code))
            .await
        {
            Ok(output) => {
                let stdout = output.stdout.trim();
                if stdout.is_empty() {
                    let stderr = output.stderr.trim();
                    if stderr.is_empty() {
                        Vec::new()
                    } else {
                        vec![format!("ESLint error: {}", stderr)]
                    }
                } else {
                    match render_eslint_findings(stdout) {
                        Ok(findings) => findings,
                        Err(err) => vec![format!("ESLint parse error: {}", err)],
                    }
                }
            }
            Err(ToolError::NotFound(_)) => {
                return AnalyzeOutcome::Toolchain(ToolReport::missing_tool(ESLINT_HINT));
            }
            Err(err) => vec![format!("ESLint error: {}", err)],
        };

        AnalyzeOutcome::Toolchain(ToolReport::new(lint, "ESLint run completed"))
    }

    async fn format(&self, alias: &str, code: &str) -> FormatOutcome {
        let args = ["--parser", prettier_parser(alias)];

        match self
            .invoker
            .run_with_stdin(&self.prettier_bin, &args, Some(code))
            .await
        {
            Ok(output) if output.success() && !output.stdout.trim().is_empty() => {
                FormatOutcome::Change(FormatChange::formatted(code, output.stdout.trim()))
            }
            Ok(output) => {
                let stderr = output.stderr.trim();
                let reason = if stderr.is_empty() {
                    "unknown error"
                } else {
                    stderr
                };
                FormatOutcome::Change(FormatChange::unchanged(
                    code,
                    format!("Prettier failed: {}", reason),
                ))
            }
            Err(ToolError::NotFound(_)) => {
                FormatOutcome::Change(FormatChange::unchanged(code, PRETTIER_HINT))
            }
            Err(err) => FormatOutcome::Change(FormatChange::unchanged(
                code,
                format!("Prettier failed: {}", err),
            )),
        }
    }
}
