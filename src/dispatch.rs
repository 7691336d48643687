//! Language routing.
//!
//! A fixed, case-insensitive alias table maps submitted language names to
//! adapters. Unknown languages are answered with the unsupported-language
//! payload rather than an error status; dispatch never fails.

use crate::adapters::{
    AiOnlyAdapter, CppAdapter, JavaScriptAdapter, LanguageAdapter, PythonAdapter,
};
use crate::ai::ReviewModel;
use crate::config::ToolchainConfig;
use crate::types::{AnalyzeOutcome, FormatOutcome, UnsupportedLanguage};
use std::sync::Arc;
use tracing::debug;

pub struct Dispatcher {
    python: PythonAdapter,
    javascript: JavaScriptAdapter,
    cpp: CppAdapter,
    java: AiOnlyAdapter,
    go: AiOnlyAdapter,
}

impl Dispatcher {
    pub fn new(tools: &ToolchainConfig, model: Arc<dyn ReviewModel>) -> Self {
        Self {
            python: PythonAdapter::new(tools),
            javascript: JavaScriptAdapter::new(tools),
            cpp: CppAdapter::new(tools),
            java: AiOnlyAdapter::java(Arc::clone(&model)),
            go: AiOnlyAdapter::go(model),
        }
    }

    fn resolve(&self, alias: &str) -> Option<&dyn LanguageAdapter> {
        match alias {
            "python" => Some(&self.python),
            "javascript" | "js" | "typescript" => Some(&self.javascript),
            "cpp" | "c++" | "c" => Some(&self.cpp),
            "java" => Some(&self.java),
            "go" => Some(&self.go),
            _ => None,
        }
    }

    pub async fn analyze(&self, language: &str, code: &str) -> AnalyzeOutcome {
        let alias = language.to_lowercase();
        match self.resolve(&alias) {
            Some(adapter) => {
                debug!(language = %alias, "dispatching analyze");
                adapter.analyze(&alias, code).await
            }
            None => {
                debug!(language = %language, "unsupported language");
                AnalyzeOutcome::Unsupported(UnsupportedLanguage::new(language))
            }
        }
    }

    pub async fn format(&self, language: &str, code: &str) -> FormatOutcome {
        let alias = language.to_lowercase();
        match self.resolve(&alias) {
            Some(adapter) => {
                debug!(language = %alias, "dispatching format");
                adapter.format(&alias, code).await
            }
            None => {
                debug!(language = %language, "unsupported language");
                FormatOutcome::Unsupported(UnsupportedLanguage::new(language))
            }
        }
    }
}
