//! Remote-review adapters for languages with no local toolchain.
//!
//! Java and Go have no lint/format binaries wired up; both operations go
//! through the review model. Format requests are wrapped in a reformatting
//! instruction and still come back as review text.

use crate::ai::ReviewModel;
use crate::types::{AiReview, AnalyzeOutcome, FormatOutcome};
use async_trait::async_trait;
use std::sync::Arc;

use super::LanguageAdapter;

const JAVA_FORMAT_INSTRUCTION: &str =
    "Please reformat this Java code according to Google Java Style Guide:";
const GO_FORMAT_INSTRUCTION: &str =
    "Please reformat this Go code according to idiomatic Go style (gofmt/goimports):";

pub struct AiOnlyAdapter {
    label: &'static str,
    format_instruction: &'static str,
    model: Arc<dyn ReviewModel>,
}

impl AiOnlyAdapter {
    pub fn java(model: Arc<dyn ReviewModel>) -> Self {
        Self {
            label: "Java",
            format_instruction: JAVA_FORMAT_INSTRUCTION,
            model,
        }
    }

    pub fn go(model: Arc<dyn ReviewModel>) -> Self {
        Self {
            label: "Go",
            format_instruction: GO_FORMAT_INSTRUCTION,
            model,
        }
    }

    /// Remote failures never propagate; their display text becomes the
    /// review body.
    async fn review_text(&self, payload: &str) -> String {
        match self.model.review(self.label, payload).await {
            Ok(text) => text,
            Err(err) => err.to_string(),
        }
    }
}

#[async_trait]
impl LanguageAdapter for AiOnlyAdapter {
    async fn analyze(&self, _alias: &str, code: &str) -> AnalyzeOutcome {
        AnalyzeOutcome::Review(AiReview::new(self.review_text(code).await))
    }

    async fn format(&self, _alias: &str, code: &str) -> FormatOutcome {
        let payload = format!("{}\n\n{}", self.format_instruction, code);
        FormatOutcome::Review(AiReview::new(self.review_text(&payload).await))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AiError;

    /// Echoes the prompt pieces back so tests can see what was sent.
    struct EchoModel;

    #[async_trait]
    impl ReviewModel for EchoModel {
        async fn review(&self, label: &str, payload: &str) -> Result<String, AiError> {
            Ok(format!("{}|{}", label, payload))
        }
    }

    struct KeylessModel;

    #[async_trait]
    impl ReviewModel for KeylessModel {
        async fn review(&self, _label: &str, _payload: &str) -> Result<String, AiError> {
            Err(AiError::MissingKey)
        }
    }

    #[tokio::test]
    async fn test_analyze_forwards_code_with_label() {
        let adapter = AiOnlyAdapter::java(Arc::new(EchoModel));
        let outcome = adapter.analyze("java", "class A {}").await;
        match outcome {
            AnalyzeOutcome::Review(review) => {
                assert_eq!(review.ai_review, "Java|class A {}");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_format_wraps_code_in_instruction() {
        let adapter = AiOnlyAdapter::go(Arc::new(EchoModel));
        let outcome = adapter.format("go", "package main").await;
        match outcome {
            FormatOutcome::Review(review) => {
                assert_eq!(
                    review.ai_review,
                    format!("Go|{}\n\npackage main", GO_FORMAT_INSTRUCTION)
                );
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_key_becomes_review_text() {
        let adapter = AiOnlyAdapter::java(Arc::new(KeylessModel));
        let outcome = adapter.analyze("java", "class A {}").await;
        match outcome {
            AnalyzeOutcome::Review(review) => {
                assert_eq!(review.ai_review, "Error: OPENROUTER_API_KEY not set");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
