pub mod openrouter;

pub use openrouter::OpenRouterClient;

use crate::error::AiError;
use async_trait::async_trait;

/// Remote review backend.
///
/// `label` is the human-readable language name embedded in the prompt.
/// `payload` is the code, or an instruction-wrapped variant of it when an
/// AI-only adapter routes a format request through review.
#[async_trait]
pub trait ReviewModel: Send + Sync {
    async fn review(&self, label: &str, payload: &str) -> Result<String, AiError>;
}
