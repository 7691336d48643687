pub mod ai_only;
pub mod cpp;
pub mod javascript;
pub mod python;

pub use ai_only::AiOnlyAdapter;
pub use cpp::CppAdapter;
pub use javascript::JavaScriptAdapter;
pub use python::PythonAdapter;

use crate::types::{AnalyzeOutcome, FormatOutcome};
use async_trait::async_trait;

/// One analysis/formatting backend per language family.
///
/// `alias` is the lowercased language identifier the dispatcher resolved;
/// family adapters that cover several aliases use it to pick per-dialect
/// behavior. Both operations are infallible by contract: anything that goes
/// wrong locally or remotely degrades into descriptive payload content.
#[async_trait]
pub trait LanguageAdapter: Send + Sync {
    async fn analyze(&self, alias: &str, code: &str) -> AnalyzeOutcome;
    async fn format(&self, alias: &str, code: &str) -> FormatOutcome;
}
