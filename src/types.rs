use serde::{Deserialize, Serialize};

/// Complexity marker used when no complexity tool could run.
pub const COMPLEXITY_UNAVAILABLE: &str = "N/A";

/// Lint + complexity output from a locally installed toolchain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolReport {
    pub lint: Vec<String>,
    pub complexity: String,
}

impl ToolReport {
    pub fn new(lint: Vec<String>, complexity: impl Into<String>) -> Self {
        Self {
            lint,
            complexity: complexity.into(),
        }
    }

    /// Degraded report returned when the lint tool is not installed:
    /// a single installation hint and the `N/A` complexity marker.
    pub fn missing_tool(hint: impl Into<String>) -> Self {
        Self {
            lint: vec![hint.into()],
            complexity: COMPLEXITY_UNAVAILABLE.to_string(),
        }
    }
}

/// Free-text review from the remote completion service. Remote failures
/// are carried in the same field as descriptive text, never as an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiReview {
    pub ai_review: String,
}

impl AiReview {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            ai_review: text.into(),
        }
    }
}

/// Formatter output. `note` explains why `formatted` may equal `original`
/// (missing formatter, formatter failure, no formatter integrated).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatChange {
    pub original: String,
    pub formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl FormatChange {
    pub fn formatted(original: impl Into<String>, formatted: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            formatted: formatted.into(),
            note: None,
        }
    }

    /// The code comes back untouched, with a note saying why.
    pub fn unchanged(original: impl Into<String>, note: impl Into<String>) -> Self {
        let original = original.into();
        Self {
            formatted: original.clone(),
            original,
            note: Some(note.into()),
        }
    }
}

/// Error payload for a language with no registered adapter. Returned with
/// HTTP 200 like every other anticipated condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsupportedLanguage {
    pub error: String,
}

impl UnsupportedLanguage {
    /// `language` is echoed exactly as submitted, original case included.
    pub fn new(language: &str) -> Self {
        Self {
            error: format!("Language {} not supported yet.", language),
        }
    }
}

/// Response body of `POST /api/analyze`. Tool-based languages produce
/// `Toolchain`, AI-only languages produce `Review`; the dispatcher alone
/// produces `Unsupported`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalyzeOutcome {
    Toolchain(ToolReport),
    Review(AiReview),
    Unsupported(UnsupportedLanguage),
}

/// Response body of `POST /api/format`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormatOutcome {
    Change(FormatChange),
    Review(AiReview),
    Unsupported(UnsupportedLanguage),
}
