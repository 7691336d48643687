//! Report rendering.
//!
//! Turns a submission into a paginated plain-text document under the
//! reports directory. The review section is a fixed placeholder paragraph;
//! wiring it to real analysis output is still open.

use crate::config::ReportsConfig;
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

const TITLE: &str = "AI Code Review Report";
const PLACEHOLDER_REVIEW: &str =
    "This is a placeholder AI review. Integrate your real analysis output here.";

const LINES_PER_PAGE: usize = 50;
const PAGE_WIDTH: usize = 78;
const FORM_FEED: char = '\u{0C}';

pub struct ReportRenderer {
    dir: PathBuf,
}

impl ReportRenderer {
    pub fn from_config(config: &ReportsConfig) -> Self {
        Self {
            dir: config.dir.clone(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Render and persist a report, returning the path it was written to.
    pub async fn write_report(&self, language: &str, code: &str) -> std::io::Result<PathBuf> {
        let generated = Local::now();
        let document = render_document(language, code, generated);

        tokio::fs::create_dir_all(&self.dir).await?;

        let filename = format!(
            "code_review_report_{}_{}.txt",
            sanitize_component(language),
            generated.format("%Y%m%d_%H%M%S")
        );
        let path = self.dir.join(filename);
        tokio::fs::write(&path, document).await?;

        info!(path = %path.display(), "report written");
        Ok(path)
    }
}

/// The language lands in filenames and download headers; anything that
/// could escape the reports directory or upset a header is replaced.
pub(crate) fn sanitize_component(language: &str) -> String {
    language
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn render_document(language: &str, code: &str, generated: DateTime<Local>) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(TITLE.to_string());
    lines.push(String::new());
    lines.push(format!("Language: {}", language));
    lines.push(format!("Generated: {}", generated.format("%Y-%m-%d %H:%M:%S")));
    lines.push(String::new());
    lines.push("Submitted Code:".to_string());
    // Split on '\n' so CR bytes and the trailing newline survive; the code
    // section reassembles to the submission byte for byte.
    for line in code.split('\n') {
        lines.push(line.to_string());
    }
    lines.push(String::new());
    lines.push("AI Review:".to_string());
    lines.push(PLACEHOLDER_REVIEW.to_string());

    paginate(&lines)
}

/// Fixed lines per page, a centered `- Page N of M -` footer on every page,
/// form feeds between pages.
fn paginate(lines: &[String]) -> String {
    let pages: Vec<&[String]> = lines.chunks(LINES_PER_PAGE).collect();
    let total = pages.len();
    let mut out = String::new();

    for (index, page) in pages.iter().enumerate() {
        for line in *page {
            let _ = writeln!(out, "{}", line);
        }
        let footer = format!("- Page {} of {} -", index + 1, total);
        let pad = PAGE_WIDTH.saturating_sub(footer.len()) / 2;
        let _ = writeln!(out, "{}{}", " ".repeat(pad), footer);
        if index + 1 < total {
            out.push(FORM_FEED);
        }
    }

    out
}
