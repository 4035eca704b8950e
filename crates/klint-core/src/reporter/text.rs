use super::{format_timestamp, Reporter, TOOL_NAME, TOOL_VERSION};
use crate::types::{sorted_issues, Issue, IssueSummary, Severity};

/// Plain-text reporter, one issue per line.
#[derive(Debug, Clone)]
pub struct TextReporter {
    generated_at: String,
}

impl TextReporter {
    /// Creates a reporter stamped with the current local time.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timestamp(format_timestamp(&chrono::Local::now()))
    }

    /// Creates a reporter with a fixed footer timestamp.
    #[must_use]
    pub fn with_timestamp(generated_at: impl Into<String>) -> Self {
        Self {
            generated_at: generated_at.into(),
        }
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for TextReporter {
    fn header(&self) -> String {
        format!("{TOOL_NAME} v{TOOL_VERSION} report")
    }

    fn handle_summary(&self, number_of_total_files: usize, summary: &IssueSummary) -> String {
        let counts: Vec<String> = Severity::ALL
            .iter()
            .map(|s| format!("{}: {}", s, summary.number_of_issues(*s)))
            .collect();
        format!(
            "Summary: Within a total number of {} files, {} files have issues.\n{}",
            number_of_total_files,
            summary.number_of_files_with_issues(),
            counts.join(", ")
        )
    }

    fn handle_issues(&self, issues: &[Issue]) -> String {
        sorted_issues(issues)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(self.separator())
    }

    fn footer(&self) -> String {
        format!(
            "[{TOOL_NAME} v{TOOL_VERSION} generated at {}]",
            self.generated_at
        )
    }
}
