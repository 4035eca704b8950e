use super::Reporter;
use crate::types::{sorted_issues, Issue, IssueSummary, Severity};

/// Editor-integration format: `path:line:column: warning: message`.
///
/// Critical issues are reported as errors, everything else as warnings.
#[derive(Debug, Clone, Default)]
pub struct XcodeReporter;

impl XcodeReporter {
    /// Creates a reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn level(severity: Severity) -> &'static str {
    if severity == Severity::Critical {
        "error"
    } else {
        "warning"
    }
}

impl Reporter for XcodeReporter {
    fn handle_summary(&self, _number_of_total_files: usize, _summary: &IssueSummary) -> String {
        String::new()
    }

    fn handle_issues(&self, issues: &[Issue]) -> String {
        sorted_issues(issues)
            .iter()
            .map(|issue| {
                format!(
                    "{}: {}: [{}|{}] {}",
                    issue.location(),
                    level(issue.severity()),
                    issue.category(),
                    issue.rule_identifier(),
                    issue.message()
                )
            })
            .collect::<Vec<_>>()
            .join(self.separator())
    }
}
