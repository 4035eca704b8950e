use super::{escape_markup, Reporter, TOOL_VERSION};
use crate::types::{sorted_issues, Issue, IssueSummary, Severity};
use std::fmt::Write as _;
use std::path::Path;

/// PMD-compatible XML, grouped by file.
#[derive(Debug, Clone, Default)]
pub struct PmdReporter;

impl PmdReporter {
    /// Creates a reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn priority(severity: Severity) -> u8 {
    match severity {
        Severity::Critical => 1,
        Severity::Major => 2,
        Severity::Minor => 3,
        Severity::Cosmetic => 4,
    }
}

impl Reporter for PmdReporter {
    fn header(&self) -> String {
        format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<pmd version=\"klint-{TOOL_VERSION}\">")
    }

    fn handle_summary(&self, _number_of_total_files: usize, _summary: &IssueSummary) -> String {
        String::new()
    }

    fn handle_issues(&self, issues: &[Issue]) -> String {
        let mut xml = String::new();
        let mut current: Option<&Path> = None;

        for issue in sorted_issues(issues) {
            if current != Some(issue.path()) {
                if current.is_some() {
                    xml.push_str("</file>\n");
                }
                let _ = writeln!(
                    xml,
                    "<file name=\"{}\">",
                    escape_markup(&issue.path().display().to_string())
                );
                current = Some(issue.path());
            }

            let location = issue.location();
            let _ = writeln!(
                xml,
                "  <violation begincolumn=\"{}\" endcolumn=\"0\" beginline=\"{}\" endline=\"0\" \
                 priority=\"{}\" rule=\"{}\" ruleset=\"{}\">\n    {}\n  </violation>",
                location.column,
                location.line,
                priority(issue.severity()),
                escape_markup(issue.rule_identifier()),
                escape_markup(issue.category()),
                escape_markup(issue.message()),
            );
        }

        if current.is_some() {
            xml.push_str("</file>");
        }
        xml
    }

    fn footer(&self) -> String {
        "</pmd>".to_string()
    }
}
