use super::{escape_markup, format_timestamp, Reporter, TOOL_NAME, TOOL_URL, TOOL_VERSION};
use crate::types::{sorted_issues, Issue, IssueSummary, Severity};
use std::fmt::Write as _;

const STYLE: &str = "\
.severity-critical, .severity-major, .severity-minor, .severity-cosmetic {
  font-weight: bold;
  text-align: center;
  color: #BF0A30;
}
.severity-critical { background-color: #FFC200; }
.severity-major { background-color: #FFD3A6; }
.severity-minor { background-color: #FFEEB5; }
.severity-cosmetic { background-color: #FFAAB5; }
table {
  border: 2px solid gray;
  border-collapse: collapse;
  box-shadow: 3px 3px 4px #AAA;
}
td, th {
  border: 1px solid #D3D3D3;
  padding: 4px 20px 4px 20px;
}
th {
  text-shadow: 2px 2px 2px white;
  border-bottom: 1px solid gray;
  background-color: #E9F4FF;
}";

/// Standalone HTML document with a summary table and an issue table.
#[derive(Debug, Clone)]
pub struct HtmlReporter {
    generated_at: String,
}

impl HtmlReporter {
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

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for HtmlReporter {
    fn header(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n\
             <title>{TOOL_NAME} Report</title>\n<style type=\"text/css\">\n{STYLE}\n</style>\n\
             </head>\n<body>\n<h1>{TOOL_NAME} report</h1>\n<hr />"
        )
    }

    fn handle_summary(&self, number_of_total_files: usize, summary: &IssueSummary) -> String {
        let mut html = String::from("<table>\n  <thead>\n    <tr>\n");
        html.push_str("      <th>Total Files</th>\n      <th>Files with Issues</th>\n");
        for severity in Severity::ALL {
            let _ = writeln!(html, "      <th>{}</th>", severity.title());
        }
        html.push_str("    </tr>\n  </thead>\n  <tbody>\n    <tr>\n");
        let _ = writeln!(html, "      <td>{number_of_total_files}</td>");
        let _ = writeln!(
            html,
            "      <td>{}</td>",
            summary.number_of_files_with_issues()
        );
        for severity in Severity::ALL {
            let _ = writeln!(
                html,
                "      <td class=\"severity-{severity}\">{}</td>",
                summary.number_of_issues(severity)
            );
        }
        html.push_str("    </tr>\n  </tbody>\n</table>");
        html
    }

    fn handle_issues(&self, issues: &[Issue]) -> String {
        if issues.is_empty() {
            return String::new();
        }

        let mut html = String::from(
            "<hr />\n<table>\n  <thead>\n    <tr>\n      <th>File</th>\n      <th>Location</th>\n      \
             <th>Rule Identifier</th>\n      <th>Rule Category</th>\n      <th>Severity</th>\n      \
             <th>Message</th>\n    </tr>\n  </thead>\n  <tbody>\n",
        );
        for issue in sorted_issues(issues) {
            let location = issue.location();
            let _ = writeln!(
                html,
                "    <tr>\n      <td>{}</td>\n      <td>{}:{}</td>\n      <td>{}</td>\n      \
                 <td>{}</td>\n      <td class=\"severity-{}\">{}</td>\n      <td>{}</td>\n    </tr>",
                escape_markup(&location.path.display().to_string()),
                location.line,
                location.column,
                escape_markup(issue.rule_identifier()),
                escape_markup(issue.category()),
                issue.severity(),
                issue.severity(),
                escape_markup(issue.message()),
            );
        }
        html.push_str("  </tbody>\n</table>");
        html
    }

    fn footer(&self) -> String {
        format!(
            "<hr />\n<p>\n  {}\n  |\n  Generated with <a href=\"{TOOL_URL}\">{TOOL_NAME} v{TOOL_VERSION}</a>.\n</p>\n</body>\n</html>",
            escape_markup(&self.generated_at)
        )
    }
}
