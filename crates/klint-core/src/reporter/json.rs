use super::{format_timestamp, Reporter, TOOL_URL, TOOL_VERSION};
use crate::types::{sorted_issues, Issue, IssueSummary, Severity};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// JSON document reporter.
///
/// The header opens the top-level object and the footer closes it; the
/// summary and issue sections each contribute one member.
#[derive(Debug, Clone)]
pub struct JsonReporter {
    generated_at: String,
}

#[derive(Serialize)]
struct IssueRecord<'a> {
    path: String,
    line: usize,
    column: usize,
    rule: &'a str,
    category: &'a str,
    severity: Severity,
    message: &'a str,
}

impl<'a> From<&'a Issue> for IssueRecord<'a> {
    fn from(issue: &'a Issue) -> Self {
        Self {
            path: issue.path().display().to_string(),
            line: issue.location().line,
            column: issue.location().column,
            rule: issue.rule_identifier(),
            category: issue.category(),
            severity: issue.severity(),
            message: issue.message(),
        }
    }
}

impl JsonReporter {
    /// Creates a reporter stamped with the current local time.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timestamp(format_timestamp(&chrono::Local::now()))
    }

    /// Creates a reporter with a fixed header timestamp.
    #[must_use]
    pub fn with_timestamp(generated_at: impl Into<String>) -> Self {
        Self {
            generated_at: generated_at.into(),
        }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializes a member value; serialization of these plain types cannot fail,
/// `null` is emitted if it ever does.
fn to_pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

impl Reporter for JsonReporter {
    fn header(&self) -> String {
        format!(
            "{{\n\"version\": {},\n\"url\": {},\n\"timestamp\": {}",
            Value::from(TOOL_VERSION),
            Value::from(TOOL_URL),
            Value::from(self.generated_at.as_str())
        )
    }

    fn handle_summary(&self, number_of_total_files: usize, summary: &IssueSummary) -> String {
        let mut counts = Map::new();
        for severity in Severity::ALL {
            counts.insert(
                severity.as_str().to_string(),
                json!(summary.number_of_issues(severity)),
            );
        }
        let value = json!({
            "numberOfFiles": number_of_total_files,
            "numberOfFilesWithIssues": summary.number_of_files_with_issues(),
            "numberOfIssuesInSeverity": counts,
        });
        format!(",\"summary\": {}", to_pretty(&value))
    }

    fn handle_issues(&self, issues: &[Issue]) -> String {
        if issues.is_empty() {
            return String::new();
        }
        let records: Vec<IssueRecord<'_>> =
            sorted_issues(issues).into_iter().map(IssueRecord::from).collect();
        format!(",\"issues\": {}", to_pretty(&records))
    }

    fn footer(&self) -> String {
        "}".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::render_report;
    use crate::types::Location;

    fn render(issues: &[Issue]) -> Value {
        let mut out = Vec::new();
        render_report(&JsonReporter::with_timestamp("now"), issues, 2, &mut out).unwrap();
        serde_json::from_slice(&out).expect("report should be valid JSON")
    }

    fn issue(path: &str, line: usize) -> Issue {
        Issue::new(
            Location::new(path, line, 1),
            "long_file",
            "size",
            Severity::Minor,
            "File has \"too\" many lines",
        )
    }

    #[test]
    fn full_report_is_valid_json() {
        let doc = render(&[issue("B.kt", 1), issue("A.kt", 9)]);

        assert_eq!(doc["version"], TOOL_VERSION);
        assert_eq!(doc["timestamp"], "now");
        assert_eq!(doc["summary"]["numberOfFiles"], 2);
        assert_eq!(doc["summary"]["numberOfFilesWithIssues"], 2);
        assert_eq!(doc["summary"]["numberOfIssuesInSeverity"]["minor"], 2);

        let issues = doc["issues"].as_array().unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0]["path"], "A.kt");
        assert_eq!(issues[0]["severity"], "minor");
        assert_eq!(issues[1]["message"], "File has \"too\" many lines");
    }

    #[test]
    fn report_without_issues_is_still_valid_json() {
        let doc = render(&[]);
        assert!(doc.get("issues").is_none());
        assert_eq!(doc["summary"]["numberOfFilesWithIssues"], 0);
    }
}
