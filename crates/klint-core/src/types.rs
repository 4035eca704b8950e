//! Core types for lint issues and run summaries.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Severity level for lint issues.
///
/// Variants are declared least severe first, so `Severity::Critical` is the
/// maximum under [`Ord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Style-only finding.
    Cosmetic,
    /// Minor finding that should eventually be addressed.
    Minor,
    /// Major finding that should be fixed.
    Major,
    /// Critical finding that must be fixed.
    Critical,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::Major,
        Severity::Minor,
        Severity::Cosmetic,
    ];

    /// Stable lowercase key used in configuration and report columns.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Cosmetic => "cosmetic",
        }
    }

    /// Capitalized form for table headers.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Major => "Major",
            Self::Minor => "Minor",
            Self::Cosmetic => "Cosmetic",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Critical => 0,
            Self::Major => 1,
            Self::Minor => 2,
            Self::Cosmetic => 3,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known severity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity `{0}` (expected critical, major, minor or cosmetic)")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "cosmetic" => Ok(Self::Cosmetic),
            _ => Err(UnknownSeverity(s.to_string())),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    /// File path as given to the driver.
    pub path: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            path: path.into(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.path.display(), self.line, self.column)
    }
}

/// A single finding recorded by a rule.
///
/// Issues are immutable once built. Two rules reporting the same location
/// produce two issues; nothing is deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    location: Location,
    rule_identifier: String,
    category: String,
    severity: Severity,
    message: String,
}

impl Issue {
    /// Creates a new issue.
    #[must_use]
    pub fn new(
        location: Location,
        rule_identifier: impl Into<String>,
        category: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            location,
            rule_identifier: rule_identifier.into(),
            category: category.into(),
            severity,
            message: message.into(),
        }
    }

    /// Where the issue was found.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Path of the file containing the issue.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.location.path
    }

    /// Identifier of the rule that recorded the issue.
    #[must_use]
    pub fn rule_identifier(&self) -> &str {
        &self.rule_identifier
    }

    /// Free-form grouping tag of the rule.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Severity of the issue.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}: [{}|{}] {}",
            self.location, self.severity, self.category, self.rule_identifier, self.message
        )
    }
}

/// Returns issues ordered by path, line, column and rule identifier.
///
/// The ledger gives no ordering guarantee across runs, so every reporter
/// sorts before rendering.
#[must_use]
pub fn sorted_issues(issues: &[Issue]) -> Vec<&Issue> {
    let mut sorted: Vec<&Issue> = issues.iter().collect();
    sorted.sort_by(|a, b| {
        a.location
            .cmp(&b.location)
            .then_with(|| a.rule_identifier.cmp(&b.rule_identifier))
            .then_with(|| a.message.cmp(&b.message))
    });
    sorted
}

/// Read-only counts derived from a drained issue set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IssueSummary {
    counts: [usize; 4],
    number_of_files_with_issues: usize,
    number_of_total_files: usize,
}

impl IssueSummary {
    /// Builds a summary from issues and the number of files analyzed.
    #[must_use]
    pub fn new(issues: &[Issue], number_of_total_files: usize) -> Self {
        let mut counts = [0; 4];
        let mut files: HashSet<&Path> = HashSet::new();
        for issue in issues {
            counts[issue.severity.index()] += 1;
            files.insert(issue.path());
        }
        Self {
            counts,
            number_of_files_with_issues: files.len(),
            number_of_total_files,
        }
    }

    /// Number of issues at exactly `severity`.
    #[must_use]
    pub fn number_of_issues(&self, severity: Severity) -> usize {
        self.counts[severity.index()]
    }

    /// Total number of issues.
    #[must_use]
    pub fn total_issues(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Number of distinct files with at least one issue.
    #[must_use]
    pub fn number_of_files_with_issues(&self) -> usize {
        self.number_of_files_with_issues
    }

    /// Number of files handed to the run.
    #[must_use]
    pub fn number_of_total_files(&self) -> usize {
        self.number_of_total_files
    }
}
